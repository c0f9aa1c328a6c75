use crate::symbol::{self, Op, Quantifier, NEGATION};
use crate::{Args, Error, Term};
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Token of a formula in prefix (Polish) notation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Neg,
    Bin(Op),
    /// quantifier together with the variable it binds
    Quant(Quantifier, Term),
    /// predicate letter applied to a run of terms
    Atom(char, Args),
}

impl Token {
    /// Change in the number of operands still needed after reading this token.
    fn demand(&self) -> isize {
        match self {
            Self::Neg | Self::Quant(_, _) => 0,
            Self::Bin(_) => 1,
            Self::Atom(_, _) => -1,
        }
    }

    fn is_unary(&self) -> bool {
        matches!(self, Self::Neg | Self::Quant(_, _))
    }

    fn priority(&self) -> u8 {
        match self {
            Self::Neg => 1,
            Self::Quant(_, _) => 2,
            Self::Bin(op) => op.priority(),
            Self::Atom(_, _) => 0,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "{}", NEGATION),
            Self::Bin(op) => op.fmt(f),
            Self::Quant(q, v) => write!(f, "{}{}", q, v),
            Self::Atom(p, args) => write!(f, "{}{}", p, args),
        }
    }
}

/// Render a token sequence without separators.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Return true if the tokens form exactly one formula in prefix notation.
///
/// This is the iterated reduction of quantifier + body,
/// negation + operand and connective + two operands to a single atom,
/// done in one pass by counting the operands still needed.
pub fn is_prefix(tokens: &[Token]) -> bool {
    let mut needed = 1;
    for token in tokens {
        if needed == 0 {
            return false;
        }
        needed += token.demand();
    }
    needed == 0
}

/// Length of the first complete formula at the start of `tokens`.
pub fn span(tokens: &[Token]) -> usize {
    let mut needed = 1;
    for (i, token) in tokens.iter().enumerate() {
        needed += token.demand();
        if needed == 0 {
            return i + 1;
        }
    }
    tokens.len()
}

/// Token of the surface syntax, which may contain brackets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
    Token(Token),
    Open,
    Close,
}

impl Lexeme {
    fn into_token(self) -> Option<Token> {
        match self {
            Self::Token(t) => Some(t),
            _ => None,
        }
    }
}

fn term(chars: &[char], i: &mut usize) -> Result<Term, Error> {
    let letter = chars[*i];
    *i += 1;
    let start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    let index = if start == *i {
        0
    } else {
        let digits: String = chars[start..*i].iter().collect();
        digits.parse().map_err(|_| Error::Formation(digits))?
    };
    Ok(Term::new(letter, index))
}

fn terms(chars: &[char], i: &mut usize, args: &mut Vec<Term>) -> Result<(), Error> {
    while *i < chars.len() && chars[*i].is_ascii_lowercase() {
        args.push(term(chars, i)?)
    }
    Ok(())
}

/// Return the end of a bracketed term list `(a, b)` starting at `i`.
fn bracketed_terms(chars: &[char], i: usize) -> Option<usize> {
    if chars.get(i) != Some(&'(') || !chars.get(i + 1)?.is_ascii_lowercase() {
        return None;
    }
    let inner = |c: &char| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ',';
    let len = chars[i + 1..].iter().take_while(|c| inner(*c)).count();
    (chars.get(i + 1 + len) == Some(&')')).then(|| i + 1 + len)
}

/// Split a formula string into surface tokens.
///
/// Whitespace is ignored.
/// Operators, brackets, quantifiers and predicates are single characters;
/// the run of terms that follows a predicate belongs to the predicate,
/// and the letter that follows a quantifier is its variable.
pub fn lex(s: &str) -> Result<Vec<Lexeme>, Error> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let err = || Error::Formation(chars.iter().collect());
    let mut result = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let lexeme = if symbol::is_negation(c) {
            i += 1;
            Lexeme::Token(Token::Neg)
        } else if let Some(op) = Op::from_symbol(c) {
            i += 1;
            Lexeme::Token(Token::Bin(op))
        } else if let Some(q) = Quantifier::from_symbol(c) {
            i += 1;
            if !chars.get(i).map_or(false, |c| c.is_ascii_lowercase()) {
                return Err(err());
            }
            Lexeme::Token(Token::Quant(q, term(&chars, &mut i)?))
        } else if c.is_ascii_uppercase() {
            i += 1;
            let mut args = Vec::new();
            if let Some(close) = bracketed_terms(&chars, i) {
                let mut j = i + 1;
                while j < close {
                    match chars[j] {
                        ',' => j += 1,
                        c if c.is_ascii_lowercase() => args.push(term(&chars[..close], &mut j)?),
                        _ => return Err(err()),
                    }
                }
                i = close + 1;
            } else {
                terms(&chars, &mut i, &mut args)?;
            }
            Lexeme::Token(Token::Atom(c, args.into_iter().collect()))
        } else if c == '(' {
            i += 1;
            Lexeme::Open
        } else if c == ')' {
            i += 1;
            Lexeme::Close
        } else {
            return Err(err());
        };
        result.push(lexeme)
    }
    Ok(result)
}

/// Return the tokens if no brackets occur among the lexemes.
pub fn unbracketed(lexemes: &[Lexeme]) -> Option<Vec<Token>> {
    lexemes.iter().cloned().map(Lexeme::into_token).collect()
}

fn unbalanced(lexemes: &[Lexeme]) -> Error {
    let s = lexemes.iter().map(|lx| match lx {
        Lexeme::Token(t) => t.to_string(),
        Lexeme::Open => "(".to_string(),
        Lexeme::Close => ")".to_string(),
    });
    Error::Formation(s.collect())
}

/// Convert infix notation to prefix notation.
///
/// The lexemes are scanned from right to left,
/// keeping operators and closing brackets on a stack.
/// An operator is pushed when the stack top is a closing bracket or
/// binds no tighter than the operator, which makes connectives of
/// equal priority associate to the left.
/// Stacked unary operators are emitted innermost first.
/// The result is not checked for well-formedness.
pub fn to_prefix(lexemes: &[Lexeme]) -> Result<Vec<Token>, Error> {
    let mut stack: Vec<Lexeme> = Vec::new();
    let mut result = VecDeque::new();

    for lexeme in lexemes.iter().rev() {
        match lexeme {
            Lexeme::Close => stack.push(Lexeme::Close),
            Lexeme::Open => loop {
                match stack.pop() {
                    Some(Lexeme::Token(t)) => result.push_front(t),
                    Some(_) => break,
                    None => return Err(unbalanced(lexemes)),
                }
            },
            Lexeme::Token(t @ Token::Atom(_, _)) => result.push_front(t.clone()),
            Lexeme::Token(t) => {
                while let Some(Lexeme::Token(top)) = stack.last() {
                    let both_unary = top.is_unary() && t.is_unary();
                    if top.priority() >= t.priority() && !both_unary {
                        break;
                    }
                    if let Some(Lexeme::Token(top)) = stack.pop() {
                        result.push_front(top)
                    }
                }
                stack.push(Lexeme::Token(t.clone()))
            }
        }
    }

    while let Some(lexeme) = stack.pop() {
        match lexeme {
            Lexeme::Token(t) => result.push_front(t),
            _ => return Err(unbalanced(lexemes)),
        }
    }
    Ok(result.into_iter().collect())
}
