use crate::symbol::{Op, Quantifier};
use crate::token::{self, Lexeme, Token};
use crate::{Error, Term};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::ops::Neg;
use core::str::FromStr;

/// Formula of first-order logic, stored in prefix (Polish) notation.
///
/// Every formula consists of exactly one well-formed token sequence;
/// constructing a formula from anything else fails with
/// [`Error::Formation`].
/// Two formulae are equal if and only if their token sequences are equal.
///
/// Formulae can be given in prefix or (bracketed) infix notation:
///
/// ~~~
/// # use tableau::Formula;
/// let infix: Formula = "(P>(Q&R))".parse().unwrap();
/// let prefix: Formula = ">P&QR".parse().unwrap();
/// assert_eq!(infix, prefix);
/// assert_eq!(infix.to_string(), ">P&QR");
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Formula(Vec<Token>);

/// Major operator of a formula together with its major operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Atom,
    Neg(Formula),
    Bin(Op, Formula, Formula),
    Quant(Quantifier, Term, Formula),
}

impl Formula {
    /// Parse a formula given in prefix or infix notation.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::from_lexemes(&token::lex(s)?)
    }

    /// Build a formula from tokens in prefix or (unbracketed) infix notation.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, Error> {
        let lexemes: Vec<_> = tokens.into_iter().map(Lexeme::Token).collect();
        Self::from_lexemes(&lexemes)
    }

    fn from_lexemes(lexemes: &[Lexeme]) -> Result<Self, Error> {
        if let Some(tokens) = token::unbracketed(lexemes) {
            if token::is_prefix(&tokens) {
                return Ok(Self(tokens));
            }
        }
        let tokens = token::to_prefix(lexemes)?;
        if token::is_prefix(&tokens) {
            Ok(Self(tokens))
        } else {
            Err(Error::Formation(token::render(&tokens)))
        }
    }

    /// Wrap a token slice that is known to be well-formed.
    fn from_slice(tokens: &[Token]) -> Self {
        debug_assert!(token::is_prefix(tokens));
        Self(tokens.to_vec())
    }

    /// Build the quantification of `body` over `v`.
    pub fn quantified(q: Quantifier, v: Term, body: Self) -> Self {
        let mut tokens = Vec::with_capacity(body.0.len() + 1);
        tokens.push(Token::Quant(q, v));
        tokens.extend(body.0);
        Self(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// Return the operator that would be evaluated last, if any.
    ///
    /// Atoms (single predicates) have no major operator.
    pub fn major_operator(&self) -> Option<&Token> {
        if self.0.len() > 1 {
            self.0.first()
        } else {
            None
        }
    }

    /// Return the operands of the major operator.
    ///
    /// An atom is its own (single) operand.
    pub fn major_operands(&self) -> Vec<Self> {
        match self.shape() {
            Shape::Atom => Vec::from([self.clone()]),
            Shape::Neg(fm) | Shape::Quant(_, _, fm) => Vec::from([fm]),
            Shape::Bin(_, l, r) => Vec::from([l, r]),
        }
    }

    /// Decompose the formula into its major operator and operands.
    pub fn shape(&self) -> Shape {
        let rest = &self.0[1..];
        match &self.0[0] {
            Token::Atom(_, _) => Shape::Atom,
            Token::Neg => Shape::Neg(Self::from_slice(rest)),
            Token::Quant(q, v) => Shape::Quant(*q, *v, Self::from_slice(rest)),
            Token::Bin(op) => {
                let (l, r) = rest.split_at(token::span(rest));
                Shape::Bin(*op, Self::from_slice(l), Self::from_slice(r))
            }
        }
    }

    /// Return all terms that occur free in the formula, without duplicates.
    ///
    /// ~~~
    /// # use tableau::{Formula, Term};
    /// let fm: Formula = "(@xRxa&#yQyb)".parse().unwrap();
    /// assert_eq!(fm.constants(), vec![Term::letter('a'), Term::letter('b')]);
    /// ~~~
    pub fn constants(&self) -> Vec<Term> {
        let mut result = Vec::new();
        free_terms(&self.0, &mut Vec::new(), &mut result);
        result
    }

    /// Replace all free occurrences of `var` by `constant`.
    ///
    /// Quantifiers that would capture `constant` have their variable
    /// renamed first, so `#y~Rxy` with `y` for `x` becomes `#a~Rya`.
    ///
    /// ~~~
    /// # use tableau::{Formula, Term};
    /// let fm: Formula = "&Fx#yRxy".parse().unwrap();
    /// let fm = fm.substitute(Term::letter('x'), Term::letter('y'));
    /// assert_eq!(fm, "&Fy#aRya".parse().unwrap());
    /// ~~~
    pub fn substitute(&self, var: Term, constant: Term) -> Self {
        let mut tokens = Vec::with_capacity(self.0.len());
        substitute(&self.0, var, constant, &mut tokens);
        Self(tokens)
    }

    /// Return true if the formula is a predicate, possibly negated once.
    pub fn is_atom(&self) -> bool {
        matches!(
            self.0.as_slice(),
            [Token::Atom(_, _)] | [Token::Neg, Token::Atom(_, _)]
        )
    }

    /// Return true if one formula is the negation of the other,
    /// provided that both are atoms.
    pub fn contradicts(&self, other: &Self) -> bool {
        self.is_atom() && other.is_atom() && (self.negates(other) || other.negates(self))
    }

    fn negates(&self, other: &Self) -> bool {
        self.0.first() == Some(&Token::Neg) && self.0[1..] == other.0[..]
    }

    /// Display the formula in fully bracketed infix notation.
    ///
    /// ~~~
    /// # use tableau::Formula;
    /// let fm: Formula = "@x>Fx~Gx".parse().unwrap();
    /// assert_eq!(fm.infix().to_string(), "∀x (Fx → ¬Gx)");
    /// ~~~
    pub fn infix(&self) -> Infix<'_> {
        Infix(&self.0)
    }
}

/// Collect the free terms of the first formula in `tokens`, returning its length.
///
/// The variables bound on the way to the current subformula are in `bound`;
/// a quantifier binds its variable only while its body is traversed.
fn free_terms(tokens: &[Token], bound: &mut Vec<Term>, out: &mut Vec<Term>) -> usize {
    match &tokens[0] {
        Token::Atom(_, args) => {
            for t in args {
                if !bound.contains(t) && !out.contains(t) {
                    out.push(*t)
                }
            }
            1
        }
        Token::Neg => 1 + free_terms(&tokens[1..], bound, out),
        Token::Quant(_, v) => {
            bound.push(*v);
            let len = free_terms(&tokens[1..], bound, out);
            bound.pop();
            1 + len
        }
        Token::Bin(_) => {
            let l = free_terms(&tokens[1..], bound, out);
            let r = free_terms(&tokens[1 + l..], bound, out);
            1 + l + r
        }
    }
}

/// All terms occurring in `tokens`, bound or free.
fn all_terms(tokens: &[Token]) -> Vec<Term> {
    let mut result = Vec::new();
    for t in tokens {
        match t {
            Token::Atom(_, args) => crate::extend_unique(&mut result, args.iter().copied()),
            Token::Quant(_, v) => crate::extend_unique(&mut result, [*v]),
            Token::Neg | Token::Bin(_) => (),
        }
    }
    result
}

fn substitute(tokens: &[Token], var: Term, constant: Term, out: &mut Vec<Token>) -> usize {
    match &tokens[0] {
        Token::Atom(p, args) => {
            out.push(Token::Atom(*p, args.replace(var, constant)));
            1
        }
        // the variable is rebound here, so nothing below is free
        Token::Quant(_, v) if *v == var => {
            let len = token::span(tokens);
            out.extend_from_slice(&tokens[..len]);
            len
        }
        // rename the variable to keep `constant` free
        Token::Quant(q, v) if *v == constant => {
            let len = token::span(tokens);
            let body = Formula::from_slice(&tokens[1..len]);
            if !body.constants().contains(&var) {
                out.extend_from_slice(&tokens[..len]);
                return len;
            }
            let mut avoid = all_terms(body.tokens());
            avoid.extend([var, constant]);
            let renamed = Term::fresh(&avoid);
            out.push(Token::Quant(*q, renamed));
            substitute(&body.substitute(*v, renamed).0, var, constant, out);
            len
        }
        Token::Neg | Token::Quant(_, _) => {
            out.push(tokens[0].clone());
            1 + substitute(&tokens[1..], var, constant, out)
        }
        Token::Bin(_) => {
            out.push(tokens[0].clone());
            let l = substitute(&tokens[1..], var, constant, out);
            let r = substitute(&tokens[1 + l..], var, constant, out);
            1 + l + r
        }
    }
}

impl Neg for Formula {
    type Output = Self;

    fn neg(self) -> Self {
        let mut tokens = Vec::with_capacity(self.0.len() + 1);
        tokens.push(Token::Neg);
        tokens.extend(self.0);
        Self(tokens)
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|t| t.fmt(f))
    }
}

/// Formula in infix notation, see [`Formula::infix`].
pub struct Infix<'a>(&'a [Token]);

impl<'a> Infix<'a> {
    fn write(tokens: &[Token], f: &mut fmt::Formatter<'_>) -> Result<usize, fmt::Error> {
        match &tokens[0] {
            Token::Atom(_, _) => {
                tokens[0].fmt(f)?;
                Ok(1)
            }
            Token::Neg => {
                write!(f, "¬")?;
                Ok(1 + Self::write(&tokens[1..], f)?)
            }
            Token::Quant(q, v) => {
                write!(f, "{}{} ", q.pretty(), v)?;
                Ok(1 + Self::write(&tokens[1..], f)?)
            }
            Token::Bin(op) => {
                write!(f, "(")?;
                let l = Self::write(&tokens[1..], f)?;
                write!(f, " {} ", op.pretty())?;
                let r = Self::write(&tokens[1 + l..], f)?;
                write!(f, ")")?;
                Ok(1 + l + r)
            }
        }
    }
}

impl<'a> Display for Infix<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write(self.0, f).map(|_| ())
    }
}
