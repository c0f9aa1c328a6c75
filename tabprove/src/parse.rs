use crate::error::Kind;
use crate::Error;
use log::info;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tableau::Formula;

/// Premises and conclusion of an argument.
#[derive(Clone, Debug)]
pub struct Argument {
    pub premises: Vec<Formula>,
    pub conclusion: Formula,
}

fn no_conclusion() -> Error {
    Error::new(Kind::InputError, "no conclusion given".into())
}

/// Read an argument with one formula per line, the conclusion coming last.
///
/// Blank lines are ignored.
pub fn parse_lines(input: impl BufRead) -> Result<Argument, Error> {
    let mut formulae = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fm = Formula::parse(&line)?;
        info!("loading formula: {}", fm);
        formulae.push(fm);
    }
    let conclusion = formulae.pop().ok_or_else(no_conclusion)?;
    let premises = formulae;
    Ok(Argument {
        premises,
        conclusion,
    })
}

pub fn parse_file(filename: &Path) -> Result<Argument, Error> {
    info!("loading {:?}", filename);
    let file = std::fs::File::open(filename)?;
    parse_lines(BufReader::new(file))
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, Error> {
    let mut line = String::new();
    Ok(match input.read_line(&mut line)? {
        0 => None,
        _ => Some(line),
    })
}

/// Ask for premises until a blank line is entered, then for the conclusion.
///
/// Malformed formulae are asked for again.
/// The end of the input also ends the premises.
pub fn interactive(mut input: impl BufRead, mut output: impl Write) -> Result<Argument, Error> {
    writeln!(output, "Please enter each premise followed by Enter.")?;
    writeln!(output, "Enter a blank premise when done.")?;

    let mut premises = Vec::new();
    loop {
        write!(output, "Premise {}: ", premises.len() + 1)?;
        output.flush()?;
        let line = match read_line(&mut input)? {
            Some(line) if !line.trim().is_empty() => line,
            _ => break,
        };
        match Formula::parse(&line) {
            Ok(fm) => premises.push(fm),
            Err(e) => {
                info!("{}", e);
                writeln!(output, "Poorly formed premise! Please re-enter.")?
            }
        }
    }

    loop {
        write!(output, "Conclusion: ")?;
        output.flush()?;
        let line = read_line(&mut input)?.ok_or_else(no_conclusion)?;
        match Formula::parse(&line) {
            Ok(conclusion) => {
                return Ok(Argument {
                    premises,
                    conclusion,
                })
            }
            Err(e) => {
                info!("{}", e);
                writeln!(output, "Poorly formed conclusion! Please re-enter.")?
            }
        }
    }
}
