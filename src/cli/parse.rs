use thiserror::Error;

use super::CliFlags;
use crate::pass::{Category, Requirement};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid requirement: {0} (use a minimum count, or -1/off to exclude)")]
    InvalidRequirement(String),
    #[error("Missing value after {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArg(String),
}

fn category_flag(arg: &str) -> Option<(Category, bool)> {
    match arg {
        "--lower" => Some((Category::Lower, false)),
        "--upper" => Some((Category::Upper, false)),
        "--digits" => Some((Category::Digit, false)),
        "--special" => Some((Category::Special, false)),
        "--no-lower" => Some((Category::Lower, true)),
        "--no-upper" => Some((Category::Upper, true)),
        "--no-digits" => Some((Category::Digit, true)),
        "--no-special" => Some((Category::Special, true)),
        _ => None,
    }
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ParseError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingValue(flag.clone()))
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, ParseError> {
    s.parse().map_err(|_| ParseError::InvalidNumber(s.to_string()))
}

pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "-b" | "--board" => flags.clipboard = true,
            "-s" | "--saved" => flags.saved = true,
            "-d" | "--default" => flags.default = true,
            "--save" => flags.save = true,
            "-l" | "--length" => flags.length = Some(number(value(args, &mut i)?)?),
            "-n" | "--number" => flags.number = Some(number(value(args, &mut i)?)?),
            "--seed" => flags.seed = Some(number(value(args, &mut i)?)?),
            "-o" | "--output" => {
                // Path is optional; a following flag means "use the default name"
                if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                    i += 1;
                    flags.output = Some(args[i].clone());
                } else {
                    flags.output = Some(".".to_string());
                }
            }
            arg => match category_flag(arg) {
                Some((cat, true)) => flags.set_requirement(cat, Requirement::Forbidden),
                Some((cat, false)) => {
                    let req = value(args, &mut i)?.parse::<Requirement>()?;
                    flags.set_requirement(cat, req);
                }
                None => return Err(ParseError::UnknownArg(arg.to_string())),
            },
        }
        i += 1;
    }

    Ok(flags)
}
