//! Error types.

use thiserror::Error;

use crate::cli::ParseError;

/// Precondition failures detected by the generator itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("password length must be at least 1")]
    ZeroLength,
    #[error("every character category is forbidden")]
    NothingPermitted,
    #[error("{required} required characters do not fit in a password of length {length}")]
    TooManyRequired { required: usize, length: usize },
    #[error("no permitted characters to fill position {position}")]
    EmptyFill { position: usize },
}

/// User input rejected before the generator is called.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Password length must be between {min} and {max} characters (got {length}).")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },
    #[error(
        "The minimum character counts add up to {required}, more than the password length of {length}."
    )]
    TooManyRequired { required: usize, length: usize },
    #[error("At least one character type must be allowed.")]
    NothingPermitted,
    #[error("Number of passwords must be between 1 and {max} (got {count}).")]
    CountOutOfRange { count: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
