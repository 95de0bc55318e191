mod context;
mod flags;
mod parse;
pub mod prompts;
pub mod quiet;

use std::process::ExitCode;

use crate::error::Error;

pub use context::{Context, Stop};
pub use flags::CliFlags;
pub use parse::{ParseError, parse};

const USAGE: u8 = 2;
const FAILURE: u8 = 1;

/// Run in flag mode. Usage errors exit with 2, everything else with 1.
pub fn run(args: Vec<String>) -> ExitCode {
    ExitCode::from(status(args))
}

fn status(args: Vec<String>) -> u8 {
    let mut ctx = match Context::new(args) {
        Ok(ctx) => ctx,
        Err(e) => {
            prompts::error(&e.to_string());
            prompts::usage_hint();
            return USAGE;
        }
    };

    match ctx.run() {
        Ok(()) | Err(Stop::Done) => 0,
        Err(Stop::Failed(Error::Clipboard(msg))) => {
            prompts::clipboard_error(&msg);
            FAILURE
        }
        Err(Stop::Failed(e)) => {
            prompts::error(&e.to_string());
            FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        std::iter::once("reqpass")
            .chain(s.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(status(args("--bogus")), USAGE);
        assert_eq!(status(args("-d --length")), USAGE);
        assert_eq!(status(args("-d --digits lots")), USAGE);
    }

    #[test]
    fn rejected_input_exits_with_one() {
        assert_eq!(status(args("-d -l 5")), FAILURE);
        assert_eq!(status(args("-d -l 8 --upper 9")), FAILURE);
        assert_eq!(status(args("-d -n 0")), FAILURE);
    }

    #[test]
    fn info_flags_exit_cleanly() {
        assert_eq!(status(args("-d -v")), 0);
    }
}
