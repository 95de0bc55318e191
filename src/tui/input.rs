use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, read};

use crate::cli::ParseError;
use crate::terminal::{RawModeGuard, flush, reset_terminal};

/// Single-line editor in raw mode. Returns `None` on Esc / Ctrl+Q.
/// Only characters passing `accept` are inserted.
fn read_input(prompt: &str, initial: &str, accept: impl Fn(char) -> bool) -> Option<String> {
    let mut input: Vec<char> = initial.chars().collect();
    let mut cursor = input.len();
    let mut drawn = input.len();

    let _guard = match RawModeGuard::new() {
        Ok(g) => g,
        Err(_) => return Some(initial.to_string()),
    };

    print!("{}: {}", prompt, initial);
    flush();

    let cancelled = loop {
        let key = match read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => key,
            Ok(_) => continue,
            Err(_) => break false,
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                // process::exit skips destructors
                reset_terminal();
                println!();
                std::process::exit(0);
            }
            KeyCode::Char('q') if ctrl => break true,
            KeyCode::Esc => break true,
            KeyCode::Enter => break false,
            KeyCode::Char('u') if ctrl => {
                input.clear();
                cursor = 0;
            }
            KeyCode::Backspace if cursor > 0 => {
                cursor -= 1;
                input.remove(cursor);
            }
            KeyCode::Delete if cursor < input.len() => {
                input.remove(cursor);
            }
            KeyCode::Left if cursor > 0 => cursor -= 1,
            KeyCode::Right if cursor < input.len() => cursor += 1,
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = input.len(),
            KeyCode::Char(c) if !ctrl && accept(c) => {
                input.insert(cursor, c);
                cursor += 1;
            }
            _ => continue,
        }

        let text: String = input.iter().collect();
        print!("\r{}: {}", prompt, " ".repeat(drawn + 1));
        print!("\r{}: {}", prompt, text);
        print!("\x1b[{}G", prompt.len() + 3 + cursor);
        flush();
        drawn = input.len();
    };

    drop(_guard);
    println!();

    if cancelled {
        None
    } else {
        Some(input.into_iter().collect())
    }
}

pub fn get_editable_input(prompt: &str, initial_value: &str) -> Option<String> {
    read_input(prompt, initial_value, |c| !c.is_control())
}

/// Digits only. `None` when cancelled, `Some(Err)` when the entry overflows.
pub fn get_numeric_input(
    prompt: &str,
    initial_value: usize,
) -> Option<Result<usize, ParseError>> {
    let digits = read_input(prompt, &initial_value.to_string(), |c| c.is_ascii_digit())?;
    Some(parse_numeric(&digits, initial_value))
}

/// An empty entry keeps `initial_value`.
fn parse_numeric(digits: &str, initial_value: usize) -> Result<usize, ParseError> {
    if digits.is_empty() {
        return Ok(initial_value);
    }
    digits
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidNumber(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entry_keeps_current_value() {
        assert_eq!(parse_numeric("", 16), Ok(16));
    }

    #[test]
    fn digits_parse() {
        assert_eq!(parse_numeric("24", 16), Ok(24));
        assert_eq!(parse_numeric("007", 16), Ok(7));
    }

    #[test]
    fn overflowing_entry_is_an_error() {
        let nines = "9".repeat(30);
        assert_eq!(
            parse_numeric(&nines, 16),
            Err(ParseError::InvalidNumber(nines.clone()))
        );
    }
}
