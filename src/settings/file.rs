//! Settings file persistence.
//!
//! One line: `length,number,lower,upper,digits,special,output_file_path`.
//! Commas and pipes inside fields are escaped with `|`.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::Settings;
use crate::pass::{Category, Requirement, Requirements};

const FIELDS: usize = 7;

pub fn save(settings: &Settings) -> std::io::Result<()> {
    let path = get_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;

    file.write_all(encode(settings).as_bytes())?;
    Ok(())
}

pub fn load(settings: &mut Settings) -> std::io::Result<()> {
    let path = get_path();
    if !path.exists() {
        return save(settings);
    }

    let file = OpenOptions::new().read(true).open(&path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if !decode(&line, settings) {
        *settings = Settings::default();
        save(settings)?;
    }
    Ok(())
}

fn encode(settings: &Settings) -> String {
    let reqs = &settings.requirements;
    format!(
        "{},{},{},{},{},{},{}\n",
        settings.pass_length,
        settings.number_of_passwords,
        reqs[Category::Lower],
        reqs[Category::Upper],
        reqs[Category::Digit],
        reqs[Category::Special],
        escape(&settings.output_file_path),
    )
}

/// Apply a settings line. Returns false, leaving `settings` partially
/// updated, if the line is malformed.
fn decode(line: &str, settings: &mut Settings) -> bool {
    let parts = split_escaped(line.trim_end_matches(['\r', '\n']), ',');
    if parts.len() != FIELDS {
        return false;
    }

    let (Ok(length), Ok(number)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) else {
        return false;
    };
    settings.pass_length = length;
    settings.number_of_passwords = number;

    let (Ok(lower), Ok(upper), Ok(digit), Ok(special)) = (
        parts[2].parse::<Requirement>(),
        parts[3].parse::<Requirement>(),
        parts[4].parse::<Requirement>(),
        parts[5].parse::<Requirement>(),
    ) else {
        return false;
    };
    settings.requirements = Requirements::new(lower, upper, digit, special);
    settings.output_file_path = parts[6].clone();
    true
}

#[inline]
fn get_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    Path::new(&home).join(".config/reqpass/settings")
}

fn escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ',' => "|,".to_string(),
            '|' => "||".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn split_escaped(s: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
        } else if c == '|' {
            escape_next = true;
        } else if c == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::Requirement::{AtLeast, Forbidden};

    #[test]
    fn encodes_requirements_as_integers() {
        let settings = Settings {
            pass_length: 20,
            number_of_passwords: 3,
            requirements: Requirements::new(AtLeast(2), Forbidden, AtLeast(1), AtLeast(0)),
            output_file_path: "out/a,b|c.txt".into(),
            to_clipboard: false,
        };
        assert_eq!(encode(&settings), "20,3,2,-1,1,0,out/a|,b||c.txt\n");
    }

    #[test]
    fn decodes_escaped_path() {
        let mut settings = Settings::default();
        assert!(decode("12,2,-1,3,0,off,x|,y.txt\n", &mut settings));
        assert_eq!(settings.pass_length, 12);
        assert_eq!(settings.number_of_passwords, 2);
        assert_eq!(
            settings.requirements,
            Requirements::new(Forbidden, AtLeast(3), AtLeast(0), Forbidden)
        );
        assert_eq!(settings.output_file_path, "x,y.txt");
    }

    #[test]
    fn empty_path_field_survives() {
        let mut settings = Settings::default();
        settings.output_file_path = "stale.txt".into();
        assert!(decode("16,1,0,0,0,0,", &mut settings));
        assert!(settings.output_file_path.is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        let mut settings = Settings::default();
        assert!(!decode("", &mut settings));
        assert!(!decode("16,1,0,0,0", &mut settings));
        assert!(!decode("sixteen,1,0,0,0,0,", &mut settings));
        assert!(!decode("16,1,0,-5,0,0,", &mut settings));
        // Lines written before the format dropped its eighth field.
        assert!(!decode("16,1,0,0,0,0,,true", &mut settings));
    }

    #[test]
    fn split_keeps_empty_fields() {
        assert_eq!(split_escaped("a,,b,", ','), vec!["a", "", "b", ""]);
        assert_eq!(split_escaped("a||b|,c", ','), vec!["a|b,c"]);
    }

    #[test]
    fn encode_then_decode_restores_settings() {
        let saved = Settings {
            pass_length: 32,
            number_of_passwords: 4,
            requirements: Requirements::new(Forbidden, AtLeast(2), AtLeast(2), AtLeast(1)),
            output_file_path: "keys/out.txt".into(),
            to_clipboard: false,
        };
        let mut loaded = Settings::default();
        assert!(decode(&encode(&saved), &mut loaded));
        assert_eq!(loaded, saved);
    }
}
