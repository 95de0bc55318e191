//! Batch generation to stdout, a file, or a clipboard buffer.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use zeroize::Zeroize;

use super::generate_into;
use crate::error::Result;
use rand::Rng;
use crate::settings::Settings;

/// Generate `count` passwords. Returns the newline-joined batch when the
/// settings ask for the clipboard, otherwise writes it out and returns `None`.
pub fn generate_batch<R: Rng>(
    settings: &Settings,
    count: usize,
    rng: &mut R,
) -> Result<Option<String>> {
    if settings.to_clipboard {
        let mut collected = Vec::new();
        write_batch(settings, count, rng, &mut collected)?;
        // Trailing newline would end up in the pasted text.
        if collected.last() == Some(&b'\n') {
            collected.pop();
        }
        let passwords = collected.iter().copied().map(char::from).collect();
        collected.zeroize();
        return Ok(Some(passwords));
    }

    if !settings.output_file_path.is_empty() {
        let mut file = BufWriter::new(open_output(&settings.output_file_path)?);
        write_batch(settings, count, rng, &mut file)?;
        file.flush()?;
    } else {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_batch(settings, count, rng, &mut out)?;
        out.flush()?;
    }
    Ok(None)
}

/// Write `count` newline-terminated passwords to `out`.
pub fn write_batch<R: Rng, W: Write>(
    settings: &Settings,
    count: usize,
    rng: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut buf = Vec::with_capacity(settings.pass_length + 1);

    for _ in 0..count {
        let written = write_one(settings, rng, &mut buf, out);
        buf.zeroize();
        written?;
    }
    Ok(())
}

fn write_one<R: Rng, W: Write>(
    settings: &Settings,
    rng: &mut R,
    buf: &mut Vec<u8>,
    out: &mut W,
) -> Result<()> {
    generate_into(settings.pass_length, &settings.requirements, rng, buf)?;
    buf.push(b'\n');
    out.write_all(buf)?;
    Ok(())
}

fn open_output(path: &str) -> std::io::Result<fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
