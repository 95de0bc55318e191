//! CLI context - bundles settings, flags, and clipboard state.

use copypasta::{ClipboardContext, ClipboardProvider};
use rand::Rng;
use zeroize::Zeroize;

use super::{CliFlags, ParseError, prompts, quiet};
use crate::error::{Error, InputError};
use crate::pass::{self, Category, policy};
use crate::rng::{self, Global};
use crate::settings::Settings;
use crate::tui::print_help;

/// Why a run stopped before (or instead of) finishing normally.
pub enum Stop {
    /// Early exit - not an error, just done.
    Done,
    Failed(Error),
}

impl From<Error> for Stop {
    fn from(e: Error) -> Self {
        Stop::Failed(e)
    }
}

impl From<InputError> for Stop {
    fn from(e: InputError) -> Self {
        Stop::Failed(e.into())
    }
}

/// Application context for CLI mode.
pub struct Context {
    pub settings: Settings,
    pub saved_settings: Settings,
    pub clipboard: Option<ClipboardContext>,
    pub flags: CliFlags,
}

impl Context {
    /// Create a new context by parsing command-line arguments.
    pub fn new(args: Vec<String>) -> Result<Self, ParseError> {
        let flags = super::parse(&args)?;
        quiet::set(flags.quiet);

        let saved_settings = if flags.default {
            Settings::default()
        } else {
            Settings::load_from_file().unwrap_or_else(|e| {
                prompts::warn(&format!("Failed to load settings: {}", e));
                Settings::default()
            })
        };

        Ok(Self::with_saved(flags, saved_settings))
    }

    /// Start from `saved_settings` for `-s`, from defaults otherwise. `-d` wins over `-s`.
    fn with_saved(flags: CliFlags, saved_settings: Settings) -> Self {
        let settings = if flags.saved && !flags.default {
            saved_settings.clone()
        } else {
            Settings::default()
        };

        Self {
            settings,
            saved_settings,
            clipboard: None,
            flags,
        }
    }

    /// Run CLI. Returns `Err(Stop::Done)` for early exits.
    pub fn run(&mut self) -> Result<(), Stop> {
        self.handle_info_flags()?;
        self.apply_flags();
        self.validate()?;
        self.handle_save();
        self.open_clipboard()?;
        self.generate_output()
    }

    fn handle_info_flags(&self) -> Result<(), Stop> {
        if self.flags.help {
            print_help();
            return Err(Stop::Done);
        }
        if self.flags.version {
            println!("reqpass {}", env!("CARGO_PKG_VERSION"));
            return Err(Stop::Done);
        }
        Ok(())
    }

    /// Apply CLI flags to settings.
    fn apply_flags(&mut self) {
        if let Some(len) = self.flags.length {
            self.settings.pass_length = len;
        }
        if let Some(num) = self.flags.number {
            self.settings.number_of_passwords = num;
        }

        for cat in Category::ALL {
            if let Some(req) = self.flags.requirement(cat) {
                self.settings.requirements[cat] = req;
            }
        }

        if let Some(ref path) = self.flags.output {
            self.settings.output_file_path = output_path(path);
        }
    }

    /// Reject bad input before anything is saved or written.
    fn validate(&self) -> Result<(), InputError> {
        policy::validate(self.settings.pass_length, &self.settings.requirements)?;
        policy::validate_count(self.settings.number_of_passwords)
    }

    fn handle_save(&mut self) {
        if !self.flags.save {
            return;
        }
        self.saved_settings = Settings {
            to_clipboard: false,
            ..self.settings.clone()
        };
        match self.saved_settings.save_to_file() {
            Ok(()) => prompts::settings_saved(),
            Err(e) => prompts::warn(&format!("Failed to save settings: {}", e)),
        }
    }

    fn open_clipboard(&mut self) -> Result<(), Stop> {
        if !self.flags.clipboard {
            return Ok(());
        }
        match ClipboardContext::new() {
            Ok(c) => {
                self.clipboard = Some(c);
                self.settings.to_clipboard = true;
                Ok(())
            }
            Err(_) if prompts::clipboard_fallback_prompt() => {
                self.settings.to_clipboard = false;
                Ok(())
            }
            Err(_) => Err(Stop::Done),
        }
    }

    /// Generate passwords and handle output.
    pub fn generate_output(&mut self) -> Result<(), Stop> {
        let count = self.settings.number_of_passwords;
        match self.flags.seed {
            Some(seed) => self.emit(count, &mut rng::seeded(seed)),
            None => self.emit(count, &mut Global),
        }
    }

    fn emit<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<(), Stop> {
        let batch = pass::generate_batch(&self.settings, count, rng)?;

        if let (Some(ctx), Some(mut passwords)) = (self.clipboard.as_mut(), batch) {
            let copied = ctx.set_contents(passwords.clone());
            passwords.zeroize();
            copied.map_err(|e| Error::Clipboard(e.to_string()))?;
            if let Ok(mut retrieved) = ctx.get_contents() {
                retrieved.zeroize();
            }
            prompts::clipboard_copied(count);
        } else if !self.settings.output_file_path.is_empty() {
            let full_path = std::fs::canonicalize(&self.settings.output_file_path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| self.settings.output_file_path.clone());
            prompts::passwords_written(count, &full_path);
        }
        Ok(())
    }
}

/// `-o` with no name, `.` or a directory gets the default file name;
/// anything else gets a `.txt` extension if missing.
fn output_path(path: &str) -> String {
    if path == "." {
        "reqpass.txt".to_string()
    } else if path.ends_with('/') {
        format!("{}reqpass.txt", path)
    } else if !path.ends_with(".txt") {
        format!("{}.txt", path)
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse;
    use crate::pass::Requirement::{AtLeast, Forbidden};
    use crate::pass::Requirements;
    use std::fs;
    use std::path::PathBuf;

    fn args(s: &str) -> Vec<String> {
        std::iter::once("reqpass")
            .chain(s.split_whitespace())
            .map(String::from)
            .collect()
    }

    fn saved() -> Settings {
        Settings {
            pass_length: 20,
            number_of_passwords: 2,
            requirements: Requirements::new(AtLeast(1), AtLeast(1), Forbidden, AtLeast(0)),
            ..Settings::default()
        }
    }

    fn context(s: &str) -> Context {
        Context::with_saved(parse(&args(s)).unwrap(), saved())
    }

    fn temp_output(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reqpass-{}-{}.txt", name, std::process::id()))
    }

    #[test]
    fn output_path_defaults() {
        assert_eq!(output_path("."), "reqpass.txt");
        assert_eq!(output_path("out/"), "out/reqpass.txt");
        assert_eq!(output_path("keys"), "keys.txt");
        assert_eq!(output_path("keys.txt"), "keys.txt");
    }

    #[test]
    fn starts_from_defaults_without_saved_flag() {
        let ctx = context("-l 12");
        assert_eq!(ctx.settings, Settings::default());
    }

    #[test]
    fn saved_flag_starts_from_saved_settings() {
        let ctx = context("-s");
        assert_eq!(ctx.settings, saved());
    }

    #[test]
    fn default_flag_wins_over_saved_flag() {
        let ctx = context("-s -d");
        assert_eq!(ctx.settings, Settings::default());
    }

    #[test]
    fn flags_override_saved_settings() {
        let mut ctx = context("-s -l 30 --digits 3 --no-special");
        ctx.apply_flags();
        assert_eq!(ctx.settings.pass_length, 30);
        assert_eq!(ctx.settings.number_of_passwords, 2);
        assert_eq!(
            ctx.settings.requirements,
            Requirements::new(AtLeast(1), AtLeast(1), AtLeast(3), Forbidden)
        );
    }

    #[test]
    fn unknown_flag_fails_before_settings_load() {
        assert!(matches!(
            Context::new(args("--bogus")),
            Err(ParseError::UnknownArg(arg)) if arg == "--bogus"
        ));
    }

    #[test]
    fn run_rejects_short_length() {
        let result = context("-l 5").run();
        assert!(matches!(
            result,
            Err(Stop::Failed(Error::Input(InputError::LengthOutOfRange { length: 5, .. })))
        ));
    }

    #[test]
    fn run_rejects_minimums_over_length() {
        let result = context("--lower 9 -l 8").run();
        assert!(matches!(
            result,
            Err(Stop::Failed(Error::Input(InputError::TooManyRequired {
                required: 9,
                length: 8
            })))
        ));
    }

    #[test]
    fn run_rejects_out_of_range_counts() {
        assert!(matches!(
            context("-n 0").run(),
            Err(Stop::Failed(Error::Input(InputError::CountOutOfRange { count: 0, .. })))
        ));
        let huge = format!("-n {}", usize::MAX / 8);
        assert!(matches!(
            context(&huge).run(),
            Err(Stop::Failed(Error::Input(InputError::CountOutOfRange { .. })))
        ));
    }

    #[test]
    fn invalid_input_writes_nothing() {
        let path = temp_output("rejected");
        let _ = fs::remove_file(&path);

        let result = context(&format!("-l 5 -o {}", path.display())).run();
        assert!(matches!(result, Err(Stop::Failed(_))));
        assert!(!path.exists());
    }

    #[test]
    fn seeded_runs_write_identical_files() {
        let first = temp_output("seed-a");
        let second = temp_output("seed-b");
        for path in [&first, &second] {
            let _ = fs::remove_file(path);
            let mut ctx = context(&format!("-q --seed 7 -l 12 -n 3 -o {}", path.display()));
            assert!(ctx.run().is_ok());
        }

        let a = fs::read_to_string(&first).unwrap();
        let b = fs::read_to_string(&second).unwrap();
        let _ = fs::remove_file(&first);
        let _ = fs::remove_file(&second);

        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 3);
        assert!(a.lines().all(|line| line.len() == 12));
    }
}
