use copypasta::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::pass::policy::{self, MAX_LENGTH, MIN_LENGTH};
use crate::pass::{self, Category, Requirement};
use crate::rng::Global;
use crate::settings::Settings;
use crate::terminal::{clear, reset_terminal};

use super::{Status, enter_prompt, get_editable_input, get_numeric_input, print_form, print_help};

pub fn gen_main_menu() {
    reset_terminal();
    clear();

    let mut settings = Settings::load_from_file().unwrap_or_else(|e| {
        println!("Error loading settings: {}", e);
        Settings::default()
    });
    let mut password: Option<String> = None;
    let mut clipboard: Option<ClipboardContext> = None;
    let mut status = Status::None;

    loop {
        clear();
        print_form(&settings, password.as_deref(), &status);
        status = Status::None;

        let input = match get_editable_input(enter_prompt(), "") {
            Some(s) => s,
            None => break,
        };

        match input.trim() {
            "" => match generate_one(&settings) {
                Ok(new) => {
                    if let Some(mut old) = password.replace(new) {
                        old.zeroize();
                    }
                }
                Err(e) => status = Status::Error(e.to_string()),
            },
            "1" => status = edit_length(&mut settings),
            "2" => status = edit_requirement(&mut settings, Category::Lower),
            "3" => status = edit_requirement(&mut settings, Category::Upper),
            "4" => status = edit_requirement(&mut settings, Category::Digit),
            "5" => status = edit_requirement(&mut settings, Category::Special),
            "c" | "C" => status = copy(&mut clipboard, password.as_deref()),
            "s" | "S" => {
                status = match settings.save_to_file() {
                    Ok(()) => Status::Info("Settings saved.".into()),
                    Err(e) => Status::Error(format!("Failed to save settings: {}", e)),
                }
            }
            "r" | "R" => {
                settings = Settings::default();
                status = Status::Info("Defaults restored.".into());
            }
            "h" | "H" => {
                clear();
                print_help();
                let _ = get_editable_input("Press Enter to return", "");
            }
            "q" | "Q" => break,
            _ => status = Status::Error("Invalid option.".into()),
        }
    }

    if let Some(mut last) = password {
        last.zeroize();
    }
    clear();
}

fn generate_one(settings: &Settings) -> Result<String> {
    policy::validate(settings.pass_length, &settings.requirements)?;
    Ok(pass::generate(
        settings.pass_length,
        &settings.requirements,
        &mut Global,
    )?)
}

fn edit_length(settings: &mut Settings) -> Status {
    let length = match get_numeric_input("Password length", settings.pass_length) {
        None => return Status::None,
        Some(Err(e)) => return Status::Error(e.to_string()),
        Some(Ok(length)) => length,
    };
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Status::Error(format!(
            "Length must be between {MIN_LENGTH} and {MAX_LENGTH}."
        ));
    }
    settings.pass_length = length;
    Status::None
}

fn edit_requirement(settings: &mut Settings, cat: Category) -> Status {
    let prompt = format!("{} minimum (-1 or off to exclude)", cat.label());
    let current = settings.requirements[cat].to_string();
    let Some(raw) = get_editable_input(&prompt, &current) else {
        return Status::None;
    };
    match raw.parse::<Requirement>() {
        Ok(req) => {
            settings.requirements[cat] = req;
            Status::None
        }
        Err(e) => Status::Error(e.to_string()),
    }
}

/// Keeps the context in `clipboard` once opened; on X11 it serves the selection.
fn copy(clipboard: &mut Option<ClipboardContext>, password: Option<&str>) -> Status {
    let Some(password) = password else {
        return Status::Error("Generate a password first.".into());
    };
    let mut ctx = match clipboard.take() {
        Some(ctx) => ctx,
        None => match ClipboardContext::new() {
            Ok(ctx) => ctx,
            Err(e) => return Status::Error(Error::Clipboard(e.to_string()).to_string()),
        },
    };
    let copied = ctx.set_contents(password.to_string());
    *clipboard = Some(ctx);

    match copied {
        Ok(()) => Status::Info("Copied to clipboard.".into()),
        Err(e) => Status::Error(Error::Clipboard(e.to_string()).to_string()),
    }
}
