use crate::pass::charset::entropy_bits;
use crate::pass::policy::{MAX_LENGTH, MAX_PASSWORDS, MIN_LENGTH};
use crate::pass::{Category, Requirement};
use crate::settings::Settings;
use crate::terminal::{
    DIM, RESET, UNDERLINE, box_bottom, box_line, box_line_center, box_opt, box_top,
    box_wrapped_center, entropy_strength, flush, print_error, print_rule, print_success,
};

/// Message shown under the form after the last action.
pub enum Status {
    None,
    Info(String),
    Error(String),
}

pub fn enter_prompt() -> &'static str {
    "Enter option (or press Enter to generate)"
}

pub fn print_help() {
    box_top("Reqpass");
    box_line_center("Password generator with guaranteed character minimums");
    box_line("");
    box_line("MODES:");
    box_line("  1) Interactive: Run without arguments. Opens a form to set the");
    box_line("     length and per-type minimums, generate, and copy.");
    box_line("  2) Client: Pass flags directly (e.g., -l 20 --digits 2).");
    box_line("");
    box_line("USAGE:");
    box_line("  reqpass [OPTIONS]");
    box_line("");
    box_line("REQUIREMENTS:");
    box_line("  Each character type takes a minimum count, or -1 / off to");
    box_line("  exclude it. 0 allows the type without requiring it.");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Password:");
    box_opt(
        "  -l, --length <N>",
        &format!("Characters per password, {MIN_LENGTH}-{MAX_LENGTH} (default: 16)"),
    );
    box_opt(
        "  -n, --number <N>",
        &format!("How many passwords to generate, 1-{MAX_PASSWORDS} (default: 1)"),
    );
    box_opt("      --lower <REQ>", "Lowercase letters a-z");
    box_opt("      --upper <REQ>", "Uppercase letters A-Z");
    box_opt("      --digits <REQ>", "Digits 0-9");
    box_opt("      --special <REQ>", "Symbols such as ! # % ? @ ~");
    box_opt("      --no-<TYPE>", "Exclude a type: --no-lower, --no-upper, --no-digits, --no-special");
    box_opt("      --seed <N>", "Repeatable output from a fixed seed (not for real secrets)");
    box_line("");
    box_line(" Output:");
    box_opt("  -o, --output [FILE]", "Append to file (default: reqpass.txt)");
    box_opt("  -b, --board", "Copy to clipboard instead of printing");
    box_opt("  -q, --quiet", "Suppress all output except passwords");
    box_line("");
    box_line(" Settings:");
    box_opt("  -s, --saved", "Start from saved settings");
    box_opt("  -d, --default", "Start from built-in defaults");
    box_opt("      --save", "Save the resulting settings");
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  reqpass                          Interactive form");
    box_line("  reqpass -l 20                    One password, 20 characters");
    box_line("  reqpass -l 12 --digits 2 -n 5    Five passwords, 2+ digits each");
    box_line("  reqpass --no-special --upper 1   Alphanumeric, 1+ uppercase");
    box_line("  reqpass -l 32 -b                 Copy to clipboard");
    box_line("");
    box_bottom();
    println!();
}

fn describe(req: Requirement) -> String {
    match req {
        Requirement::Forbidden => format!("{DIM}excluded{RESET}"),
        Requirement::AtLeast(0) => "allowed".to_string(),
        Requirement::AtLeast(n) => format!("at least {n}"),
    }
}

pub fn print_form(settings: &Settings, password: Option<&str>, status: &Status) {
    let reqs = &settings.requirements;

    box_top("Password Requirements");
    box_line_center("Esc/CTRL+Q: cancel input | CTRL+U: clear input");
    box_line("");
    box_line(&format!("{UNDERLINE}Length{RESET}:"));
    box_line(&format!(
        "  1) Characters: {} ({MIN_LENGTH}-{MAX_LENGTH})",
        settings.pass_length
    ));
    box_line("");
    box_line(&format!("{UNDERLINE}Character Types{RESET}:"));
    for (n, cat) in Category::ALL.into_iter().enumerate() {
        box_line(&format!("  {}) {}: {}", n + 2, cat.label(), describe(reqs[cat])));
    }
    box_line("");
    box_line(&format!(
        "  Required: {} of {}",
        reqs.total_mandatory(),
        settings.pass_length
    ));
    if reqs.any_permitted() {
        let bits = entropy_bits(settings.pass_length, reqs);
        box_line(&format!(
            "  Entropy: {:.1} bits ({})",
            bits,
            entropy_strength(bits)
        ));
    }
    box_line(&format!("  Source: {}", crate::rng::entropy_source()));

    if let Some(password) = password {
        box_line("");
        print_rule();
        box_line_center(&format!("{UNDERLINE}Password{RESET}"));
        box_wrapped_center(password);
    }

    box_line("");
    print_rule();
    if password.is_some() {
        box_line("  Enter) generate | c) copy | s) save | r) defaults | h) help | q) quit");
    } else {
        box_line("  Enter) generate | s) save | r) defaults | h) help | q) quit");
    }
    box_bottom();

    match status {
        Status::None => println!(),
        Status::Info(msg) => print_success(msg),
        Status::Error(msg) => print_error(msg),
    }
    flush();
}
