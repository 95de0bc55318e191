use std::env;
use std::process::ExitCode;

mod cli;
mod error;
mod exits;
mod pass;
mod rng;
mod settings;
mod terminal;
mod tui;

fn main() -> ExitCode {
    exits::reset_terminal();
    exits::install_handlers();

    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 if cli::quiet::is_interactive() => {
            tui::run();
            ExitCode::SUCCESS
        }
        _ => cli::run(args),
    }
}
