//! Entry point for the timeline ranking command.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = tideline_cli::run() {
        eprintln!("tideline: {err}");
        std::process::exit(1);
    }
}
