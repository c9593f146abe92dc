//! Replay a recorded gesture script and print the resulting drawing.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting RulerSet replay");

    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: rulerset-replay <script.json>");
        return ExitCode::from(2);
    };

    match rulerset_app::replay_file(&path) {
        Ok(outcome) => {
            println!("{}", outcome.drawing_json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
