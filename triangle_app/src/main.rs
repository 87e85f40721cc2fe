//! Spinning triangle demo
//!
//! Reads `triangle.toml` from the working directory when present, then opens
//! a window and spins a triangle until the window is closed or Escape is
//! pressed. Any startup or rendering failure is fatal.

use std::process::ExitCode;

use tri_engine::foundation::logging;
use tri_engine::prelude::*;

const CONFIG_FILE: &str = "triangle.toml";

fn run() -> Result<RunSummary, EngineError> {
    let config = AppConfig::load_or_default(CONFIG_FILE)?;
    log::debug!("Configuration: {config:?}");
    Engine::run(&config)
}

fn main() -> ExitCode {
    logging::init();
    log::info!("Starting spinning triangle demo");

    match run() {
        Ok(summary) => {
            log::info!(
                "Demo completed after {} frames, final angle {:.3} rad",
                summary.frames_rendered,
                summary.final_angle
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Demo failed: {e}");
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
