use std::process::ExitCode;

use interp::{AppConfig, Shell, init_logging};

fn main() -> ExitCode {
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using the current directory", e);
        AppConfig::default()
    });

    if let Err(e) = init_logging(&config.log) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let shell = Shell::with_config(config.shell);

    // Every way out of the session exits the same way.
    if let Err(e) = shell.run_interactive() {
        log::error!("Session ended by a command fault: {:#}", e);
    }

    ExitCode::SUCCESS
}
