use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use sdrop::api::Backend;
use sdrop::app::{App, Cli, Outcome};
use sdrop::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };
    cli.apply_to(&mut config);

    // Initialize logging
    if let Err(e) = sdrop::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        sdrop::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let api = match Backend::from_config(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let ansi = config.display.color && std::io::stdout().is_terminal();
    let mut app = App::new(config, api, ansi, std::io::stdin().lock(), std::io::stdout());

    match app.run(cli.command).await {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => {
            debug!("Command did not complete");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
