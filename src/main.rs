use std::io;
use std::process::ExitCode;

use staffdb::config::{config_candidates, discover_config};
use staffdb::console::Console;
use staffdb::menu::Menu;
use staffdb::records::EmployeeStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let config = match discover_config(&config_candidates()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize the logging system using tracing subscriber
    init_logging(&config.logging.level);
    info!("Starting staffdb with database {:?}", config.database.path);

    let store = EmployeeStore::open(&config.database.path);
    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    match Menu::new(store, console).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
