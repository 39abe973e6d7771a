use brickdash::cli::dispatcher::Dispatcher;
use brickdash::cli::main_types::Cli;
use brickdash::storage::config::Config;
use brickdash::utils::logging::init_logging;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match Config::config_file_path(cli.config_dir.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Error locating config: {}", err);
            std::process::exit(1);
        }
    };

    let config = match Config::load(Some(config_path.clone())) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };
    debug!(path = %config_path.display(), profiles = config.profiles.len(), "config loaded");

    let dispatcher = Dispatcher::new(config, config_path, &cli);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("   Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
