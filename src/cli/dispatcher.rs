use super::browse::Browser;
use super::main_types::{Cli, Commands, ConfigCommands, OutputFormat};
use crate::api::models::{InventoryFilter, LegoSetFilter};
use crate::api::{ApiClient, CatalogApi};
use crate::core::pages::{Page, Screen};
use crate::core::route::Route;
use crate::core::services::ConfigService;
use crate::display::cards::pretty_json;
use crate::display::{CardRenderer, ProgressSpinner, Theme, loading_message, render_page, screen_json};
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct Dispatcher {
    config: Config,
    config_path: PathBuf,
    profile: Option<String>,
    base_url: Option<String>,
    theme: Option<Theme>,
    format: OutputFormat,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: PathBuf, cli: &Cli) -> Self {
        Self {
            config,
            config_path,
            profile: cli.profile.clone(),
            base_url: cli.base_url.clone(),
            theme: cli.theme,
            format: cli.format,
        }
    }

    fn profile_name(&self) -> String {
        self.config.profile_name(self.profile.as_deref()).to_string()
    }

    /// An explicitly requested profile must exist
    fn check_profile(&self) -> Result<(), AppError> {
        match self.profile.as_deref() {
            Some(name) if self.config.get_profile(name).is_none() => {
                Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    fn resolved_base_url(&self) -> String {
        self.config
            .resolve_base_url(self.base_url.as_deref(), self.profile.as_deref())
    }

    fn build_client(&self) -> Result<ApiClient, AppError> {
        self.check_profile()?;
        let base_url = self.resolved_base_url();
        let timeout = self
            .config
            .resolve_timeout(self.profile.as_deref())
            .map(Duration::from_secs);
        debug!(base_url = %base_url, ?timeout, profile = %self.profile_name(), "building API client");
        Ok(ApiClient::new(base_url, timeout)?)
    }

    fn renderer(&self, base_url: &str) -> CardRenderer {
        let theme = self.config.resolve_theme(self.theme, self.profile.as_deref());
        CardRenderer::new(theme, base_url)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let command = match command {
            Commands::Config { command } => return self.handle_config_command(command),
            other => other,
        };

        let client = self.build_client()?;
        let renderer = self.renderer(&client.base_url);
        let api: Arc<dyn CatalogApi> = Arc::new(client);

        let screen = match command {
            Commands::Dashboard => Screen::for_route(Route::Dashboard, api),
            Commands::Inventory {
                skip,
                limit,
                lego,
                non_lego,
            } => {
                let defaults = InventoryFilter::page_default();
                let filter = InventoryFilter {
                    skip: skip.or(defaults.skip),
                    limit: limit.or(defaults.limit),
                    is_lego: match (lego, non_lego) {
                        (true, _) => Some(true),
                        (_, true) => Some(false),
                        _ => None,
                    },
                };
                Screen::Inventory(Page::new(api, filter))
            }
            Commands::Sets { skip, limit } => {
                let defaults = LegoSetFilter::page_default();
                let filter = LegoSetFilter {
                    skip: skip.or(defaults.skip),
                    limit: limit.or(defaults.limit),
                };
                Screen::LegoSets(Page::new(api, filter))
            }
            Commands::Stats => Screen::for_route(Route::Stats, api),
            Commands::Item { id } => Screen::item(api, id),
            Commands::Images { id } => Screen::images(api, id),
            Commands::Set { set_number } => Screen::lego_set(api, set_number),
            Commands::Ping => Screen::root(api),
            Commands::Browse { route } => {
                let start: Route = route.parse()?;
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut browser = Browser::new(api, &renderer, self.format, std::io::stdout());
                return browser.run(start, stdin).await;
            }
            Commands::Config { .. } => {
                return Err(CliError::InvalidArguments(
                    "config commands do not use the API".to_string(),
                )
                .into());
            }
        };

        self.show_once(screen, &renderer).await
    }

    /// Load a page once, print it, and fail when nothing could be loaded
    async fn show_once(&self, mut screen: Screen, renderer: &CardRenderer) -> Result<(), AppError> {
        let mut spinner = ProgressSpinner::new(loading_message(&screen).to_string());
        spinner.start();
        screen.load().await;
        spinner.stop();

        match self.format {
            OutputFormat::Cards => println!("{}", render_page(renderer, &screen)?),
            OutputFormat::Json => println!("{}", pretty_json(&screen_json(&screen)?)?),
        }

        if screen.all_failed() {
            return Err(CliError::PageFailed {
                page: screen.title(),
            }
            .into());
        }
        Ok(())
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.check_profile()?;
                let service = ConfigService::new(self.config.clone());
                println!("Config file: {}", self.config_path.display());
                println!("Active profile: {}", self.profile_name());
                println!("Base URL: {}", self.resolved_base_url());
                for line in service.describe() {
                    println!("{}", line);
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                let profile = self.profile_name();
                let mut service = ConfigService::new(self.config.clone());
                service.set_profile_field(&profile, &key, &value)?;
                service.save_config(Some(self.config_path.clone()))?;
                info!(profile = %profile, key = %key, "configuration updated");
                println!("✅ Set {} = {} for profile '{}'", key, value, profile);
                Ok(())
            }
        }
    }
}
