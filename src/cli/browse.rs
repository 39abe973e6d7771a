//! Interactive navigation driven by line commands on stdin.
//!
//! The next command is read while a fetch is still in flight. Navigating
//! drops the mounted page, which cancels its cycle; a filter change or a
//! refresh replaces the pending fetch, so a slow earlier response is never
//! applied over newer state.

use super::main_types::OutputFormat;
use crate::api::CatalogApi;
use crate::core::pages::{FilterChange, Screen, ScreenFetch, ScreenSettled};
use crate::core::route::Route;
use crate::display::{CardRenderer, render_page, screen_json};
use crate::error::{AppError, CliError};
use crate::utils::error_helpers::convert_io_to_display_error;
use crate::utils::validation::parse_lego_flag;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const HELP_TEXT: &str = "\
Commands:
  go <route>        open dashboard, inventory, lego-sets or stats
  limit <n>         page size (1-1000)
  skip <n>          number of records to skip
  lego <yes|no|all> inventory LEGO filter
  refresh           reload the current page
  help              show this help
  quit              leave browse mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Go(Route),
    Filter(FilterChange),
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>, CliError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let number = |name: &str| -> Result<u32, CliError> {
        let raw = arg.ok_or_else(|| {
            CliError::InvalidArguments(format!("'{}' needs a number", name))
        })?;
        raw.parse::<u32>().map_err(|_| {
            CliError::InvalidArguments(format!("'{}' is not a valid {}", raw, name))
        })
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "go" | "open" => {
            let route = arg.ok_or_else(|| {
                CliError::InvalidArguments("'go' needs a route".to_string())
            })?;
            BrowseCommand::Go(route.parse()?)
        }
        "limit" => BrowseCommand::Filter(FilterChange::Limit(number("limit")?)),
        "skip" => BrowseCommand::Filter(FilterChange::Skip(number("skip")?)),
        "lego" => BrowseCommand::Filter(FilterChange::Lego(parse_lego_flag(arg.unwrap_or("all"))?)),
        "refresh" | "r" => BrowseCommand::Refresh,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => {
            return Err(CliError::InvalidArguments(format!(
                "Unknown command '{}', type 'help'",
                other
            )));
        }
    };

    Ok(Some(command))
}

type PendingFetch = Option<BoxFuture<'static, ScreenSettled>>;

fn start_fetch(fetch: ScreenFetch) -> BoxFuture<'static, ScreenSettled> {
    debug!(generation = fetch.generation(), "fetch cycle pending");
    fetch.run().boxed()
}

async fn next_settled(pending: &mut PendingFetch) -> ScreenSettled {
    match pending {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

/// Browse session over one API connection
pub struct Browser<'a, W: Write> {
    api: Arc<dyn CatalogApi>,
    renderer: &'a CardRenderer,
    format: OutputFormat,
    out: W,
}

impl<'a, W: Write> Browser<'a, W> {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        renderer: &'a CardRenderer,
        format: OutputFormat,
        out: W,
    ) -> Self {
        Self {
            api,
            renderer,
            format,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn show(&mut self, screen: &Screen) -> Result<(), AppError> {
        let frame = match self.format {
            OutputFormat::Cards => render_page(self.renderer, screen)?,
            OutputFormat::Json => {
                let value = screen_json(screen)?;
                serde_json::to_string_pretty(&value)
                    .map_err(|e| crate::error::DisplayError::JsonFormat(e.to_string()))?
            }
        };
        writeln!(self.out, "{}\n", frame)
            .map_err(|e| convert_io_to_display_error(e, "write page"))?;
        Ok(())
    }

    fn note(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.out, "{}", message)
            .map_err(|e| convert_io_to_display_error(e, "write message"))?;
        Ok(())
    }

    /// Run until `quit` or end of input. A fetch still in flight at end of
    /// input is awaited and shown.
    pub async fn run<R>(&mut self, start: Route, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut screen = Screen::for_route(start, Arc::clone(&self.api));
        let mut pending: PendingFetch = Some(start_fetch(screen.begin()));
        self.show(&screen)?;

        let mut lines = input.lines();
        let mut input_open = true;

        while input_open || pending.is_some() {
            tokio::select! {
                biased;

                settled = next_settled(&mut pending), if pending.is_some() => {
                    pending = None;
                    if screen.settle(settled) {
                        self.show(&screen)?;
                    }
                }
                line = lines.next_line(), if input_open => {
                    let line = line.map_err(|e| convert_io_to_display_error(e, "read command"))?;
                    let Some(line) = line else {
                        input_open = false;
                        continue;
                    };

                    let command = match parse_command(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            self.note(&e.to_string())?;
                            continue;
                        }
                    };
                    debug!(?command, "browse command");

                    match command {
                        BrowseCommand::Go(route) => {
                            // Dropping the old screen cancels its cycle.
                            screen = Screen::for_route(route, Arc::clone(&self.api));
                            pending = Some(start_fetch(screen.begin()));
                            self.show(&screen)?;
                        }
                        BrowseCommand::Filter(change) => match screen.change_filter(change) {
                            Ok(Some(fetch)) => {
                                pending = Some(start_fetch(fetch));
                                self.show(&screen)?;
                            }
                            Ok(None) => self.note("Filter unchanged")?,
                            Err(e) => self.note(&e.to_string())?,
                        },
                        BrowseCommand::Refresh => {
                            pending = Some(start_fetch(screen.begin()));
                            self.show(&screen)?;
                        }
                        BrowseCommand::Help => self.note(HELP_TEXT)?,
                        BrowseCommand::Quit => break,
                    }
                }
            }
        }

        Ok(())
    }
}
