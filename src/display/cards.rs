use super::theme::Theme;
use crate::api::models::{JsonObject, Stats};
use crate::error::DisplayError;
use crate::utils::text::{humanize_key, preview_text, truncate_text_unicode};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, modifiers, presets};
use crossterm::style::Stylize;
use crossterm::terminal;
use serde::Serialize;
use serde_json::Value;

/// Width of a dashboard preview before it is cut
pub const PREVIEW_WIDTH: usize = 200;

/// Number of previews shown per dashboard section
pub const PREVIEW_COUNT: usize = 3;

/// A titled block of text
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub body: String,
}

impl Card {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DisplayError> {
    serde_json::to_string_pretty(value).map_err(|e| DisplayError::JsonFormat(e.to_string()))
}

/// Strings unquoted, other scalars as JSON, containers pretty-printed
pub fn scalar_text(value: &Value) -> Result<String, DisplayError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        Value::Array(_) | Value::Object(_) => pretty_json(value),
    }
}

/// One card per element, titled `<noun> 1`, `<noun> 2`, ...
pub fn list_cards(noun: &str, items: &[JsonObject]) -> Result<Vec<Card>, DisplayError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Ok(Card::new(format!("{} {}", noun, i + 1), pretty_json(item)?)))
        .collect()
}

/// One card per statistic, in the order the server sent them
pub fn stats_cards(stats: &Stats) -> Result<Vec<Card>, DisplayError> {
    stats
        .iter()
        .map(|(key, value)| Ok(Card::new(humanize_key(key), scalar_text(value)?)))
        .collect()
}

/// Pretty-printed previews of the first few elements
pub fn preview_cards(noun: &str, items: &[JsonObject]) -> Result<Vec<Card>, DisplayError> {
    items
        .iter()
        .take(PREVIEW_COUNT)
        .enumerate()
        .map(|(i, item)| {
            Ok(Card::new(
                format!("{} {}", noun, i + 1),
                preview_text(&pretty_json(item)?, PREVIEW_WIDTH),
            ))
        })
        .collect()
}

/// Draws cards and status lines in the active theme
pub struct CardRenderer {
    theme: Theme,
    max_width: usize,
    base_url: String,
}

impl CardRenderer {
    pub fn new(theme: Theme, base_url: impl Into<String>) -> Self {
        Self {
            theme,
            max_width: Self::detect_terminal_width(),
            base_url: base_url.into(),
        }
    }

    fn detect_terminal_width() -> usize {
        match terminal::size() {
            Ok((cols, _rows)) => (cols as usize).clamp(40, 200),
            Err(_) => 80,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn width(&self) -> usize {
        self.max_width
    }

    pub fn render_card(&self, card: &Card) -> String {
        let mut table = Table::new();

        match self.theme {
            Theme::Plain => {
                table.load_preset(presets::ASCII_FULL);
            }
            Theme::Styled => {
                table
                    .load_preset(presets::UTF8_FULL)
                    .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
            }
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        let title = truncate_text_unicode(&card.title, self.width().saturating_sub(10).max(10));
        if self.theme.use_colors() {
            table.set_header(vec![
                Cell::new(&title)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan),
            ]);
        } else {
            table.set_header(vec![Cell::new(&title)]);
        }
        table.add_row(vec![Cell::new(&card.body)]);

        table.to_string()
    }

    pub fn render_cards(&self, cards: &[Card]) -> String {
        cards
            .iter()
            .map(|card| self.render_card(card))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = self.width();
        let available = if width > 20 { width - 6 } else { width.max(40) };
        table.set_width(available as u16);
    }

    pub fn heading(&self, text: &str) -> String {
        if self.theme.use_colors() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn loading_line(&self, message: &str) -> String {
        if self.theme.use_colors() {
            message.dark_grey().to_string()
        } else {
            message.to_string()
        }
    }

    /// Dimmed informational line, e.g. the active filters
    pub fn summary_line(&self, text: &str) -> String {
        if self.theme.use_colors() {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error_line(&self, message: &str) -> String {
        let line = format!("Error: {}", message);
        if self.theme.use_colors() {
            line.red().bold().to_string()
        } else {
            line
        }
    }

    pub fn guidance_line(&self) -> String {
        let line = format!(
            "Make sure your API server is running at {}/",
            self.base_url.trim_end_matches('/')
        );
        if self.theme.use_colors() {
            line.yellow().to_string()
        } else {
            line
        }
    }

    /// Error line plus the server guidance
    pub fn error_banner(&self, message: &str) -> String {
        format!("{}\n{}", self.error_line(message), self.guidance_line())
    }

    pub fn empty_line(&self, message: &str) -> String {
        if self.theme.use_colors() {
            message.italic().to_string()
        } else {
            message.to_string()
        }
    }
}
