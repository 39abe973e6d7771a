//! Application frame: title, navigation bar and the page body.

use super::cards::CardRenderer;
use super::theme::Theme;
use crate::core::route::Route;
use crossterm::style::Stylize;

pub const APP_TITLE: &str = "eBay LEGO Analyzer";

/// One entry per route. Plain marks the active one with brackets,
/// styled draws it in bold reverse video.
pub fn nav_bar(theme: Theme, active: Option<Route>) -> String {
    Route::ALL
        .iter()
        .map(|route| {
            let is_active = active == Some(*route);
            match (theme, is_active) {
                (Theme::Plain, true) => format!("[{}]", route.label()),
                (Theme::Plain, false) => format!(" {} ", route.label()),
                (Theme::Styled, true) => format!(" {} ", route.label()).bold().reverse().to_string(),
                (Theme::Styled, false) => format!(" {} ", route.label()),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn rule(theme: Theme, width: usize) -> String {
    match theme {
        Theme::Plain => "-".repeat(width),
        Theme::Styled => "─".repeat(width).dark_grey().to_string(),
    }
}

pub fn render_shell(renderer: &CardRenderer, active: Option<Route>, body: &str) -> String {
    let theme = renderer.theme();
    let title = match theme {
        Theme::Plain => APP_TITLE.to_string(),
        Theme::Styled => APP_TITLE.bold().cyan().to_string(),
    };

    format!(
        "{}\n{}\n{}\n{}",
        title,
        nav_bar(theme, active),
        rule(theme, renderer.width()),
        body
    )
}
