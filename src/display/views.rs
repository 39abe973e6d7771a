//! Page bodies: section states turned into cards and status lines.

use super::cards::{Card, CardRenderer, list_cards, pretty_json, preview_cards, stats_cards};
use super::shell::render_shell;
use crate::core::load_state::{IsEmpty, LoadState};
use crate::core::pages::{
    ApiRoot, DashboardPage, InventoryItemResource, InventoryList, ItemDetailPage, ItemImages,
    LegoSetDetail, LegoSetList, Messages, Resource, Screen, Statistics,
};
use crate::core::route::Route;
use crate::error::DisplayError;
use serde::Serialize;
use serde_json::{Value, json};

/// Spinner text while a screen loads
pub fn loading_message(screen: &Screen) -> &'static str {
    match screen {
        Screen::Dashboard(_) => "Loading dashboard...",
        Screen::Inventory(_) => InventoryList::MESSAGES.loading,
        Screen::LegoSets(_) => LegoSetList::MESSAGES.loading,
        Screen::Stats(_) => Statistics::MESSAGES.loading,
        Screen::Item(_) => InventoryItemResource::MESSAGES.loading,
        Screen::Images(_) => ItemImages::MESSAGES.loading,
        Screen::LegoSet(_) => LegoSetDetail::MESSAGES.loading,
        Screen::Root(_) => ApiRoot::MESSAGES.loading,
    }
}

/// Full frame: shell around the page body
pub fn render_page(renderer: &CardRenderer, screen: &Screen) -> Result<String, DisplayError> {
    let body = render_body(renderer, screen)?;
    Ok(render_shell(renderer, screen.route(), &body))
}

pub fn render_body(renderer: &CardRenderer, screen: &Screen) -> Result<String, DisplayError> {
    let content = match screen {
        Screen::Dashboard(page) => render_dashboard(renderer, page)?,
        Screen::Inventory(page) => {
            let filter = page.query();
            let lego = match filter.is_lego {
                Some(true) => "LEGO only",
                Some(false) => "non-LEGO only",
                None => "all",
            };
            let summary = format!(
                "skip {} | limit {} | {}",
                filter.skip.unwrap_or(0),
                filter.limit.map_or("-".to_string(), |l| l.to_string()),
                lego
            );
            let cards = render_state(renderer, page.state(), &InventoryList::MESSAGES, |items| {
                list_cards("Item", items)
            })?;
            format!("{}\n{}", renderer.summary_line(&summary), cards)
        }
        Screen::LegoSets(page) => {
            let filter = page.query();
            let summary = format!(
                "skip {} | limit {}",
                filter.skip.unwrap_or(0),
                filter.limit.map_or("-".to_string(), |l| l.to_string()),
            );
            let cards = render_state(renderer, page.state(), &LegoSetList::MESSAGES, |sets| {
                list_cards("Set", sets)
            })?;
            format!("{}\n{}", renderer.summary_line(&summary), cards)
        }
        Screen::Stats(page) => {
            render_state(renderer, page.state(), &Statistics::MESSAGES, stats_cards)?
        }
        Screen::Item(page) => render_item(renderer, page)?,
        Screen::Images(page) => render_state(renderer, page.state(), &ItemImages::MESSAGES, |images| {
            list_cards("Image", images)
        })?,
        Screen::LegoSet(page) => {
            let title = screen.title();
            render_state(renderer, page.state(), &LegoSetDetail::MESSAGES, |set| {
                Ok(vec![Card::new(title, pretty_json(set)?)])
            })?
        }
        Screen::Root(page) => render_state(renderer, page.state(), &ApiRoot::MESSAGES, |value| {
            Ok(vec![Card::new("API", pretty_json(value)?)])
        })?,
    };

    Ok(format!("{}\n\n{}", renderer.heading(&screen.title()), content))
}

/// A page's only section: loading line, error banner, empty message or cards
pub fn render_state<T, F>(
    renderer: &CardRenderer,
    state: &LoadState<T>,
    messages: &Messages,
    cards: F,
) -> Result<String, DisplayError>
where
    T: IsEmpty,
    F: FnOnce(&T) -> Result<Vec<Card>, DisplayError>,
{
    match state {
        LoadState::Loading => Ok(renderer.loading_line(messages.loading)),
        LoadState::Error(message) => Ok(renderer.error_banner(message)),
        LoadState::Loaded(data) if data.is_empty_data() => Ok(renderer.empty_line(messages.empty)),
        LoadState::Loaded(data) => Ok(renderer.render_cards(&cards(data)?)),
    }
}

/// One section among several. A failure shows the error and the empty
/// message; the server guidance is printed once per page.
fn render_block<T, F>(
    renderer: &CardRenderer,
    state: &LoadState<T>,
    messages: &Messages,
    cards: F,
) -> Result<String, DisplayError>
where
    T: IsEmpty,
    F: FnOnce(&T) -> Result<Vec<Card>, DisplayError>,
{
    match state {
        LoadState::Error(message) => Ok(format!(
            "{}\n{}",
            renderer.error_line(message),
            renderer.empty_line(messages.empty)
        )),
        _ => render_state(renderer, state, messages, cards),
    }
}

fn render_dashboard(renderer: &CardRenderer, page: &DashboardPage) -> Result<String, DisplayError> {
    let mut parts = Vec::new();

    parts.push(renderer.heading("Statistics"));
    parts.push(render_block(
        renderer,
        page.stats.state(),
        &Statistics::MESSAGES,
        |stats| Ok(vec![Card::new("Statistics", pretty_json(stats)?)]),
    )?);

    let item_count = page.inventory.state().data().map_or(0, Vec::len);
    parts.push(String::new());
    parts.push(renderer.heading(&format!("Recent Inventory ({} items)", item_count)));
    parts.push(render_block(
        renderer,
        page.inventory.state(),
        &InventoryList::MESSAGES,
        |items| preview_cards("Item", items),
    )?);

    let set_count = page.sets.state().data().map_or(0, Vec::len);
    parts.push(String::new());
    parts.push(renderer.heading(&format!("Recent LEGO Sets ({} sets)", set_count)));
    parts.push(render_block(
        renderer,
        page.sets.state(),
        &LegoSetList::MESSAGES,
        |sets| preview_cards("Set", sets),
    )?);

    if page.stats.state().is_error()
        || page.inventory.state().is_error()
        || page.sets.state().is_error()
    {
        parts.push(String::new());
        parts.push(renderer.guidance_line());
    }

    parts.push(String::new());
    parts.push(quick_actions(renderer));

    Ok(parts.join("\n"))
}

fn render_item(renderer: &CardRenderer, page: &ItemDetailPage) -> Result<String, DisplayError> {
    let title = format!("Inventory Item #{}", page.inventory_id());
    let mut parts = vec![render_block(
        renderer,
        page.item.state(),
        &InventoryItemResource::MESSAGES,
        |item| Ok(vec![Card::new(title, pretty_json(item)?)]),
    )?];

    parts.push(String::new());
    parts.push(renderer.heading("Images"));
    parts.push(render_block(
        renderer,
        page.images.state(),
        &ItemImages::MESSAGES,
        |images| list_cards("Image", images),
    )?);

    if page.item.state().is_error() || page.images.state().is_error() {
        parts.push(String::new());
        parts.push(renderer.guidance_line());
    }

    Ok(parts.join("\n"))
}

fn quick_actions(renderer: &CardRenderer) -> String {
    let mut lines = vec![renderer.heading("Quick actions")];
    for route in Route::ALL.iter().filter(|r| **r != Route::Dashboard) {
        lines.push(format!("  {:<12}{}", route.label(), route.command()));
    }
    lines.join("\n")
}

fn state_json<T: Serialize>(state: &LoadState<T>) -> Result<Value, DisplayError> {
    match state {
        LoadState::Loading => Ok(Value::Null),
        LoadState::Error(message) => Ok(json!({ "error": message })),
        LoadState::Loaded(data) => {
            serde_json::to_value(data).map_err(|e| DisplayError::JsonFormat(e.to_string()))
        }
    }
}

/// Raw JSON of every section; failed sections become `{"error": ...}`
pub fn screen_json(screen: &Screen) -> Result<Value, DisplayError> {
    match screen {
        Screen::Dashboard(page) => Ok(json!({
            "stats": state_json(page.stats.state())?,
            "inventory": state_json(page.inventory.state())?,
            "lego_sets": state_json(page.sets.state())?,
        })),
        Screen::Item(page) => Ok(json!({
            "item": state_json(page.item.state())?,
            "images": state_json(page.images.state())?,
        })),
        Screen::Inventory(page) => state_json(page.state()),
        Screen::LegoSets(page) => state_json(page.state()),
        Screen::Images(page) => state_json(page.state()),
        Screen::Stats(page) => state_json(page.state()),
        Screen::LegoSet(page) => state_json(page.state()),
        Screen::Root(page) => state_json(page.state()),
    }
}
