//! Page behaviour against a mocked catalog API: partial success, filter
//! cycles and stale-result discarding.

use brickdash::api::models::InventoryFilter;
use brickdash::api::{ApiClient, CatalogApi};
use brickdash::core::LoadState;
use brickdash::core::pages::{
    DashboardPage, FilterChange, InventoryList, Page, PageModel, Screen,
};
use brickdash::core::route::Route;
use brickdash::display::{CardRenderer, Theme, render_body};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> Arc<dyn CatalogApi> {
    Arc::new(ApiClient::new(server.uri(), None).expect("client"))
}

fn renderer_for(server: &MockServer) -> CardRenderer {
    CardRenderer::new(Theme::Plain, server.uri()).with_max_width(100)
}

#[tokio::test]
async fn test_dashboard_sections_settle_independently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lego-sets"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = DashboardPage::new(api_for(&server));
    page.load().await;

    assert_eq!(page.inventory.state(), &LoadState::Loaded(vec![]));
    assert_eq!(page.stats.state().error(), Some("Failed to fetch statistics"));
    assert_eq!(page.sets.state().error(), Some("Failed to fetch LEGO sets"));
    assert!(!page.all_failed());

    let body = render_body(&renderer_for(&server), &Screen::Dashboard(page)).expect("render");
    assert!(body.contains("Recent Inventory (0 items)"));
    assert!(body.contains("No inventory items found."));
    assert!(body.contains("Error: Failed to fetch statistics"));
    assert!(body.contains("Error: Failed to fetch LEGO sets"));
    assert!(body.contains(&format!("Make sure your API server is running at {}/", server.uri())));
}

#[tokio::test]
async fn test_lego_sets_limit_five_renders_one_card() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lego-sets"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"set_num": "7140-1"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lego-sets"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut screen = Screen::for_route(Route::LegoSets, api_for(&server));
    screen.load().await;

    let fetch = screen
        .change_filter(FilterChange::Limit(5))
        .expect("valid limit")
        .expect("limit changed");
    assert!(screen.settle(fetch.run().await));

    let body = render_body(&renderer_for(&server), &screen).expect("render");
    assert!(body.contains("Set 1"));
    assert!(!body.contains("Set 2"));
    assert!(body.contains("7140-1"));
}

#[tokio::test]
async fn test_stats_render_humanized_cards() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_items": 42})))
        .mount(&server)
        .await;

    let mut screen = Screen::for_route(Route::Stats, api_for(&server));
    screen.load().await;

    let body = render_body(&renderer_for(&server), &screen).expect("render");
    assert!(body.contains("Total Items"));
    assert!(body.contains("42"));
    assert!(!body.contains("total_items"));
}

#[tokio::test]
async fn test_stats_keep_server_key_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"total_items": 42, "average_price": 9.5, "lego_items": 7}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let mut screen = Screen::for_route(Route::Stats, api_for(&server));
    screen.load().await;

    let body = render_body(&renderer_for(&server), &screen).expect("render");
    let total = body.find("Total Items").expect("total card");
    let average = body.find("Average Price").expect("average card");
    let lego = body.find("Lego Items").expect("lego card");
    assert!(total < average && average < lego);
}

#[tokio::test]
async fn test_each_filter_change_fetches_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut page: Page<InventoryList> = Page::new(api_for(&server), InventoryFilter::page_default());
    page.load().await;

    let fetch = page.update_query(|f| f.limit = Some(20)).expect("changed");
    assert!(page.settle(fetch.run().await));
    assert!(page.update_query(|f| f.limit = Some(20)).is_none());

    assert_eq!(page.state().data().map(|items| items[0]["id"].clone()), Some(json!(2)));
    // MockServer verifies the `.expect(1)` counts on drop.
}

#[tokio::test]
async fn test_slow_superseded_response_is_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "old"}]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "new"}])))
        .mount(&server)
        .await;

    let mut page: Page<InventoryList> = Page::new(api_for(&server), InventoryFilter::page_default());
    let slow = page.begin();
    let fast = page.update_query(|f| f.limit = Some(10)).expect("changed");

    let (slow, fast) = tokio::join!(slow.run(), fast.run());

    assert!(page.settle(fast));
    assert!(!page.settle(slow));
    assert_eq!(
        page.state().data().map(|items| items[0]["id"].clone()),
        Some(json!("new"))
    );
}

#[tokio::test]
async fn test_server_error_never_loads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut screen = Screen::for_route(Route::Inventory, api_for(&server));
    screen.load().await;

    assert!(screen.all_failed());
    let body = render_body(&renderer_for(&server), &screen).expect("render");
    assert!(body.contains("Error: Failed to fetch inventory"));
    assert!(!body.contains("No inventory items found."));
}
