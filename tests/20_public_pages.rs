mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn public_page_sections_come_sorted() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let slug = common::unique_slug("home");

    common::create_page(
        server,
        &token,
        json!({
            "slug": slug,
            "title": "Home",
            "sections": [
                { "id": "late", "type": "text", "sortOrder": 5, "content": "Second" },
                { "id": "early", "type": "hero", "sortOrder": 1, "title": "Welcome" }
            ]
        }),
    )
    .await?;

    let res = reqwest::Client::new()
        .get(server.url(&format!("/pages/{}", slug)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sections"][0]["id"], "early");
    assert_eq!(body["data"]["sections"][1]["id"], "late");

    Ok(())
}

#[tokio::test]
async fn inactive_and_missing_pages_are_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let slug = common::unique_slug("draft");

    common::create_page(
        server,
        &token,
        json!({ "slug": slug, "title": "Draft", "isActive": false }),
    )
    .await?;

    let client = reqwest::Client::new();
    for path in [format!("/pages/{}", slug), "/pages/does-not-exist".to_string()] {
        let res = client.get(server.url(&path)).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
        let body: Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn render_produces_blocks() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let slug = common::unique_slug("services");

    common::create_page(
        server,
        &token,
        json!({
            "slug": slug,
            "title": "Services",
            "metaTitle": "Our services",
            "sections": [
                {
                    "type": "cards",
                    "settings": { "columns": 2, "spacing": "large" },
                    "items": [
                        { "title": "Design", "icon": "star", "link": "https://example.com/design" }
                    ]
                },
                { "type": "services", "settings": { "featuredOnly": true, "limit": 6 } },
                { "type": "contact_form", "title": "Book a consultation" }
            ]
        }),
    )
    .await?;

    let res = reqwest::Client::new()
        .get(server.url(&format!("/pages/{}/render", slug)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    let data = &body["data"];
    assert_eq!(data["headTitle"], "Our services");

    let cards = &data["sections"][0];
    assert_eq!(cards["block"], "card_grid");
    assert_eq!(cards["columns"], 2);
    assert_eq!(cards["layout"]["paddingY"], 96);
    assert_eq!(cards["cards"][0]["link"]["external"], true);

    let feed = &data["sections"][1];
    assert_eq!(feed["block"], "entity_feed");
    assert_eq!(feed["source"], "services");
    assert_eq!(feed["query"]["featuredOnly"], true);
    assert_eq!(feed["query"]["limit"], 6);

    let form = &data["sections"][2];
    assert_eq!(form["block"], "contact_form");
    assert_eq!(form["submitTo"], "/consultations");

    Ok(())
}
