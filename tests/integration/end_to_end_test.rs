// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use workshop_ledger::application::catalog_file::CatalogFile;
use workshop_ledger::application::use_cases::catalog_use_case::{
    CatalogUseCase, CatalogUseCaseError,
};
use workshop_ledger::config::settings::ApiSettings;
use workshop_ledger::domain::errors::WorkshopError;
use workshop_ledger::domain::models::AccountRef;
use workshop_ledger::domain::services::aggregator::Aggregator;
use workshop_ledger::engines::static_engine::StaticRenderer;
use workshop_ledger::infrastructure::steam_api::SteamApiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "76561190000000001";
const FRIEND: &str = "76561190000000002";

fn item_page(comments: i64, updates: i64, contributors: &[&str]) -> String {
    let links: String = contributors
        .iter()
        .map(|id| {
            format!(
                r#"<div class="friendBlock">
                     <a class="friendBlockLinkOverlay" href="/profiles/{}/"></a>
                   </div>"#,
                id
            )
        })
        .collect();
    format!(
        r##"<html><body>
            <div class="tabs">
              <span class="tabCount">0</span>
              <span class="tabCount">{comments}</span>
            </div>
            <div class="detailsStatNumChangeNotes">
                {updates} Change Notes
                ( <a href="#">view</a> )
            </div>
            <div class="creatorsBlock">{links}</div>
        </body></html>"##
    )
}

fn api_ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "response": body }))
}

/// Serves the REST API and the item pages from one mock server.
async fn workshop_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ISteamUser/ResolveVanityURL/v1/"))
        .and(query_param("vanityurl", "maker"))
        .respond_with(api_ok(json!({ "success": 1, "steamid": OWNER })))
        .mount(&server)
        .await;

    for (id, name) in [(OWNER, "Maker"), (FRIEND, "Friend")] {
        Mock::given(method("GET"))
            .and(path("/ISteamUser/GetPlayerSummaries/v2/"))
            .and(query_param("steamids", id))
            .respond_with(api_ok(json!({
                "players": [{ "steamid": id, "personaname": name }]
            })))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/IPublishedFileService/GetUserFiles/v1/"))
        .and(query_param("steamid", OWNER))
        .respond_with(api_ok(json!({
            "total": 2,
            "publishedfiledetails": [
                { "publishedfileid": "202", "vote_data": { "votes_up": 20, "votes_down": 2 } },
                { "publishedfileid": "101", "vote_data": { "votes_up": 10, "votes_down": 1 } }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ISteamRemoteStorage/GetPublishedFileDetails/v1/"))
        .respond_with(api_ok(json!({
            "publishedfiledetails": [
                { "publishedfileid": "101", "result": 1, "title": "Bridge",
                  "creator": OWNER, "file_size": "1536", "views": 7,
                  "time_created": 1_600_000_000, "description": "long text" },
                { "publishedfileid": "202", "result": 1, "title": "Tower",
                  "creator": OWNER, "file_size": "1048576", "views": "9",
                  "time_created": 1_600_000_000 },
                { "publishedfileid": "404", "result": 1, "title": "Gone" }
            ]
        })))
        .mount(&server)
        .await;

    for (id, page) in [
        ("101", item_page(4, 2, &[OWNER])),
        ("202", item_page(1_234, 15, &[OWNER, FRIEND])),
    ] {
        Mock::given(method("GET"))
            .and(path("/sharedfiles/filedetails/"))
            .and(query_param("id", id))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;
    }

    server
}

fn aggregator(server: &MockServer) -> Aggregator {
    let settings = ApiSettings {
        key: None,
        base_url: server.uri(),
        request_timeout_secs: 5,
    };
    let api = SteamApiClient::new(&settings, "k", 500).unwrap();
    let renderer = StaticRenderer::new(None).unwrap();
    Aggregator::new(Arc::new(api), Arc::new(renderer), server.uri())
}

#[tokio::test]
async fn test_get_items_from_vanity_url() {
    let server = workshop_server().await;
    let aggregator = aggregator(&server);

    let reference = AccountRef::parse(&format!("{}/id/maker/myworkshopfiles/", server.uri()));
    let records: Vec<_> = aggregator.get_items(reference).collect().await;
    let records: Vec<_> = records.into_iter().map(Result::unwrap).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].publishedfileid, "202");
    assert_eq!(records[0].title, "Tower");
    assert_eq!(records[0].comment_count, 1_234);
    assert_eq!(records[0].update_count, 15);
    assert_eq!(records[0].views, 9);
    assert_eq!(records[0].vote_data.votes_up, 20);
    let names: Vec<_> = records[0]
        .contributors
        .iter()
        .map(|c| c.personaname.as_str())
        .collect();
    assert_eq!(names, vec!["Maker", "Friend"]);

    assert_eq!(records[1].publishedfileid, "101");
    assert_eq!(records[1].update_count, 2);
    assert_eq!(records[1].vote_data.votes_down, 1);
}

#[tokio::test]
async fn test_get_item_uses_owner_catalog_votes() {
    let server = workshop_server().await;
    let aggregator = aggregator(&server);

    let record = aggregator.get_item("101").await.unwrap();

    assert_eq!(record.title, "Bridge");
    assert_eq!(record.file_size, 1536);
    assert_eq!(record.vote_data.votes_up, 10);
    assert_eq!(record.contributors[0].steamid, OWNER);
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("description").is_none());
}

#[tokio::test]
async fn test_get_item_unknown_detail() {
    let server = workshop_server().await;
    let aggregator = aggregator(&server);

    // 批量详情中没有该条目
    let err = aggregator.get_item("303").await.unwrap_err();
    assert!(matches!(err, WorkshopError::DetailMissing(id) if id == "303"));
}

#[tokio::test]
async fn test_missing_item_page_is_render_error() {
    let server = workshop_server().await;
    let aggregator = aggregator(&server);

    // 详情存在但页面返回 404
    let err = aggregator.get_item("404").await.unwrap_err();
    assert!(matches!(err, WorkshopError::Render(_)));
}

#[tokio::test]
async fn test_catalog_file_workflow() {
    let server = workshop_server().await;
    let aggregator = aggregator(&server);
    let dir = TempDir::new().unwrap();
    let use_case = CatalogUseCase::new(CatalogFile::new(dir.path().join("catalog.csv")));

    // Given: 空目录文件
    assert!(use_case.list().unwrap().is_empty());

    // When: 添加用户的全部条目
    let added = use_case
        .add_all(&aggregator, &format!("{}/id/maker/", server.uri()))
        .await
        .unwrap();

    // Then: 行按目录顺序写入
    assert_eq!(added, 2);
    assert_eq!(use_case.list().unwrap(), vec!["202: Tower", "101: Bridge"]);

    let rows = CatalogFile::new(dir.path().join("catalog.csv")).read_rows().unwrap();
    assert_eq!(rows[0].len(), 14);
    assert_eq!(rows[0][9], "1 MB");
    assert_eq!(rows[0][13], "Maker;Friend");
    assert_eq!(rows[1][9], "1.5 KB");

    assert_eq!(use_case.remove("0202").unwrap(), 1);
    assert_eq!(use_case.list().unwrap(), vec!["101: Bridge"]);

    use_case.add(&aggregator, "202").await.unwrap();
    assert_eq!(use_case.list().unwrap(), vec!["101: Bridge", "202: Tower"]);
}

#[tokio::test]
async fn test_add_all_unknown_vanity_writes_nothing() {
    let server = workshop_server().await;
    Mock::given(method("GET"))
        .and(path("/ISteamUser/ResolveVanityURL/v1/"))
        .respond_with(api_ok(json!({ "success": 42 })))
        .mount(&server)
        .await;
    let aggregator = aggregator(&server);
    let dir = TempDir::new().unwrap();
    let use_case = CatalogUseCase::new(CatalogFile::new(dir.path().join("catalog.csv")));

    let err = use_case
        .add_all(&aggregator, &format!("{}/id/stranger/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogUseCaseError::Partial {
            written: 0,
            source: WorkshopError::VanityUnresolved(_)
        }
    ));
    assert!(use_case.list().unwrap().is_empty());
}
