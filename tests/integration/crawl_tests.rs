//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! harvest (HTTP fetcher, workers, coordinator, CSV sink) end-to-end.

use link_harvester::config::Config;
use link_harvester::crawler::harvest;
use link_harvester::HarvestError;
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing to the given result file
fn create_test_config(result_path: &Path) -> Config {
    let mut config = Config::default();
    config.output.result_path = result_path.display().to_string();
    config.fetcher.request_timeout_secs = 5;
    config.fetcher.connect_timeout_secs = 2;
    config
}

/// An HTML page response
fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Reads the result file as (header, rows)
fn read_rows(result_path: &Path) -> (String, Vec<(String, String)>) {
    let content = std::fs::read_to_string(result_path).expect("Failed to read result file");
    let mut lines = content.lines();
    let header = lines.next().expect("Result file has no header").to_string();
    let rows = lines
        .map(|line| {
            let (source, target) = line.split_once(',').expect("Malformed row");
            (source.to_string(), target.to_string())
        })
        .collect();
    (header, rows)
}

#[tokio::test]
async fn test_full_harvest_single_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index page: two pages, a duplicate, and links that must be filtered
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r##"<html><body>
            <a href="{base}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="{base}/page1">Page 1 again</a>
            <a href="mailto:owner@example.com">Mail</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">Nothing</a>
            </body></html>"##,
            base = base_url
        )))
        .expect(1) // links back to the seed must not cause a second fetch
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(format!(
            r#"<html><body>
            <a href="{base}/">Home</a>
            <a href="page2">Page 2</a>
            <a href="/missing">Missing</a>
            </body></html>"#,
            base = base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(r#"<html><body><a href="/page1">Back</a></body></html>"#.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // /missing is not mounted: wiremock answers 404

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let summary = harvest(&config, &[format!("{}/", base_url)])
        .await
        .expect("Harvest failed");

    let (header, rows) = read_rows(&result_path);
    assert_eq!(header, "SOURCE,SCRAPED_URL");

    let targets: Vec<&str> = rows.iter().map(|(_, t)| t.as_str()).collect();
    let expected_page1 = format!("{}/page1", base_url);
    let expected_page2 = format!("{}/page2", base_url);
    let expected_home = format!("{}/", base_url);
    let expected_missing = format!("{}/missing", base_url);

    assert_eq!(
        targets,
        vec![
            expected_page1.as_str(),
            expected_page2.as_str(),
            expected_home.as_str(),
            expected_missing.as_str(),
        ]
    );
    assert!(rows.iter().all(|(source, _)| source == "127"));

    assert_eq!(summary.records_written, 4);
    assert_eq!(summary.pages_failed(), 1);

    // Wiremock verifies the expect() counts when mock_server drops
}

#[tokio::test]
async fn test_same_target_recorded_once_per_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/x">X</a></body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/x">X</a><a href="{}/x">X again</a></body></html>"#,
            base_url, base_url
        )))
        .mount(&mock_server)
        .await;

    // Each seed fetches /x once under its own visited set
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html("<html><body>Leaf</body></html>".to_string()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let seeds = vec![format!("{}/a", base_url), format!("{}/b", base_url)];
    let summary = harvest(&config, &seeds).await.expect("Harvest failed");

    let (header, rows) = read_rows(&result_path);
    assert_eq!(header, "SOURCE,SCRAPED_URL");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|(_, target)| *target == format!("{}/x", base_url)));

    assert_eq!(summary.seeds.len(), 2);
    assert!(summary.seeds.iter().all(|s| s.links_emitted == 1));
}

#[tokio::test]
async fn test_unreachable_seeds_leave_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let seeds = vec![
        format!("{}/broken", base_url),
        format!("{}/not-mounted", base_url),
        "not a url".to_string(),
    ];
    let summary = harvest(&config, &seeds).await.expect("Harvest failed");

    let content = std::fs::read_to_string(&result_path).unwrap();
    assert_eq!(content, "SOURCE,SCRAPED_URL\n");
    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.pages_failed(), 3);
    assert_eq!(summary.empty_seeds().len(), 3);
}

#[tokio::test]
async fn test_reachable_seed_unaffected_by_failing_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(html(r#"<html><body><a href="/leaf">Leaf</a></body></html>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leaf"))
        .respond_with(html("<html><body></body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let seeds = vec![format!("{}/gone", base_url), format!("{}/good", base_url)];
    harvest(&config, &seeds).await.expect("Harvest failed");

    let (_, rows) = read_rows(&result_path);
    assert_eq!(rows, vec![("127".to_string(), format!("{}/leaf", base_url))]);
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "Web-ScrapingBOT"))
        .respond_with(html("<html><body></body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let summary = harvest(&config, &[format!("{}/", base_url)])
        .await
        .expect("Harvest failed");

    assert_eq!(summary.pages_failed(), 0);
}

#[tokio::test]
async fn test_relative_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/"))
        .respond_with(html(r#"<html><body><a href="child">Child</a></body></html>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/child"))
        .respond_with(html("<html><body></body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    harvest(&config, &[format!("{}/old", base_url)])
        .await
        .expect("Harvest failed");

    let (_, rows) = read_rows(&result_path);
    assert_eq!(rows, vec![("127".to_string(), format!("{}/new/child", base_url))]);
}

#[tokio::test]
async fn test_non_html_response_yields_no_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<html><body><a href="/data.json">Data</a></body></html>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"html": "<a href=\"/hidden\">x</a>"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html("<html></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    harvest(&config, &[format!("{}/", base_url)])
        .await
        .expect("Harvest failed");

    let (_, rows) = read_rows(&result_path);
    assert_eq!(rows, vec![("127".to_string(), format!("{}/data.json", base_url))]);
}

#[tokio::test]
async fn test_unwritable_output_fails_before_crawling() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(html("<html></html>".to_string()))
        .expect(0) // no worker may start
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("no-such-dir").join("result.csv");
    let config = create_test_config(&result_path);

    let result = harvest(&config, &[format!("{}/", base_url)]).await;

    assert!(matches!(result, Err(HarvestError::Sink(_))));
    assert!(!result_path.exists());
}

#[tokio::test]
async fn test_empty_seed_list_does_nothing() {
    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let config = create_test_config(&result_path);

    let summary = harvest(&config, &[]).await.expect("Harvest failed");

    assert_eq!(summary.records_written, 0);
    assert!(!result_path.exists());
}

#[tokio::test]
async fn test_concurrency_cap_with_many_seeds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for i in 0..5 {
        Mock::given(method("GET"))
            .and(path(format!("/seed{}", i)))
            .respond_with(html(format!(
                r#"<html><body><a href="/leaf{}">Leaf</a></body></html>"#,
                i
            )))
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let result_path = dir.path().join("result.csv");
    let mut config = create_test_config(&result_path);
    config.crawler.max_concurrent_seeds = Some(2);

    let seeds: Vec<String> = (0..5).map(|i| format!("{}/seed{}", base_url, i)).collect();
    let summary = harvest(&config, &seeds).await.expect("Harvest failed");

    let (_, rows) = read_rows(&result_path);
    let targets: HashSet<String> = rows.into_iter().map(|(_, t)| t).collect();
    let expected: HashSet<String> = (0..5).map(|i| format!("{}/leaf{}", base_url, i)).collect();

    assert_eq!(targets, expected);
    assert_eq!(summary.seeds.len(), 5);
    assert!(summary.seeds.iter().all(|s| s.completed));
}
