//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use page_trawler::config::Config;
use page_trawler::crawler::{run_crawl, Coordinator, PageOutcome};
use page_trawler::output::{export_all, ExportFormat};
use page_trawler::state::PageState;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without rate-limit delay
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.minimum_delay_ms = 0;
    config.crawler.request_timeout_secs = 2;
    config.crawler.user_agent = "TestTrawler/1.0".to_string();
    config
}

/// Mounts an HTML page that is expected to be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

fn page(links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

fn as_set(urls: &[String]) -> HashSet<String> {
    urls.iter().cloned().collect()
}

#[tokio::test]
async fn test_three_page_graph_reaches_closure() {
    let server = MockServer::start().await;
    let base = server.uri();
    let a = format!("{}/", base);
    let b = format!("{}/b", base);
    let c = format!("{}/c", base);

    // A -> B, C ; B -> C ; C -> nothing
    mount_page(&server, "/", page(&[b.clone(), c.clone()]), 1).await;
    mount_page(&server, "/b", page(&[c.clone()]), 1).await;
    mount_page(&server, "/c", page(&[]), 1).await;

    let report = run_crawl(&create_test_config(), &a, CancellationToken::new())
        .await
        .expect("crawl should start");

    assert_eq!(
        as_set(&report.visited),
        as_set(&[a.clone(), b.clone(), c.clone()])
    );
    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.visited_count, 3);
    assert_eq!(report.failed_count, 0);
    assert!(!report.cancelled);

    // Breadth-first: A, then B and C in document order
    assert_eq!(report.visited, vec![a, b, c]);
}

#[tokio::test]
async fn test_page_linked_from_many_pages_visited_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    let hub = format!("{}/hub", base);
    let x = format!("{}/x", base);
    let y = format!("{}/y", base);

    mount_page(
        &server,
        "/",
        page(&[x.clone(), y.clone(), hub.clone()]),
        1,
    )
    .await;
    mount_page(&server, "/x", page(&[hub.clone(), format!("{}/", base)]), 1).await;
    mount_page(&server, "/y", page(&[hub.clone()]), 1).await;
    mount_page(&server, "/hub", page(&[x.clone(), y.clone()]), 1).await;

    let report = run_crawl(
        &create_test_config(),
        &format!("{}/", base),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.visited.len(), 4);
    assert_eq!(as_set(&report.visited).len(), 4);
    // Duplicate frontier entries were dropped at dequeue time
    assert!(report.skipped_count > 0);
}

#[tokio::test]
async fn test_filtered_links_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links = vec![
        format!("{}/about", base),
        format!("{}/about#team", base),
        format!("{}/photo.JPG", base),
        format!("{}/files/report.pdf", base),
        format!("{}/blog/page/2/", base),
        format!("{}/blog/page/3", base),
        format!("{}/blog/page2/", base),
        "https://other.com/page".to_string(),
        "mailto:someone@example.com".to_string(),
    ];
    mount_page(&server, "/", page(&links), 1).await;
    mount_page(&server, "/about", page(&[]), 1).await;
    mount_page(&server, "/blog/page2/", page(&[]), 1).await;

    // Anything else would be an unexpected request
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let report = run_crawl(
        &create_test_config(),
        &format!("{}/", base),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let visited = as_set(&report.visited);
    assert_eq!(visited.len(), 3);
    assert!(visited.contains(&format!("{}/about", base)));
    assert!(visited.contains(&format!("{}/blog/page2/", base)));
    assert!(!visited.contains("https://other.com/page"));
}

#[tokio::test]
async fn test_cross_domain_link_never_enqueued() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/", base);
    mount_page(&server, "/", page(&["https://other.com/page".to_string()]), 1).await;

    let mut coordinator = Coordinator::new(&create_test_config(), &seed).unwrap();

    assert!(matches!(
        coordinator.step().await,
        Some(PageOutcome::Visited { enqueued: 0, .. })
    ));
    assert_eq!(
        coordinator.session().state_of("https://other.com/page"),
        PageState::Unseen
    );
    assert_eq!(coordinator.session().frontier_size(), 0);
    assert_eq!(coordinator.step().await, None);
}

#[tokio::test]
async fn test_seed_network_error_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_crawl(
        &create_test_config(),
        &format!("{}/", server.uri()),
        CancellationToken::new(),
    )
    .await
    .expect("a failing seed is not a crawl error");

    assert!(report.is_empty());
    assert_eq!(report.visited_count, 0);
    assert_eq!(report.failed_count, 1);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_result() {
    let report = run_crawl(
        &create_test_config(),
        "http://127.0.0.1:9/",
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.failed_count, 1);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(&[
            format!("{}/broken", base),
            format!("{}/blank", base),
            format!("{}/ok", base),
        ]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("   ", "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", page(&[]), 1).await;

    let report = run_crawl(
        &create_test_config(),
        &format!("{}/", base),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        report.visited,
        vec![format!("{}/", base), format!("{}/ok", base)]
    );
    assert_eq!(report.failed_count, 2);
}

#[tokio::test]
async fn test_failed_page_retried_when_rediscovered() {
    let server = MockServer::start().await;
    let base = server.uri();
    let flaky = format!("{}/flaky", base);

    // Root links to /flaky and /other; /other links to /flaky again.
    mount_page(
        &server,
        "/",
        page(&[flaky.clone(), format!("{}/other", base)]),
        1,
    )
    .await;
    mount_page(&server, "/other", page(&[flaky.clone()]), 1).await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let report = run_crawl(
        &create_test_config(),
        &format!("{}/", base),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.visited.len(), 2);
    assert_eq!(report.failed_count, 2);
}

#[tokio::test]
async fn test_rate_limit_spaces_requests() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", page(&[format!("{}/next", base)]), 1).await;
    mount_page(&server, "/next", page(&[]), 1).await;

    let mut config = create_test_config();
    config.crawler.minimum_delay_ms = 300;

    let start = Instant::now();
    let report = run_crawl(&config, &format!("{}/", base), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.visited.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_cancellation_stops_admission() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", page(&[format!("{}/next", base)]), 1).await;
    mount_page(&server, "/next", page(&[]), 0).await;

    let mut config = create_test_config();
    config.crawler.minimum_delay_ms = 30_000;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let report = run_crawl(&config, &format!("{}/", base), cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.visited, vec![format!("{}/", base)]);
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_crawl_then_export() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/", base);
    mount_page(&server, "/", page(&[]), 1).await;

    let report = run_crawl(&create_test_config(), &seed, CancellationToken::new())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports");
    let written = export_all(
        &report.visited,
        &[ExportFormat::Csv, ExportFormat::Json],
        &target,
    )
    .unwrap();
    assert_eq!(written.len(), 2);

    let csv = std::fs::read_to_string(target.join("crawled_data.csv")).unwrap();
    assert_eq!(csv, format!("URL\n{}\n", seed));

    let json = std::fs::read_to_string(target.join("crawled_data.json")).unwrap();
    assert_eq!(json, format!("[\n    \"{}\"\n]", seed));
}
