//! Integration tests for a complete fetch run
//!
//! These tests use wiremock to stand in for the CDX index and run the
//! whole pipeline: domain input, worker pool, finalization and output file.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use wayback_fetch::config::{Config, FetcherConfig};
use wayback_fetch::{run, DomainSource, InputError, RunRequest, WaybackError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CDX_PATH: &str = "/cdx/search/cdx";

/// Creates a configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    Config {
        fetcher: FetcherConfig {
            endpoint: format!("{}{}", server.uri(), CDX_PATH),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            ..FetcherConfig::default()
        },
    }
}

/// Mounts a CDX response for one domain, expected to be requested once
async fn mount_domain(server: &MockServer, domain: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .and(query_param("url", format!("*.{}/*", domain).as_str()))
        .and(query_param("collapse", "urlkey"))
        .and(query_param("output", "text"))
        .and(query_param("fl", "original"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn create_domain_list(domains: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for domain in domains {
        writeln!(file, "{}", domain).unwrap();
    }
    file.flush().unwrap();
    file
}

fn request(source: DomainSource, output_path: PathBuf) -> RunRequest {
    RunRequest {
        source,
        output_path,
        verbose: false,
    }
}

#[tokio::test]
async fn test_overlapping_domains_written_sorted_and_unique() {
    let server = MockServer::start().await;
    mount_domain(
        &server,
        "a.com",
        ResponseTemplate::new(200).set_body_string("http://a.com/y\nhttp://a.com/x\n"),
    )
    .await;
    mount_domain(
        &server,
        "b.com",
        ResponseTemplate::new(200).set_body_string("http://a.com/x\n"),
    )
    .await;

    let list = create_domain_list(&["a.com", "b.com"]);
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");

    let summary = run(
        &request(DomainSource::List(list.path().to_path_buf()), output_path.clone()),
        &create_test_config(&server),
    )
    .await
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "http://a.com/x\nhttp://a.com/y\n"
    );
    assert_eq!(summary.domains_processed, 2);
    assert_eq!(summary.workers_launched, 2);
    assert_eq!(summary.unique_urls, 2);
    assert!(summary.empty_domains.is_empty());
    assert!(summary.saved());
}

#[tokio::test]
async fn test_domain_without_data_gives_empty_file() {
    let server = MockServer::start().await;
    mount_domain(&server, "nodata.com", ResponseTemplate::new(200)).await;

    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");

    let summary = run(
        &request(
            DomainSource::Single("nodata.com".to_string()),
            output_path.clone(),
        ),
        &create_test_config(&server),
    )
    .await
    .unwrap();

    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "");
    assert_eq!(summary.empty_domains, vec!["nodata.com"]);
    assert_eq!(summary.failed_domains, 0);
    assert_eq!(summary.unique_urls, 0);
}

#[tokio::test]
async fn test_missing_domain_list_leaves_output_untouched() {
    let server = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    // output that does not exist yet is not created
    let fresh_output = out_dir.path().join("fresh.txt");
    let result = run(
        &request(
            DomainSource::List(out_dir.path().join("no-such-list.txt")),
            fresh_output.clone(),
        ),
        &create_test_config(&server),
    )
    .await;

    assert!(matches!(
        result,
        Err(WaybackError::Input(InputError::NotFound { .. }))
    ));
    assert!(!fresh_output.exists());

    // output that already exists is not overwritten
    let existing_output = out_dir.path().join("existing.txt");
    std::fs::write(&existing_output, "keep me\n").unwrap();
    let result = run(
        &request(
            DomainSource::List(out_dir.path().join("no-such-list.txt")),
            existing_output.clone(),
        ),
        &create_test_config(&server),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(&existing_output).unwrap(),
        "keep me\n"
    );

    // nothing was fetched
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_http_error_recorded_as_empty_without_aborting() {
    let server = MockServer::start().await;
    mount_domain(&server, "broken.com", ResponseTemplate::new(503)).await;
    mount_domain(
        &server,
        "ok.com",
        ResponseTemplate::new(200).set_body_string("https://ok.com/page\n"),
    )
    .await;

    let list = create_domain_list(&["broken.com", "ok.com"]);
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");

    let summary = run(
        &request(DomainSource::List(list.path().to_path_buf()), output_path.clone()),
        &create_test_config(&server),
    )
    .await
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "https://ok.com/page\n"
    );
    assert_eq!(summary.empty_domains, vec!["broken.com"]);
    assert_eq!(summary.failed_domains, 1);
}

#[tokio::test]
async fn test_slow_index_times_out_once() {
    let server = MockServer::start().await;
    mount_domain(
        &server,
        "slow.com",
        ResponseTemplate::new(200)
            .set_body_string("http://slow.com/\n")
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut config = create_test_config(&server);
    config.fetcher.timeout_secs = 1;
    config.fetcher.connect_timeout_secs = 1;

    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");

    let summary = run(
        &request(DomainSource::Single("slow.com".to_string()), output_path.clone()),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(summary.empty_domains, vec!["slow.com"]);
    assert_eq!(summary.failed_domains, 1);
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "");
}

#[tokio::test]
async fn test_unreachable_index_records_every_domain() {
    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");
    let config = Config {
        fetcher: FetcherConfig {
            endpoint: "http://127.0.0.1:1/cdx/search/cdx".to_string(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
            ..FetcherConfig::default()
        },
    };

    let list = create_domain_list(&["a.com", "b.com", "c.com"]);
    let summary = run(
        &request(DomainSource::List(list.path().to_path_buf()), output_path.clone()),
        &config,
    )
    .await
    .unwrap();

    let mut empty = summary.empty_domains.clone();
    empty.sort();
    assert_eq!(empty, vec!["a.com", "b.com", "c.com"]);
    assert_eq!(summary.failed_domains, 3);
    assert!(output_path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_domains_fetched_once_each() {
    let server = MockServer::start().await;
    let names: Vec<String> = (0..25).map(|i| format!("site{}.org", i)).collect();

    let mut expected = Vec::new();
    for name in &names {
        let body = format!("http://{}/\nhttp://common.org/shared\n", name);
        mount_domain(&server, name, ResponseTemplate::new(200).set_body_string(body)).await;
        expected.push(format!("http://{}/", name));
    }
    expected.push("http://common.org/shared".to_string());
    expected.sort();

    // blank lines in the list are ignored
    let mut list = NamedTempFile::new().unwrap();
    for name in &names {
        writeln!(list, "{}\n", name).unwrap();
    }
    list.flush().unwrap();

    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("urls.txt");

    let summary = run(
        &request(DomainSource::List(list.path().to_path_buf()), output_path.clone()),
        &create_test_config(&server),
    )
    .await
    .unwrap();

    assert_eq!(summary.domains_processed, 25);
    assert_eq!(summary.workers_launched, 10);
    assert_eq!(summary.unique_urls, 26);

    let written: Vec<String> = std::fs::read_to_string(&output_path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(written, expected);

    // expect(1) on every mock is checked when the server drops
    server.verify().await;
}

#[tokio::test]
async fn test_unwritable_output_reported_after_fetching() {
    let server = MockServer::start().await;
    mount_domain(
        &server,
        "a.com",
        ResponseTemplate::new(200).set_body_string("http://a.com/\n"),
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let output_path = out_dir.path().join("missing-dir").join("urls.txt");

    let summary = run(
        &request(DomainSource::Single("a.com".to_string()), output_path.clone()),
        &create_test_config(&server),
    )
    .await
    .unwrap();

    assert!(!summary.saved());
    assert_eq!(summary.unique_urls, 1);
    assert!(summary.output_error.unwrap().contains("missing-dir"));
}
