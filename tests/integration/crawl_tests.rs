//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the tutor directory and run the
//! coordinator end-to-end against it.

use crate::fixtures::*;
use merocrawl::crawler::Coordinator;
use merocrawl::model::ProfileRecord;
use merocrawl::output::{count_unique_emails, OutputResult, RecordSink};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY: &str = "all-subjects-teachers-grade-1-to-5";

/// Sink that keeps the size of every flush in memory
#[derive(Default)]
struct RecordingSink {
    flushes: Mutex<Vec<usize>>,
}

impl RecordSink for RecordingSink {
    fn flush(&self, records: &[ProfileRecord]) -> OutputResult<()> {
        self.flushes.lock().unwrap().push(records.len());
        Ok(())
    }
}

#[tokio::test]
async fn test_full_crawl_single_target() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    mount_first_page(
        &mock_server,
        CATEGORY,
        listing_html(&["/users/anita-1", "/users/bina-2", "/users/chandra-3"]),
        1,
    )
    .await;
    mount_page(&mock_server, 2, html(empty_listing_html()), 1).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/bina-2", profile_html("Bina", "Lekhnath")).await;
    mount_profile(&mock_server, "/users/chandra-3", profile_html("Chandra", "Syangja")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    // Header plus three rows, in the order the listing presented them
    let content = std::fs::read_to_string(&csv_path).expect("Output not written");
    assert_eq!(content.lines().count(), 4);
    assert_eq!(
        read_records(&csv_path),
        vec![
            expected_record("Anita", "Pokhara"),
            expected_record("Bina", "Lekhnath"),
            expected_record("Chandra", "Syangja"),
        ]
    );

    assert_eq!(summary.targets, 1);
    assert_eq!(summary.targets_exhausted, 1);
    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.profiles_parsed, 3);
    assert_eq!(summary.total_records, 3);
    assert!(!summary.final_flush_failed);

    // Each profile is fetched once despite being linked twice on the page
    assert_eq!(requests_to(&mock_server, "/users/anita-1").await, 1);
}

#[tokio::test]
async fn test_malformed_profile_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    mount_first_page(
        &mock_server,
        CATEGORY,
        listing_html(&["/users/anita-1", "/users/broken-2", "/users/chandra-3"]),
        1,
    )
    .await;
    mount_page(&mock_server, 2, html(empty_listing_html()), 1).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/broken-2", broken_profile_html("Broken")).await;
    mount_profile(&mock_server, "/users/chandra-3", profile_html("Chandra", "Syangja")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(
        read_records(&csv_path),
        vec![
            expected_record("Anita", "Pokhara"),
            expected_record("Chandra", "Syangja"),
        ]
    );
    assert_eq!(summary.profiles_parsed, 2);
    assert_eq!(summary.profiles_failed, 1);
    assert_eq!(summary.targets_exhausted, 1);
}

#[tokio::test]
async fn test_missing_profile_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    // /users/gone-2 is not mounted, so wiremock answers 404
    mount_first_page(
        &mock_server,
        CATEGORY,
        listing_html(&["/users/anita-1", "/users/gone-2"]),
        1,
    )
    .await;
    mount_page(&mock_server, 2, html(empty_listing_html()), 1).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(read_records(&csv_path), vec![expected_record("Anita", "Pokhara")]);
    assert_eq!(summary.profiles_failed, 1);
}

#[tokio::test]
async fn test_pagination_stops_after_first_empty_page() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    // Pages 1..=3 list profiles, page 4 is empty, page 5 must never be asked for
    mount_first_page(&mock_server, CATEGORY, listing_html(&["/users/anita-1"]), 1).await;
    mount_page(&mock_server, 2, html(listing_html(&["/users/bina-2"])), 1).await;
    mount_page(&mock_server, 3, html(listing_html(&["/users/chandra-3"])), 1).await;
    mount_page(&mock_server, 4, html(empty_listing_html()), 1).await;
    mount_page(&mock_server, 5, html(listing_html(&["/users/dipa-4"])), 0).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/bina-2", profile_html("Bina", "Lekhnath")).await;
    mount_profile(&mock_server, "/users/chandra-3", profile_html("Chandra", "Syangja")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.pages_fetched, 4);
    assert_eq!(summary.total_records, 3);
    assert_eq!(requests_to(&mock_server, "/list/4/1").await, 3);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_listing_failure_ends_target_but_keeps_records() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    mount_first_page(&mock_server, CATEGORY, listing_html(&["/users/anita-1"]), 1).await;
    mount_page(&mock_server, 2, ResponseTemplate::new(500), 1).await;
    mount_page(&mock_server, 3, html(empty_listing_html()), 0).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.targets_exhausted, 0);
    assert_eq!(summary.failed_targets.len(), 1);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(read_records(&csv_path), vec![expected_record("Anita", "Pokhara")]);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_unreachable_first_page_still_writes_output() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    // Nothing mounted: every listing request gets a 404
    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.failed_targets.len(), 1);
    assert_eq!(summary.total_records, 0);

    let content = std::fs::read_to_string(&csv_path).expect("Output not written");
    assert_eq!(content.lines().count(), 1);
}

#[tokio::test]
async fn test_same_profile_under_two_links_is_stored_once() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    mount_first_page(
        &mock_server,
        CATEGORY,
        listing_html(&["/users/anita-1", "/users/anita-renamed", "/users/bina-2"]),
        1,
    )
    .await;
    mount_page(&mock_server, 2, html(empty_listing_html()), 1).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/anita-renamed", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/bina-2", profile_html("Bina", "Lekhnath")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.profiles_parsed, 3);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(
        read_records(&csv_path),
        vec![
            expected_record("Anita", "Pokhara"),
            expected_record("Bina", "Lekhnath"),
        ]
    );
}

#[tokio::test]
async fn test_targets_share_one_accumulator() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");
    let second = "all-subjects-teachers-grade-6-to-8";

    // Both categories list the same tutors; their page 2 URLs coincide
    let page = listing_html(&["/users/anita-1", "/users/bina-2"]);
    mount_first_page(&mock_server, CATEGORY, page.clone(), 1).await;
    mount_first_page(&mock_server, second, page, 1).await;
    mount_page(&mock_server, 2, html(empty_listing_html()), 2).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/bina-2", profile_html("Bina", "Lekhnath")).await;

    let config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY, second]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.targets, 2);
    assert_eq!(summary.targets_exhausted, 2);
    assert_eq!(summary.profiles_parsed, 4);
    assert_eq!(summary.duplicates, 2);
    assert_eq!(summary.total_records, 2);
    assert_eq!(read_records(&csv_path).len(), 2);

    let report = count_unique_emails(&csv_path).unwrap();
    assert_eq!(report.unique_emails, 2);
}

#[tokio::test]
async fn test_checkpoint_and_final_flush() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("unused.csv");

    mount_first_page(
        &mock_server,
        CATEGORY,
        listing_html(&["/users/anita-1", "/users/bina-2", "/users/chandra-3"]),
        1,
    )
    .await;
    mount_page(&mock_server, 2, html(listing_html(&["/users/dipa-4"])), 1).await;
    mount_page(&mock_server, 3, html(empty_listing_html()), 1).await;
    mount_profile(&mock_server, "/users/anita-1", profile_html("Anita", "Pokhara")).await;
    mount_profile(&mock_server, "/users/bina-2", profile_html("Bina", "Lekhnath")).await;
    mount_profile(&mock_server, "/users/chandra-3", profile_html("Chandra", "Syangja")).await;
    mount_profile(&mock_server, "/users/dipa-4", profile_html("Dipa", "Baglung")).await;

    let mut config = test_config(&mock_server.uri(), &csv_path, &[CATEGORY]);
    config.crawler.checkpoint_interval = 2;

    let sink = Arc::new(RecordingSink::default());
    let coordinator = Coordinator::with_sink(config, sink.clone()).unwrap();
    let summary = coordinator.run().await;

    // Page 1 takes the count from 0 to 3 (crossing 2), page 2 to 4 (crossing 4),
    // then the end-of-run flush
    assert_eq!(*sink.flushes.lock().unwrap(), vec![3, 4, 4]);
    assert_eq!(summary.total_records, 4);
    assert_eq!(coordinator.accumulator().len(), 4);
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_base_url_path_prefixes_profiles_too() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("tutors.csv");

    Mock::given(method("GET"))
        .and(path(format!("/mirror/list/4/1/{}-pokhara", CATEGORY)))
        .respond_with(html(listing_html(&["/users/anita-1"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mirror/list/4/1"))
        .and(query_param("page", "2"))
        .respond_with(html(empty_listing_html()))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_profile(&mock_server, "/mirror/users/anita-1", profile_html("Anita", "Pokhara")).await;

    let base_url = format!("{}/mirror", mock_server.uri());
    let config = test_config(&base_url, &csv_path, &[CATEGORY]);
    let summary = Coordinator::new(config).unwrap().run().await;

    assert_eq!(summary.profiles_parsed, 1);
    assert_eq!(summary.profiles_failed, 0);
    assert_eq!(read_records(&csv_path), vec![expected_record("Anita", "Pokhara")]);
    assert_eq!(requests_to(&mock_server, "/users/anita-1").await, 0);

    mock_server.verify().await;
}
