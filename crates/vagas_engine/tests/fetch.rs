use std::time::Duration;

use vagas_engine::{load_jobs, DataSource, FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BODY: &str = r#"[
    {"title": "Dev Python", "company": "Acme", "remote?": "01 - Sim", "inserted_date": "2024-01-10"},
    {"title": "Dev Go", "company": "Beta", "remote?": "02 - Não", "inserted_date": "2024-02-01"}
]"#;

fn source(server: &MockServer, route: &str) -> DataSource {
    DataSource::resolve(route, Some(&server.uri())).expect("valid source")
}

#[tokio::test]
async fn fetcher_returns_body_and_last_modified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/data/json/open_jobs.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Last-Modified", "Wed, 21 Feb 2024 13:45:00 GMT")
                .set_body_raw(BODY, "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let source = source(&server, "assets/data/json/open_jobs.json");

    let output = fetcher.fetch(&source).await.expect("fetch ok");
    assert_eq!(output.bytes, BODY.as_bytes());
    assert_eq!(output.metadata.source, source);
    assert_eq!(
        output.metadata.last_modified.as_deref(),
        Some("Wed, 21 Feb 2024 13:45:00 GMT")
    );
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn load_jobs_assigns_positional_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BODY, "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let loaded = load_jobs(&fetcher, &source(&server, "/jobs.json"))
        .await
        .expect("load ok");

    let ids: Vec<_> = loaded.jobs.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(loaded.jobs[1].remote.as_deref(), Some("02 - Não"));
    assert_eq!(loaded.skipped, 0);
    assert_eq!(loaded.metadata.last_modified, None);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch(&source(&server, "/missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("[]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);

    let err = fetcher.fetch(&source(&server, "/slow")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[1,2,3,4,5,6]", "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);

    let err = fetcher.fetch(&source(&server, "/large")).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher.fetch(&source(&server, "/page")).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_payload_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"jobs\": ", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = load_jobs(&fetcher, &source(&server, "/broken"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Parse);
}

#[tokio::test]
async fn http_fetcher_refuses_file_sources() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch(&DataSource::file("open_jobs.json"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidSource);
}
