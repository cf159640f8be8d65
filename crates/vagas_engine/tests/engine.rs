use std::fs;
use std::sync::Once;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use vagas_engine::{
    DataSource, EngineEvent, EngineHandle, FailureKind, FetchSettings, LoadedJobs, FetchError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(vagas_logging::initialize_for_tests);
}

fn wait_for_event(engine: &EngineHandle) -> Result<LoadedJobs, FetchError> {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(EngineEvent::LoadCompleted(result)) = engine.try_recv() {
            return result;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("no engine event within deadline");
}

#[test]
fn loads_jobs_from_a_local_file() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("open_jobs.json");
    fs::write(&file, r#"[{"title": "Dev", "inserted_date": "2024-01-10"}, 3]"#).unwrap();

    let engine = EngineHandle::new(FetchSettings::default()).unwrap();
    assert!(engine.load(DataSource::file(&file)));

    let loaded = wait_for_event(&engine).expect("load ok");
    assert_eq!(loaded.jobs.len(), 1);
    assert_eq!(loaded.skipped, 1);
    assert!(loaded
        .metadata
        .last_modified
        .as_deref()
        .is_some_and(|value| value.ends_with(" GMT")));
    assert!(!engine.is_loading());
}

#[test]
fn missing_file_reports_io_failure() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(FetchSettings::default()).unwrap();
    assert!(engine.load(DataSource::file(temp.path().join("absent.json"))));

    let err = wait_for_event(&engine).unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[test]
fn only_one_load_is_in_flight() {
    init_logging();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/jobs.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(300))
                    .set_body_raw("[{\"title\": \"Dev\"}]", "application/json"),
            )
            .mount(&server),
    );
    let source = DataSource::resolve("/jobs.json", Some(&server.uri())).unwrap();

    let engine = EngineHandle::new(FetchSettings::default()).unwrap();
    assert!(engine.load(source.clone()));
    assert!(!engine.load(source.clone()));
    assert!(engine.is_loading());

    let loaded = wait_for_event(&engine).expect("load ok");
    assert_eq!(loaded.jobs.len(), 1);
    assert!(engine.try_recv().is_none());

    assert!(engine.load(source));
    wait_for_event(&engine).expect("second load ok");
}

#[test]
fn shutdown_cancels_the_in_flight_load() {
    init_logging();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/jobs.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_raw("[]", "application/json"),
            )
            .mount(&server),
    );
    let source = DataSource::resolve("/jobs.json", Some(&server.uri())).unwrap();

    let engine = EngineHandle::new(FetchSettings::default()).unwrap();
    assert!(engine.load(source));
    thread::sleep(Duration::from_millis(50));
    engine.shutdown();

    let err = wait_for_event(&engine).unwrap_err();
    assert_eq!(err.kind, FailureKind::Cancelled);
}
