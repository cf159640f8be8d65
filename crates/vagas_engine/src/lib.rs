//! Job board engine: loading the job list and persisting local state.
mod decode;
mod engine;
mod fetch;
mod persist;
mod source;
mod types;

pub use decode::{decode_text, parse_jobs, DecodeError, ParsedJobs};
pub use engine::{load_jobs, EngineError, EngineHandle};
pub use fetch::{http_date, FetchSettings, Fetcher, FileFetcher, ReqwestFetcher};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use source::{DataSource, DEFAULT_DATA_PATH};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, LoadedJobs};
