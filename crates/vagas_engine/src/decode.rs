use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde_json::Value;
use vagas_core::{Job, JobId};
use vagas_logging::vagas_warn;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}")]
    Charset { encoding: String },
    #[error("invalid json: {0}")]
    Json(String),
    #[error("expected a json array of job records, found {found}")]
    NotAnArray { found: &'static str },
}

/// Jobs in source order plus the number of entries that were not objects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedJobs {
    pub jobs: Vec<Job>,
    pub skipped: usize,
}

/// Decodes raw bytes to text: BOM, then the Content-Type charset, then UTF-8
/// if the bytes are valid, then a chardetng guess.
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

/// Parses a JSON array of job records. Ids are 1-based array positions, so a
/// skipped entry leaves a gap instead of shifting later ids.
pub fn parse_jobs(text: &str) -> Result<ParsedJobs, DecodeError> {
    let root: Value = serde_json::from_str(text).map_err(|err| DecodeError::Json(err.to_string()))?;
    let Value::Array(records) = root else {
        return Err(DecodeError::NotAnArray {
            found: json_kind(&root),
        });
    };

    let mut parsed = ParsedJobs::default();
    for (index, record) in records.iter().enumerate() {
        let id = (index + 1) as JobId;
        match record {
            Value::Object(fields) => parsed.jobs.push(Job::from_record(id, fields)),
            other => {
                vagas_warn!("skipping record {}: expected an object, found {}", id, json_kind(other));
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, DecodeError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::Charset {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

