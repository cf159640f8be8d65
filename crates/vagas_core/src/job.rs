use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 1-based position of a record in the loaded array.
pub type JobId = u64;

/// A filterable or displayable column of a job record, named by its JSON key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    Title,
    Company,
    CompanyType,
    Level,
    Category,
    Location,
    Url,
    InsertedDate,
    Remote,
    Affirmative,
    Temporary,
    Contract,
    /// Any other string column carried by the source records.
    Other(String),
}

impl Field {
    /// The six columns considered by free-text search.
    pub const SEARCHABLE: [Field; 6] = [
        Field::Title,
        Field::Company,
        Field::CompanyType,
        Field::Level,
        Field::Category,
        Field::Location,
    ];

    pub fn wire_name(&self) -> &str {
        match self {
            Field::Title => "title",
            Field::Company => "company",
            Field::CompanyType => "company_type",
            Field::Level => "level",
            Field::Category => "category",
            Field::Location => "location",
            Field::Url => "url",
            Field::InsertedDate => "inserted_date",
            Field::Remote => "remote?",
            Field::Affirmative => "affirmative?",
            Field::Temporary => "temporary?",
            Field::Contract => "contract",
            Field::Other(name) => name,
        }
    }

    pub fn from_wire(name: &str) -> Self {
        match name {
            "title" => Field::Title,
            "company" => Field::Company,
            "company_type" => Field::CompanyType,
            "level" => Field::Level,
            "category" => Field::Category,
            "location" => Field::Location,
            "url" => Field::Url,
            "inserted_date" => Field::InsertedDate,
            "remote?" => Field::Remote,
            "affirmative?" => Field::Affirmative,
            "temporary?" => Field::Temporary,
            "contract" => Field::Contract,
            other => Field::Other(other.to_string()),
        }
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::from_wire(&value)
    }
}

impl From<Field> for String {
    fn from(value: Field) -> Self {
        value.wire_name().to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One job posting. Immutable once loaded.
///
/// Empty and whitespace-only values are stored as absent, so every lookup
/// through [`Job::field`] yields either a non-empty value or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Job {
    pub id: JobId,
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_type: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub inserted_date: Option<String>,
    pub remote: Option<String>,
    pub affirmative: Option<String>,
    pub temporary: Option<String>,
    pub contract: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Job {
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Builder used by loaders and tests.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value.into());
        self
    }

    /// Builds a job from a JSON object. Values of unexpected type never fail
    /// the record: numbers and booleans are stringified, anything else is
    /// treated as absent.
    pub fn from_record(id: JobId, record: &Map<String, Value>) -> Self {
        let mut job = Job::new(id);
        for (key, value) in record {
            if let Some(text) = lenient_string(value) {
                job.set(Field::from_wire(key), text);
            }
        }
        job
    }

    pub fn field(&self, field: &Field) -> Option<&str> {
        let slot = match field {
            Field::Title => &self.title,
            Field::Company => &self.company,
            Field::CompanyType => &self.company_type,
            Field::Level => &self.level,
            Field::Category => &self.category,
            Field::Location => &self.location,
            Field::Url => &self.url,
            Field::InsertedDate => &self.inserted_date,
            Field::Remote => &self.remote,
            Field::Affirmative => &self.affirmative,
            Field::Temporary => &self.temporary,
            Field::Contract => &self.contract,
            Field::Other(name) => return self.extra.get(name).map(String::as_str),
        };
        slot.as_deref()
    }

    /// Parsed insertion date; unparsable dates count as missing.
    pub fn inserted_on(&self) -> Option<NaiveDate> {
        let raw = self.inserted_date.as_deref()?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }

    /// Date as shown on cards (`dd/mm/yyyy`), or the raw text when it does not parse.
    pub fn display_date(&self) -> String {
        match self.inserted_on() {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => self.inserted_date.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: Field, value: String) {
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Company => &mut self.company,
            Field::CompanyType => &mut self.company_type,
            Field::Level => &mut self.level,
            Field::Category => &mut self.category,
            Field::Location => &mut self.location,
            Field::Url => &mut self.url,
            Field::InsertedDate => &mut self.inserted_date,
            Field::Remote => &mut self.remote,
            Field::Affirmative => &mut self.affirmative,
            Field::Temporary => &mut self.temporary,
            Field::Contract => &mut self.contract,
            Field::Other(name) => {
                match value {
                    Some(value) => self.extra.insert(name, value),
                    None => self.extra.remove(&name),
                };
                return;
            }
        };
        *slot = value;
    }
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
