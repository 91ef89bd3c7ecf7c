// Backend wire contract: response envelope and select request
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Discriminant of a backend response. Anything other than `SUCCESS` is a
/// logical failure, even when the HTTP exchange itself succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnvelopeState {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "ERROR")]
    Error,
    #[default]
    #[serde(other, rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for EnvelopeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnvelopeState::Success => "SUCCESS",
            EnvelopeState::Error => "ERROR",
            EnvelopeState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page_no: u32,
    #[serde(default)]
    pub rownumber: u32,
}

/// `{state, data, page?, message?}` wrapper of every backend response and
/// every bundled fallback dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub state: EnvelopeState,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            state: EnvelopeState::Success,
            data,
            page: None,
            message: None,
        }
    }

    pub fn with_page(mut self, total: u64, rownumber: u32) -> Self {
        self.page = Some(PageInfo {
            total,
            page_no: 1,
            rownumber,
        });
        self
    }

    pub fn is_success(&self) -> bool {
        self.state == EnvelopeState::Success
    }

    /// Null, or an empty array/object.
    pub fn is_empty_payload(&self) -> bool {
        match &self.data {
            Value::Null => true,
            Value::Array(rows) => rows.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_no: u32,
    pub rownumber: u32,
}

/// Body of `POST {apiBase}/aud/select/{serviceName}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub service_name: String,
    pub col_names: Vec<String>,
    pub condition: Vec<Value>,
    pub page: PageRequest,
}

impl SelectRequest {
    /// Select every column of the first 999 rows.
    pub fn all_rows(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            col_names: vec!["*".to_string()],
            condition: Vec::new(),
            page: PageRequest {
                page_no: 1,
                rownumber: 999,
            },
        }
    }
}
