// Field adapters - raw backend rows to chart shapes
//
// Adapters are pure. Missing numeric fields read as 0 and missing string
// fields as "-". A `null` payload means "no rows".
use crate::domain::chart::{
    coerce_label, coerce_number, ChartData, DeviceInfo, PieChartData, PieSlice, SeriesChartData,
    SeriesItem, StatCard,
};
use chrono::{DateTime, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AdaptError {
    #[error("expected a list of rows, got {0}")]
    ExpectedRows(&'static str),

    #[error("expected a single record, got {0}")]
    ExpectedRecord(&'static str),

    #[error("payload does not match {shape}: {reason}")]
    Shape { shape: &'static str, reason: String },
}

type AdaptFn = dyn Fn(&Value) -> Result<ChartData, AdaptError> + Send + Sync;

/// A named mapping from one raw payload shape onto one [`ChartData`] shape.
#[derive(Clone)]
pub struct Adapter {
    name: &'static str,
    map: Arc<AdaptFn>,
}

impl Adapter {
    pub fn new<F>(name: &'static str, map: F) -> Self
    where
        F: Fn(&Value) -> Result<ChartData, AdaptError> + Send + Sync + 'static,
    {
        Self {
            name,
            map: Arc::new(map),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, raw: &Value) -> Result<ChartData, AdaptError> {
        (self.map)(raw)
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter").field("name", &self.name).finish()
    }
}

/// One stat card: which raw field feeds it and how it is labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct StatField {
    pub key: &'static str,
    pub label: &'static str,
    pub source: &'static str,
    pub unit: &'static str,
    pub icon: Option<String>,
}

impl StatField {
    pub fn new(key: &'static str, label: &'static str, source: &'static str, unit: &'static str) -> Self {
        Self {
            key,
            label,
            source,
            unit,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Single record -> one card per field. No record -> no cards.
pub fn to_stat_cards(fields: Vec<StatField>) -> Adapter {
    Adapter::new("stat_cards", move |raw| {
        let Some(record) = record(raw)? else {
            return Ok(ChartData::StatCards(Vec::new()));
        };
        let cards = fields
            .iter()
            .map(|field| StatCard {
                key: field.key.to_string(),
                label: field.label.to_string(),
                value: coerce_number(record.get(field.source)),
                unit: field.unit.to_string(),
                icon: field.icon.clone(),
            })
            .collect();
        Ok(ChartData::StatCards(cards))
    })
}

/// Rows -> categories from `name_key`, one series from `value_key`.
pub fn to_series(series_name: &'static str, name_key: &'static str, value_key: &'static str) -> Adapter {
    to_multi_series(name_key, vec![(series_name, value_key)])
}

/// Rows -> categories from `category_key`, one series per `(name, value_key)`.
pub fn to_multi_series(category_key: &'static str, series: Vec<(&'static str, &'static str)>) -> Adapter {
    Adapter::new("series", move |raw| {
        let rows = rows(raw)?;
        let categories = rows
            .iter()
            .map(|row| coerce_label(field(row, category_key)))
            .collect();
        let series = series
            .iter()
            .map(|(name, value_key)| SeriesItem {
                name: name.to_string(),
                data: rows
                    .iter()
                    .map(|row| coerce_number(field(row, value_key)))
                    .collect(),
            })
            .collect();
        Ok(ChartData::Series(SeriesChartData { categories, series }))
    })
}

/// Rows -> one slice per row.
pub fn to_pie(name_key: &'static str, value_key: &'static str) -> Adapter {
    Adapter::new("pie", move |raw| {
        let data = rows(raw)?
            .iter()
            .map(|row| PieSlice {
                name: coerce_label(field(row, name_key)),
                value: coerce_number(field(row, value_key)),
            })
            .collect();
        Ok(ChartData::Pie(PieChartData { data }))
    })
}

/// Device heartbeat rows -> device table.
pub fn to_devices() -> Adapter {
    Adapter::new("devices", |raw| {
        let devices = rows(raw)?
            .iter()
            .map(|row| DeviceInfo {
                ip: coerce_label(field(row, "ip_address")),
                cpu: coerce_label(field(row, "system_cpu_load")),
                memory: coerce_label(field(row, "physical_total_memory")),
                disk: coerce_label(field(row, "disk1_usable_space")),
                usage: coerce_number(field(row, "physical_memory_used_rate")),
                time: format_heartbeat(field(row, "update_time")),
            })
            .collect();
        Ok(ChartData::Devices(devices))
    })
}

/// For services whose backend already answers in the chart shape. An empty
/// payload yields the shape's default.
pub fn passthrough<S>(shape: &'static str) -> Adapter
where
    S: DeserializeOwned + Default + Into<ChartData> + 'static,
{
    Adapter::new(shape, move |raw| {
        let is_empty = match raw {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if is_empty {
            return Ok(S::default().into());
        }
        serde_json::from_value::<S>(raw.clone())
            .map(Into::into)
            .map_err(|e| AdaptError::Shape {
                shape,
                reason: e.to_string(),
            })
    })
}

fn rows(raw: &Value) -> Result<Vec<&Value>, AdaptError> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(_) => Ok(vec![raw]),
        other => Err(AdaptError::ExpectedRows(kind_of(other))),
    }
}

fn record(raw: &Value) -> Result<Option<&Map<String, Value>>, AdaptError> {
    match raw {
        Value::Null => Ok(None),
        Value::Object(fields) => Ok(Some(fields)),
        Value::Array(items) => match items.first() {
            None => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(fields)),
            Some(other) => Err(AdaptError::ExpectedRecord(kind_of(other))),
        },
        other => Err(AdaptError::ExpectedRecord(kind_of(other))),
    }
}

fn field<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.as_object().and_then(|fields| fields.get(key))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn format_heartbeat(value: Option<&Value>) -> String {
    let Some(Value::String(raw)) = value else {
        return coerce_label(value);
    };
    let trimmed = raw.trim();
    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|t| t.naive_local()));
    match parsed {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.clone(),
    }
}
