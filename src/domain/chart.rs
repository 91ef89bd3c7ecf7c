// Adapted chart data: the closed set of shapes the board renders
//
// Deserialization is lenient: numeric strings parse, null or odd numbers read
// as 0, labels fall back to "-".
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const PLACEHOLDER: &str = "-";

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// Numbers as-is, numeric strings parsed (a trailing `%` is ignored),
/// anything else 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Strings as-is, numbers without a trailing `.0`, anything else "-".
pub fn coerce_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        Some(Value::Bool(b)) => b.to_string(),
        _ => placeholder(),
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_number(value.as_ref()))
}

fn lenient_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(|v| coerce_number(Some(v))).collect(),
        _ => Vec::new(),
    })
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_label(value.as_ref()))
}

fn lenient_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(|v| coerce_label(Some(v))).collect(),
        _ => Vec::new(),
    })
}

/// `null` reads as the default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesItem {
    #[serde(default = "placeholder", deserialize_with = "lenient_label")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub data: Vec<f64>,
}

/// Bar, line and trend charts: one category axis, one or more series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesChartData {
    #[serde(deserialize_with = "lenient_labels")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub series: Vec<SeriesItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    #[serde(default = "placeholder", deserialize_with = "lenient_label")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartData {
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingCenter {
    #[serde(deserialize_with = "lenient_label")]
    pub label: String,
    #[serde(deserialize_with = "lenient_number")]
    pub value: f64,
}

impl Default for RingCenter {
    fn default() -> Self {
        Self {
            label: placeholder(),
            value: 0.0,
        }
    }
}

/// Progress ring: `value` out of `total`, with a headline figure in the middle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingChartData {
    #[serde(deserialize_with = "lenient_number")]
    pub value: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub total: f64,
    #[serde(deserialize_with = "lenient_label")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub center: RingCenter,
}

impl Default for RingChartData {
    fn default() -> Self {
        Self {
            value: 0.0,
            total: 0.0,
            label: placeholder(),
            center: RingCenter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One row of the device heartbeat table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub ip: String,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub usage: f64,
    pub time: String,
}

/// Every adapter converges on exactly one of these. Serialized untagged so
/// the renderer sees the bare shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Series(SeriesChartData),
    Pie(PieChartData),
    Ring(RingChartData),
    StatCards(Vec<StatCard>),
    Devices(Vec<DeviceInfo>),
}

impl From<SeriesChartData> for ChartData {
    fn from(value: SeriesChartData) -> Self {
        ChartData::Series(value)
    }
}

impl From<PieChartData> for ChartData {
    fn from(value: PieChartData) -> Self {
        ChartData::Pie(value)
    }
}

impl From<RingChartData> for ChartData {
    fn from(value: RingChartData) -> Self {
        ChartData::Ring(value)
    }
}

impl From<Vec<StatCard>> for ChartData {
    fn from(value: Vec<StatCard>) -> Self {
        ChartData::StatCards(value)
    }
}

impl From<Vec<DeviceInfo>> for ChartData {
    fn from(value: Vec<DeviceInfo>) -> Self {
        ChartData::Devices(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_data_serializes_as_bare_shape() {
        let pie = ChartData::from(PieChartData {
            data: vec![PieSlice {
                name: "一型客车".to_string(),
                value: 91.87,
            }],
        });
        assert_eq!(
            serde_json::to_value(&pie).unwrap(),
            json!({ "data": [{ "name": "一型客车", "value": 91.87 }] })
        );

        let cards = ChartData::from(vec![StatCard {
            key: "monthInitiated".to_string(),
            label: "本月发起工单".to_string(),
            value: 124.0,
            unit: String::new(),
            icon: None,
        }]);
        let wire = serde_json::to_value(&cards).unwrap();
        assert!(wire[0].get("icon").is_none());
        assert_eq!(wire[0]["key"], "monthInitiated");
    }

    #[test]
    fn test_series_tolerates_null_and_numeric_strings() {
        let chart: SeriesChartData = serde_json::from_value(json!({
            "categories": ["a", 2, null],
            "series": [{ "name": null, "data": [1, null, "3.5", "n/a"] }]
        }))
        .unwrap();
        assert_eq!(chart.categories, vec!["a", "2", "-"]);
        assert_eq!(chart.series[0].name, "-");
        assert_eq!(chart.series[0].data, vec![1.0, 0.0, 3.5, 0.0]);

        let chart: SeriesChartData = serde_json::from_value(json!({ "series": null })).unwrap();
        assert_eq!(chart, SeriesChartData::default());
    }

    #[test]
    fn test_ring_parses_numeric_strings() {
        let ring: RingChartData = serde_json::from_value(json!({
            "value": "20",
            "total": 100,
            "label": null,
            "center": { "label": "本月处理工单", "value": "49.3%" }
        }))
        .unwrap();
        assert_eq!(ring.value, 20.0);
        assert_eq!(ring.total, 100.0);
        assert_eq!(ring.label, "-");
        assert_eq!(ring.center.value, 49.3);

        let ring: RingChartData = serde_json::from_value(json!({ "value": null, "center": null })).unwrap();
        assert_eq!(ring, RingChartData::default());
    }

    #[test]
    fn test_pie_slice_value_coerced() {
        let pie: PieChartData = serde_json::from_value(json!({
            "data": [{ "name": "一型客车", "value": "91.87" }, { "value": null }]
        }))
        .unwrap();
        assert_eq!(pie.data[0].value, 91.87);
        assert_eq!(pie.data[1], PieSlice { name: "-".to_string(), value: 0.0 });
    }

    #[test]
    fn test_coercion_rules() {
        assert_eq!(coerce_number(Some(&json!("49.3%"))), 49.3);
        assert_eq!(coerce_number(Some(&json!(" 12 "))), 12.0);
        assert_eq!(coerce_number(Some(&json!(null))), 0.0);
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_label(Some(&json!(2.5))), "2.5");
        assert_eq!(coerce_label(Some(&json!(7))), "7");
        assert_eq!(coerce_label(None), PLACEHOLDER);
    }
}
