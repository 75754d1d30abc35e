use crate::error::{ChartError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use serde_json::{Map, Value};

/// Date format of the `datetime` field in the wire document.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One observation: a calendar date and its measured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Milliseconds since the Unix epoch at UTC midnight of `timestamp`.
    /// This is the numeric coordinate the time scale works in.
    pub fn epoch_millis(&self) -> f64 {
        date_to_millis(self.timestamp)
    }
}

pub fn date_to_millis(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// A validated time series, ready to be charted.
///
/// Samples are expected in ascending timestamp order; nothing here sorts them.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDocument {
    pub samples: Vec<Sample>,
    pub unit: String,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

/// Wire shape of one point (`{"datetime": "YYYY-MM-DD", "y": 1.0}`).
///
/// Write-only: reading goes through [`SeriesDocument::from_value`], which
/// reports the offending field path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointRecord {
    pub datetime: String,
    pub y: f64,
}

/// Wire shape of the whole document.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentRecord {
    pub points: Vec<PointRecord>,
    pub unit: String,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
}

impl From<&SeriesDocument> for DocumentRecord {
    fn from(doc: &SeriesDocument) -> Self {
        Self {
            points: doc
                .samples
                .iter()
                .map(|s| PointRecord {
                    datetime: s.timestamp.format(DATE_FORMAT).to_string(),
                    y: s.value,
                })
                .collect(),
            unit: doc.unit.clone(),
            xlabel: doc.x_label.clone(),
            ylabel: doc.y_label.clone(),
            title: doc.title.clone(),
        }
    }
}

impl SeriesDocument {
    /// Validate an already-parsed JSON value into a document.
    ///
    /// Every required field is checked explicitly so a bad document fails with
    /// the path of the offending field instead of rendering empty labels.
    pub fn from_value(v: &Value) -> Result<Self> {
        let obj = v
            .as_object()
            .ok_or_else(|| ChartError::malformed("<root>", "is not a JSON object"))?;

        let points = obj
            .get("points")
            .ok_or_else(|| ChartError::malformed("points", "is missing"))?
            .as_array()
            .ok_or_else(|| ChartError::malformed("points", "is not an array"))?;

        let mut samples = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            samples.push(parse_point(i, p)?);
        }

        if let Some(i) = samples
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
        {
            log::warn!(
                "points are not in ascending date order (index {} > index {}); the line will double back",
                i,
                i + 1
            );
        }

        Ok(Self {
            samples,
            unit: require_str(obj, "unit")?,
            x_label: require_str(obj, "xlabel")?,
            y_label: require_str(obj, "ylabel")?,
            title: require_str(obj, "title")?,
        })
    }

    /// Serialize back into the wire format.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&DocumentRecord::from(self))
            .map_err(|e| ChartError::Render(e.to_string()))
    }
}

fn require_str(obj: &Map<String, Value>, key: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ChartError::malformed(key, "is not a string")),
        None => Err(ChartError::malformed(key, "is missing")),
    }
}

fn parse_point(i: usize, p: &Value) -> Result<Sample> {
    let field = |name: &str| format!("points[{i}].{name}");

    let obj = p
        .as_object()
        .ok_or_else(|| ChartError::malformed(format!("points[{i}]"), "is not an object"))?;

    let raw_date = match obj.get("datetime") {
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(ChartError::malformed(field("datetime"), "is not a string")),
        None => return Err(ChartError::malformed(field("datetime"), "is missing")),
    };
    let timestamp = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
        ChartError::malformed(
            field("datetime"),
            format!("`{raw_date}` is not a YYYY-MM-DD date ({e})"),
        )
    })?;

    let value = obj
        .get("y")
        .ok_or_else(|| ChartError::malformed(field("y"), "is missing"))?
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ChartError::malformed(field("y"), "is not a finite number"))?;

    Ok(Sample { timestamp, value })
}
