use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use super::dates::parse_timestamp;

/// A timestamp as it arrives from the task store.
///
/// Stored rows carry text in one of the accepted layouts; callers building
/// tasks in code can hand over native chrono values directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl Timestamp {
    /// Resolve to a date-time. Unparseable text resolves to `None`.
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Text(raw) => parse_timestamp(raw),
            Timestamp::DateTime(dt) => Some(*dt),
            Timestamp::Date(d) => d.and_hms_opt(0, 0, 0),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::DateTime(dt)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(d: NaiveDate) -> Self {
        Timestamp::Date(d)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Timestamp::Text(raw.to_string())
    }
}

/// Potential revenue: a number, or text that may or may not be numeric.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Revenue {
    Number(f64),
    Text(String),
}

impl Revenue {
    /// Coerce to a non-negative, finite amount. Anything else is 0.
    pub fn amount(&self) -> f64 {
        let value = match self {
            Revenue::Number(n) => *n,
            Revenue::Text(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
        };
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }
}

impl From<f64> for Revenue {
    fn from(n: f64) -> Self {
        Revenue::Number(n)
    }
}

impl From<&str> for Revenue {
    fn from(raw: &str) -> Self {
        Revenue::Text(raw.to_string())
    }
}

/// Read-only snapshot of a task record.
///
/// Every field is optional. A field whose stored value has the wrong shape
/// (a number where text belongs, an object where a date belongs, a number
/// too large for `f64`) is read as absent rather than failing the whole
/// record. Records are read from JSON text only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer_name: Option<String>,
    /// Task kind: "normal", "quick", "followup", "meeting"
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    /// "open", "waiting", "done"; other values are tolerated
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    /// Expected "A", "B" or "C"
    #[serde(default, deserialize_with = "lenient")]
    pub customer_tier: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub potential_revenue: Option<Revenue>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_action_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient")]
    pub next_followup_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient")]
    pub due_date: Option<Timestamp>,
}

/// Deserialize a field, mapping any shape mismatch to `None`.
///
/// The field is captured as raw JSON first so that out-of-range numbers
/// fail only this field, not the surrounding record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(serde_json::from_str::<Option<T>>(raw.get()).ok().flatten())
}

impl Task {
    fn status_is(&self, wanted: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn is_done(&self) -> bool {
        self.status_is("done")
    }

    pub fn is_waiting(&self) -> bool {
        self.status_is("waiting")
    }

    /// Quick tasks are listed separately and never scored
    pub fn is_quick(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.trim().eq_ignore_ascii_case("quick"))
    }

    pub fn last_action_at(&self) -> Option<NaiveDateTime> {
        self.last_action_date.as_ref().and_then(Timestamp::resolve)
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at.as_ref().and_then(Timestamp::resolve)
    }

    pub fn next_followup_at(&self) -> Option<NaiveDateTime> {
        self.next_followup_date.as_ref().and_then(Timestamp::resolve)
    }

    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.due_date.as_ref().and_then(Timestamp::resolve)
    }

    /// Anchor for staleness: last action, else creation time
    pub fn last_touched_at(&self) -> Option<NaiveDateTime> {
        self.last_action_at().or_else(|| self.created_at())
    }

    /// Potential revenue coerced to a non-negative amount
    pub fn revenue(&self) -> f64 {
        self.potential_revenue
            .as_ref()
            .map(Revenue::amount)
            .unwrap_or(0.0)
    }

    /// Title for display, falling back to the id
    pub fn display_title(&self) -> String {
        match (&self.title, self.id) {
            (Some(title), _) if !title.trim().is_empty() => title.clone(),
            (_, Some(id)) => format!("Task #{}", id),
            _ => "(untitled)".to_string(),
        }
    }
}
