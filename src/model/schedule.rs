use std::fmt;

use chrono::NaiveTime;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A cell value. Mats arrive as numbers from some backends and as strings from others. Anything
/// that is not a scalar is kept as raw JSON and shown serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Empty text, which is shown the same as a missing value.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// One participant row of the schedule. The backend uses the Polish column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "Imię i nazwisko", alias = "name", default)]
    pub name: Option<FieldValue>,
    #[serde(rename = "Klub", alias = "club", default)]
    pub club: Option<FieldValue>,
    #[serde(rename = "Kategoria", alias = "category", default)]
    pub category: Option<FieldValue>,
    #[serde(rename = "Mata", alias = "mat", default)]
    pub mat: Option<FieldValue>,
    #[serde(rename = "Szacowany czas", alias = "time", default)]
    pub time: Option<FieldValue>,
}

impl ScheduleEntry {
    /// Start of the `"HH:MM - HH:MM"` time range, if the entry has a parseable one.
    pub fn start_time(&self) -> Option<NaiveTime> {
        match self.time.as_ref()? {
            FieldValue::Text(range) => parse_start_time(range),
            _ => None,
        }
    }

    /// Whether the entry started before `now`. Only the time of day is compared.
    pub fn is_past(&self, now: NaiveTime) -> bool {
        self.start_time().is_some_and(|start| start < now)
    }
}

pub fn parse_start_time(range: &str) -> Option<NaiveTime> {
    let start = range.split('-').next()?.trim();
    NaiveTime::parse_from_str(start, "%H:%M").ok()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySchedule {
    pub day: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Day label -> entries, in the order the backend listed the days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleByDay {
    pub days: Vec<DaySchedule>,
}

impl ScheduleByDay {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days that have at least one entry.
    pub fn non_empty_days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter().filter(|d| !d.entries.is_empty())
    }
}

impl<'de> Deserialize<'de> for ScheduleByDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DaysVisitor;

        impl<'de> Visitor<'de> for DaysVisitor {
            type Value = ScheduleByDay;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of day label to schedule entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut days = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((day, entries)) = map.next_entry::<String, Option<Vec<ScheduleEntry>>>()? {
                    days.push(DaySchedule { day, entries: entries.unwrap_or_default() });
                }
                Ok(ScheduleByDay { days })
            }
        }

        deserializer.deserialize_map(DaysVisitor)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: ScheduleByDay,
    #[serde(default)]
    pub message: Option<String>,
}
