use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// When a post was created, as delivered by the analysis result.
///
/// Older results carry formatted strings (sometimes with a trailing
/// `@ ...` annotation), newer ones carry epoch seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Seconds(secs) => Utc.timestamp_opt(*secs, 0).single(),
            Timestamp::Fractional(secs) => from_fractional(*secs),
            Timestamp::Text(raw) => parse_text(raw),
        }
    }

    /// Calendar date used for row labels, e.g. `2023-01-03`.
    pub fn date_label(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.raw_head(),
        }
    }

    /// Date and time of day for the detail panel, e.g. `January 3, 2023 10:00 AM`.
    pub fn readable(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%B %-d, %Y %-I:%M %p").to_string(),
            None => self.raw_head(),
        }
    }

    fn raw_head(&self) -> String {
        match self {
            Timestamp::Seconds(secs) => secs.to_string(),
            Timestamp::Fractional(secs) => secs.to_string(),
            Timestamp::Text(raw) => head(raw).to_string(),
        }
    }
}

fn head(raw: &str) -> &str {
    raw.split('@').next().unwrap_or(raw).trim()
}

fn from_fractional(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    Utc.timestamp_opt(whole as i64, nanos).single()
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let text = head(raw);
    if let Ok(secs) = text.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }
    if let Ok(secs) = text.parse::<f64>() {
        return from_fractional(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    // Legacy social-media format: `Tue Jan 03 10:00:00 +0000 2023`
    if let Ok(dt) = DateTime::parse_from_str(text, "%a %b %d %H:%M:%S %z %Y") {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

/// One behavioral record for a single post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotatedItem {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(alias = "createdAt")]
    pub created_at: Timestamp,
    /// One or two action codes.
    #[serde(deserialize_with = "action_codes")]
    pub action: Vec<char>,
    /// Content-syntactic strings, index-aligned with `action`.
    #[serde(
        alias = "contentSyntactic",
        default,
        deserialize_with = "content_strings"
    )]
    pub content_syntactic: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl AnnotatedItem {
    pub fn new(
        id: impl Into<String>,
        created_at: Timestamp,
        action: &str,
        content_syntactic: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            action: action.chars().collect(),
            content_syntactic: content_syntactic.iter().map(|s| s.to_string()).collect(),
            text: None,
        }
    }

    #[cfg(test)]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// One or two action codes, and no more content strings than actions.
    pub fn is_well_formed(&self) -> bool {
        (1..=2).contains(&self.action.len()) && self.content_syntactic.len() <= self.action.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// Results encode these fields either as one concatenated string or as a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

fn action_codes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<char>, D::Error> {
    match StringOrList::deserialize(deserializer)? {
        StringOrList::One(codes) => Ok(codes.chars().collect()),
        StringOrList::Many(list) => list
            .iter()
            .map(|code| {
                let mut chars = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(D::Error::custom(format!(
                        "action code {code:?} is not a single character"
                    ))),
                }
            })
            .collect(),
    }
}

fn content_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => vec![s],
        StringOrList::Many(list) => list,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Base time for fixture items: 2023-01-03 10:00:00 UTC.
    pub(crate) const T0: i64 = 1_672_740_000;

    /// `count` items with one action each, one minute apart.
    pub(crate) fn single_actions(count: usize, code: char) -> Vec<AnnotatedItem> {
        (0..count)
            .map(|i| {
                AnnotatedItem::new(
                    format!("{i}"),
                    Timestamp::Seconds(T0 + 60 * i as i64),
                    &code.to_string(),
                    &["E"],
                )
            })
            .collect()
    }

    /// `count` items with a one-day gap between them.
    pub(crate) fn daily(count: usize, action: &str, content: &[&str]) -> Vec<AnnotatedItem> {
        (0..count)
            .map(|i| {
                AnnotatedItem::new(
                    format!("day-{i}"),
                    Timestamp::Seconds(T0 + 86_400 * i as i64),
                    action,
                    content,
                )
            })
            .collect()
    }
}
