//! Front-matter parsing
//!
//! Documents may open with a block of `key: value` lines fenced by `---`
//! lines. Only that narrow subset is understood: scalar strings and
//! `[a, b, c]` lists. Anything else is left to the body.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Opening fence, optional block, closing fence. The block group is
    /// absent for an empty `---\n---` pair.
    static ref FRONT_MATTER: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap();
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// The value as a list; a scalar becomes a one-element list (or an
    /// empty one if it is blank)
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.clone(),
            Value::Scalar(s) if s.is_empty() => Vec::new(),
            Value::Scalar(s) => vec![s.clone()],
        }
    }
}

/// Front-matter data from a markdown document, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    entries: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Split a document into front-matter and body.
    ///
    /// Never fails: a missing or unterminated block yields empty
    /// front-matter and the whole input as body.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(caps) = FRONT_MATTER.captures(content) else {
            return (FrontMatter::default(), content);
        };

        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = &content[caps.get(0).map_or(0, |m| m.end())..];

        (Self::parse_block(block), body)
    }

    fn parse_block(block: &str) -> Self {
        let mut entries = IndexMap::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.insert(key.to_string(), parse_value(value.trim()));
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, recognized and unknown, in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn title(&self) -> Option<&str> {
        self.scalar("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.scalar("description")
    }

    pub fn category(&self) -> Option<&str> {
        self.scalar("category")
    }

    pub fn tags(&self) -> Option<Vec<String>> {
        self.get("tags").map(Value::to_list)
    }

    /// The `date` entry, if present and in a recognizable format
    pub fn date(&self) -> Option<NaiveDate> {
        self.scalar("date").and_then(parse_date_string)
    }

    /// A non-empty scalar entry
    fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Parse the text after the first colon of a front-matter line
fn parse_value(raw: &str) -> Value {
    let value = strip_quotes(raw);

    match value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    {
        Some(inner) => Value::List(
            inner
                .split(',')
                .map(|item| item.trim().replace(['\'', '"'], ""))
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        None => Value::Scalar(value.to_string()),
    }
}

/// Remove one matching pair of enclosing quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse a date string in various formats, keeping only the calendar date
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(d);
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}
