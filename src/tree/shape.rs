//! Serialized tree shapes and shape errors

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Serialization a tree is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Nested pairs: `[label, [child, ...]]`
    Array,
    /// Labeled records: `{"name": label, "children": [child, ...]}`
    Object,
}

impl Format {
    /// Guess the format from the first significant character of JSON text
    pub fn detect(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '[' => Some(Format::Array),
            '{' => Some(Format::Object),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Array => write!(f, "array"),
            Format::Object => write!(f, "object"),
        }
    }
}

/// A recursive serialized shape that can be split into a label and its children
pub trait Shape: Sized {
    type Label;

    fn into_parts(self) -> (Self::Label, Vec<Self>);
}

/// Nested-pair form. Deserializes only from a sequence of exactly two
/// elements whose second element is itself a sequence of pairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pair<N>(pub N, pub Vec<Pair<N>>);

impl<N> Pair<N> {
    pub fn leaf(label: N) -> Self {
        Pair(label, Vec::new())
    }
}

impl<N> Shape for Pair<N> {
    type Label = N;

    fn into_parts(self) -> (N, Vec<Self>) {
        (self.0, self.1)
    }
}

/// Labeled-record form. Both `name` and `children` are required; other keys
/// are ignored. Only maps are accepted, never sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<N> {
    pub name: N,
    pub children: Vec<Record<N>>,
}

impl<N> Record<N> {
    pub fn leaf(name: N) -> Self {
        Record {
            name,
            children: Vec::new(),
        }
    }
}

impl<N> Shape for Record<N> {
    type Label = N;

    fn into_parts(self) -> (N, Vec<Self>) {
        (self.name, self.children)
    }
}

impl<'de, N: Deserialize<'de>> Deserialize<'de> for Record<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor(PhantomData))
    }
}

struct RecordVisitor<N>(PhantomData<N>);

impl<'de, N: Deserialize<'de>> Visitor<'de> for RecordVisitor<N> {
    type Value = Record<N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a record with `name` and `children`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record<N>, A::Error> {
        let mut name = None;
        let mut children = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value()?);
                }
                "children" => {
                    if children.is_some() {
                        return Err(de::Error::duplicate_field("children"));
                    }
                    children = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(Record {
            name: name.ok_or_else(|| <A::Error as de::Error>::missing_field("name"))?,
            children: children
                .ok_or_else(|| <A::Error as de::Error>::missing_field("children"))?,
        })
    }
}

/// Position of malformed input within JSON text (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Input does not match the recursive node shape of its format
#[derive(Error, Debug, Clone, PartialEq)]
#[error("malformed {format} tree{}: {message}", at(.location))]
pub struct ShapeError {
    pub format: Format,
    pub message: String,
    /// Present when the input was parsed from text
    pub location: Option<Location>,
}

fn at(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {}", location),
        None => String::new(),
    }
}

impl ShapeError {
    pub fn from_serde_error(format: Format, e: &serde_json::Error) -> Self {
        // serde_json reports line 0 for errors that did not come from text
        let location = (e.line() > 0).then(|| Location {
            line: e.line(),
            column: e.column(),
        });

        // Drop the trailing " at line X column Y", the location is kept separately
        let full = e.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) if location.is_some() => full[..idx].to_string(),
            _ => full,
        };

        ShapeError {
            format,
            message,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_format() {
        assert_eq!(Format::detect("  ['a', []]"), Some(Format::Array));
        assert_eq!(Format::detect("\n{\"name\": \"a\"}"), Some(Format::Object));
        assert_eq!(Format::detect("\"a\""), None);
        assert_eq!(Format::detect("   "), None);
    }

    #[test]
    fn test_pair_requires_two_elements() {
        assert!(serde_json::from_value::<Pair<String>>(json!(["a"])).is_err());
        assert!(serde_json::from_value::<Pair<String>>(json!(["a", [], []])).is_err());
        assert!(serde_json::from_value::<Pair<String>>(json!(["a", "b"])).is_err());
        assert!(serde_json::from_value::<Pair<String>>(json!({"name": "a"})).is_err());

        let pair: Pair<String> = serde_json::from_value(json!(["a", []])).unwrap();
        assert_eq!(pair, Pair::leaf("a".to_string()));
    }

    #[test]
    fn test_record_requires_name_and_children() {
        assert!(serde_json::from_value::<Record<String>>(json!({"name": "a"})).is_err());
        assert!(serde_json::from_value::<Record<String>>(json!({"children": []})).is_err());
        assert!(
            serde_json::from_value::<Record<String>>(json!({"name": "a", "children": {}})).is_err()
        );

        let record: Record<String> =
            serde_json::from_value(json!({"name": "a", "children": [], "extra": 1})).unwrap();
        assert_eq!(record, Record::leaf("a".to_string()));
    }

    #[test]
    fn test_record_rejects_sequences() {
        assert!(serde_json::from_value::<Record<String>>(json!(["a", []])).is_err());

        let duplicate = r#"{"name": "a", "name": "b", "children": []}"#;
        assert!(serde_json::from_str::<Record<String>>(duplicate).is_err());
    }

    #[test]
    fn test_shape_error_from_text_has_location() {
        let e = serde_json::from_str::<Pair<String>>("[\"a\",\n  5]").unwrap_err();
        let error = ShapeError::from_serde_error(Format::Array, &e);

        assert_eq!(error.format, Format::Array);
        assert_eq!(error.location.map(|l| l.line), Some(2));
        assert!(!error.message.contains(" at line "));
        assert!(error.to_string().starts_with("malformed array tree at line 2"));
    }

    #[test]
    fn test_shape_error_keeps_label_text_resembling_location() {
        let e = serde_json::from_str::<Pair<String>>(r#"["a", "x at line 9 y"]"#).unwrap_err();
        let error = ShapeError::from_serde_error(Format::Array, &e);

        assert_eq!(error.location.map(|l| l.line), Some(1));
        assert!(error.message.contains("\"x at line 9 y\""), "{}", error.message);
        assert!(error.to_string().ends_with("expected a sequence"));
    }

    #[test]
    fn test_shape_error_from_value_has_no_location() {
        let e = serde_json::from_value::<Record<String>>(json!({"name": "a"})).unwrap_err();
        let error = ShapeError::from_serde_error(Format::Object, &e);

        assert_eq!(error.location, None);
        assert_eq!(
            error.to_string(),
            "malformed object tree: missing field `children`"
        );
    }
}
