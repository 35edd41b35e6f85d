//! Serde helpers that coerce loosely typed bank fields.
//!
//! Bank files are hand-edited spreadsheets exported to JSON, so identifiers
//! and numbering fields arrive as numbers in some rows and strings in others.
//! Every helper here folds scalars into their string form the same way a
//! JavaScript `String(value)` call would. Optional fields that hold an
//! object or array read as absent instead of failing the record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// Any JSON value, with objects and arrays reduced to a marker.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Scalar(Scalar),
    Other(IgnoredAny),
}

impl Loose {
    fn into_scalar(self) -> Option<Scalar> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

/// `null`, missing, object or array -> `None`; any scalar -> its string form.
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value.and_then(Loose::into_scalar).map(Scalar::into_text))
}

/// Required text fields may still be `null` in the source data, but must
/// otherwise be scalars.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_text).unwrap_or_default())
}

/// Marks are integers, but numeric strings and whole floats are accepted.
pub(crate) fn opt_marks<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value.and_then(Loose::into_scalar) {
        Some(Scalar::Int(n)) => u32::try_from(n).ok(),
        Some(Scalar::Float(n)) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 => {
            u32::try_from(n as i64).ok()
        }
        Some(Scalar::Text(raw)) => raw.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Tag arrays: scalar members are coerced, `null` members dropped.
pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<Option<Scalar>>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(Scalar::into_text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::opt_text")]
        title: Option<String>,
        #[serde(default, deserialize_with = "super::opt_marks")]
        marks: Option<u32>,
        #[serde(deserialize_with = "super::text")]
        body: String,
    }

    #[test]
    fn whole_floats_render_like_integers() {
        let value: Scalar = serde_json::from_str("3.0").unwrap();
        assert_eq!(value.into_text(), "3");
    }

    #[test]
    fn nested_values_in_optional_fields_read_as_absent() {
        let row: Row =
            serde_json::from_str(r#"{"title": {"en": "x"}, "marks": [4], "body": "ok"}"#).unwrap();
        assert_eq!(row.title, None);
        assert_eq!(row.marks, None);
        assert_eq!(row.body, "ok");

        let row: Row = serde_json::from_str(r#"{"title": 7, "marks": "4", "body": null}"#).unwrap();
        assert_eq!(row.title.as_deref(), Some("7"));
        assert_eq!(row.marks, Some(4));
        assert_eq!(row.body, "");
    }

    #[test]
    fn required_text_still_rejects_nested_values() {
        assert!(serde_json::from_str::<Row>(r#"{"body": {"nested": true}}"#).is_err());
    }
}
