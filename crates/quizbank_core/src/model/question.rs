//! Question bank record and upload validation.
//!
//! # Responsibility
//! - Define the canonical `Question` record with explicit optional fields.
//! - Validate raw uploads once at ingestion, rejecting the whole payload on
//!   the first malformed element.
//!
//! # Invariants
//! - `Question::id` is unique within one bank.
//! - Identifiers compare by their string form, whatever JSON type they had.
//! - Tag fields are present-but-empty rather than absent after parsing.

use super::wire;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fields every uploaded record must carry (key presence, value may be null).
pub const REQUIRED_FIELDS: [&str; 3] = ["ID", "QuestionText", "AnswerText"];

/// Stable question identifier.
///
/// Source banks mix numeric and string ids, so the value is held as text and
/// written back as a JSON number whenever it is a canonical integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric ordering key; non-numeric ids sort as zero.
    pub fn numeric_value(&self) -> f64 {
        self.0.trim().parse::<f64>().unwrap_or(0.0)
    }

    fn as_canonical_int(&self) -> Option<i64> {
        let parsed = self.0.parse::<i64>().ok()?;
        (parsed.to_string() == self.0).then_some(parsed)
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for QuestionId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_canonical_int() {
            Some(number) => serializer.serialize_i64(number),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        wire::text(deserializer).map(Self)
    }
}

/// One of the four independent tag classification axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagGroup {
    #[serde(rename = "ConceptTags")]
    Concept,
    #[serde(rename = "ContentTags")]
    Content,
    #[serde(rename = "ContextTags")]
    Context,
    #[serde(rename = "ChallengeTags")]
    Challenge,
}

impl TagGroup {
    pub const ALL: [TagGroup; 4] = [
        TagGroup::Concept,
        TagGroup::Content,
        TagGroup::Context,
        TagGroup::Challenge,
    ];

    /// Wire field name on `Question` records.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Concept => "ConceptTags",
            Self::Content => "ContentTags",
            Self::Context => "ContextTags",
            Self::Challenge => "ChallengeTags",
        }
    }

    /// Short human label (`Concept`, `Content`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::Content => "Content",
            Self::Context => "Context",
            Self::Challenge => "Challenge",
        }
    }
}

impl FromStr for TagGroup {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        TagGroup::ALL
            .into_iter()
            .find(|group| {
                normalized == group.label().to_ascii_lowercase()
                    || normalized == group.field_name().to_ascii_lowercase()
            })
            .ok_or_else(|| {
                format!("unknown tag group `{value}`; expected concept|content|context|challenge")
            })
    }
}

/// Canonical question bank record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    #[serde(rename = "ID")]
    pub id: QuestionId,
    #[serde(
        rename = "ExamID",
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub exam_id: Option<String>,
    #[serde(
        rename = "PaperID",
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub paper_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub publication_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub stimulus: Option<String>,
    #[serde(deserialize_with = "wire::text")]
    pub question_text: String,
    #[serde(deserialize_with = "wire::text")]
    pub answer_text: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub command_term: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_marks",
        skip_serializing_if = "Option::is_none"
    )]
    pub marks: Option<u32>,
    #[serde(default, deserialize_with = "wire::tags")]
    pub concept_tags: Vec<String>,
    #[serde(default, deserialize_with = "wire::tags")]
    pub content_tags: Vec<String>,
    #[serde(default, deserialize_with = "wire::tags")]
    pub context_tags: Vec<String>,
    #[serde(default, deserialize_with = "wire::tags")]
    pub challenge_tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_question_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_sub_question_no: Option<String>,
}

impl Question {
    /// Creates a minimal record with only the required fields populated.
    pub fn new(
        id: impl Into<QuestionId>,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            exam_id: None,
            paper_id: None,
            source: None,
            author: None,
            publication_date: None,
            level: None,
            title: None,
            stimulus: None,
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            command_term: None,
            marks: None,
            concept_tags: Vec::new(),
            content_tags: Vec::new(),
            context_tags: Vec::new(),
            challenge_tags: Vec::new(),
            question_no: None,
            sub_question_no: None,
            sub_sub_question_no: None,
        }
    }

    pub fn tags(&self, group: TagGroup) -> &[String] {
        match group {
            TagGroup::Concept => &self.concept_tags,
            TagGroup::Content => &self.content_tags,
            TagGroup::Context => &self.context_tags,
            TagGroup::Challenge => &self.challenge_tags,
        }
    }

    pub fn tags_mut(&mut self, group: TagGroup) -> &mut Vec<String> {
        match group {
            TagGroup::Concept => &mut self.concept_tags,
            TagGroup::Content => &mut self.content_tags,
            TagGroup::Context => &mut self.context_tags,
            TagGroup::Challenge => &mut self.challenge_tags,
        }
    }

    /// True when every tag in `required` is carried in `group`.
    pub fn has_all_tags(&self, group: TagGroup, required: &BTreeSet<String>) -> bool {
        let carried = self.tags(group);
        required.iter().all(|tag| carried.contains(tag))
    }

    pub fn command_term(&self) -> Option<&str> {
        self.command_term.as_deref().filter(|term| !term.is_empty())
    }

    pub fn belongs_to_exam(&self, exam_id: &str) -> bool {
        self.exam_id.as_deref() == Some(exam_id)
    }
}

/// Upload rejection reasons. The whole payload is refused on the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankValidationError {
    InvalidJson(String),
    NotAnArray,
    NotAnObject {
        index: usize,
    },
    MissingField {
        index: usize,
        field: &'static str,
    },
    TagFieldNotArray {
        index: usize,
        field: &'static str,
    },
    DuplicateId {
        index: usize,
        id: String,
    },
    InvalidRecord {
        index: usize,
        message: String,
    },
}

impl Display for BankValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => write!(f, "error parsing JSON: {message}"),
            Self::NotAnArray => write!(f, "question bank must be a JSON array"),
            Self::NotAnObject { index } => write!(f, "element {index} is not an object"),
            Self::MissingField { index, field } => {
                write!(f, "element {index} is missing required field `{field}`")
            }
            Self::TagFieldNotArray { index, field } => {
                write!(f, "element {index} field `{field}` must be an array")
            }
            Self::DuplicateId { index, id } => {
                write!(f, "element {index} repeats question id `{id}`")
            }
            Self::InvalidRecord { index, message } => {
                write!(f, "element {index} is not a valid question: {message}")
            }
        }
    }
}

impl Error for BankValidationError {}

/// Parses and validates a raw upload into bank records, preserving order.
pub fn parse_question_bank(raw: &[u8]) -> Result<Vec<Question>, BankValidationError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|err| BankValidationError::InvalidJson(err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(BankValidationError::NotAnArray);
    };

    let mut seen_ids = HashSet::with_capacity(items.len());
    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        validate_record_shape(index, &item)?;
        let question: Question =
            serde_json::from_value(item).map_err(|err| BankValidationError::InvalidRecord {
                index,
                message: err.to_string(),
            })?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(BankValidationError::DuplicateId {
                index,
                id: question.id.to_string(),
            });
        }
        questions.push(question);
    }

    Ok(questions)
}

fn validate_record_shape(index: usize, item: &Value) -> Result<(), BankValidationError> {
    let Value::Object(record) = item else {
        return Err(BankValidationError::NotAnObject { index });
    };

    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !record.contains_key(*field))
    {
        return Err(BankValidationError::MissingField { index, field });
    }

    for group in TagGroup::ALL {
        let field = group.field_name();
        if record.get(field).is_some_and(|value| !value.is_array()) {
            return Err(BankValidationError::TagFieldNotArray { index, field });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_question_bank, BankValidationError, QuestionId, TagGroup};

    #[test]
    fn numeric_and_string_ids_compare_by_text() {
        let from_number: QuestionId = serde_json::from_str("12").unwrap();
        let from_text: QuestionId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "12");
    }

    #[test]
    fn non_integer_ids_serialize_as_strings() {
        let id = QuestionId::new("P1-04a");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"P1-04a\"");
        assert_eq!(id.numeric_value(), 0.0);
    }

    #[test]
    fn tag_group_parses_labels_and_field_names() {
        assert_eq!("concept".parse::<TagGroup>().unwrap(), TagGroup::Concept);
        assert_eq!("ContentTags".parse::<TagGroup>().unwrap(), TagGroup::Content);
        assert!("colour".parse::<TagGroup>().is_err());
    }

    #[test]
    fn null_tag_field_is_rejected_as_non_array() {
        let raw = br#"[{"ID":1,"QuestionText":"q","AnswerText":"a","ContextTags":null}]"#;
        assert_eq!(
            parse_question_bank(raw).unwrap_err(),
            BankValidationError::TagFieldNotArray {
                index: 0,
                field: "ContextTags"
            }
        );
    }

    #[test]
    fn mixed_scalar_fields_are_coerced() {
        let raw = br#"[{"ID":"7","ExamID":2019,"PaperID":1,"QuestionText":"q","AnswerText":null,"Marks":"4","QuestionNo":3}]"#;
        let bank = parse_question_bank(raw).unwrap();
        assert_eq!(bank[0].exam_id.as_deref(), Some("2019"));
        assert_eq!(bank[0].paper_id.as_deref(), Some("1"));
        assert_eq!(bank[0].answer_text, "");
        assert_eq!(bank[0].marks, Some(4));
        assert_eq!(bank[0].question_no.as_deref(), Some("3"));
    }
}
