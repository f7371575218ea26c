use chrono::{Datelike, Utc};
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) const MAX_PAGES: i64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ValidationMode {
    Create,
    // the key arrives through the path, any isbn in the body is ignored
    Update,
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy)]
enum Constraint {
    NonEmpty,
    HttpUrl,
    Between(i64, i64),
    // upper bound is next calendar year
    YearFrom(i64),
}

#[derive(Debug)]
struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    constraint: Constraint,
    key: bool,
}

static BOOK_SCHEMA: [FieldSpec; 8] = [
    FieldSpec { name: "isbn", kind: FieldKind::Text, constraint: Constraint::NonEmpty, key: true },
    FieldSpec { name: "amazon_url", kind: FieldKind::Text, constraint: Constraint::HttpUrl, key: false },
    FieldSpec { name: "author", kind: FieldKind::Text, constraint: Constraint::NonEmpty, key: false },
    FieldSpec { name: "language", kind: FieldKind::Text, constraint: Constraint::NonEmpty, key: false },
    FieldSpec { name: "pages", kind: FieldKind::Integer, constraint: Constraint::Between(1, MAX_PAGES), key: false },
    FieldSpec { name: "publisher", kind: FieldKind::Text, constraint: Constraint::NonEmpty, key: false },
    FieldSpec { name: "title", kind: FieldKind::Text, constraint: Constraint::NonEmpty, key: false },
    FieldSpec { name: "year", kind: FieldKind::Integer, constraint: Constraint::YearFrom(0), key: false },
];

impl FieldSpec {
    fn check(&self, value: Option<&Value>) -> Option<String> {
        let value = match value {
            None | Some(Value::Null) => return Some(format!("{} is required", self.name)),
            Some(value) => value,
        };
        match self.kind {
            FieldKind::Text => match value.as_str() {
                Some(text) => self.check_text(text),
                None => Some(format!("{} must be a string", self.name)),
            },
            FieldKind::Integer => match value.as_i64() {
                Some(n) => self.check_integer(n),
                None => Some(format!("{} must be an integer", self.name)),
            },
        }
    }

    fn check_text(&self, text: &str) -> Option<String> {
        match self.constraint {
            Constraint::NonEmpty if text.trim().is_empty() => {
                Some(format!("{} must not be empty", self.name))
            }
            Constraint::HttpUrl if !(text.starts_with("http://") || text.starts_with("https://")) => {
                Some(format!("{} must be an http or https URL", self.name))
            }
            _ => None,
        }
    }

    fn check_integer(&self, n: i64) -> Option<String> {
        let (min, max) = match self.constraint {
            Constraint::Between(min, max) => (min, max),
            Constraint::YearFrom(min) => (min, Utc::now().year() as i64 + 1),
            _ => return None,
        };
        if n < min || n > max {
            return Some(format!("{} must be between {} and {}", self.name, min, max));
        }
        None
    }
}

// collects every violated constraint of a candidate book body, in schema order
pub(crate) fn book_violations(body: &Value, mode: ValidationMode) -> Vec<String> {
    let fields = match body.as_object() {
        Some(fields) => fields,
        None => return vec!["body must be a JSON object".to_string()],
    };
    BOOK_SCHEMA.iter()
        .filter(|field| mode == ValidationMode::Create || !field.key)
        .filter_map(|field| field.check(fields.get(field.name)))
        .collect()
}

pub(crate) fn validate_book(body: &Value, mode: ValidationMode) -> LibraryResult<()> {
    let violations = book_violations(body, mode);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LibraryError::validation("invalid book", violations))
    }
}
