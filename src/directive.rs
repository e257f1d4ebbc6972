//! @acp:module "Directives"
//! @acp:summary "Directive kinds, field splitting and input pairing"
//! @acp:domain cli
//! @acp:layer model
//!
//! A directive is a `(type, field)` pair such as `-p version:package.json`.
//! Input arrives as a flat list that is consumed two elements at a time.

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::{Result, VersionlyError};

/// Field used for the final type tag of an odd-length input
pub const MISSING_FIELD: &str = "undefined";

/// @acp:summary "The five supported directive type tags"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `-a key:value` literal assignment
    Annotation,
    /// `-d key[:format]` current date
    Date,
    /// `-e key:NAME` environment variable
    Environment,
    /// `-g field` git HEAD commit
    Git,
    /// `-p key[:path]` package manifest version
    Package,
}

impl DirectiveKind {
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Annotation => "-a",
            Self::Date => "-d",
            Self::Environment => "-e",
            Self::Git => "-g",
            Self::Package => "-p",
        }
    }
}

impl FromStr for DirectiveKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "-a" => Ok(Self::Annotation),
            "-d" => Ok(Self::Date),
            "-e" => Ok(Self::Environment),
            "-g" => Ok(Self::Git),
            "-p" => Ok(Self::Package),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// @acp:summary "A `key[:value]` field split on its first colon"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The trimmed field as given
    pub raw: String,
    pub key: String,
    /// `None` when the field has no colon at all
    pub value: Option<String>,
}

impl Field {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (key, value) = match raw.split_once(':') {
            Some((key, value)) => (key, Some(value.to_string())),
            None => (raw, None),
        };

        Self {
            raw: raw.to_string(),
            key: key.to_string(),
            value,
        }
    }

    /// Value part, treating an empty value like a missing one
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// @acp:summary "One (type, field) pair taken from the input"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Trimmed type tag, possibly unknown
    pub tag: String,
    pub field: Field,
}

impl Directive {
    pub fn new(tag: &str, field: &str) -> Self {
        Self {
            tag: tag.trim().to_string(),
            field: Field::parse(field),
        }
    }

    /// Resolve the tag, failing with the whole directive in the message
    pub fn kind(&self) -> Result<DirectiveKind> {
        self.tag
            .parse()
            .map_err(|_| VersionlyError::UnsupportedDirectiveType {
                kind: self.tag.clone(),
                field: self.field.raw.clone(),
            })
    }

    /// Key checks that apply before dispatch
    pub fn validate_key(&self) -> Result<&str> {
        if self.field.key.is_empty() {
            return Err(VersionlyError::MalformedEntry(self.field.raw.clone()));
        }
        Ok(&self.field.key)
    }
}

/// Pair up a flat argument list into directives.
///
/// A trailing tag without a field gets [`MISSING_FIELD`] as its field.
pub fn pair_directives<S: AsRef<str>>(args: &[S]) -> Vec<Directive> {
    args.chunks(2)
        .map(|pair| {
            let field = pair.get(1).map(|f| f.as_ref()).unwrap_or(MISSING_FIELD);
            Directive::new(pair[0].as_ref(), field)
        })
        .collect()
}

/// Coerce a loosely typed JSON value into a flat argument list.
///
/// Only arrays are accepted; anything else is [`VersionlyError::InvalidInput`].
pub fn args_from_value(value: &Value) -> Result<Vec<String>> {
    let items = value.as_array().ok_or(VersionlyError::InvalidInput)?;
    Ok(items.iter().map(coerce_to_string).collect())
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whole floats print without a fraction, so `1.0` becomes `1`
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_split_on_first_colon() {
        let field = Field::parse(" url:http://example.com ");
        assert_eq!(field.raw, "url:http://example.com");
        assert_eq!(field.key, "url");
        assert_eq!(field.value.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_field_without_colon_has_no_value() {
        let field = Field::parse("version");
        assert_eq!(field.key, "version");
        assert_eq!(field.value, None);

        let field = Field::parse("version:");
        assert_eq!(field.value.as_deref(), Some(""));
        assert_eq!(field.non_empty_value(), None);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("-a".parse::<DirectiveKind>(), Ok(DirectiveKind::Annotation));
        assert_eq!("-g".parse::<DirectiveKind>(), Ok(DirectiveKind::Git));
        assert!("-A".parse::<DirectiveKind>().is_err());
        assert!("a".parse::<DirectiveKind>().is_err());
    }

    #[test]
    fn test_unknown_kind_names_tag_and_field() {
        let err = Directive::new("-9", "version").kind().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected input: '-9 version'");
    }

    #[test]
    fn test_empty_key_is_malformed() {
        let err = Directive::new("-p", ":foo").validate_key().unwrap_err();
        assert_eq!(err.to_string(), "Invalid entry: ':foo'");
    }

    #[test]
    fn test_pairing_odd_tail() {
        let directives = pair_directives(&["-a", "foo:bar", "-g"]);
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[1].tag, "-g");
        assert_eq!(directives[1].field.raw, MISSING_FIELD);
    }

    #[test]
    fn test_args_from_value_rejects_non_arrays() {
        for value in [json!(null), json!(5), json!(""), json!("foo"), json!({}), json!(true)] {
            assert!(args_from_value(&value).unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn test_args_from_value_coerces_elements() {
        let args = args_from_value(&json!(["-a", 5, null, true, ["x", null, 1]])).unwrap();
        assert_eq!(args, vec!["-a", "5", "null", "true", "x,,1"]);
    }

    #[test]
    fn test_whole_floats_drop_the_fraction() {
        let args = args_from_value(&json!([1.0, -3.0, 0.0, 2.5, 1e21])).unwrap();
        assert_eq!(args, vec!["1", "-3", "0", "2.5", "1e21"]);
    }
}
