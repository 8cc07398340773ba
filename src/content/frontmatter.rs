//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Marker line that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// Errors raised while splitting and decoding a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing front-matter: file must start with a `---` line")]
    Missing,

    #[error("unclosed front-matter: no closing `---` line")]
    Unclosed,

    #[error("invalid front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a scalar or a list of scalars")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(clean_categories(std::iter::once(value.to_string())))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<ScalarString>()? {
                vec.push(item.0);
            }
            Ok(clean_categories(vec))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Trim category names and drop the blank ones
fn clean_categories(items: impl IntoIterator<Item = String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// A scalar read as text, so `title: 1984` or `twitter: 42` stay strings
struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = ScalarString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(ScalarString(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Optional string field that also accepts numbers and booleans
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarString>::deserialize(deserializer)?.map(|s| s.0))
}

/// Optional flag that also accepts quoted or numeric values.
/// `false`, `no`, `off`, `0` and blank read as false; anything else as true.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarString>::deserialize(deserializer)?.map(|s| {
        !matches!(
            s.0.trim().to_lowercase().as_str(),
            "false" | "no" | "off" | "0" | ""
        )
    }))
}

/// The `author` block of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorMeta {
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    /// Sub-keys we do not model
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl AuthorMeta {
    pub fn is_empty(&self) -> bool {
        *self == AuthorMeta::default()
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "coverImage",
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_image: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "AuthorMeta::is_empty")]
    pub author: AuthorMeta,

    /// Additional custom fields, kept in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body) with the body trimmed
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let (first, rest) = split_first_line(content);
        if first.trim_end() != DELIMITER {
            return Err(FrontMatterError::Missing);
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim();

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm: FrontMatter = serde_yaml::from_str(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unclosed)
    }

    /// Serialize the recognized fields back into a delimited block
    pub fn to_yaml_block(&self) -> Result<String, FrontMatterError> {
        let yaml = if *self == FrontMatter::default() {
            String::new()
        } else {
            serde_yaml::to_string(self)?
        };
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
    }
}

fn split_first_line(content: &str) -> (&str, &str) {
    match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    }
}

/// Parse a date string in various formats; values without an offset are UTC
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
