//! Category attributes that may arrive as one value or several.

use serde::{Deserialize, Serialize};

/// A taxonomy attribute such as `skinType` or `finish`.
///
/// The API sends either a single string or an ordered list of strings for
/// the same field; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    One(String),
    Many(Vec<String>),
}

impl AttributeValue {
    /// The representative scalar: the value itself, or element 0 of a list.
    ///
    /// An empty list has no representative.
    pub fn first(&self) -> Option<&str> {
        match self {
            AttributeValue::One(v) => Some(v.as_str()),
            AttributeValue::Many(vs) => vs.first().map(String::as_str),
        }
    }

    /// All values in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AttributeValue::One(v) => vec![v.as_str()],
            AttributeValue::Many(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// Check whether any value equals `needle`, ignoring ASCII case.
    pub fn contains(&self, needle: &str) -> bool {
        self.values().iter().any(|v| v.eq_ignore_ascii_case(needle))
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::One(v.to_string())
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(vs: Vec<&str>) -> Self {
        AttributeValue::Many(vs.into_iter().map(String::from).collect())
    }
}

/// Category-specific attributes carried by a product record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_concern: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<AttributeValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_scalar_and_list() {
        let one: AttributeValue = serde_json::from_str(r#""Matte""#).unwrap();
        assert_eq!(one, AttributeValue::One("Matte".into()));

        let many: AttributeValue = serde_json::from_str(r#"["Oily","Dry"]"#).unwrap();
        assert_eq!(many.first(), Some("Oily"));
        assert_eq!(many.values(), vec!["Oily", "Dry"]);
    }

    #[test]
    fn test_empty_list_has_no_first() {
        let empty = AttributeValue::Many(Vec::new());
        assert_eq!(empty.first(), None);
        assert!(!empty.contains("Oily"));
    }

    #[test]
    fn test_contains_ignores_case() {
        let v = AttributeValue::from(vec!["Curly", "Wavy"]);
        assert!(v.contains("wavy"));
        assert!(!v.contains("straight"));
    }
}
