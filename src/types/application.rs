//! Application properties of the Bitbucket instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version information and other properties of the server.
///
/// Scalar values are kept as strings; nested values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct ApplicationProperties(BTreeMap<String, String>);

impl From<BTreeMap<String, Value>> for ApplicationProperties {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let props = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key, value))
            })
            .collect();
        Self(props)
    }
}

impl ApplicationProperties {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Server version, e.g. `8.9.2`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get("version")
    }

    #[must_use]
    pub fn build_number(&self) -> Option<&str> {
        self.get("buildNumber")
    }

    #[must_use]
    pub fn build_date(&self) -> Option<&str> {
        self.get("buildDate")
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.get("displayName")
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_are_stringified() {
        let json = r#"{
            "version": "8.9.2",
            "buildNumber": "8009002",
            "buildDate": 1690000000000,
            "displayName": "Bitbucket",
            "clustered": false,
            "nested": {"ignored": true},
            "missing": null
        }"#;

        let props: ApplicationProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.version(), Some("8.9.2"));
        assert_eq!(props.build_number(), Some("8009002"));
        assert_eq!(props.build_date(), Some("1690000000000"));
        assert_eq!(props.display_name(), Some("Bitbucket"));
        assert_eq!(props.get("clustered"), Some("false"));
        assert_eq!(props.get("nested"), None);
        assert_eq!(props.len(), 5);
    }
}
