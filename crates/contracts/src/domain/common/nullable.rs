//! Tri-state fields for partial updates.
//!
//! With `#[serde(default, deserialize_with = "nullable::deserialize")]` on an
//! `Option<Option<T>>` field:
//! - key absent      -> `None`
//! - key set to null -> `Some(None)`
//! - key set to v    -> `Some(Some(v))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        value: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_present_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.value, None);

        let null: Patch = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, Some(None));

        let set: Patch = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(set.value, Some(Some("x".to_string())));
    }
}
