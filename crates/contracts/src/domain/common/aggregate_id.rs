use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Canonical text form, as stored and sent over the wire
    fn as_string(&self) -> String;

    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s).map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_round_trip() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(<uuid::Uuid as AggregateId>::from_string(&id.as_string()), Ok(id));
    }

    #[test]
    fn test_invalid_uuid_rejected() {
        let err = <uuid::Uuid as AggregateId>::from_string("not-a-uuid").unwrap_err();
        assert!(err.starts_with("Invalid UUID"));
    }
}
