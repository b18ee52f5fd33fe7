use serde::{Deserialize, Serialize};

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Stored and wire representation
    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    pub fn all() -> Vec<Priority> {
        vec![Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_matches_serde_name() {
        for p in Priority::all() {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.code()));
            assert_eq!(Priority::from_code(p.code()), Some(p));
        }
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::from_code("medium"), None);
    }
}
