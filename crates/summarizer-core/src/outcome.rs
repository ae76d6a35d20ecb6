use serde::Serialize;

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The entry's feed is not in the allowlist.
    NotSelected,
    /// Another invocation holds the lock. The entry is untouched.
    LockedOut,
    /// The entry was enriched before. `restored` lists saved tags put back.
    AlreadyProcessed { restored: Vec<String> },
    /// A re-delivered entry. Skipped unless forced.
    Updated,
    /// The entry has no source link.
    NoUrl,
    /// Summary and tags were merged into the entry.
    Enriched { summary: String, tags: Vec<String> },
    /// Marked processed without a summary: nothing was fetched or the model
    /// returned nothing.
    Empty,
}

impl Outcome {
    /// Whether this run set the processed marker.
    pub fn marked_processed(&self) -> bool {
        matches!(self, Outcome::Enriched { .. } | Outcome::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_processed() {
        assert!(Outcome::Empty.marked_processed());
        assert!(Outcome::Enriched {
            summary: "s".to_string(),
            tags: vec![],
        }
        .marked_processed());
        assert!(!Outcome::LockedOut.marked_processed());
        assert!(!Outcome::AlreadyProcessed { restored: vec![] }.marked_processed());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(Outcome::AlreadyProcessed {
            restored: vec!["rust".to_string()],
        })
        .unwrap();
        assert_eq!(json["status"], "already_processed");
        assert_eq!(json["restored"][0], "rust");
        assert_eq!(serde_json::to_value(Outcome::NoUrl).unwrap()["status"], "no_url");
    }
}
