use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::common::id_string;

/// Knowledge base entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeEntry {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl KnowledgeEntry {
    /// Case-insensitive match on title, content, category and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
            || self
                .category
                .as_deref()
                .map(|c| c.to_lowercase().contains(&query))
                .unwrap_or(false)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Newest first, then by title.
pub fn sort_entries(entries: &mut [KnowledgeEntry]) {
    entries.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

/// Create/update payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, title: &str, day: Option<u32>) -> KnowledgeEntry {
        KnowledgeEntry {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            category: None,
            tags: vec![],
            updated_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn sorts_newest_first_then_title() {
        let mut entries = vec![
            entry("1", "beta", Some(1)),
            entry("2", "alpha", Some(1)),
            entry("3", "gamma", Some(9)),
            entry("4", "undated", None),
        ];
        sort_entries(&mut entries);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn matches_tags_and_category() {
        let mut e = entry("1", "Wifi password", None);
        e.category = Some("Network".to_string());
        e.tags = vec!["guest".to_string()];
        assert!(e.matches("WIFI"));
        assert!(e.matches("network"));
        assert!(e.matches("Guest"));
        assert!(!e.matches("printer"));
        assert!(e.matches("  "));
    }
}
