//! Library topics whose articles are written on demand by the coach.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryTopic {
    pub id: &'static str,
    pub title: &'static str,
}

pub const LIBRARY_TOPICS: [LibraryTopic; 6] = [
    LibraryTopic { id: "dopamine", title: "The Dopamine Cycle" },
    LibraryTopic { id: "flatline", title: "The Flatline Phase" },
    LibraryTopic { id: "triggers", title: "Identifying Triggers" },
    LibraryTopic { id: "benefits", title: "Benefits of Quitting" },
    LibraryTopic { id: "chaser", title: "The Chaser Effect" },
    LibraryTopic { id: "stoicism", title: "Stoic Mindset" },
];

pub fn find_topic(id: &str) -> Option<LibraryTopic> {
    LIBRARY_TOPICS.iter().copied().find(|t| t.id == id)
}

/// Prefix shared by every cached article key.
pub const CACHE_PREFIX: &str = "library:";

/// kv key under which a generated article is cached.
pub fn cache_key(id: &str) -> String {
    format!("{CACHE_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_topic_by_id() {
        assert_eq!(find_topic("flatline").unwrap().title, "The Flatline Phase");
        assert!(find_topic("unknown").is_none());
    }

    #[test]
    fn cache_key_is_namespaced() {
        assert_eq!(cache_key("chaser"), "library:chaser");
    }
}
