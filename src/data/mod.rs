//! Core data models for newsdesk
//!
//! The backend hands out a `NewsSnapshot` as an opaque JSON document. The
//! front end never edits one; it only stores it and displays it.

pub mod news;

pub use news::{FetchError, FetchedNews, NewsClient, NewsSource};

use serde::{Deserialize, Serialize};

/// One headline pointing at an external article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsLink {
    /// Display date of the article
    pub date: String,
    /// Article URL; unique within a snapshot
    pub link: String,
    /// Headline text
    pub title: String,
}

/// The daily digest produced by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSnapshot {
    /// URL of the audio summary
    pub audio_url: String,
    /// Creation timestamp of the snapshot, format chosen by the backend
    pub created_at: String,
    /// Display date
    pub date: String,
    /// Opaque identifier
    pub filename: String,
    /// Headlines in backend order
    pub news_links: Vec<NewsLink>,
}

impl NewsSnapshot {
    /// Parses a snapshot from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Headline at `index`, if any
    pub fn headline(&self, index: usize) -> Option<&NewsLink> {
        self.news_links.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_JSON: &str = r#"{
        "audioUrl": "a.mp3",
        "createdAt": "2024-01-01",
        "date": "Jan 1",
        "filename": "f",
        "newsLinks": [{"date": "Jan 1", "link": "https://x", "title": "X"}]
    }"#;

    #[test]
    fn test_snapshot_parses_camel_case_fields() {
        let snapshot = NewsSnapshot::from_json(SCENARIO_JSON).expect("Should parse snapshot");

        assert_eq!(snapshot.audio_url, "a.mp3");
        assert_eq!(snapshot.created_at, "2024-01-01");
        assert_eq!(snapshot.date, "Jan 1");
        assert_eq!(snapshot.filename, "f");
        assert_eq!(
            snapshot.news_links,
            vec![NewsLink {
                date: "Jan 1".to_string(),
                link: "https://x".to_string(),
                title: "X".to_string(),
            }]
        );
    }

    #[test]
    fn test_snapshot_serializes_with_backend_field_names() {
        let snapshot = NewsSnapshot::from_json(SCENARIO_JSON).unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"audioUrl\":\"a.mp3\""));
        assert!(json.contains("\"newsLinks\""));
        assert!(!json.contains("audio_url"));
    }

    #[test]
    fn test_snapshot_ignores_unknown_fields() {
        let json = r#"{"audioUrl":"a","createdAt":"c","date":"d","filename":"f","newsLinks":[],"extra":1}"#;

        let snapshot = NewsSnapshot::from_json(json).expect("Extra fields should be ignored");

        assert!(snapshot.news_links.is_empty());
    }

    #[test]
    fn test_snapshot_missing_field_is_an_error() {
        let json = r#"{"audioUrl":"a","date":"d","filename":"f","newsLinks":[]}"#;

        assert!(NewsSnapshot::from_json(json).is_err());
    }

    #[test]
    fn test_headline_lookup() {
        let snapshot = NewsSnapshot::from_json(SCENARIO_JSON).unwrap();

        assert_eq!(snapshot.headline(0).map(|h| h.title.as_str()), Some("X"));
        assert!(snapshot.headline(1).is_none());
    }
}
