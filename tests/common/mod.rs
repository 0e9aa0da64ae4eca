//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

/// Builder for creating on-disk Mastodon export archives
pub struct ArchiveDirBuilder {
    temp_dir: TempDir,
    display_name: String,
    username: String,
    activities: Vec<serde_json::Value>,
}

impl ArchiveDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            display_name: "talkative fishy".to_string(),
            username: "blackle".to_string(),
            activities: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn outbox_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("outbox.json")
    }

    pub fn cache_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".snapshot-cache")
    }

    pub fn with_actor(mut self, display_name: &str, username: &str) -> Self {
        self.display_name = display_name.to_string();
        self.username = username.to_string();
        self
    }

    pub fn with_toot(mut self, toot: TootJsonBuilder) -> Self {
        self.activities.push(toot.into_create_activity());
        self
    }

    pub fn with_toots(mut self, toots: impl IntoIterator<Item = TootJsonBuilder>) -> Self {
        for toot in toots {
            self.activities.push(toot.into_create_activity());
        }
        self
    }

    /// Add a non-Create activity (boost, like, ...) that ingestion must skip
    pub fn with_announce(mut self, object_iri: &str) -> Self {
        self.activities.push(json!({"type": "Announce", "object": object_iri}));
        self
    }

    /// Write actor.json and outbox.json and return the temp directory
    pub fn build(self) -> TempDir {
        let actor = json!({
            "name": self.display_name,
            "preferredUsername": self.username,
            "icon": {"type": "Image", "url": "avatar.png"},
            "outbox": "outbox.json"
        });
        fs::write(
            self.temp_dir.path().join("actor.json"),
            serde_json::to_string_pretty(&actor).unwrap(),
        )
        .expect("Failed to write actor.json");

        let outbox = json!({
            "totalItems": self.activities.len(),
            "orderedItems": self.activities
        });
        fs::write(
            self.temp_dir.path().join("outbox.json"),
            serde_json::to_string_pretty(&outbox).unwrap(),
        )
        .expect("Failed to write outbox.json");

        self.temp_dir
    }
}

impl Default for ArchiveDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one post object inside a Create activity
pub struct TootJsonBuilder {
    id: String,
    published: String,
    content: String,
    sensitive: bool,
    summary: Option<String>,
    attachments: Vec<serde_json::Value>,
    poll: Option<serde_json::Value>,
    in_reply_to: Option<String>,
    direct_message: bool,
}

impl TootJsonBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: format!("https://example.org/users/test/statuses/{id}"),
            published: "2021-03-01T10:00:00Z".to_string(),
            content: "<p>hello world</p>".to_string(),
            sensitive: false,
            summary: None,
            attachments: Vec::new(),
            poll: None,
            in_reply_to: None,
            direct_message: false,
        }
    }

    pub fn published(mut self, published: &str) -> Self {
        self.published = published.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn sensitive(mut self, summary: &str) -> Self {
        self.sensitive = true;
        self.summary = Some(summary.to_string());
        self
    }

    pub fn attachment(mut self, url: &str, media_type: &str, alt: Option<&str>) -> Self {
        self.attachments.push(json!({
            "type": "Document",
            "url": url,
            "mediaType": media_type,
            "name": alt
        }));
        self
    }

    pub fn single_choice_poll(mut self, options: &[(&str, u64)]) -> Self {
        let options: Vec<_> = options
            .iter()
            .map(|(label, votes)| {
                json!({"type": "Note", "name": label, "replies": {"totalItems": votes}})
            })
            .collect();
        self.poll = Some(json!(options));
        self
    }

    pub fn in_reply_to(mut self, iri: &str) -> Self {
        self.in_reply_to = Some(iri.to_string());
        self
    }

    pub fn direct_message(mut self) -> Self {
        self.direct_message = true;
        self
    }

    fn into_create_activity(self) -> serde_json::Value {
        let mut object = json!({
            "type": "Note",
            "id": self.id,
            "published": self.published,
            "sensitive": self.sensitive,
            "content": self.content,
            "summary": self.summary,
            "attachment": self.attachments,
            "inReplyTo": self.in_reply_to,
            "directMessage": self.direct_message
        });
        if let Some(poll) = self.poll {
            object["oneOf"] = poll;
        }
        json!({"type": "Create", "object": object})
    }
}

/// A ready-made archive matching the bucketing scenario used across tests:
/// two March 2021 toots and one April 2021 toot.
pub fn march_april_archive() -> ArchiveDirBuilder {
    ArchiveDirBuilder::new().with_toots([
        TootJsonBuilder::new("1").published("2021-03-01T10:00:00Z").content("<p>early cat post</p>"),
        TootJsonBuilder::new("2").published("2021-03-15T10:00:00Z").content("<p>mid-march post</p>"),
        TootJsonBuilder::new("3").published("2021-04-01T10:00:00Z").content("<p>april cat post</p>"),
    ])
}
