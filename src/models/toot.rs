use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single archived post.
///
/// `id` is the primary key of the record collection; insertion order carries
/// no meaning, `published` defines all ordering. The body is opaque to the
/// core beyond being searchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toot {
    pub id: String,
    /// Public permalink, when the export carried one.
    pub url: Option<String>,
    /// Publication time in the record's own timezone offset.
    pub published: DateTime<FixedOffset>,
    /// Gates content-warning behavior downstream.
    pub sensitive: bool,
    /// Content-warning text.
    pub summary: Option<String>,
    /// Rich text content.
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub poll: Option<Poll>,
    /// Weak reference to another record id; may dangle.
    pub in_reply_to: Option<String>,
    pub direct_message: bool,
}

impl Toot {
    /// First-of-month key for the record's publication date, resolved in the
    /// record's own offset. This is the bucketing key used everywhere.
    pub fn month_key(&self) -> NaiveDate {
        let date = self.published.date_naive();
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .expect("first of an existing month is a valid date")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    /// MIME type, e.g. `image/png` or `video/mp4`.
    pub media_type: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollKind {
    SingleChoice,
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub label: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub kind: PollKind,
    pub options: Vec<PollOption>,
    pub end_time: Option<DateTime<FixedOffset>>,
}

impl Poll {
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.votes).sum()
    }
}
