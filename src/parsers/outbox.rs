//! Streaming traversal of the outbox export.
//!
//! The outbox is one large JSON object whose `orderedItems` array holds the
//! whole activity log. Deserializing that into a tree would materialize the
//! entire export at once, so this module drives serde with a
//! [`DeserializeSeed`] instead: each activity is decoded on its own, filtered
//! to the `Create` kind, converted into a [`Toot`], and handed to the caller's
//! sink before the next one is touched. The traversal is finite and
//! single-pass; callers that need the records again must buffer as they go
//! (the ingestor buffers into the snapshot's id map).

use std::fmt;
use std::io::Read;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::error::ArchiveError;
use crate::models::{Attachment, Poll, PollKind, PollOption, Toot};
use crate::parsers::deserializers;

const CREATE_KIND: &str = "Create";
const ITEMS_KEY: &str = "orderedItems";

/// Stream every creation record out of an outbox export.
///
/// Calls `on_record` once per `Create` activity, in export order, and returns
/// how many records were produced. Activities of any other kind (boosts,
/// likes, …) are skipped without materializing their payload.
///
/// # Errors
///
/// Returns [`ArchiveError::MalformedExport`] on the first structurally
/// invalid activity; the whole ingestion aborts rather than recovering
/// per-record.
pub fn stream_outbox<R, F>(reader: R, mut on_record: F) -> Result<u64, ArchiveError>
where
    R: Read,
    F: FnMut(Toot),
{
    let mut json = serde_json::Deserializer::from_reader(reader);
    OutboxSeed { on_record: &mut on_record }
        .deserialize(&mut json)
        .map_err(|e| ArchiveError::MalformedExport { detail: e.to_string() })
}

struct OutboxSeed<'f, F> {
    on_record: &'f mut F,
}

impl<'de, 'f, F> DeserializeSeed<'de> for OutboxSeed<'f, F>
where
    F: FnMut(Toot),
{
    type Value = u64;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'f, F> Visitor<'de> for OutboxSeed<'f, F>
where
    F: FnMut(Toot),
{
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an ActivityPub outbox object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let on_record = self.on_record;
        let mut created = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == ITEMS_KEY {
                created = Some(map.next_value_seed(ItemsSeed { on_record: &mut *on_record })?);
            } else {
                // totalItems, @context, etc. are irrelevant to ingestion
                map.next_value::<IgnoredAny>()?;
            }
        }
        created.ok_or_else(|| de::Error::custom("outbox has no orderedItems collection"))
    }
}

struct ItemsSeed<'f, F> {
    on_record: &'f mut F,
}

impl<'de, 'f, F> DeserializeSeed<'de> for ItemsSeed<'f, F>
where
    F: FnMut(Toot),
{
    type Value = u64;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'f, F> Visitor<'de> for ItemsSeed<'f, F>
where
    F: FnMut(Toot),
{
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an ordered sequence of activities")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut created = 0u64;
        while let Some(activity) = seq.next_element::<RawActivity>()? {
            if activity.kind != CREATE_KIND {
                continue;
            }
            let payload = activity
                .object
                .ok_or_else(|| de::Error::custom("Create activity without an object payload"))?;
            // Non-Create activities may carry a bare IRI here, but a Create
            // must hold the full post object.
            let raw: RawObject = serde_json::from_value(payload).map_err(de::Error::custom)?;
            (self.on_record)(raw.into());
            created += 1;
        }
        Ok(created)
    }
}

#[derive(Deserialize)]
struct RawActivity {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    object: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObject {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(deserialize_with = "deserializers::deserialize_published")]
    published: DateTime<FixedOffset>,
    #[serde(default)]
    sensitive: bool,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    attachment: Vec<RawAttachment>,
    #[serde(default)]
    one_of: Option<Vec<RawPollOption>>,
    #[serde(default)]
    any_of: Option<Vec<RawPollOption>>,
    #[serde(default, deserialize_with = "deserializers::deserialize_opt_published")]
    end_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    in_reply_to: Option<String>,
    #[serde(default)]
    direct_message: bool,
}

#[derive(Deserialize)]
struct RawAttachment {
    url: String,
    #[serde(rename = "mediaType")]
    media_type: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawPollOption {
    name: String,
    #[serde(default)]
    replies: RawReplies,
}

#[derive(Deserialize, Default)]
struct RawReplies {
    #[serde(rename = "totalItems", default)]
    total_items: u64,
}

impl From<RawObject> for Toot {
    fn from(raw: RawObject) -> Self {
        // oneOf is a single-choice poll, anyOf multiple-choice
        let poll = match (raw.one_of, raw.any_of) {
            (Some(options), _) => Some((PollKind::SingleChoice, options)),
            (None, Some(options)) => Some((PollKind::MultipleChoice, options)),
            (None, None) => None,
        }
        .map(|(kind, options)| Poll {
            kind,
            options: options
                .into_iter()
                .map(|o| PollOption { label: o.name, votes: o.replies.total_items })
                .collect(),
            end_time: raw.end_time,
        });

        Toot {
            id: raw.id,
            url: raw.url,
            published: raw.published,
            sensitive: raw.sensitive,
            summary: raw.summary,
            content: raw.content,
            attachments: raw
                .attachment
                .into_iter()
                .map(|a| Attachment { url: a.url, media_type: a.media_type, alt_text: a.name })
                .collect(),
            poll,
            in_reply_to: raw.in_reply_to,
            direct_message: raw.direct_message,
        }
    }
}
