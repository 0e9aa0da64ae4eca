use serde::{Deserialize, Serialize};

/// The archive owner's profile, loaded once from `actor.json` and shared
/// read-only by every request handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub display_name: String,
    /// Handle without the leading `@`.
    pub username: String,
    pub avatar_url: Option<String>,
    /// Location of the export's record log, relative to the archive
    /// directory unless absolute.
    pub outbox: String,
}
