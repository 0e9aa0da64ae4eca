use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ArchiveError;
use crate::models::Actor;

/// Load the archive owner's profile from `actor.json`.
///
/// # Errors
///
/// Returns [`ArchiveError::FileAccess`] if the descriptor is missing or
/// unreadable and [`ArchiveError::MalformedExport`] if it does not parse;
/// both are fatal, the process never starts serving without a profile.
pub fn load_actor(path: &Path) -> Result<Actor, ArchiveError> {
    let raw = fs::read_to_string(path).map_err(|source| ArchiveError::file_access(path, source))?;
    let actor: RawActor = serde_json::from_str(&raw).map_err(|e| {
        ArchiveError::MalformedExport { detail: format!("{}: {e}", path.display()) }
    })?;

    Ok(Actor {
        display_name: actor.name,
        username: actor.preferred_username,
        avatar_url: actor.icon.map(|icon| icon.url),
        outbox: actor.outbox,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActor {
    name: String,
    preferred_username: String,
    #[serde(default)]
    icon: Option<RawIcon>,
    outbox: String,
}

#[derive(Deserialize)]
struct RawIcon {
    url: String,
}
