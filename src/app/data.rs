// src/app/data.rs
use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_YEAR: &str = "Unknown";

pub const TAG_FAVORITE: &str = "Favorite";
pub const TAG_WATCH_LATER: &str = "Watch Later";

/// Normalized metadata for one catalog title. Built by the TMDb client and
/// never edited afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub overview: String,
    /// 4-digit year token or [`UNKNOWN_YEAR`].
    pub release_year: String,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<u32>,
}

/// User-owned fields attached to a title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::app::utils::iso_timestamp"
    )]
    pub last_watched: Option<NaiveDateTime>,
}

impl Annotation {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.note.is_empty() && self.tags.is_empty() && self.last_watched.is_none()
    }
}
