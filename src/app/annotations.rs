// src/app/annotations.rs
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::data::Annotation;
use super::utils::{date_part, iso_timestamp};
use crate::error::AnnotationError;

/// Title -> annotation map backed by one JSON file. Every mutation rewrites
/// the whole file.
#[derive(Debug)]
pub struct AnnotationStore {
    path: PathBuf,
    entries: BTreeMap<String, Annotation>,
}

impl AnnotationStore {
    /// Missing file is an empty store; a file that does not parse is fatal.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AnnotationError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<BTreeMap<String, Annotation>>(&bytes)
                .map_err(|source| AnnotationError::Parse {
                    path: path.clone(),
                    source,
                })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        info!(
            "Loaded {} annotation(s) from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored annotation or a blank one. Never inserts.
    pub fn get(&self, title: &str) -> Annotation {
        self.entries.get(title).cloned().unwrap_or_default()
    }

    pub fn set_note(&mut self, title: &str, note: &str) -> Result<(), AnnotationError> {
        self.entry(title).note = note.to_string();
        self.save()
    }

    /// Adds or removes `tag`. Returns whether the set changed; the file is
    /// rewritten either way.
    pub fn set_tag(
        &mut self,
        title: &str,
        tag: &str,
        present: bool,
    ) -> Result<bool, AnnotationError> {
        let tags = &mut self.entry(title).tags;
        let changed = if present {
            tags.insert(tag.to_string())
        } else {
            tags.remove(tag)
        };
        self.save()?;
        Ok(changed)
    }

    pub fn mark_watched_now(&mut self, title: &str) -> Result<NaiveDateTime, AnnotationError> {
        let now = Local::now().naive_local();
        self.mark_watched_at(title, now)?;
        Ok(now)
    }

    pub fn mark_watched_at(
        &mut self,
        title: &str,
        when: NaiveDateTime,
    ) -> Result<(), AnnotationError> {
        self.entry(title).last_watched = Some(when);
        self.save()
    }

    /// "YYYY-MM-DD" of the last watch, for display.
    pub fn last_watched_date(&self, title: &str) -> Option<String> {
        let ts = self.entries.get(title)?.last_watched?;
        Some(date_part(&iso_timestamp::format(&ts)).to_string())
    }

    pub fn titles_with_tag(&self, tag: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, a)| a.has_tag(tag))
            .map(|(title, _)| title.as_str())
            .collect()
    }

    /// Whole-map rewrite through a temp file + rename.
    pub fn save(&self) -> Result<(), AnnotationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.entries).map_err(AnnotationError::Encode)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {} annotation(s) to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    fn entry(&mut self, title: &str) -> &mut Annotation {
        self.entries.entry(title.to_string()).or_default()
    }
}
