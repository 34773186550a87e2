// src/app/catalog.rs - uploaded CSV -> ordered title list
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::error::CatalogError;

pub const TITLE_COLUMN: &str = "title";

/// Titles in row order. Empty cells are skipped, duplicates are kept.
pub fn parse_titles<R: Read>(source: R) -> Result<Vec<String>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let col = reader
        .headers()?
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == TITLE_COLUMN)
        .ok_or(CatalogError::MissingTitleColumn)?;

    let mut titles = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(col) {
            Some(title) if !title.is_empty() => titles.push(title.to_string()),
            _ => {}
        }
    }
    Ok(titles)
}

/// Read the persisted catalog. Anything unreadable is an empty catalog.
pub fn load_catalog(path: &Path) -> Vec<String> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                info!("No catalog at {}; nothing to show yet", path.display());
            } else {
                warn!("Failed to open catalog {}: {err}", path.display());
            }
            return Vec::new();
        }
    };
    match parse_titles(file) {
        Ok(titles) => {
            info!("Catalog {} has {} title(s)", path.display(), titles.len());
            titles
        }
        Err(err) => {
            warn!("Ignoring catalog {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Validate `upload`, then store it byte-for-byte as the new catalog.
/// A rejected upload leaves the previous catalog in place.
pub fn replace_catalog(path: &Path, upload: &[u8]) -> Result<usize, CatalogError> {
    let count = parse_titles(upload)?.len();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("csv.part");
    fs::write(&tmp, upload)?;
    fs::rename(&tmp, path)?;

    info!("Catalog replaced at {} ({count} title(s))", path.display());
    Ok(count)
}
