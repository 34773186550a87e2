// src/app/tmdb.rs - TMDb search + details, normalized into MovieRecord
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::data::MovieRecord;
use super::utils::release_year_token;
use crate::config::AppConfig;
use crate::error::FetchError;

// ---- wire types (private; nothing dynamic escapes this module) ----
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: i64,
    title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    genres: Vec<Genre>,
    runtime: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

pub struct TmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
    image_base: String,
    language: String,
    region: String,
}

impl TmdbClient {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, FetchError> {
        let api_key = cfg
            .tmdb_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FetchError::MissingApiKey)?;

        let http = Client::builder()
            .user_agent(concat!("dircut/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            api_key,
            base_url: cfg.tmdb_base_url.trim_end_matches('/').to_string(),
            image_base: cfg.tmdb_image_base.clone(),
            language: cfg.language.clone(),
            region: cfg.region.clone(),
        })
    }

    /// Title -> record, or `None` for anything that went wrong. The reason is
    /// logged, never returned.
    pub fn fetch(&self, title: &str) -> Option<MovieRecord> {
        match self.lookup(title) {
            Ok(record) => Some(record),
            Err(FetchError::NoMatch) => {
                debug!("TMDb: no match for '{title}'");
                None
            }
            Err(err) => {
                warn!("TMDb lookup failed for '{title}': {err}");
                None
            }
        }
    }

    /// Same pipeline as [`fetch`](Self::fetch) but keeps the failure kind.
    pub fn lookup(&self, title: &str) -> Result<MovieRecord, FetchError> {
        if title.trim().is_empty() {
            return Err(FetchError::NoMatch);
        }

        let hit = self
            .search_first(title)
            .inspect_err(|e| debug!("TMDb search for '{title}': {e}"))?;
        let details = self
            .details(hit.id)
            .inspect_err(|e| debug!("TMDb details for '{title}' (id {}): {e}", hit.id))?;

        Ok(normalize(title, hit, details, &self.image_base))
    }

    fn search_first(&self, title: &str) -> Result<SearchHit, FetchError> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}&include_adult=false&language={}&region={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title),
            urlencoding::encode(&self.language),
            urlencoding::encode(&self.region),
        );
        let page: SearchPage = self.get_json(&url)?;
        page.results.into_iter().next().ok_or(FetchError::NoMatch)
    }

    fn details(&self, id: i64) -> Result<MovieDetails, FetchError> {
        let url = format!(
            "{}/movie/{}?api_key={}",
            self.base_url,
            id,
            urlencoding::encode(&self.api_key)
        );
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn normalize(query: &str, hit: SearchHit, details: MovieDetails, image_base: &str) -> MovieRecord {
    let title = hit
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| query.to_string());
    let poster_url = format!("{image_base}{}", hit.poster_path.unwrap_or_default());
    let runtime_minutes = details.runtime.and_then(|m| u32::try_from(m).ok());

    MovieRecord {
        title,
        overview: hit.overview.unwrap_or_default(),
        release_year: release_year_token(hit.release_date.as_deref()),
        poster_url,
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        runtime_minutes,
    }
}
