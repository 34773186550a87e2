// src/app/mod.rs - session context: catalog -> TMDb enrichment -> filters, plus annotations

// ---- Local modules ----
pub mod annotations;
pub mod cache;
pub mod catalog;
pub mod data;
pub mod filters;
pub mod prefetch;
pub mod tmdb;
pub mod types;
pub mod utils;

use tracing::info;

pub use annotations::AnnotationStore;
pub use cache::MetadataCache;
pub use data::{Annotation, MovieRecord, TAG_FAVORITE, TAG_WATCH_LATER};
pub use tmdb::TmdbClient;
pub use types::{DecadeFilter, FilterCriteria, RenderPass, RuntimeBucket, RuntimeFilter};

use crate::config::AppConfig;
use crate::error::SessionError;
use prefetch::MetadataSource;

/// Everything one user session needs, passed explicitly to each stage.
/// Generic over the metadata source so a pass can run against a fake.
pub struct Session<S: MetadataSource = TmdbClient> {
    config: AppConfig,
    source: S,
    metadata: MetadataCache,
    annotations: AnnotationStore,
}

impl Session<TmdbClient> {
    /// Build the TMDb client and load annotations. A corrupt annotation file
    /// stops here.
    pub fn open(config: AppConfig) -> Result<Self, SessionError> {
        let client = TmdbClient::from_config(&config)?;
        Self::with_source(config, client)
    }
}

impl<S: MetadataSource> Session<S> {
    pub fn with_source(config: AppConfig, source: S) -> Result<Self, SessionError> {
        let annotations = AnnotationStore::load(config.annotations_path())?;
        info!(
            "Session ready (catalog {}, {} fetch worker(s))",
            config.catalog_path().display(),
            config.fetch_workers
        );
        Ok(Self {
            config,
            source,
            metadata: MetadataCache::new(),
            annotations,
        })
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    pub fn catalog(&self) -> Vec<String> {
        catalog::load_catalog(&self.config.catalog_path())
    }

    /// One full pass: load catalog, resolve every title, filter.
    pub fn render(&mut self, criteria: &FilterCriteria) -> RenderPass {
        let titles = self.catalog();
        let enrichment = prefetch::enrich(
            &self.source,
            &titles,
            self.config.fetch_workers,
            &mut self.metadata,
        );
        let (shown, surprise) = filters::apply(&enrichment.records, criteria);
        RenderPass {
            enriched: enrichment.records,
            shown,
            surprise,
            not_found: enrichment.not_found,
        }
    }
}
