// src/app/prefetch.rs - bounded worker pool over the metadata lookup
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use tracing::{debug, info, warn};

use super::cache::MetadataCache;
use super::data::MovieRecord;
use super::tmdb::TmdbClient;
use crate::config::MAX_FETCH_WORKERS;
use crate::error::FetchError;

/// Anything that can turn a title into a record. The TMDb client is the real
/// one; tests plug in canned sources.
pub trait MetadataSource: Sync {
    fn lookup(&self, title: &str) -> Result<MovieRecord, FetchError>;
}

impl MetadataSource for TmdbClient {
    fn lookup(&self, title: &str) -> Result<MovieRecord, FetchError> {
        TmdbClient::lookup(self, title)
    }
}

#[derive(Debug, Default)]
pub struct Enrichment {
    /// Resolved records in catalog order.
    pub records: Vec<MovieRecord>,
    /// Titles that produced nothing, in catalog order.
    pub not_found: Vec<String>,
}

type Job = (usize, String);
type Done = (usize, Result<MovieRecord, FetchError>);

/// Resolve every title with at most `workers` lookups in flight.
pub fn enrich<S: MetadataSource>(
    source: &S,
    titles: &[String],
    workers: usize,
    cache: &mut MetadataCache,
) -> Enrichment {
    let mut slots: Vec<Option<Option<MovieRecord>>> = vec![None; titles.len()];
    let mut queued: Vec<Job> = Vec::new();

    for (idx, title) in titles.iter().enumerate() {
        match cache.get(title) {
            Some(hit) => slots[idx] = Some(hit.cloned()),
            None => queued.push((idx, title.clone())),
        }
    }
    let cached = titles.len() - queued.len();

    if !queued.is_empty() {
        let workers = workers.clamp(1, MAX_FETCH_WORKERS).min(queued.len());
        debug!("Fetching {} title(s) with {workers} worker(s)", queued.len());

        for (idx, outcome) in run_pool(source, queued, workers) {
            if let Err(err) = &outcome {
                if err.is_definitive() {
                    debug!("TMDb: no match for '{}'", titles[idx]);
                } else {
                    warn!("TMDb lookup failed for '{}': {err}", titles[idx]);
                }
            }
            cache.record(&titles[idx], &outcome);
            slots[idx] = Some(outcome.ok());
        }
    }

    let mut out = Enrichment::default();
    for (idx, slot) in slots.into_iter().enumerate() {
        match slot.flatten() {
            Some(record) => out.records.push(record),
            None => out.not_found.push(titles[idx].clone()),
        }
    }

    info!(
        "Enriched {}/{} title(s) ({} from session cache, {} not found)",
        out.records.len(),
        titles.len(),
        cached,
        out.not_found.len()
    );
    out
}

fn run_pool<S: MetadataSource>(source: &S, jobs: Vec<Job>, workers: usize) -> Vec<Done> {
    let (work_tx, work_rx) = mpsc::channel::<Job>();
    let (done_tx, done_rx) = mpsc::channel::<Done>();
    let work_rx = Mutex::new(work_rx);
    let expected = jobs.len();

    for job in jobs {
        // receiver is alive until the scope below ends
        let _ = work_tx.send(job);
    }
    drop(work_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let work_rx = &work_rx;
            let done_tx = done_tx.clone();
            scope.spawn(move || loop {
                let job = match work_rx.lock() {
                    Ok(rx) => rx.recv(),
                    Err(_) => break,
                };
                let Ok((idx, title)) = job else {
                    break;
                };
                let outcome = source.lookup(&title);
                if done_tx.send((idx, outcome)).is_err() {
                    break;
                }
            });
        }
    });
    drop(done_tx);

    let done: Vec<Done> = done_rx.into_iter().collect();
    if done.len() != expected {
        warn!("{} of {expected} lookups did not report back", expected - done.len());
    }
    done
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Canned {
        known: HashMap<&'static str, u32>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(known: &[(&'static str, u32)]) -> Self {
            Self {
                known: known.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl MetadataSource for Canned {
        fn lookup(&self, title: &str) -> Result<MovieRecord, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Later titles answer faster so completion order differs from catalog order.
            let runtime = *self.known.get(title).ok_or(FetchError::NoMatch)?;
            thread::sleep(Duration::from_millis(u64::from(200 - runtime.min(200)) / 10));
            Ok(MovieRecord {
                title: title.to_string(),
                overview: String::new(),
                release_year: "2000".into(),
                poster_url: String::new(),
                genres: Vec::new(),
                runtime_minutes: Some(runtime),
            })
        }
    }

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_catalog_order_and_drops_not_found() {
        let source = Canned::new(&[("A", 90), ("B", 100), ("D", 110), ("E", 180)]);
        let mut cache = MetadataCache::new();
        let out = enrich(&source, &titles(&["A", "B", "C", "D", "E"]), 4, &mut cache);

        let got: Vec<_> = out.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(got, ["A", "B", "D", "E"]);
        assert_eq!(out.not_found, ["C"]);
    }

    #[test]
    fn duplicates_are_fetched_each_time_within_a_pass() {
        let source = Canned::new(&[("A", 90)]);
        let mut cache = MetadataCache::new();
        let out = enrich(&source, &titles(&["A", "A"]), 1, &mut cache);
        assert_eq!(out.records.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn second_pass_is_served_from_cache() {
        let source = Canned::new(&[("A", 90), ("B", 100)]);
        let mut cache = MetadataCache::new();
        let list = titles(&["A", "B", "Missing"]);

        enrich(&source, &list, 2, &mut cache);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);

        let again = enrich(&source, &list, 2, &mut cache);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(again.records.len(), 2);
        assert_eq!(again.not_found, ["Missing"]);
    }

    #[test]
    fn empty_catalog_spawns_nothing() {
        let source = Canned::new(&[]);
        let out = enrich(&source, &[], 8, &mut MetadataCache::new());
        assert!(out.records.is_empty());
        assert!(out.not_found.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
