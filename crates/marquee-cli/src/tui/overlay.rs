//! Detail overlay controller.
//!
//! Derives the selected movie from the current route parameter and lazily
//! fetches its supplementary details. Selection is recomputed from the route
//! and the in-memory lists every frame; nothing about "overlay open" is
//! stored separately.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use marquee_api::tmdb::{CatalogApi, Movie, MovieDetails};

/// Resolves the route parameter to a movie from the known lists.
///
/// Returns the first movie whose id stringifies equal to `route_id`, or
/// `None` when there is no route or no match. A stale or invalid id is a
/// silent no-match, not an error.
pub fn resolve_selection<'a, I>(route_id: Option<&str>, movies: I) -> Option<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let route_id = route_id?;
    movies
        .into_iter()
        .find(|movie| movie.id.to_string() == route_id)
}

/// Lazy, cached loader for per-movie detail records.
///
/// Each route id is fetched at most once; results arrive over a channel and
/// are folded into the cache by [`DetailLoader::poll_results`] on the event
/// loop tick. Clearing the route does not cancel an in-flight fetch — a late
/// result is cached and simply never read.
#[derive(Debug)]
pub struct DetailLoader<C> {
    client: Arc<C>,
    cache: HashMap<String, MovieDetails>,
    failed: HashSet<String>,
    in_flight: HashSet<String>,
    tx: mpsc::UnboundedSender<(String, Result<MovieDetails>)>,
    rx: mpsc::UnboundedReceiver<(String, Result<MovieDetails>)>,
}

impl<C> DetailLoader<C>
where
    C: CatalogApi + Send + Sync + 'static,
{
    /// Creates an empty loader around a shared API client.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            cache: HashMap::new(),
            failed: HashSet::new(),
            in_flight: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Requests details for `route_id`, spawning a fetch unless the id is
    /// already cached, in flight, or known to have failed.
    pub fn request(&mut self, route_id: &str) {
        if self.cache.contains_key(route_id)
            || self.in_flight.contains(route_id)
            || self.failed.contains(route_id)
        {
            return;
        }

        let Ok(movie_id) = route_id.parse::<u64>() else {
            // Malformed route parameter: treat like a failed fetch so the
            // overlay renders blanks without retry churn.
            self.failed.insert(String::from(route_id));
            return;
        };

        self.in_flight.insert(String::from(route_id));
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let key = String::from(route_id);
        tokio::spawn(async move {
            let result = client.movie_details(movie_id).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send((key, result));
        });
    }

    /// Drains completed fetches into the cache. Call once per tick.
    pub fn poll_results(&mut self) {
        while let Ok((route_id, result)) = self.rx.try_recv() {
            self.in_flight.remove(&route_id);
            match result {
                Ok(details) => {
                    self.cache.insert(route_id, details);
                }
                Err(error) => {
                    tracing::warn!(%route_id, %error, "movie detail fetch failed");
                    self.failed.insert(route_id);
                }
            }
        }
    }

    /// Cached details for `route_id`, if the fetch has completed.
    #[must_use]
    pub fn get(&self, route_id: &str) -> Option<&MovieDetails> {
        self.cache.get(route_id)
    }

    /// Whether the fetch for `route_id` failed (overlay renders blanks).
    #[must_use]
    pub fn is_failed(&self, route_id: &str) -> bool {
        self.failed.contains(route_id)
    }
}
