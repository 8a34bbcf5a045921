//! TMDB API v3 client.
//!
//! Covers the four movie list endpoints (now playing, popular, top rated,
//! upcoming), the per-movie detail endpoint, and image URL resolution.

mod api;
mod client;
mod images;
mod rate_limiter;
mod types;

pub use api::{CatalogApi, LocalCatalogApi};
pub use client::{TmdbClient, TmdbClientBuilder};
pub use images::image_url;
pub use types::{
    Genre, ListCategory, Movie, MovieDetails, MovieListResponse, TmdbErrorResponse,
};

/// Public TMDB site base URL (for "open in browser" affordances).
pub const TMDB_SITE_URL: &str = "https://www.themoviedb.org";
