//! TMDB response record shapes.

use serde::Deserialize;

/// Movie list category.
///
/// Each variant maps to one TMDB list endpoint and doubles as the stable
/// cache key for that category's fetched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListCategory {
    /// Movies currently in theaters.
    NowPlaying,
    /// Popular movies.
    Popular,
    /// Top rated movies.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl ListCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
    ];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::NowPlaying => "movie/now_playing",
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
            Self::Upcoming => "movie/upcoming",
        }
    }

    /// Stable cache-key name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NowPlaying => "now-playing",
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
            Self::Upcoming => "upcoming",
        }
    }

    /// Human-readable row title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl std::str::FromStr for ListCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now-playing" => Ok(Self::NowPlaying),
            "popular" => Ok(Self::Popular),
            "top-rated" => Ok(Self::TopRated),
            "upcoming" => Ok(Self::Upcoming),
            other => anyhow::bail!(
                "unknown category {other:?} (expected now-playing, popular, top-rated or upcoming)"
            ),
        }
    }
}

/// A single catalog entry from a movie list response.
///
/// Image paths are nullable in the TMDB payload; absent paths degrade to a
/// placeholder at the image-resolver seam.
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    /// TMDB movie ID (unique, stable).
    pub id: u64,
    /// Backdrop image path, e.g. `/wwemzKWzjKYJFfCeiB57q3r4Bcm.png`.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Display title.
    pub title: String,
    /// Synopsis text.
    #[serde(default)]
    pub overview: String,
}

/// One fetched category's ordered movie list with paging metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    /// Current page number (1-based).
    pub page: u32,
    /// Ordered movies for this page.
    pub results: Vec<Movie>,
    /// Total page count.
    pub total_pages: u32,
    /// Total movie count across all pages.
    pub total_results: u32,
}

/// A genre entry from the detail endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Genre {
    /// TMDB genre ID.
    pub id: u64,
    /// Genre name.
    pub name: String,
}

/// Supplementary per-movie detail record.
///
/// Fetched lazily; its lifecycle is independent from the list entry (it may
/// be absent or failed while the `Movie` is present).
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date, `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: String,
    /// Average user rating, 0.0 to 10.0.
    #[serde(default)]
    pub vote_average: f64,
    /// Ordered genre list.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Synopsis text.
    #[serde(default)]
    pub overview: String,
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB-internal status code (not the HTTP status).
    pub status_code: u32,
    /// Human-readable message.
    pub status_message: String,
    /// Always `false` for errors.
    pub success: bool,
}
