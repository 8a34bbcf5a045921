//! TMDB catalog API client library for marquee.
//!
//! Provides the movie list/detail client and the image URL resolver.

/// TMDB API client.
pub mod tmdb;
