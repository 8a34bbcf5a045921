//! Browser state management.
//!
//! One `CategoryRow` per catalog category plus the featured banner; the
//! route (selected movie id) is the single source of truth for the detail
//! overlay, re-derived every frame.

use std::time::{Duration, Instant};

use marquee_api::tmdb::{ListCategory, Movie, MovieListResponse};

use super::carousel::{CarouselOptions, CarouselState, SlideDirection};

/// Wall-clock duration of one page slide.
pub const SLIDE_DURATION: Duration = Duration::from_millis(350);

/// Index of the featured banner movie within the now-playing list.
pub const FEATURED_INDEX: usize = 0;

/// Load state of one category list.
#[derive(Debug)]
pub enum LoadState {
    /// Fetch still outstanding.
    Loading,
    /// Fetched movie list.
    Ready(Vec<Movie>),
    /// Fetch failed; the row shows an error instead of hanging on the
    /// loading placeholder.
    Failed(String),
}

/// One carousel row bound to a category.
#[derive(Debug)]
pub struct CategoryRow {
    /// Catalog category backing this row.
    pub category: ListCategory,
    /// List fetch state.
    pub load: LoadState,
    /// Pagination state machine.
    pub carousel: CarouselState,
    /// Item cursor within the visible page.
    pub cursor: usize,
    /// Slide animation start, while one is in flight.
    slide_started: Option<Instant>,
}

impl CategoryRow {
    fn new(category: ListCategory, options: CarouselOptions) -> Self {
        Self {
            category,
            load: LoadState::Loading,
            carousel: CarouselState::new(options),
            cursor: 0,
            slide_started: None,
        }
    }

    /// Fetched movies, if the list is ready.
    #[must_use]
    pub fn movies(&self) -> Option<&[Movie]> {
        match &self.load {
            LoadState::Ready(movies) => Some(movies),
            _ => None,
        }
    }

    /// Slide progress in `[0, 1]` with its direction, while animating.
    #[must_use]
    pub fn slide_progress(&self, now: Instant) -> Option<(SlideDirection, f64)> {
        let started = self.slide_started?;
        let progress = now.saturating_duration_since(started).as_secs_f64()
            / SLIDE_DURATION.as_secs_f64();
        Some((self.carousel.direction(), progress.min(1.0)))
    }
}

/// Keyboard focus target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The featured banner above the rows.
    Banner,
    /// Carousel row by index (0 = now playing).
    Row(usize),
}

/// Top-level state for the browser TUI.
#[derive(Debug)]
pub struct BrowserState {
    /// Category rows in display order; row 0 is the featured-banner variant.
    pub rows: Vec<CategoryRow>,
    /// Current keyboard focus.
    pub focus: Focus,
    /// Route parameter: the selected movie id, when the overlay is open.
    pub route: Option<String>,
}

impl BrowserState {
    /// Creates the initial state: all rows loading, banner focused.
    #[must_use]
    pub fn new() -> Self {
        let rows = ListCategory::ALL
            .into_iter()
            .enumerate()
            .map(|(idx, category)| {
                let options = if idx == 0 {
                    CarouselOptions {
                        excluded_index: Some(FEATURED_INDEX),
                        auto_advance_on_banner: true,
                    }
                } else {
                    CarouselOptions::default()
                };
                CategoryRow::new(category, options)
            })
            .collect();
        Self {
            rows,
            focus: Focus::Banner,
            route: None,
        }
    }

    /// Applies a finished category fetch.
    pub fn apply_fetch(&mut self, category: ListCategory, result: anyhow::Result<MovieListResponse>) {
        let Some(row) = self.rows.iter_mut().find(|r| r.category == category) else {
            return;
        };
        row.load = match result {
            Ok(response) => LoadState::Ready(response.results),
            Err(error) => {
                tracing::warn!(category = category.key(), %error, "category fetch failed");
                LoadState::Failed(error.to_string())
            }
        };
    }

    /// Whether any category fetch is still outstanding.
    #[must_use]
    pub fn any_loading(&self) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row.load, LoadState::Loading))
    }

    /// The featured banner movie, once now-playing is ready.
    #[must_use]
    pub fn featured(&self) -> Option<&Movie> {
        self.rows.first()?.movies()?.get(FEATURED_INDEX)
    }

    /// Union of all fetched lists, in row order (selection lookup pool).
    #[must_use]
    pub fn all_movies(&self) -> Vec<&Movie> {
        self.rows
            .iter()
            .filter_map(CategoryRow::movies)
            .flatten()
            .collect()
    }

    /// Row index the focus maps to (the banner drives row 0).
    #[must_use]
    const fn focused_row_index(&self) -> usize {
        match self.focus {
            Focus::Banner => 0,
            Focus::Row(idx) => idx,
        }
    }

    /// Moves focus down: banner, then each row, wrapping.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Banner => Focus::Row(0),
            Focus::Row(idx) if idx + 1 < self.rows.len() => Focus::Row(idx + 1),
            Focus::Row(_) => Focus::Banner,
        };
    }

    /// Moves focus up, wrapping.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Banner => Focus::Row(self.rows.len() - 1),
            Focus::Row(0) => Focus::Banner,
            Focus::Row(idx) => Focus::Row(idx - 1),
        };
    }

    /// Requests a page slide on the focused row.
    ///
    /// Dropped while that row's previous slide is still in flight.
    pub fn slide(&mut self, direction: SlideDirection, now: Instant) {
        let idx = self.focused_row_index();
        let Some(row) = self.rows.get_mut(idx) else {
            return;
        };
        let Some(count) = row.movies().map(<[Movie]>::len) else {
            return;
        };
        if row.carousel.request_advance(direction, count) {
            row.slide_started = Some(now);
            row.cursor = 0;
        }
    }

    /// Advances per-row animation clocks; releases the transition lock once
    /// the outgoing page has fully left the visible area.
    pub fn tick(&mut self, now: Instant) {
        for row in &mut self.rows {
            if let Some(started) = row.slide_started
                && now.saturating_duration_since(started) >= SLIDE_DURATION
            {
                row.carousel.complete_transition();
                row.slide_started = None;
            }
        }
    }

    /// Moves the item cursor within the focused row's visible page.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn cursor_move(&mut self, delta_forward: bool) {
        let idx = self.focused_row_index();
        let Some(row) = self.rows.get_mut(idx) else {
            return;
        };
        let Some(movies) = row.movies() else {
            return;
        };
        let page_len = row.carousel.visible_page(movies).len();
        if page_len == 0 {
            return;
        }
        row.cursor = if delta_forward {
            (row.cursor + 1) % page_len
        } else {
            (row.cursor + page_len - 1) % page_len
        };
    }

    /// Activates the focused element.
    ///
    /// On the banner this is the auto-advance affordance: a forward slide of
    /// the featured row through the same transition lock, so activation
    /// during an in-flight slide is dropped. On a row it selects the movie
    /// under the cursor, writing the route; the returned id is the detail
    /// fetch key.
    pub fn activate(&mut self, now: Instant) -> Option<String> {
        match self.focus {
            Focus::Banner => {
                if self
                    .rows
                    .first()
                    .is_some_and(|row| row.carousel.options().auto_advance_on_banner)
                {
                    self.slide(SlideDirection::Forward, now);
                }
                None
            }
            Focus::Row(idx) => {
                let row = self.rows.get(idx)?;
                let movies = row.movies()?;
                let selected = row.carousel.visible_page(movies).get(row.cursor).copied()?;
                let route_id = selected.id.to_string();
                self.route = Some(route_id.clone());
                Some(route_id)
            }
        }
    }

    /// Dismisses the overlay (backdrop click): clears the route without
    /// cancelling any in-flight detail fetch.
    pub fn navigate_back(&mut self) {
        self.route = None;
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            backdrop_path: Some(format!("/b{id}.jpg")),
            poster_path: Some(format!("/p{id}.jpg")),
            title: String::from(title),
            overview: String::from("overview"),
        }
    }

    fn response(count: u64) -> MovieListResponse {
        MovieListResponse {
            page: 1,
            results: (0..count).map(|i| movie(i, &format!("Movie {i}"))).collect(),
            total_pages: 1,
            total_results: u32::try_from(count).unwrap(),
        }
    }

    fn ready_state() -> BrowserState {
        let mut state = BrowserState::new();
        for category in ListCategory::ALL {
            state.apply_fetch(category, Ok(response(20)));
        }
        state
    }

    #[test]
    fn test_initial_state_loading() {
        // Arrange & Act
        let state = BrowserState::new();

        // Assert
        assert_eq!(state.rows.len(), 4);
        assert!(state.any_loading());
        assert_eq!(state.focus, Focus::Banner);
        assert!(state.route.is_none());
    }

    #[test]
    fn test_apply_fetch_failure_surfaces_error_state() {
        // Arrange
        let mut state = BrowserState::new();

        // Act
        state.apply_fetch(ListCategory::Popular, Err(anyhow::anyhow!("boom")));

        // Assert
        let row = &state.rows[1];
        assert!(matches!(&row.load, LoadState::Failed(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_featured_row_excludes_banner_movie() {
        // Arrange: 19 movies in now playing, one featured -> max_index 3
        let mut state = BrowserState::new();
        state.apply_fetch(ListCategory::NowPlaying, Ok(response(19)));

        // Act
        let row = &state.rows[0];

        // Assert
        assert_eq!(row.carousel.max_index(19), 3);
        assert_eq!(state.featured().unwrap().id, 0);
        let movies = state.rows[0].movies().unwrap();
        let page = state.rows[0].carousel.visible_page(movies);
        assert!(page.iter().all(|m| m.id != 0));
    }

    #[test]
    fn test_slide_sets_clock_and_tick_releases_lock() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(1);
        let t0 = Instant::now();

        // Act
        state.slide(SlideDirection::Forward, t0);

        // Assert: locked until the slide duration has elapsed
        assert!(state.rows[1].carousel.is_locked());
        state.tick(t0 + Duration::from_millis(100));
        assert!(state.rows[1].carousel.is_locked());
        state.tick(t0 + SLIDE_DURATION);
        assert!(!state.rows[1].carousel.is_locked());
    }

    #[test]
    fn test_rapid_slides_are_dropped_until_complete() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(2);
        let t0 = Instant::now();

        // Act: three rapid requests within one slide
        state.slide(SlideDirection::Forward, t0);
        state.slide(SlideDirection::Forward, t0 + Duration::from_millis(10));
        state.slide(SlideDirection::Backward, t0 + Duration::from_millis(20));

        // Assert: only the first advanced
        assert_eq!(state.rows[2].carousel.page_index(), 1);
        assert_eq!(state.rows[2].carousel.direction(), SlideDirection::Forward);
    }

    #[test]
    fn test_banner_activation_auto_advances_featured_row() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Banner;
        let t0 = Instant::now();

        // Act
        let route = state.activate(t0);

        // Assert: no selection, featured row advanced
        assert!(route.is_none());
        assert!(state.route.is_none());
        assert_eq!(state.rows[0].carousel.page_index(), 1);
    }

    #[test]
    fn test_banner_activation_during_slide_is_dropped() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Banner;
        let t0 = Instant::now();
        state.activate(t0);

        // Act: second activation while the first slide is in flight
        state.activate(t0 + Duration::from_millis(5));

        // Assert
        assert_eq!(state.rows[0].carousel.page_index(), 1);
    }

    #[test]
    fn test_row_activation_writes_route() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(1);
        state.cursor_move(true);

        // Act
        let route = state.activate(Instant::now());

        // Assert: cursor 1 on page 0 -> movie id 1
        assert_eq!(route.as_deref(), Some("1"));
        assert_eq!(state.route.as_deref(), Some("1"));
    }

    #[test]
    fn test_navigate_back_clears_route() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(0);
        state.activate(Instant::now());
        assert!(state.route.is_some());

        // Act
        state.navigate_back();

        // Assert
        assert!(state.route.is_none());
    }

    #[test]
    fn test_focus_cycle() {
        // Arrange
        let mut state = ready_state();

        // Act & Assert: banner -> rows -> banner
        state.focus_next();
        assert_eq!(state.focus, Focus::Row(0));
        for expected in [1, 2, 3] {
            state.focus_next();
            assert_eq!(state.focus, Focus::Row(expected));
        }
        state.focus_next();
        assert_eq!(state.focus, Focus::Banner);

        state.focus_prev();
        assert_eq!(state.focus, Focus::Row(3));
    }

    #[test]
    fn test_cursor_wraps_within_page() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(1);

        // Act & Assert
        state.cursor_move(false);
        assert_eq!(state.rows[1].cursor, 5);
        state.cursor_move(true);
        assert_eq!(state.rows[1].cursor, 0);
    }

    #[test]
    fn test_slide_noop_while_loading() {
        // Arrange
        let mut state = BrowserState::new();
        state.focus = Focus::Row(3);

        // Act
        state.slide(SlideDirection::Forward, Instant::now());

        // Assert
        assert_eq!(state.rows[3].carousel.page_index(), 0);
        assert!(!state.rows[3].carousel.is_locked());
    }

    #[test]
    fn test_slide_progress_reports_direction() {
        // Arrange
        let mut state = ready_state();
        state.focus = Focus::Row(0);
        let t0 = Instant::now();
        state.slide(SlideDirection::Backward, t0);

        // Act
        let progress = state.rows[0].slide_progress(t0 + SLIDE_DURATION / 2);

        // Assert
        let (direction, value) = progress.unwrap();
        assert_eq!(direction, SlideDirection::Backward);
        assert!(value > 0.3 && value < 0.7);
    }
}
