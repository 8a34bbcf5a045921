//! Carousel pagination state machine.
//!
//! Presents a fixed-size window of consecutive movies from a category list
//! and advances or retreats that window one page at a time with wraparound.
//! A transition lock prevents a new slide from starting until the previous
//! one has visually finished: advance requests arriving while a slide is in
//! flight are dropped, not queued.

/// Number of items shown per carousel page.
pub const PAGE_SIZE: usize = 6;

/// Slide direction for a page transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Advance toward higher page indices (new page enters from the right).
    Forward,
    /// Retreat toward lower page indices (new page enters from the left).
    Backward,
}

/// Transition phase.
///
/// Explicit two-state machine replacing a raw lock boolean: the only
/// permitted exit from `Sliding` is `complete_transition`, driven by the
/// animation clock, never by the page-index update itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No slide in flight; advance requests are accepted.
    Idle,
    /// A slide is in flight; advance requests are dropped.
    Sliding,
}

/// Per-carousel configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselOptions {
    /// Index into the source list excluded from pagination (the featured
    /// banner item, in the banner variant).
    pub excluded_index: Option<usize>,
    /// Whether activating the banner triggers a forward auto-advance.
    pub auto_advance_on_banner: bool,
}

/// Pagination and transition-lock state for one carousel.
#[derive(Debug)]
pub struct CarouselState {
    page_index: usize,
    direction: SlideDirection,
    phase: TransitionPhase,
    options: CarouselOptions,
}

impl CarouselState {
    /// Creates a carousel at page 0, facing forward, unlocked.
    #[must_use]
    pub const fn new(options: CarouselOptions) -> Self {
        Self {
            page_index: 0,
            direction: SlideDirection::Forward,
            phase: TransitionPhase::Idle,
            options,
        }
    }

    /// Current page index.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Direction of the most recent (or in-flight) transition.
    #[must_use]
    pub const fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase == TransitionPhase::Sliding
    }

    /// Carousel configuration.
    #[must_use]
    pub const fn options(&self) -> CarouselOptions {
        self.options
    }

    /// Number of items that participate in pagination.
    ///
    /// The excluded (featured) index is subtracted when it falls inside the
    /// source list, independent of its position.
    #[must_use]
    const fn effective_count(&self, item_count: usize) -> usize {
        match self.options.excluded_index {
            Some(idx) if idx < item_count => item_count.saturating_sub(1),
            _ => item_count,
        }
    }

    /// Highest exclusive page index: `floor(effective_count / PAGE_SIZE)`.
    ///
    /// Floors intentionally: a tail remainder shorter than a full page is
    /// never shown as its own page.
    #[must_use]
    pub const fn max_index(&self, item_count: usize) -> usize {
        self.effective_count(item_count) / PAGE_SIZE
    }

    /// Requests a page transition in `direction`.
    ///
    /// No-op while a transition is in flight (re-entrancy guard) and when
    /// there is at most one page. Returns `true` when a transition started,
    /// so the caller can kick off the slide animation; the animation's
    /// completion must be reported back via [`Self::complete_transition`].
    #[allow(clippy::arithmetic_side_effects)]
    pub fn request_advance(&mut self, direction: SlideDirection, item_count: usize) -> bool {
        if self.is_locked() {
            return false;
        }
        let max_index = self.max_index(item_count);
        if max_index == 0 {
            // Whole-list case: everything fits on one (possibly short) page.
            return false;
        }

        self.phase = TransitionPhase::Sliding;
        self.direction = direction;
        self.page_index = match direction {
            SlideDirection::Forward => {
                if self.page_index >= max_index - 1 {
                    0
                } else {
                    self.page_index + 1
                }
            }
            SlideDirection::Backward => {
                if self.page_index == 0 {
                    max_index - 1
                } else {
                    self.page_index - 1
                }
            }
        };
        true
    }

    /// Reports that the outgoing page has fully left the visible area.
    ///
    /// Idempotent: repeated completion signals for the same transition are
    /// harmless.
    pub const fn complete_transition(&mut self) {
        self.phase = TransitionPhase::Idle;
    }

    /// Page index that was visible before the in-flight transition,
    /// reconstructed wraparound-aware from the recorded direction.
    #[allow(clippy::arithmetic_side_effects)]
    #[must_use]
    pub const fn previous_index(&self, item_count: usize) -> usize {
        let max_index = self.max_index(item_count);
        if max_index == 0 {
            return 0;
        }
        match self.direction {
            SlideDirection::Forward => {
                if self.page_index == 0 {
                    max_index - 1
                } else {
                    self.page_index - 1
                }
            }
            SlideDirection::Backward => {
                if self.page_index >= max_index - 1 {
                    0
                } else {
                    self.page_index + 1
                }
            }
        }
    }

    /// Read-only projection of an arbitrary page.
    ///
    /// Items keep the source list's order; the excluded index is sliced out
    /// before pagination. Shorter than `PAGE_SIZE` only in the whole-list
    /// case.
    pub fn page_at<'a, T>(&self, items: &'a [T], page_index: usize) -> Vec<&'a T> {
        items
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.options.excluded_index != Some(*idx))
            .map(|(_, item)| item)
            .skip(page_index.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect()
    }

    /// Read-only projection of the currently visible page.
    pub fn visible_page<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.page_at(items, self.page_index)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn items(count: usize) -> Vec<usize> {
        (0..count).collect()
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let carousel = CarouselState::new(CarouselOptions::default());

        // Assert
        assert_eq!(carousel.page_index(), 0);
        assert_eq!(carousel.direction(), SlideDirection::Forward);
        assert!(!carousel.is_locked());
    }

    #[test]
    fn test_max_index_floors() {
        // Arrange
        let carousel = CarouselState::new(CarouselOptions::default());

        // Act & Assert
        assert_eq!(carousel.max_index(20), 3);
        assert_eq!(carousel.max_index(18), 3);
        assert_eq!(carousel.max_index(5), 0);
        assert_eq!(carousel.max_index(0), 0);
    }

    #[test]
    fn test_forward_cycle_returns_to_zero() {
        // Arrange: 20 items, page size 6 -> max_index 3, cycle length 3
        let mut carousel = CarouselState::new(CarouselOptions::default());

        // Act & Assert
        for expected in [1, 2, 0] {
            assert!(carousel.request_advance(SlideDirection::Forward, 20));
            assert_eq!(carousel.page_index(), expected);
            carousel.complete_transition();
        }
    }

    #[test]
    fn test_backward_wraps_from_zero() {
        // Arrange
        let mut carousel = CarouselState::new(CarouselOptions::default());

        // Act
        assert!(carousel.request_advance(SlideDirection::Backward, 20));

        // Assert
        assert_eq!(carousel.page_index(), 2);
        assert_eq!(carousel.direction(), SlideDirection::Backward);
    }

    #[test]
    fn test_advance_while_locked_is_dropped() {
        // Arrange
        let mut carousel = CarouselState::new(CarouselOptions::default());
        assert!(carousel.request_advance(SlideDirection::Forward, 20));
        let page = carousel.page_index();

        // Act: both directions dropped while the slide is in flight
        assert!(!carousel.request_advance(SlideDirection::Forward, 20));
        assert!(!carousel.request_advance(SlideDirection::Backward, 20));

        // Assert
        assert_eq!(carousel.page_index(), page);
        assert_eq!(carousel.direction(), SlideDirection::Forward);
        assert!(carousel.is_locked());
    }

    #[test]
    fn test_complete_transition_reenables_exactly_one() {
        // Arrange
        let mut carousel = CarouselState::new(CarouselOptions::default());
        assert!(carousel.request_advance(SlideDirection::Forward, 20));

        // Act
        carousel.complete_transition();

        // Assert: one more is accepted, then locked again
        assert!(!carousel.is_locked());
        assert!(carousel.request_advance(SlideDirection::Forward, 20));
        assert!(!carousel.request_advance(SlideDirection::Forward, 20));
    }

    #[test]
    fn test_complete_transition_is_idempotent() {
        // Arrange
        let mut carousel = CarouselState::new(CarouselOptions::default());
        assert!(carousel.request_advance(SlideDirection::Forward, 20));

        // Act
        carousel.complete_transition();
        carousel.complete_transition();

        // Assert
        assert!(!carousel.is_locked());
        assert_eq!(carousel.page_index(), 1);
    }

    #[test]
    fn test_advance_noop_for_single_page() {
        // Arrange: fewer items than a page
        let mut carousel = CarouselState::new(CarouselOptions::default());

        // Act & Assert
        assert!(!carousel.request_advance(SlideDirection::Forward, 5));
        assert_eq!(carousel.page_index(), 0);
        assert!(!carousel.is_locked());
    }

    #[test]
    fn test_visible_page_preserves_order() {
        // Arrange
        let list = items(20);
        let mut carousel = CarouselState::new(CarouselOptions::default());
        assert!(carousel.request_advance(SlideDirection::Forward, list.len()));
        carousel.complete_transition();

        // Act
        let page = carousel.visible_page(&list);

        // Assert
        assert_eq!(page, vec![&6, &7, &8, &9, &10, &11]);
    }

    #[test]
    fn test_visible_page_never_short_except_whole_list() {
        // Arrange
        let list = items(20);
        let mut carousel = CarouselState::new(CarouselOptions::default());

        // Act & Assert: every reachable page is full
        for _ in 0..3 {
            assert_eq!(carousel.visible_page(&list).len(), PAGE_SIZE);
            carousel.request_advance(SlideDirection::Forward, list.len());
            carousel.complete_transition();
        }

        // Whole-list case: shorter than a page
        let short = items(4);
        let carousel = CarouselState::new(CarouselOptions::default());
        assert_eq!(carousel.visible_page(&short).len(), 4);
    }

    #[test]
    fn test_previous_index_is_wraparound_aware() {
        // Arrange
        let mut carousel = CarouselState::new(CarouselOptions::default());

        // Act: forward from 2 wraps to 0; the outgoing page was 2
        assert!(carousel.request_advance(SlideDirection::Forward, 20));
        carousel.complete_transition();
        assert!(carousel.request_advance(SlideDirection::Forward, 20));
        carousel.complete_transition();
        assert!(carousel.request_advance(SlideDirection::Forward, 20));

        // Assert
        assert_eq!(carousel.page_index(), 0);
        assert_eq!(carousel.previous_index(20), 2);

        // Backward from 0 wraps to 2; the outgoing page was 0
        carousel.complete_transition();
        assert!(carousel.request_advance(SlideDirection::Backward, 20));
        assert_eq!(carousel.page_index(), 2);
        assert_eq!(carousel.previous_index(20), 0);
    }

    #[test]
    fn test_excluded_index_reduces_max_index() {
        // Arrange: 19 items, one excluded as featured -> floor(18 / 6) = 3,
        // independent of the excluded item's own position
        for excluded in [0, 9, 16, 18] {
            let carousel = CarouselState::new(CarouselOptions {
                excluded_index: Some(excluded),
                auto_advance_on_banner: true,
            });

            // Act & Assert
            assert_eq!(carousel.max_index(19), 3);
        }
    }

    #[test]
    fn test_excluded_index_outside_list_is_ignored() {
        // Arrange
        let carousel = CarouselState::new(CarouselOptions {
            excluded_index: Some(25),
            auto_advance_on_banner: false,
        });

        // Act & Assert
        assert_eq!(carousel.max_index(20), 3);
    }

    #[test]
    fn test_visible_page_skips_excluded_item() {
        // Arrange
        let list = items(19);
        let carousel = CarouselState::new(CarouselOptions {
            excluded_index: Some(2),
            auto_advance_on_banner: true,
        });

        // Act
        let page = carousel.visible_page(&list);

        // Assert: item 2 sliced out before pagination
        assert_eq!(page, vec![&0, &1, &3, &4, &5, &6]);
    }

    #[test]
    fn test_tail_remainder_is_never_shown() {
        // Arrange: 20 items -> pages 0..3 cover items 0..=17; 18 and 19
        // are unreachable by design
        let list = items(20);
        let mut carousel = CarouselState::new(CarouselOptions::default());
        let mut seen = Vec::new();

        // Act: walk one full forward cycle
        for _ in 0..carousel.max_index(list.len()) {
            seen.extend(carousel.visible_page(&list).into_iter().copied());
            carousel.request_advance(SlideDirection::Forward, list.len());
            carousel.complete_transition();
        }

        // Assert
        assert!(!seen.contains(&18));
        assert!(!seen.contains(&19));
        assert_eq!(seen.len(), 18);
    }
}
