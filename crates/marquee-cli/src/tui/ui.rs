//! TUI rendering logic for the movie browser.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::carousel::{PAGE_SIZE, SlideDirection};
use super::overlay::resolve_selection;
use super::state::{BrowserState, CategoryRow, Focus, LoadState};
use marquee_api::tmdb::{Movie, MovieDetails};

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState, detail: Option<&MovieDetails>, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // featured banner
            Constraint::Min(4),    // now playing
            Constraint::Min(4),    // popular
            Constraint::Min(4),    // top rated
            Constraint::Min(4),    // upcoming
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    draw_banner(frame, chunks[0], state);
    for (idx, row) in state.rows.iter().enumerate().take(4) {
        let focused = state.focus == Focus::Row(idx);
        draw_row(frame, chunks[idx + 1], row, focused, now);
    }
    draw_footer(frame, chunks[5], state);

    if state.route.is_some() {
        draw_overlay(frame, state, detail);
    }
}

/// Draws the featured banner above the rows.
fn draw_banner(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let border_style = if state.focus == Focus::Banner {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Featured ")
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let Some(row) = state.rows.first() else {
        return;
    };
    let content = match &row.load {
        LoadState::Loading => Paragraph::new("Loading..."),
        LoadState::Failed(message) => {
            Paragraph::new(format!("fetch failed: {message}")).style(Style::default().fg(Color::Red))
        }
        LoadState::Ready(_) => {
            let Some(featured) = state.featured() else {
                return;
            };
            let title = Line::from(featured.title.clone()).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
            Paragraph::new(vec![title, Line::from(""), Line::from(featured.overview.clone())])
                .wrap(Wrap { trim: true })
        }
    };
    frame.render_widget(content, inner);
}

/// Draws one carousel row.
fn draw_row(frame: &mut Frame, area: Rect, row: &CategoryRow, focused: bool, now: Instant) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let page_label = row
        .movies()
        .map(|movies| {
            format!(
                " {} [{}/{}] ",
                row.category.title(),
                row.carousel.page_index().saturating_add(1),
                row.carousel.max_index(movies.len()).max(1),
            )
        })
        .unwrap_or_else(|| format!(" {} ", row.category.title()));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(page_label)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match &row.load {
        LoadState::Loading => frame.render_widget(Paragraph::new("Loading..."), inner),
        LoadState::Failed(message) => frame.render_widget(
            Paragraph::new(format!("fetch failed: {message}"))
                .style(Style::default().fg(Color::Red)),
            inner,
        ),
        LoadState::Ready(movies) => {
            let current = row.carousel.visible_page(movies);
            if let Some((direction, progress)) = row.slide_progress(now) {
                let outgoing = row
                    .carousel
                    .page_at(movies, row.carousel.previous_index(movies.len()));
                let (out_shift, in_shift) = slide_shifts(inner.width, direction, progress);
                draw_page(frame, inner, &outgoing, None, out_shift);
                draw_page(frame, inner, &current, None, in_shift);
            } else {
                let cursor = focused.then_some(row.cursor);
                draw_page(frame, inner, &current, cursor, 0);
            }
        }
    }
}

/// Horizontal shifts for the outgoing and incoming pages at `progress`.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn slide_shifts(width: u16, direction: SlideDirection, progress: f64) -> (i32, i32) {
    let width = i32::from(width);
    let travelled = (progress.clamp(0.0, 1.0) * f64::from(width)).round() as i32;
    match direction {
        // Forward: both pages move left; the incoming page enters from the
        // right edge.
        SlideDirection::Forward => (-travelled, width.saturating_sub(travelled)),
        SlideDirection::Backward => (travelled, travelled.saturating_sub(width)),
    }
}

/// Draws one page of movie boxes, shifted by `x_shift` columns and clipped
/// to `area`.
#[allow(clippy::arithmetic_side_effects)]
fn draw_page(frame: &mut Frame, area: Rect, movies: &[&Movie], cursor: Option<usize>, x_shift: i32) {
    let page_width = u16::try_from(PAGE_SIZE).unwrap_or(u16::MAX);
    let cell_width = area.width / page_width;
    if cell_width < 3 {
        return;
    }

    for (idx, movie) in movies.iter().enumerate() {
        let offset = i32::from(cell_width) * i32::try_from(idx).unwrap_or(0);
        let Some(cell) = clip_cell(area, offset + x_shift, cell_width) else {
            continue;
        };

        let selected = cursor == Some(idx);
        let style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let card = Paragraph::new(movie.title.clone())
            .wrap(Wrap { trim: true })
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(card, cell);
    }
}

/// Clips a cell at `area.x + offset` of `width` columns against `area`.
///
/// Returns `None` when the cell is fully outside the visible range.
#[allow(clippy::arithmetic_side_effects)]
fn clip_cell(area: Rect, offset: i32, width: u16) -> Option<Rect> {
    let left = i32::from(area.x);
    let right = left + i32::from(area.width);
    let cell_left = (left + offset).max(left);
    let cell_right = (left + offset + i32::from(width)).min(right);
    if cell_right <= cell_left {
        return None;
    }
    Some(Rect {
        x: u16::try_from(cell_left).ok()?,
        y: area.y,
        width: u16::try_from(cell_right - cell_left).ok()?,
        height: area.height,
    })
}

/// Draws the detail overlay: dimmed backdrop, and the modal when the route
/// still resolves to a known movie.
fn draw_overlay(frame: &mut Frame, state: &BrowserState, detail: Option<&MovieDetails>) {
    let area = frame.area();
    let shade = Block::default().style(
        Style::default()
            .bg(Color::Black)
            .add_modifier(Modifier::DIM),
    );
    frame.render_widget(shade, area);

    // Stale or invalid route: nothing beyond the dimmed backdrop.
    let Some(movie) = resolve_selection(state.route.as_deref(), state.all_movies()) else {
        return;
    };

    let modal_area = centered_rect(area, 70, 70);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", movie.title))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);
    if inner.height == 0 {
        return;
    }

    // Detail fields render blank until (or unless) the lazy fetch lands.
    let info_line = detail.map_or_else(Line::default, |d| {
        let genres = d
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Line::from(format!(
            "{}  \u{2b50}{:.2}  {genres}",
            d.release_date, d.vote_average
        ))
        .style(Style::default().add_modifier(Modifier::BOLD))
    });

    let overview = detail
        .filter(|d| !d.overview.is_empty())
        .map_or(movie.overview.as_str(), |d| d.overview.as_str());

    let body = Paragraph::new(vec![
        info_line,
        Line::from(""),
        Line::from(overview.to_owned()),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}

/// Centers a `percent_x` by `percent_y` rect within `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100_u16.saturating_sub(percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100_u16.saturating_sub(percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
        ])
        .split(vertical.get(1).copied().unwrap_or(area));
    horizontal.get(1).copied().unwrap_or(area)
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let hints = if state.route.is_some() {
        "Esc: close  o: open on TMDB  q: quit"
    } else if state.focus == Focus::Banner {
        "\u{2191}\u{2193}/j/k: focus  Enter: next page  q: quit"
    } else {
        "\u{2191}\u{2193}/j/k: focus  \u{2190}\u{2192}: page  Tab/h/l: cursor  Enter: details  q: quit"
    };
    frame.render_widget(Paragraph::new(hints), area);
}
