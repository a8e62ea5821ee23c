use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const TILE_WIDTH: u16 = 5;
pub const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: everything
    Medium, // 50-79 cols: header summary dropped
    Narrow, // <50 cols: tiles, attempt and feedback only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else if area.width >= 50 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_progress_bar(&self, height: u16) -> bool {
        height >= 18 && *self != LayoutTier::Narrow
    }
}

pub struct PracticeLayout {
    pub header: Rect,
    pub word_bar: Rect,
    pub board: Rect,
    pub attempt: Rect,
    pub feedback: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl PracticeLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        if tier.show_progress_bar(area.height) {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(7),
                    Constraint::Length(3),
                    Constraint::Length(2),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(area);

            Self {
                header: vertical[0],
                word_bar: vertical[1],
                board: vertical[2],
                attempt: vertical[3],
                feedback: vertical[4],
                progress: Some(vertical[5]),
                footer: vertical[6],
                tier,
            }
        } else {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(7),
                    Constraint::Length(3),
                    Constraint::Length(2),
                    Constraint::Length(1),
                ])
                .split(area);

            Self {
                header: vertical[0],
                word_bar: vertical[1],
                board: vertical[2],
                attempt: vertical[3],
                feedback: vertical[4],
                progress: None,
                footer: vertical[5],
                tier,
            }
        }
    }

    /// Clickable zone of the speaker affordance, the left end of the word bar.
    pub fn speaker_zone(&self) -> Rect {
        Rect::new(
            self.word_bar.x,
            self.word_bar.y,
            self.word_bar.width.min(20),
            self.word_bar.height,
        )
    }
}

/// Grid positions for `count` tiles centered in `area`, row-major in tile
/// order. The board renderer and mouse hit-testing both use this, so a click
/// always lands on the tile that was painted there.
///
/// Rows that would not fit vertically are dropped from the end; the returned
/// prefix still maps index-for-index onto the tile list.
pub fn tile_rects(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || area.width < TILE_WIDTH || area.height < TILE_HEIGHT {
        return Vec::new();
    }

    let per_row = ((area.width + TILE_GAP) / (TILE_WIDTH + TILE_GAP)).max(1) as usize;
    let rows = count.div_ceil(per_row);

    let total_height = rows as u16 * TILE_HEIGHT + (rows as u16 - 1) * TILE_GAP;
    let top = area.y + area.height.saturating_sub(total_height) / 2;

    let mut rects = Vec::with_capacity(count);
    for row in 0..rows {
        let y = top + row as u16 * (TILE_HEIGHT + TILE_GAP);
        if y + TILE_HEIGHT > area.y + area.height {
            break;
        }

        let row_count = per_row.min(count - row * per_row);
        let row_width = row_count as u16 * TILE_WIDTH + (row_count as u16 - 1) * TILE_GAP;
        let left = area.x + area.width.saturating_sub(row_width) / 2;
        for col in 0..row_count {
            let x = left + col as u16 * (TILE_WIDTH + TILE_GAP);
            rects.push(Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT));
        }
    }
    rects
}

/// Popup area of the advance prompt. Render and mouse handling both use it.
pub fn prompt_rect(area: Rect) -> Rect {
    centered_rect(50, 40, area)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 36;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 40)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 60, 40)), LayoutTier::Medium);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 40, 40)), LayoutTier::Narrow);
    }

    #[test]
    fn narrow_or_short_terminals_drop_the_progress_bar() {
        let layout = PracticeLayout::new(Rect::new(0, 0, 45, 30));
        assert!(layout.progress.is_none());

        let layout = PracticeLayout::new(Rect::new(0, 0, 100, 15));
        assert!(layout.progress.is_none());

        let layout = PracticeLayout::new(Rect::new(0, 0, 100, 30));
        assert!(layout.progress.is_some());
    }

    #[test]
    fn speaker_zone_sits_inside_the_word_bar() {
        let layout = PracticeLayout::new(Rect::new(0, 0, 100, 30));
        let zone = layout.speaker_zone();

        assert_eq!(zone.y, layout.word_bar.y);
        assert!(zone.width <= layout.word_bar.width);
        assert_eq!(zone.height, layout.word_bar.height);
    }

    #[test]
    fn tile_rects_returns_one_rect_per_tile() {
        let rects = tile_rects(Rect::new(0, 4, 80, 12), 5);

        assert_eq!(rects.len(), 5);
        for rect in &rects {
            assert_eq!(rect.width, TILE_WIDTH);
            assert_eq!(rect.height, TILE_HEIGHT);
        }
    }

    #[test]
    fn tile_rects_never_overlap() {
        let rects = tile_rects(Rect::new(0, 0, 40, 20), 9);

        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(a.intersection(*b).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn tile_rects_stay_inside_the_area() {
        let area = Rect::new(3, 2, 33, 14);
        for rect in tile_rects(area, 8) {
            assert!(rect.x >= area.x);
            assert!(rect.y >= area.y);
            assert!(rect.x + rect.width <= area.x + area.width);
            assert!(rect.y + rect.height <= area.y + area.height);
        }
    }

    #[test]
    fn tile_rects_wrap_into_rows() {
        // 13 cols fit two 5-wide tiles plus gap per row
        let rects = tile_rects(Rect::new(0, 0, 13, 20), 4);

        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0].y, rects[1].y);
        assert!(rects[2].y > rects[0].y);
    }

    #[test]
    fn tile_rects_drop_rows_that_do_not_fit() {
        // Room for exactly one row
        let rects = tile_rects(Rect::new(0, 0, 13, 3), 4);

        assert_eq!(rects.len(), 2);
    }

    #[test]
    fn tile_rects_on_a_tiny_area_are_empty() {
        assert!(tile_rects(Rect::new(0, 0, 4, 2), 3).is_empty());
        assert!(tile_rects(Rect::new(0, 0, 80, 20), 0).is_empty());
    }

    #[test]
    fn prompt_rect_is_contained_and_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = prompt_rect(area);

        assert!(popup.x >= area.x && popup.y >= area.y);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_rect(50, 40, area);

        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
