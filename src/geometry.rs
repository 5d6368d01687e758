//! Widget-local layout constants and the rectangle type shared by the
//! layout and hit-test paths.
//!
//! All coordinates are integer units relative to the widget's top-left
//! corner. The terminal front-end treats one unit as one character cell.

/// Half-open rectangle: contains `x` in `[x, x + width)` and `y` in
/// `[y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub calendar_height: i32,
    pub card_spacing: i32,
    pub header_height: i32,
    pub nav_zone_width: i32,
    pub grid_margin: i32,
    pub weekday_row: i32,
    pub grid_top: i32,
    pub cell_height: i32,
    pub task_header_height: i32,
    pub add_zone_width: i32,
    pub item_height: i32,
    pub checkbox_width: i32,
    pub delete_width: i32,
    pub delete_inset: i32,
    pub base_task_height: i32,
}

impl Metrics {
    /// Sizes for a character-cell grid.
    pub const fn terminal() -> Self {
        Metrics {
            calendar_height: 10,
            card_spacing: 1,
            header_height: 2,
            nav_zone_width: 5,
            grid_margin: 2,
            weekday_row: 2,
            grid_top: 3,
            cell_height: 1,
            task_header_height: 2,
            add_zone_width: 5,
            item_height: 1,
            checkbox_width: 4,
            delete_width: 3,
            delete_inset: 1,
            base_task_height: 4,
        }
    }

    pub fn task_top(&self) -> i32 {
        self.calendar_height + self.card_spacing
    }

    pub fn task_rows_top(&self) -> i32 {
        self.task_top() + self.task_header_height
    }

    pub fn cell_width(&self, container_width: i32) -> i32 {
        ((container_width - 2 * self.grid_margin) / 7).max(1)
    }

    pub fn prev_month_zone(&self) -> Rect {
        Rect::new(0, 0, self.nav_zone_width, self.header_height)
    }

    pub fn next_month_zone(&self, container_width: i32) -> Rect {
        Rect::new(
            container_width - self.nav_zone_width,
            0,
            self.nav_zone_width,
            self.header_height,
        )
    }

    pub fn add_task_zone(&self, container_width: i32) -> Rect {
        Rect::new(
            container_width - self.add_zone_width,
            self.task_top(),
            self.add_zone_width,
            self.task_header_height,
        )
    }

    pub fn task_card_height(&self, visible_rows: usize) -> i32 {
        self.base_task_height + visible_rows as i32 * self.item_height
    }

    pub fn total_height(&self, visible_rows: usize) -> i32 {
        self.task_top() + self.task_card_height(visible_rows)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics::terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(2, 3, 4, 1);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 4));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn total_height_grows_with_visible_rows() {
        let m = Metrics::terminal();
        assert_eq!(m.total_height(0), 15);
        assert_eq!(m.total_height(8), 23);
    }

    #[test]
    fn navigation_zones_sit_at_header_edges() {
        let m = Metrics::terminal();
        assert!(m.prev_month_zone().contains(0, 0));
        assert!(m.next_month_zone(38).contains(37, 1));
        assert!(!m.next_month_zone(38).contains(37, 2));
    }
}
