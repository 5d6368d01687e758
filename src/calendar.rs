use crate::dates::DisplayCursor;
use crate::geometry::{Metrics, Rect};
use crate::model::CalendarNote;
use chrono::NaiveDate;

const GRID_COLUMNS: i32 = 7;
const GRID_ROWS: i32 = 6;

pub struct CalendarEngine {
    cursor: DisplayCursor,
    notes: Vec<CalendarNote>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub col: i32,
    pub row: i32,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub cursor: DisplayCursor,
    pub cell_width: i32,
    pub first_weekday: u32,
    pub days: u32,
    /// The full 7x6 region; clicks outside it never resolve to a day.
    pub region: Rect,
    pub cells: Vec<DayCell>,
}

impl CalendarEngine {
    pub fn new(cursor: DisplayCursor, notes: Vec<CalendarNote>) -> Self {
        let mut engine = CalendarEngine {
            cursor,
            notes: Vec::with_capacity(notes.len()),
        };
        // Collapse duplicate dates from hand-edited files; the last one wins.
        for note in notes {
            engine.put_note(note);
        }
        engine
    }

    pub fn cursor(&self) -> DisplayCursor {
        self.cursor
    }

    pub fn navigate_month(&mut self, direction: i32) -> DisplayCursor {
        self.cursor = self.cursor.step(direction);
        tracing::debug!(year = self.cursor.year, month = self.cursor.month, "navigated month");
        self.cursor
    }

    pub fn jump_to(&mut self, cursor: DisplayCursor) {
        self.cursor = cursor;
    }

    pub fn notes(&self) -> &[CalendarNote] {
        &self.notes
    }

    pub fn note_for(&self, date: NaiveDate) -> Option<&CalendarNote> {
        self.notes.iter().find(|n| n.date == date)
    }

    pub fn has_note(&self, date: NaiveDate) -> bool {
        self.note_for(date).is_some()
    }

    /// Writes the note for `date`, replacing any existing one. An empty
    /// message removes the note instead.
    pub fn set_note(&mut self, date: NaiveDate, message: &str) {
        if message.is_empty() {
            self.remove_note(date);
        } else {
            self.put_note(CalendarNote::new(date, message));
        }
    }

    pub fn remove_note(&mut self, date: NaiveDate) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.date != date);
        self.notes.len() != before
    }

    fn put_note(&mut self, note: CalendarNote) {
        self.notes.retain(|n| n.date != note.date);
        self.notes.push(note);
    }

    pub fn layout(&self, container_width: i32, metrics: &Metrics) -> GridLayout {
        grid_layout(self.cursor, container_width, metrics)
    }

    pub fn hit_test_day(&self, x: i32, y: i32, container_width: i32, metrics: &Metrics) -> Option<u32> {
        hit_test_day(self.cursor, x, y, container_width, metrics)
    }
}

fn grid_region(container_width: i32, metrics: &Metrics) -> (Rect, i32) {
    let cell_width = metrics.cell_width(container_width);
    let region = Rect::new(
        metrics.grid_margin,
        metrics.grid_top,
        GRID_COLUMNS * cell_width,
        GRID_ROWS * metrics.cell_height,
    );
    (region, cell_width)
}

pub fn grid_layout(cursor: DisplayCursor, container_width: i32, metrics: &Metrics) -> GridLayout {
    let (region, cell_width) = grid_region(container_width, metrics);
    let first_weekday = cursor.first_weekday();
    let days = cursor.days();
    let cells = (1..=days)
        .map(|day| {
            let pos = (day - 1 + first_weekday) as i32;
            let col = pos % GRID_COLUMNS;
            let row = pos / GRID_COLUMNS;
            DayCell {
                day,
                col,
                row,
                rect: Rect::new(
                    region.x + col * cell_width,
                    region.y + row * metrics.cell_height,
                    cell_width,
                    metrics.cell_height,
                ),
            }
        })
        .collect();
    GridLayout {
        cursor,
        cell_width,
        first_weekday,
        days,
        region,
        cells,
    }
}

/// Inverse of [`grid_layout`]: the day whose cell contains the point.
pub fn hit_test_day(
    cursor: DisplayCursor,
    x: i32,
    y: i32,
    container_width: i32,
    metrics: &Metrics,
) -> Option<u32> {
    let (region, cell_width) = grid_region(container_width, metrics);
    if !region.contains(x, y) {
        return None;
    }
    let col = (x - region.x) / cell_width;
    let row = (y - region.y) / metrics.cell_height;
    let pos = row * GRID_COLUMNS + col;
    let day = pos - cursor.first_weekday() as i32 + 1;
    if day < 1 || day > cursor.days() as i32 {
        return None;
    }
    Some(day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_date;
    use pretty_assertions::assert_eq;

    const WIDTH: i32 = 38;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn layout_places_first_day_on_its_weekday() {
        let m = Metrics::terminal();
        // February 2024 starts on a Thursday.
        let layout = grid_layout(DisplayCursor::new(2024, 2), WIDTH, &m);
        assert_eq!(layout.days, 29);
        assert_eq!(layout.cells.len(), 29);
        assert_eq!((layout.cells[0].col, layout.cells[0].row), (4, 0));
        assert_eq!((layout.cells[28].col, layout.cells[28].row), (4, 4));
        assert_eq!(layout.cell_width, 4);
    }

    #[test]
    fn six_week_month_uses_the_last_row() {
        let m = Metrics::terminal();
        // March 2024 starts on a Friday and has 31 days.
        let layout = grid_layout(DisplayCursor::new(2024, 3), WIDTH, &m);
        let last = layout.cells.last().unwrap();
        assert_eq!(last.day, 31);
        assert_eq!(last.row, 5);
    }

    #[test]
    fn every_cell_center_hits_its_own_day() {
        let m = Metrics::terminal();
        for (year, month) in [(2023, 1), (2024, 2), (2024, 3), (2024, 9), (2025, 6)] {
            let cursor = DisplayCursor::new(year, month);
            for width in [30, 38, 52] {
                for cell in grid_layout(cursor, width, &m).cells {
                    let (cx, cy) = cell.rect.center();
                    assert_eq!(hit_test_day(cursor, cx, cy, width, &m), Some(cell.day));
                    assert_eq!(
                        hit_test_day(cursor, cell.rect.x, cell.rect.y, width, &m),
                        Some(cell.day)
                    );
                }
            }
        }
    }

    #[test]
    fn blank_cells_and_outside_points_miss() {
        let m = Metrics::terminal();
        let cursor = DisplayCursor::new(2024, 2);
        // Sunday slot of the first row precedes day 1.
        assert_eq!(hit_test_day(cursor, m.grid_margin, m.grid_top, WIDTH, &m), None);
        // Past day 29 in the fifth row.
        assert_eq!(hit_test_day(cursor, m.grid_margin + 6 * 4, m.grid_top + 4, WIDTH, &m), None);
        // Header and right margin.
        assert_eq!(hit_test_day(cursor, 10, 0, WIDTH, &m), None);
        assert_eq!(hit_test_day(cursor, WIDTH - 1, m.grid_top + 2, WIDTH, &m), None);
        assert_eq!(hit_test_day(cursor, 10, m.grid_top + 6, WIDTH, &m), None);
    }

    #[test]
    fn navigation_updates_the_cursor() {
        let mut cal = CalendarEngine::new(DisplayCursor::new(2024, 2), Vec::new());
        assert_eq!(cal.navigate_month(1), DisplayCursor::new(2024, 3));
        cal.jump_to(DisplayCursor::new(2024, 12));
        assert_eq!(cal.navigate_month(1), DisplayCursor::new(2025, 1));
        assert_eq!(cal.navigate_month(-1), DisplayCursor::new(2024, 12));
    }

    #[test]
    fn second_note_for_a_date_replaces_the_first() {
        let mut cal = CalendarEngine::new(DisplayCursor::new(2024, 5), Vec::new());
        let day = date("2024-05-10");
        cal.set_note(day, "dentist");
        cal.set_note(date("2024-05-11"), "gym");
        cal.set_note(day, "dentist at 3pm");
        let for_day: Vec<_> = cal.notes().iter().filter(|n| n.date == day).collect();
        assert_eq!(for_day.len(), 1);
        assert_eq!(for_day[0].message, "dentist at 3pm");
        assert_eq!(cal.notes().len(), 2);
    }

    #[test]
    fn empty_message_removes_the_note() {
        let mut cal = CalendarEngine::new(DisplayCursor::new(2024, 5), Vec::new());
        let day = date("2024-05-10");
        cal.set_note(day, "dentist");
        cal.set_note(day, "");
        assert!(!cal.has_note(day));
        assert!(cal.note_for(day).is_none());
    }

    #[test]
    fn duplicate_dates_on_load_keep_the_last() {
        let day = date("2024-05-10");
        let cal = CalendarEngine::new(
            DisplayCursor::new(2024, 5),
            vec![CalendarNote::new(day, "old"), CalendarNote::new(day, "new")],
        );
        assert_eq!(cal.notes().len(), 1);
        assert_eq!(cal.note_for(day).unwrap().message, "new");
    }
}
