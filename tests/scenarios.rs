use chrono::NaiveDate;
use deskpad::storage::StoreLocation;
use deskpad::{Action, Dashboard, DisplayCursor, EditState};
use pretty_assertions::assert_eq;
use std::fs;

const WIDTH: i32 = 38;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open(dir: &tempfile::TempDir, today: NaiveDate) -> Dashboard {
    Dashboard::open(&StoreLocation::in_dir(dir.path()), WIDTH, today).unwrap()
}

#[test]
fn arrows_roll_the_month_across_a_year_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));
    let next = dash.layout().next_month;
    dash.click(next.x, next.y);
    assert_eq!(dash.calendar().cursor(), DisplayCursor::new(2024, 3));

    dash.show_month(DisplayCursor::new(2024, 12));
    dash.click(next.x, next.y);
    assert_eq!(dash.calendar().cursor(), DisplayCursor::new(2025, 1));
}

#[test]
fn every_visible_day_round_trips_through_a_click() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));
    for _ in 0..14 {
        let geometry = dash.layout();
        let cursor = geometry.calendar.cursor;
        assert_eq!(geometry.calendar.cells.len() as u32, cursor.days());
        for cell in &geometry.calendar.cells {
            let (x, y) = cell.rect.center();
            assert_eq!(
                dash.hit_test(x, y),
                Action::OpenNote(cursor.date(cell.day).unwrap())
            );
        }
        let next = geometry.next_month;
        dash.click(next.x, next.y);
    }
}

#[test]
fn ten_tasks_show_eight_and_deleting_the_first_pulls_in_the_ninth() {
    let dir = tempfile::tempdir().unwrap();
    let lines: String = (0..10).map(|i| format!("0||task {}\n", i)).collect();
    fs::write(StoreLocation::in_dir(dir.path()).tasks, lines).unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));

    let geometry = dash.layout();
    assert_eq!(dash.tasks().len(), 10);
    assert_eq!(geometry.tasks.rows.len(), 8);
    let last_row = geometry.tasks.rows[7].rect;
    assert_eq!(dash.hit_test(dash.metrics().grid_margin, last_row.y), Action::ToggleTask(7));
    assert_eq!(
        dash.hit_test(dash.metrics().grid_margin, last_row.y + 1),
        Action::BeginDrag
    );

    let first = geometry.tasks.rows[0].rect;
    let trash_x = WIDTH - dash.metrics().delete_inset - dash.metrics().delete_width;
    dash.pointer_moved(trash_x, first.y);
    let delta = dash.click(trash_x, first.y);
    assert!(delta.resized);
    assert_eq!(dash.tasks().items()[7].text, "task 8");
    assert_eq!(dash.tasks().visible_count(), 8);

    let on_disk = fs::read_to_string(StoreLocation::in_dir(dir.path()).tasks).unwrap();
    assert_eq!(on_disk.lines().count(), 9);
    assert!(on_disk.starts_with("0||task 1\n"));
}

#[test]
fn month_arrow_is_inert_while_a_note_is_being_edited() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));
    let (x, y) = dash.layout().calendar.cells[0].rect.center();
    dash.click(x, y);
    assert!(matches!(dash.state(), EditState::EditingNote { .. }));

    let next = dash.layout().next_month;
    assert_eq!(dash.hit_test(next.x, next.y), Action::Suppressed);
    dash.click(next.x, next.y);
    assert_eq!(dash.calendar().cursor(), DisplayCursor::new(2024, 2));
    assert!(matches!(dash.state(), EditState::EditingNote { .. }));
}

#[test]
fn hand_edited_store_with_bad_lines_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let location = StoreLocation::in_dir(dir.path());
    fs::write(
        &location.notes,
        "2024-02-01|0|groceries\nbroken line\n2024-02-02|1|flagged|with pipe\n",
    )
    .unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));
    assert_eq!(dash.calendar().notes().len(), 2);
    let flagged = dash.calendar().note_for(date(2024, 2, 2)).unwrap();
    assert!(flagged.important);
    assert_eq!(flagged.message, "flagged|with pipe");

    // Rewriting drops the malformed line and keeps the flag.
    dash.set_note(date(2024, 2, 3), "new");
    let on_disk = fs::read_to_string(&location.notes).unwrap();
    assert_eq!(
        on_disk,
        "2024-02-01|0|groceries\n2024-02-02|1|flagged|with pipe\n2024-02-03|0|new\n"
    );
}

#[test]
fn note_overwrite_keeps_one_note_per_date_across_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open(&dir, date(2024, 2, 20));
    dash.set_note(date(2024, 2, 14), "first");
    dash.set_note(date(2024, 2, 14), "second");
    let reloaded = open(&dir, date(2024, 2, 20));
    let notes = reloaded.calendar().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "second");
}
