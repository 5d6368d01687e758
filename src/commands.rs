use crate::calendar::grid_layout;
use crate::config::Config;
use crate::dates::{format_date, parse_date, DisplayCursor};
use crate::geometry::Metrics;
use crate::model::DashboardError;
use crate::router::{Dashboard, StateDelta};
use crate::ui;
use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Settings shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub data_dir: Option<PathBuf>,
}

impl Context {
    fn open(&self) -> Result<Dashboard> {
        let location = self.config.store_location(self.data_dir.as_deref());
        Dashboard::open(
            &location,
            i32::from(self.config.width),
            Local::now().date_naive(),
        )
    }
}

pub fn tui(ctx: &Context) -> Result<()> {
    let dashboard = ctx.open()?;
    ui::run(dashboard, &ctx.config)
}

pub fn month(ctx: &Context, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let mut dashboard = ctx.open()?;
    if let Some(month) = month {
        let year = year.unwrap_or_else(|| dashboard.today().year());
        let cursor = DisplayCursor::checked(year, month)
            .ok_or_else(|| DashboardError::InvalidDate(format!("{}-{:02}", year, month)))?;
        dashboard.show_month(cursor);
    }
    print!("{}", render_month(&dashboard));
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let dashboard = ctx.open()?;
    let mut notes: Vec<_> = dashboard.calendar().notes().iter().collect();
    notes.sort_by_key(|n| n.date);
    println!("Notes");
    if notes.is_empty() {
        println!("  (none)");
    }
    for note in notes {
        println!("  {}  {}", format_date(note.date), note.message);
    }
    println!();
    println!("Tasks");
    if dashboard.tasks().is_empty() {
        println!("  (none)");
    }
    for (idx, task) in dashboard.tasks().items().iter().enumerate() {
        let check = if task.completed { "x" } else { " " };
        if task.time.is_empty() {
            println!("  {:>2}. [{}] {}", idx, check, task.text);
        } else {
            println!("  {:>2}. [{}] {}  ({})", idx, check, task.text, task.time);
        }
    }
    Ok(())
}

pub fn note(ctx: &Context, date: String, message: Option<String>) -> Result<()> {
    let date = parse_date(&date).ok_or_else(|| DashboardError::InvalidDate(date.clone()))?;
    let mut dashboard = ctx.open()?;
    let message = message.unwrap_or_default();
    check_saved(dashboard.set_note(date, &message))?;
    if message.trim().is_empty() {
        println!("Removed note for {}", format_date(date));
    } else {
        println!("Saved note for {}", format_date(date));
    }
    Ok(())
}

pub fn add(ctx: &Context, text: String) -> Result<()> {
    if text.trim().is_empty() {
        return Err(DashboardError::EmptyText.into());
    }
    let mut dashboard = ctx.open()?;
    check_saved(dashboard.add_task(&text))?;
    println!("Added task: {}", dashboard.tasks().items()[0].text);
    Ok(())
}

pub fn toggle(ctx: &Context, index: usize) -> Result<()> {
    let mut dashboard = ctx.open()?;
    ensure_index(&dashboard, index)?;
    check_saved(dashboard.toggle_task(index))?;
    let task = &dashboard.tasks().items()[index];
    let state = if task.completed { "done" } else { "open" };
    println!("Marked task {} {}: {}", index, state, task.text);
    Ok(())
}

pub fn remove(ctx: &Context, index: usize) -> Result<()> {
    let mut dashboard = ctx.open()?;
    ensure_index(&dashboard, index)?;
    let text = dashboard.tasks().items()[index].text.clone();
    check_saved(dashboard.delete_task(index))?;
    println!("Removed task {}: {}", index, text);
    Ok(())
}

fn ensure_index(dashboard: &Dashboard, index: usize) -> Result<(), DashboardError> {
    let count = dashboard.tasks().len();
    if index >= count {
        return Err(DashboardError::TaskIndexOutOfRange { index, count });
    }
    Ok(())
}

fn check_saved(delta: StateDelta) -> Result<()> {
    match delta.save_error {
        Some(err) => Err(anyhow!(err)),
        None => Ok(()),
    }
}

/// Plain-text month grid; days with a note get a `*`, today is bracketed.
pub fn render_month(dashboard: &Dashboard) -> String {
    let cursor = dashboard.calendar().cursor();
    let layout = grid_layout(cursor, 7 * 5, &Metrics::terminal());
    let mut out = format!("{:^35}\n", cursor.title());
    for name in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
        out.push_str(&format!(" {:^3} ", name));
    }
    out.push('\n');
    let mut rows = vec![vec!["     ".to_string(); 7]; 6];
    for cell in &layout.cells {
        let date = cursor.date(cell.day);
        let marked = date.is_some_and(|d| dashboard.calendar().has_note(d));
        let today = date == Some(dashboard.today());
        let label = match (today, marked) {
            (true, true) => format!("[{:>2}]*", cell.day),
            (true, false) => format!("[{:>2}] ", cell.day),
            (false, true) => format!(" {:>2}* ", cell.day),
            (false, false) => format!(" {:>2}  ", cell.day),
        };
        rows[cell.row as usize][cell.col as usize] = label;
    }
    let used_rows = layout.cells.last().map(|c| c.row as usize + 1).unwrap_or(0);
    for row in rows.iter().take(used_rows) {
        out.push_str(row.concat().trim_end());
        out.push('\n');
    }
    out
}
