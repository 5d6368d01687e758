//! Pointer routing and the modal edit state for the dashboard.
//!
//! [`Dashboard`] owns both engines and their stores. The front-end asks it
//! for geometry, feeds it widget-local pointer events, and redraws whenever
//! the returned [`StateDelta`] says so. Every mutation is written back to its
//! store before the call returns.

use crate::calendar::{CalendarEngine, GridLayout};
use crate::dates::DisplayCursor;
use crate::geometry::{Metrics, Rect};
use crate::input::TextInput;
use crate::storage::{NoteStore, StoreLocation, TaskStore};
use crate::tasks::{TaskLayout, TaskListEngine, TaskZone};
use anyhow::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    EditingNote { date: NaiveDate, input: TextInput },
    AddingTask { input: TextInput },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NavigateMonth(i32),
    OpenNote(NaiveDate),
    OpenAddTask,
    ToggleTask(usize),
    DeleteTask(usize),
    BeginDrag,
    /// Pointer input while a popup is open.
    Suppressed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDelta {
    pub redraw: bool,
    /// Widget height changed.
    pub resized: bool,
    pub begin_drag: bool,
    /// A store was rewritten.
    pub persisted: bool,
    /// A store rewrite failed; state in memory is still updated.
    pub save_error: Option<String>,
}

impl StateDelta {
    fn redraw() -> Self {
        StateDelta {
            redraw: true,
            ..StateDelta::default()
        }
    }

    fn mutation(resized: bool, save_error: Option<String>) -> Self {
        StateDelta {
            redraw: true,
            resized,
            begin_drag: false,
            persisted: save_error.is_none(),
            save_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardGeometry {
    pub width: i32,
    pub height: i32,
    pub prev_month: Rect,
    pub next_month: Rect,
    pub calendar: GridLayout,
    pub tasks: TaskLayout,
}

pub struct Dashboard {
    calendar: CalendarEngine,
    tasks: TaskListEngine,
    note_store: NoteStore,
    task_store: TaskStore,
    state: EditState,
    today: NaiveDate,
    hovered_day: Option<u32>,
    /// Last widget-local pointer position, cleared when the pointer leaves.
    pointer: Option<(i32, i32)>,
    width: i32,
    metrics: Metrics,
}

impl Dashboard {
    /// Loads both stores and shows the month containing `today`.
    pub fn open(location: &StoreLocation, width: i32, today: NaiveDate) -> Result<Self> {
        let note_store = location.note_store();
        let task_store = location.task_store();
        let notes = note_store.load()?;
        let tasks = task_store.load()?;
        tracing::info!(notes = notes.len(), tasks = tasks.len(), "dashboard loaded");
        Ok(Dashboard {
            calendar: CalendarEngine::new(DisplayCursor::containing(today), notes),
            tasks: TaskListEngine::new(tasks),
            note_store,
            task_store,
            state: EditState::Idle,
            today,
            hovered_day: None,
            pointer: None,
            width,
            metrics: Metrics::terminal(),
        })
    }

    pub fn calendar(&self) -> &CalendarEngine {
        &self.calendar
    }

    pub fn tasks(&self) -> &TaskListEngine {
        &self.tasks
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn hovered_day(&self) -> Option<u32> {
        self.hovered_day
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.tasks.total_height(&self.metrics)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    pub fn layout(&self) -> DashboardGeometry {
        DashboardGeometry {
            width: self.width,
            height: self.height(),
            prev_month: self.metrics.prev_month_zone(),
            next_month: self.metrics.next_month_zone(self.width),
            calendar: self.calendar.layout(self.width, &self.metrics),
            tasks: self.tasks.layout(self.width, &self.metrics),
        }
    }

    /// Resolves a click to the single action it triggers. First match wins:
    /// month arrows, day cell, add button, checkbox, delete, then drag.
    pub fn hit_test(&self, x: i32, y: i32) -> Action {
        if !self.is_idle() {
            return Action::Suppressed;
        }
        let m = &self.metrics;
        if m.prev_month_zone().contains(x, y) {
            return Action::NavigateMonth(-1);
        }
        if m.next_month_zone(self.width).contains(x, y) {
            return Action::NavigateMonth(1);
        }
        if let Some(day) = self.calendar.hit_test_day(x, y, self.width, m) {
            if let Some(date) = self.calendar.cursor().date(day) {
                return Action::OpenNote(date);
            }
        }
        if m.add_task_zone(self.width).contains(x, y) {
            return Action::OpenAddTask;
        }
        match self.tasks.hit_test_item(x, y, self.width, m) {
            Some(hit) if hit.zone == TaskZone::Checkbox => Action::ToggleTask(hit.index),
            Some(hit) if hit.zone == TaskZone::Delete => Action::DeleteTask(hit.index),
            _ => Action::BeginDrag,
        }
    }

    pub fn apply(&mut self, action: Action) -> StateDelta {
        tracing::debug!(?action, "applying action");
        match action {
            Action::Suppressed => StateDelta::default(),
            Action::BeginDrag => StateDelta {
                begin_drag: true,
                ..StateDelta::default()
            },
            Action::NavigateMonth(direction) => {
                self.calendar.navigate_month(direction);
                self.rehover_day();
                StateDelta::redraw()
            }
            Action::OpenNote(date) => {
                let existing = self
                    .calendar
                    .note_for(date)
                    .map(|n| n.message.as_str())
                    .unwrap_or_default();
                self.state = EditState::EditingNote {
                    date,
                    input: TextInput::new(existing),
                };
                self.clear_hover();
                StateDelta::redraw()
            }
            Action::OpenAddTask => {
                self.state = EditState::AddingTask {
                    input: TextInput::default(),
                };
                self.clear_hover();
                StateDelta::redraw()
            }
            Action::ToggleTask(index) => self.toggle_task(index),
            Action::DeleteTask(index) => self.delete_task(index),
        }
    }

    pub fn click(&mut self, x: i32, y: i32) -> StateDelta {
        let action = self.hit_test(x, y);
        self.apply(action)
    }

    /// Recomputes hover highlights. Returns true when they changed.
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> bool {
        self.pointer = Some((x, y));
        if !self.is_idle() {
            return false;
        }
        let before = (self.hovered_day, self.tasks.hovered());
        self.hovered_day = self.calendar.hit_test_day(x, y, self.width, &self.metrics);
        self.tasks.hover(x, y, self.width, &self.metrics);
        before != (self.hovered_day, self.tasks.hovered())
    }

    pub fn pointer_left(&mut self) -> bool {
        let had_hover = self.hovered_day.is_some() || self.tasks.hovered().is_some();
        self.pointer = None;
        self.clear_hover();
        had_hover
    }

    /// The month under a resting pointer changed; pick the cell it now covers.
    fn rehover_day(&mut self) {
        self.hovered_day = match self.pointer {
            Some((x, y)) if self.is_idle() => {
                self.calendar.hit_test_day(x, y, self.width, &self.metrics)
            }
            _ => None,
        };
    }

    fn clear_hover(&mut self) {
        self.hovered_day = None;
        self.tasks.clear_hover();
    }

    /// Text buffer of the open popup, if any.
    pub fn input_mut(&mut self) -> Option<&mut TextInput> {
        match &mut self.state {
            EditState::Idle => None,
            EditState::EditingNote { input, .. } | EditState::AddingTask { input } => Some(input),
        }
    }

    /// Commits the open popup and returns to idle.
    pub fn confirm(&mut self) -> StateDelta {
        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Idle => StateDelta::default(),
            EditState::EditingNote { date, input } => self.set_note(date, input.value()),
            EditState::AddingTask { input } => {
                let mut delta = self.add_task(input.value());
                delta.redraw = true;
                delta
            }
        }
    }

    pub fn cancel(&mut self) -> StateDelta {
        if self.is_idle() {
            return StateDelta::default();
        }
        self.state = EditState::Idle;
        StateDelta::redraw()
    }

    /// Refreshes the `today` snapshot. Notes and tasks are untouched.
    pub fn tick(&mut self, now: NaiveDate) -> StateDelta {
        self.today = now;
        StateDelta::redraw()
    }

    pub fn show_today(&mut self) -> StateDelta {
        self.calendar.jump_to(DisplayCursor::containing(self.today));
        self.rehover_day();
        StateDelta::redraw()
    }

    pub fn show_month(&mut self, cursor: DisplayCursor) {
        self.calendar.jump_to(cursor);
    }

    /// Writes or (for blank text) removes the note for `date`. Line breaks
    /// fold into spaces since the store holds one record per line.
    pub fn set_note(&mut self, date: NaiveDate, message: &str) -> StateDelta {
        let message = single_line(message);
        self.calendar.set_note(date, &message);
        if message.is_empty() {
            tracing::info!(%date, "note removed");
        } else {
            tracing::info!(%date, "note saved");
        }
        StateDelta::mutation(false, self.save_notes())
    }

    /// Prepends a task. Blank text changes nothing.
    pub fn add_task(&mut self, text: &str) -> StateDelta {
        if !self.tasks.add_task(&single_line(text)) {
            return StateDelta::default();
        }
        tracing::info!(count = self.tasks.len(), "task added");
        StateDelta::mutation(true, self.save_tasks())
    }

    pub fn toggle_task(&mut self, index: usize) -> StateDelta {
        match self.tasks.toggle_complete(index) {
            Some(completed) => {
                tracing::info!(index, completed, "task toggled");
                StateDelta::mutation(false, self.save_tasks())
            }
            None => StateDelta::default(),
        }
    }

    pub fn delete_task(&mut self, index: usize) -> StateDelta {
        match self.tasks.delete_task(index) {
            Some(_) => {
                tracing::info!(index, count = self.tasks.len(), "task deleted");
                StateDelta::mutation(true, self.save_tasks())
            }
            None => StateDelta::default(),
        }
    }

    fn save_notes(&self) -> Option<String> {
        report_save(self.note_store.save(self.calendar.notes()))
    }

    fn save_tasks(&self) -> Option<String> {
        report_save(self.task_store.save(self.tasks.items()))
    }
}

/// Joins the non-blank lines of `text` with single spaces.
fn single_line(text: &str) -> String {
    text.split(|c| c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn report_save(result: Result<()>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(error = %format!("{:#}", err), "store write failed");
            Some(format!("{:#}", err))
        }
    }
}
