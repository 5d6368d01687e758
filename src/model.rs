use chrono::NaiveDate;

/// Most task rows the widget lays out; the rest stay stored but off-screen.
pub const MAX_VISIBLE_TASKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNote {
    pub date: NaiveDate,
    pub message: String,
    /// Round-tripped through the store, never consulted.
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub text: String,
    pub completed: bool,
    /// Free-text label shown next to the task. Never parsed.
    pub time: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("task index {index} out of range ({count} tasks)")]
    TaskIndexOutOfRange { index: usize, count: usize },
    #[error("invalid date (use YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("task text is empty")]
    EmptyText,
}

impl CalendarNote {
    pub fn new(date: NaiveDate, message: impl Into<String>) -> Self {
        CalendarNote {
            date,
            message: message.into(),
            important: false,
        }
    }
}

impl TaskItem {
    pub fn new(text: impl Into<String>) -> Self {
        TaskItem {
            text: text.into(),
            completed: false,
            time: String::new(),
        }
    }
}
