use crate::dates::{format_date, parse_date};
use crate::model::{CalendarNote, TaskItem};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

const DELIMITER: char = '|';
const NOTES_FILE: &str = "deskpad-notes.txt";
const TASKS_FILE: &str = "deskpad-tasks.txt";

/// One line of a flat store: `field|field|rest of line`.
pub trait Record: Sized {
    const KIND: &'static str;

    fn to_line(&self) -> String;

    /// `None` for a line that does not describe a record.
    fn from_fields(first: &str, second: &str, rest: &str) -> Option<Self>;
}

impl Record for CalendarNote {
    const KIND: &'static str = "note";

    fn to_line(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            format_date(self.date),
            flag(self.important),
            self.message,
            d = DELIMITER
        )
    }

    fn from_fields(date: &str, important: &str, message: &str) -> Option<Self> {
        Some(CalendarNote {
            date: parse_date(date)?,
            message: message.to_string(),
            important: important == "1",
        })
    }
}

impl Record for TaskItem {
    const KIND: &'static str = "task";

    fn to_line(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            flag(self.completed),
            self.time,
            self.text,
            d = DELIMITER
        )
    }

    fn from_fields(completed: &str, time: &str, text: &str) -> Option<Self> {
        Some(TaskItem {
            text: text.to_string(),
            completed: completed == "1",
            time: time.to_string(),
        })
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

pub fn parse_line<R: Record>(line: &str) -> Option<R> {
    let mut fields = line.splitn(3, DELIMITER);
    let first = fields.next()?;
    let second = fields.next()?;
    let rest = fields.next()?;
    R::from_fields(first, second, rest)
}

/// Parses every line, dropping the ones that are not records.
pub fn parse_records<R: Record>(data: &str) -> Vec<R> {
    let mut records = Vec::new();
    for (number, line) in data.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(record) => records.push(record),
            None => tracing::warn!(kind = R::KIND, line = number + 1, "skipping malformed record"),
        }
    }
    records
}

pub fn serialize_records<R: Record>(records: &[R]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone)]
pub struct FlatStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

pub type NoteStore = FlatStore<CalendarNote>;
pub type TaskStore = FlatStore<TaskItem>;

impl<R: Record> FlatStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<R>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {:?}", self.path));
            }
        };
        let records = parse_records(&data);
        tracing::debug!(kind = R::KIND, count = records.len(), path = %self.path.display(), "loaded store");
        Ok(records)
    }

    /// Rewrites the whole file from `records`.
    pub fn save(&self, records: &[R]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
            }
        }
        fs::write(&self.path, serialize_records(records))
            .with_context(|| format!("writing {:?}", self.path))?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub notes: PathBuf,
    pub tasks: PathBuf,
}

impl StoreLocation {
    pub fn in_dir(dir: &Path) -> Self {
        StoreLocation {
            notes: dir.join(NOTES_FILE),
            tasks: dir.join(TASKS_FILE),
        }
    }

    /// Per-user config directory, or the working directory when no home
    /// directory can be determined.
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        if let Some(dir) = override_dir {
            return StoreLocation::in_dir(dir);
        }
        match user_config_dir() {
            Some(dir) => StoreLocation::in_dir(&dir),
            None => {
                tracing::warn!("no per-user config directory; using working directory");
                StoreLocation {
                    notes: PathBuf::from(NOTES_FILE),
                    tasks: PathBuf::from(TASKS_FILE),
                }
            }
        }
    }

    pub fn note_store(&self) -> NoteStore {
        FlatStore::new(&self.notes)
    }

    pub fn task_store(&self) -> TaskStore {
        FlatStore::new(&self.tasks)
    }
}

pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "deskpad").map(|dirs| dirs.config_dir().to_path_buf())
}
