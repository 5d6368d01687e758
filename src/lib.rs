pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dates;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod model;
pub mod router;
pub mod storage;
pub mod tasks;
pub mod ui;

pub use calendar::CalendarEngine;
pub use dates::DisplayCursor;
pub use router::{Action, Dashboard, EditState, StateDelta};
pub use tasks::{TaskHit, TaskListEngine, TaskZone};
