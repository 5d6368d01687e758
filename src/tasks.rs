use crate::geometry::{Metrics, Rect};
use crate::model::{TaskItem, MAX_VISIBLE_TASKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskZone {
    Checkbox,
    Body,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHit {
    pub index: usize,
    pub zone: TaskZone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub index: usize,
    pub rect: Rect,
    pub checkbox: Rect,
    /// Present only on the hovered row.
    pub delete: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLayout {
    pub card: Rect,
    pub add_button: Rect,
    pub rows: Vec<TaskRow>,
}

pub struct TaskListEngine {
    items: Vec<TaskItem>,
    hovered: Option<usize>,
}

impl TaskListEngine {
    pub fn new(items: Vec<TaskItem>) -> Self {
        TaskListEngine {
            items,
            hovered: None,
        }
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.items.len().min(MAX_VISIBLE_TASKS)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Prepends a new open task. Returns false (and changes nothing) for
    /// empty text.
    pub fn add_task(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.items.insert(0, TaskItem::new(text));
        self.clamp_hover();
        true
    }

    pub fn toggle_complete(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        item.completed = !item.completed;
        Some(item.completed)
    }

    pub fn delete_task(&mut self, index: usize) -> Option<TaskItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.clamp_hover();
        Some(removed)
    }

    fn clamp_hover(&mut self) {
        if self.hovered.is_some_and(|i| i >= self.visible_count()) {
            self.hovered = None;
        }
    }

    pub fn total_height(&self, metrics: &Metrics) -> i32 {
        metrics.total_height(self.visible_count())
    }

    pub fn layout(&self, container_width: i32, metrics: &Metrics) -> TaskLayout {
        let rows = (0..self.visible_count())
            .map(|index| {
                let rect = row_rect(index, container_width, metrics);
                TaskRow {
                    index,
                    rect,
                    checkbox: checkbox_rect(rect, metrics),
                    delete: (self.hovered == Some(index))
                        .then(|| delete_rect(rect, container_width, metrics)),
                }
            })
            .collect();
        TaskLayout {
            card: Rect::new(
                0,
                metrics.task_top(),
                container_width,
                metrics.task_card_height(self.visible_count()),
            ),
            add_button: metrics.add_task_zone(container_width),
            rows,
        }
    }

    fn row_at(&self, y: i32, metrics: &Metrics) -> Option<usize> {
        let top = metrics.task_rows_top();
        if y < top {
            return None;
        }
        let index = ((y - top) / metrics.item_height) as usize;
        (index < self.visible_count()).then_some(index)
    }

    pub fn hit_test_item(&self, x: i32, y: i32, container_width: i32, metrics: &Metrics) -> Option<TaskHit> {
        if x < 0 || x >= container_width {
            return None;
        }
        let index = self.row_at(y, metrics)?;
        let rect = row_rect(index, container_width, metrics);
        let zone = if checkbox_rect(rect, metrics).contains(x, y) {
            TaskZone::Checkbox
        } else if self.hovered == Some(index)
            && delete_rect(rect, container_width, metrics).contains(x, y)
        {
            TaskZone::Delete
        } else {
            TaskZone::Body
        };
        Some(TaskHit { index, zone })
    }

    /// Recomputes the hovered row from a pointer position.
    pub fn hover(&mut self, x: i32, y: i32, container_width: i32, metrics: &Metrics) -> Option<usize> {
        self.hovered = if x >= 0 && x < container_width {
            self.row_at(y, metrics)
        } else {
            None
        };
        self.hovered
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }
}

fn row_rect(index: usize, container_width: i32, metrics: &Metrics) -> Rect {
    Rect::new(
        0,
        metrics.task_rows_top() + index as i32 * metrics.item_height,
        container_width,
        metrics.item_height,
    )
}

fn checkbox_rect(row: Rect, metrics: &Metrics) -> Rect {
    Rect::new(metrics.grid_margin, row.y, metrics.checkbox_width, row.height)
}

fn delete_rect(row: Rect, container_width: i32, metrics: &Metrics) -> Rect {
    Rect::new(
        container_width - metrics.delete_inset - metrics.delete_width,
        row.y,
        metrics.delete_width,
        row.height,
    )
}
