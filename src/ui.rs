use crate::config::Config;
use crate::dates::format_date;
use crate::geometry;
use crate::router::{Action, Dashboard, EditState, StateDelta};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

const CARD_BG: Color = Color::Rgb(31, 31, 36);
const ACCENT: Color = Color::Rgb(255, 149, 0);

pub fn run(dashboard: Dashboard, config: &Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(dashboard, config);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    dashboard: Dashboard,
    origin: (u16, u16),
    /// Pointer offset inside the widget while it is being dragged.
    grab: Option<(i32, i32)>,
    tick: Duration,
    last_tick: Instant,
    last_save: Option<Instant>,
    status: String,
    dirty: bool,
}

impl App {
    fn new(dashboard: Dashboard, config: &Config) -> Self {
        App {
            dashboard,
            origin: (config.origin_x, config.origin_y),
            grab: None,
            tick: Duration::from_millis(config.tick_ms),
            last_tick: Instant::now(),
            last_save: None,
            status: "Click a day to add a note, + to add a task, drag to move".into(),
            dirty: true,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            if self.dirty {
                terminal.draw(|f| self.draw(f))?;
                self.dirty = false;
            }
            let timeout = self.tick.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? && self.handle_event(event::read()?) {
                break;
            }
            if self.last_tick.elapsed() >= self.tick {
                let delta = self.dashboard.tick(Local::now().date_naive());
                self.dirty |= delta.redraw;
                self.last_tick = Instant::now();
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Focus reports stand in for a pointer-leave when the terminal loses focus.
            Event::FocusLost => self.dirty |= self.dashboard.pointer_left(),
            Event::Resize(_, _) => self.dirty = true,
            _ => {}
        }
        false
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if self.dashboard.is_idle() {
            self.handle_idle_key(key)
        } else {
            self.handle_popup_key(key);
            false
        }
    }

    fn handle_idle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => self.route(Action::NavigateMonth(-1)),
            KeyCode::Right | KeyCode::Char('l') => self.route(Action::NavigateMonth(1)),
            KeyCode::Char('a') | KeyCode::Char('+') => self.route(Action::OpenAddTask),
            KeyCode::Char('t') => {
                let delta = self.dashboard.show_today();
                self.status = "Back to the current month".into();
                self.absorb(delta);
            }
            _ => {}
        }
        false
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                let delta = self.dashboard.cancel();
                self.status = "Canceled".into();
                self.absorb(delta);
                return;
            }
            KeyCode::Enter => {
                let message = match self.dashboard.state() {
                    EditState::EditingNote { date, input } if input.value().trim().is_empty() => {
                        format!("Removed note for {}", format_date(*date))
                    }
                    EditState::EditingNote { date, .. } => {
                        format!("Saved note for {}", format_date(*date))
                    }
                    EditState::AddingTask { input } if input.value().trim().is_empty() => {
                        "Nothing to add".to_string()
                    }
                    EditState::AddingTask { .. } => "Added task".to_string(),
                    EditState::Idle => String::new(),
                };
                let delta = self.dashboard.confirm();
                self.status = message;
                self.absorb(delta);
                return;
            }
            _ => {}
        }
        if let Some(input) = self.dashboard.input_mut() {
            match key.code {
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.home(),
                KeyCode::End => input.end(),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        input.insert_char(c);
                    }
                }
                _ => return,
            }
            self.dirty = true;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = to_local(self.origin, mouse.column, mouse.row);
        let inside = self.widget_contains(x, y);
        match mouse.kind {
            MouseEventKind::Moved => {
                self.dirty |= if inside {
                    self.dashboard.pointer_moved(x, y)
                } else {
                    self.dashboard.pointer_left()
                };
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let action = self.dashboard.hit_test(x, y);
                if action == Action::BeginDrag {
                    self.grab = Some((x, y));
                }
                self.route(action);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(grab) = self.grab {
                    self.origin = dragged_origin(grab, mouse.column, mouse.row);
                    self.dirty = true;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.grab = None,
            _ => {}
        }
    }

    fn widget_contains(&self, x: i32, y: i32) -> bool {
        geometry::Rect::new(0, 0, self.dashboard.width(), self.dashboard.height()).contains(x, y)
    }

    fn route(&mut self, action: Action) {
        let message = match action {
            Action::NavigateMonth(_) | Action::BeginDrag | Action::Suppressed => None,
            Action::OpenNote(date) => Some(format!("Editing note for {}", format_date(date))),
            Action::OpenAddTask => Some("New task (Enter to add, Esc to cancel)".to_string()),
            Action::ToggleTask(index) => Some(format!("Toggled task {}", index)),
            Action::DeleteTask(index) => Some(format!("Deleted task {}", index)),
        };
        let delta = self.dashboard.apply(action);
        if let Some(message) = message {
            self.status = message;
        }
        self.absorb(delta);
    }

    fn absorb(&mut self, delta: StateDelta) {
        self.dirty |= delta.redraw || delta.resized;
        if let Some(err) = delta.save_error {
            self.status = format!("Save failed: {}", err);
            self.dirty = true;
        } else if delta.persisted {
            self.last_save = Some(Instant::now());
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let screen = f.size();
        f.render_widget(Block::default().style(Style::default().bg(Color::Reset)), screen);
        self.draw_calendar(f, screen);
        self.draw_tasks(f, screen);
        self.draw_footer(f, screen);
        match self.dashboard.state() {
            EditState::EditingNote { date, input } => {
                let label = date.format("Note for %B %-d, %Y").to_string();
                draw_popup(f, "Note", &label, &input.with_caret(), "Enter to save • Esc to cancel");
            }
            EditState::AddingTask { input } => {
                draw_popup(
                    f,
                    "Add New Task",
                    "Task description",
                    &input.with_caret(),
                    "Enter to add • Esc to cancel",
                );
            }
            EditState::Idle => {}
        }
    }

    /// Widget-local rectangle to screen cells, clipped to `screen`.
    fn place(&self, screen: Rect, r: geometry::Rect) -> Option<Rect> {
        let x = i32::from(self.origin.0) + r.x;
        let y = i32::from(self.origin.1) + r.y;
        if r.width <= 0 || r.height <= 0 || x < 0 || y < 0 {
            return None;
        }
        let rect = Rect::new(x as u16, y as u16, r.width as u16, r.height as u16);
        let clipped = rect.intersection(screen);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    fn put(&self, f: &mut ratatui::Frame<'_>, screen: Rect, r: geometry::Rect, line: Line<'_>) {
        if let Some(area) = self.place(screen, r) {
            f.render_widget(Paragraph::new(line), area);
        }
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, screen: Rect) {
        let geo = self.dashboard.layout();
        let m = *self.dashboard.metrics();
        let width = geo.width;
        let card = geometry::Rect::new(0, 0, width, m.calendar_height);
        if let Some(area) = self.place(screen, card) {
            f.render_widget(Block::default().style(Style::default().bg(CARD_BG)), area);
        }

        let arrow = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        self.put(f, screen, geo.prev_month, Line::from(Span::styled("  ‹", arrow)));
        self.put(f, screen, geo.next_month, Line::from(Span::styled("›  ", arrow)).alignment(Alignment::Right));
        let title_area = geometry::Rect::new(
            geo.prev_month.right(),
            0,
            geo.next_month.x - geo.prev_month.right(),
            1,
        );
        self.put(
            f,
            screen,
            title_area,
            Line::from(Span::styled(
                geo.calendar.cursor.title(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );

        let cal = &geo.calendar;
        for (col, name) in ["S", "M", "T", "W", "T", "F", "S"].iter().enumerate() {
            let r = geometry::Rect::new(cal.region.x + col as i32 * cal.cell_width, m.weekday_row, cal.cell_width, 1);
            self.put(
                f,
                screen,
                r,
                Line::from(Span::styled(*name, Style::default().fg(Color::Gray))).alignment(Alignment::Center),
            );
        }

        let today = self.dashboard.today();
        for cell in &cal.cells {
            let date = cal.cursor.date(cell.day);
            let is_today = date == Some(today);
            let has_note = date.is_some_and(|d| self.dashboard.calendar().has_note(d));
            let hovered = self.dashboard.hovered_day() == Some(cell.day);
            let mut style = Style::default().fg(Color::White);
            if hovered && !is_today {
                style = style.bg(Color::DarkGray);
            }
            if is_today {
                style = style.bg(ACCENT).fg(Color::Black).add_modifier(Modifier::BOLD);
            } else if has_note {
                style = style.fg(Color::LightYellow).add_modifier(Modifier::UNDERLINED);
            }
            self.put(
                f,
                screen,
                cell.rect,
                Line::from(Span::styled(format!("{:>2}", cell.day), style)).alignment(Alignment::Center),
            );
        }
    }

    fn draw_tasks(&self, f: &mut ratatui::Frame<'_>, screen: Rect) {
        let geo = self.dashboard.layout();
        let m = *self.dashboard.metrics();
        let width = geo.width;
        let layout = &geo.tasks;
        if let Some(area) = self.place(screen, layout.card) {
            f.render_widget(Block::default().style(Style::default().bg(CARD_BG)), area);
        }

        let tasks = self.dashboard.tasks();
        let open = tasks.items().iter().filter(|t| !t.completed).count();
        let header = geometry::Rect::new(m.grid_margin, m.task_top(), width - m.grid_margin, 1);
        self.put(
            f,
            screen,
            header,
            Line::from(vec![
                Span::styled("Tasks", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {} open", open), Style::default().fg(Color::Gray)),
            ]),
        );
        self.put(
            f,
            screen,
            layout.add_button,
            Line::from(Span::styled("+ ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Right),
        );

        if tasks.is_empty() {
            let r = geometry::Rect::new(0, m.task_rows_top(), width, 1);
            self.put(
                f,
                screen,
                r,
                Line::from(Span::styled("No tasks yet", Style::default().fg(Color::DarkGray)))
                    .alignment(Alignment::Center),
            );
            return;
        }

        for row in &layout.rows {
            let task = &tasks.items()[row.index];
            let hovered = tasks.hovered() == Some(row.index);
            if hovered {
                if let Some(area) = self.place(screen, row.rect) {
                    f.render_widget(Block::default().style(Style::default().bg(Color::Rgb(50, 50, 56))), area);
                }
            }
            let check = if task.completed {
                Span::styled("[✓]", Style::default().fg(ACCENT))
            } else {
                Span::styled("[ ]", Style::default().fg(Color::Gray))
            };
            self.put(f, screen, row.checkbox, Line::from(check));

            let text_x = row.checkbox.right();
            let text_end = row.delete.map(|d| d.x).unwrap_or(width - m.delete_inset - m.delete_width);
            let time_width = if task.time.is_empty() {
                0
            } else {
                task.time.chars().count() as i32 + 1
            };
            let text_width = (text_end - text_x - time_width).max(0);
            let mut text_style = Style::default().fg(Color::White);
            if task.completed {
                text_style = text_style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
            }
            self.put(
                f,
                screen,
                geometry::Rect::new(text_x, row.rect.y, text_width, 1),
                Line::from(Span::styled(truncate_text(&task.text, text_width.max(0) as usize), text_style)),
            );
            if time_width > 0 {
                self.put(
                    f,
                    screen,
                    geometry::Rect::new(text_end - time_width, row.rect.y, time_width, 1),
                    Line::from(Span::styled(task.time.clone(), Style::default().fg(Color::Gray)))
                        .alignment(Alignment::Right),
                );
            }
            if let Some(delete) = row.delete {
                self.put(
                    f,
                    screen,
                    delete,
                    Line::from(Span::styled(" ✕ ", Style::default().fg(Color::LightRed)))
                        .alignment(Alignment::Center),
                );
            }
        }
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, screen: Rect) {
        if screen.height < 3 {
            return;
        }
        let area = Rect::new(screen.x, screen.bottom() - 2, screen.width, 2);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        let help = if self.dashboard.is_idle() {
            Line::from(vec![
                Span::styled("←→", Style::default().fg(Color::LightCyan)),
                Span::raw(" month  "),
                Span::styled("t", Style::default().fg(Color::LightCyan)),
                Span::raw(" today  "),
                Span::styled("a", Style::default().fg(Color::LightMagenta)),
                Span::raw(" add task  "),
                Span::styled("click", Style::default().fg(Color::LightYellow)),
                Span::raw(" note/toggle  "),
                Span::styled("drag", Style::default().fg(Color::LightGreen)),
                Span::raw(" move  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::LightGreen)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" cancel"),
            ])
        };
        f.render_widget(Paragraph::new(help).alignment(Alignment::Center), rows[0]);
        let saved = self
            .last_save
            .map(|t| format!("  •  saved {}", format_elapsed(t)))
            .unwrap_or_default();
        f.render_widget(
            Paragraph::new(format!("{}{}", self.status, saved))
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            rows[1],
        );
    }
}

fn draw_popup(f: &mut ratatui::Frame<'_>, title: &str, label: &str, value: &str, hint: &str) {
    let area = centered_rect(60, 7, f.size());
    let body = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(value.to_string(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let dialog = Paragraph::new(body)
        .block(
            Block::default()
                .title(Span::styled(
                    title.to_string(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .style(Style::default().bg(Color::Rgb(40, 40, 45))),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

/// Screen cell to widget-local coordinates.
fn to_local(origin: (u16, u16), column: u16, row: u16) -> (i32, i32) {
    (
        i32::from(column) - i32::from(origin.0),
        i32::from(row) - i32::from(origin.1),
    )
}

/// Widget origin that keeps the grabbed point under the pointer, pinned to
/// the top-left of the screen.
fn dragged_origin(grab: (i32, i32), column: u16, row: u16) -> (u16, u16) {
    let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
    (
        clamp(i32::from(column) - grab.0),
        clamp(i32::from(row) - grab.1),
    )
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// `percent_x` of the width, a fixed `height` in rows, centered.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 1 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

fn format_elapsed(last: Instant) -> String {
    let secs = last.elapsed().as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreLocation;
    use chrono::NaiveDate;

    fn app(dir: &tempfile::TempDir, origin: (u16, u16)) -> App {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let config = Config {
            origin_x: origin.0,
            origin_y: origin.1,
            ..Config::default()
        };
        let dashboard = Dashboard::open(
            &StoreLocation::in_dir(dir.path()),
            i32::from(config.width),
            today,
        )
        .unwrap();
        App::new(dashboard, &config)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Screen cell at the center of a widget-local rectangle.
    fn on_screen(app: &App, r: geometry::Rect) -> (u16, u16) {
        let (x, y) = r.center();
        (
            (i32::from(app.origin.0) + x) as u16,
            (i32::from(app.origin.1) + y) as u16,
        )
    }

    #[test]
    fn screen_cells_shift_by_the_origin() {
        assert_eq!(to_local((0, 0), 5, 3), (5, 3));
        assert_eq!(to_local((4, 2), 5, 3), (1, 1));
        assert_eq!(to_local((4, 2), 1, 0), (-3, -2));
    }

    #[test]
    fn dragging_keeps_the_grab_point_and_stops_at_zero() {
        assert_eq!(dragged_origin((3, 1), 10, 6), (7, 5));
        assert_eq!(dragged_origin((3, 1), 1, 0), (0, 0));
        assert_eq!(dragged_origin((0, 0), u16::MAX, 2), (u16::MAX, 2));
    }

    #[test]
    fn clicks_resolve_in_widget_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, (6, 4));
        let cell = app.dashboard.layout().calendar.cells[13].rect;
        let (column, row) = on_screen(&app, cell);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        assert_eq!(
            app.dashboard.state(),
            &EditState::EditingNote {
                date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
                input: crate::input::TextInput::default(),
            }
        );
    }

    #[test]
    fn clicks_left_of_the_origin_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, (6, 4));
        // Screen (2, 4) would be the prev-month arrow at origin (0, 0).
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 4));
        assert_eq!(app.dashboard.calendar().cursor().month, 2);
        assert!(app.dashboard.is_idle());
    }

    #[test]
    fn moving_outside_the_widget_clears_hover() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, (6, 4));
        let cell = app.dashboard.layout().calendar.cells[19].rect;
        let (column, row) = on_screen(&app, cell);
        app.handle_mouse(mouse(MouseEventKind::Moved, column, row));
        assert_eq!(app.dashboard.hovered_day(), Some(20));

        app.dirty = false;
        app.handle_mouse(mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(app.dashboard.hovered_day(), None);
        assert!(app.dirty);
    }

    #[test]
    fn losing_focus_clears_hover() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, (0, 0));
        let cell = app.dashboard.layout().calendar.cells[4].rect;
        let (column, row) = on_screen(&app, cell);
        assert!(!app.handle_event(Event::Mouse(mouse(MouseEventKind::Moved, column, row))));
        assert_eq!(app.dashboard.hovered_day(), Some(5));

        assert!(!app.handle_event(Event::FocusLost));
        assert_eq!(app.dashboard.hovered_day(), None);
    }

    #[test]
    fn dragging_empty_space_moves_the_widget() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, (6, 4));
        let width = app.dashboard.width();
        // Title text between the arrows starts a drag.
        let (column, row) = (6 + (width / 2) as u16, 4);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        assert_eq!(app.grab, Some((width / 2, 0)));

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), column + 3, row + 2));
        assert_eq!(app.origin, (9, 6));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        assert_eq!(app.origin, (0, 0));

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(app.grab, None);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 20));
        assert_eq!(app.origin, (0, 0));
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer task", 6), "a lon…");
        assert_eq!(truncate_text("abc", 1), "a");
        assert_eq!(truncate_text("abc", 0), "");
    }

    #[test]
    fn popup_is_centered_and_fits() {
        let area = centered_rect(60, 7, Rect::new(0, 0, 100, 30));
        assert_eq!(area.height, 7);
        assert_eq!(area.y, 11);
        assert_eq!(area.width, 60);
        let small = centered_rect(60, 7, Rect::new(0, 0, 40, 4));
        assert_eq!(small.height, 4);
    }
}
