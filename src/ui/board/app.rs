//! Interactive three-column board.
//!
//! Single-threaded: the loop polls for input, reruns the filter
//! pipeline against the in-memory board, and redraws. Drops go through
//! the drag protocol so a move is only applied on an explicit drop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use uuid::Uuid;

use crate::board::Board;
use crate::drag::{DragInput, DragState};
use crate::error::Result;
use crate::filter::{self, Criteria};
use crate::task::Status;

use super::view;

const EVENT_POLL_MS: u64 = 120;

pub(crate) struct AppState {
    pub(crate) board: Board,
    pub(crate) criteria: Criteria,
    pub(crate) query: String,
    pub(crate) search_active: bool,
    pub(crate) drag: DragState,
    pub(crate) column: usize,
    pub(crate) row: usize,
    pub(crate) notice: Option<String>,
    moves_applied: usize,
}

impl AppState {
    pub(crate) fn new(board: Board, show_completed: bool) -> Self {
        Self {
            board,
            criteria: Criteria {
                show_completed,
                ..Criteria::default()
            },
            query: String::new(),
            search_active: false,
            drag: DragState::default(),
            column: 0,
            row: 0,
            notice: None,
            moves_applied: 0,
        }
    }

    /// Ids visible in one column under the current criteria and query.
    pub(crate) fn column_ids(&self, status: Status) -> Vec<Uuid> {
        let view = filter::apply(self.board.tasks(), &self.criteria, &self.query);
        filter::column(&view, status)
            .iter()
            .map(|task| task.id)
            .collect()
    }

    pub(crate) fn selected_status(&self) -> Status {
        Status::ALL[self.column]
    }

    pub(crate) fn selected_task(&self) -> Option<Uuid> {
        self.column_ids(self.selected_status()).get(self.row).copied()
    }

    fn clamp_row(&mut self) {
        let len = self.column_ids(self.selected_status()).len();
        if len == 0 {
            self.row = 0;
        } else if self.row >= len {
            self.row = len - 1;
        }
    }

    fn row_down(&mut self) {
        let len = self.column_ids(self.selected_status()).len();
        if len > 0 && self.row + 1 < len {
            self.row += 1;
        }
    }

    fn row_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
        }
    }

    /// Left/right either moves the column selection or, mid-drag,
    /// hovers a neighbor column.
    fn step_left(&mut self) {
        if self.drag.is_active() {
            self.hover_step(-1);
        } else if self.column > 0 {
            self.column -= 1;
            self.clamp_row();
        }
    }

    fn step_right(&mut self) {
        if self.drag.is_active() {
            self.hover_step(1);
        } else if self.column + 1 < Status::ALL.len() {
            self.column += 1;
            self.clamp_row();
        }
    }

    fn hover_step(&mut self, delta: isize) {
        let current = self
            .drag
            .hovered_column()
            .map(status_index)
            .unwrap_or(self.column);
        let next = current as isize + delta;
        if next < 0 || next >= Status::ALL.len() as isize {
            return;
        }
        let status = Status::ALL[next as usize];
        let (state, _) = std::mem::take(&mut self.drag).step(DragInput::EnterColumn(status));
        self.drag = state;
    }

    fn grab_selected(&mut self) {
        if let Some(id) = self.selected_task() {
            let (state, _) = std::mem::take(&mut self.drag).step(DragInput::Grab(id));
            self.drag = state;
            self.notice = None;
        }
    }

    fn drop_grabbed(&mut self) {
        let (state, effect) = std::mem::take(&mut self.drag).step(DragInput::Drop);
        self.drag = state;
        let Some(effect) = effect else {
            return;
        };
        match self.board.move_to(effect.task, effect.to) {
            Ok(task) => {
                self.moves_applied += 1;
                self.column = status_index(effect.to);
                let ids = self.column_ids(effect.to);
                self.row = ids.iter().position(|id| *id == effect.task).unwrap_or(0);
                self.notice = Some(format!("moved '{}' to {}", task.title, effect.to.label()));
            }
            Err(err) => self.notice = Some(format!("move failed: {err}")),
        }
    }

    fn cancel_drag(&mut self) {
        let (state, _) = std::mem::take(&mut self.drag).step(DragInput::Cancel);
        self.drag = state;
    }
}

fn status_index(status: Status) -> usize {
    Status::ALL
        .iter()
        .position(|candidate| *candidate == status)
        .unwrap_or(0)
}

/// Run the interactive board. Returns how many moves were applied.
pub fn run(board: Board, show_completed: bool) -> Result<usize> {
    let mut app = AppState::new(board, show_completed);
    run_terminal(&mut app)?;
    Ok(app.moves_applied)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search_active = false;
                app.query.clear();
                app.clamp_row();
            }
            KeyCode::Enter => app.search_active = false,
            KeyCode::Backspace => {
                app.query.pop();
                app.clamp_row();
            }
            KeyCode::Char(ch) => {
                app.query.push(ch);
                app.clamp_row();
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => {
            app.search_active = true;
            app.query.clear();
        }
        KeyCode::Char('d') => {
            app.criteria.show_completed = !app.criteria.show_completed;
            app.clamp_row();
        }
        KeyCode::Up | KeyCode::Char('k') => app.row_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_down(),
        KeyCode::Left | KeyCode::Char('h') => app.step_left(),
        KeyCode::Right | KeyCode::Char('l') => app.step_right(),
        KeyCode::Char(' ') => app.grab_selected(),
        KeyCode::Enter => app.drop_grabbed(),
        KeyCode::Esc => {
            if app.drag.is_active() {
                app.cancel_drag();
            } else if !app.query.is_empty() {
                app.query.clear();
                app.clamp_row();
            }
        }
        _ => {}
    }
    false
}
