//! Interaction state machine: the single owner of a surface's board, cursor,
//! mode, pen and menu.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::board::{BoardGrid, CursorPosition, DrawingMode, PenState};
use crate::config::Config;
use crate::history::History;
use crate::input::action_log::ActionLog;
use crate::input::menu::{MenuItem, MenuSnapshot, MenuState, default_items};

/// Coarse state of the machine, derived from the menu flag.
///
/// Transitions: `Navigating → MenuActive` on a menu event;
/// `MenuActive → Navigating` on confirm or an explicit close. While the
/// menu is active, movement, mode and pen events are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Navigating,
    MenuActive,
}

/// Work the surface cannot do itself; the application picks these up after
/// each dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRequest {
    /// Switch the device over to the practice game
    StartTutorial,
    /// Write the current board to an export file
    SaveDrawing,
}

/// Jaw clench duration reported by the device, shown until the menu closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JawIndicator {
    pub seconds: u8,
    pub since: Instant,
}

/// Immutable copy of the full interaction state used for undo/redo.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub board: BoardGrid,
    pub cursor: CursorPosition,
    pub mode: DrawingMode,
    pub pen: PenState,
    pub menu: MenuSnapshot,
    pub timestamp: DateTime<Utc>,
}

impl StateSnapshot {
    /// True when board, cursor, mode and pen match (timestamps and menu
    /// state are ignored).
    pub fn same_drawing(&self, other: &StateSnapshot) -> bool {
        self.board == other.board
            && self.cursor == other.cursor
            && self.mode == other.mode
            && self.pen == other.pen
    }
}

/// Fixed parameters of one drawing surface.
#[derive(Debug, Clone)]
pub struct SurfaceSettings {
    pub columns: usize,
    pub rows: usize,
    pub start: CursorPosition,
    pub mode: DrawingMode,
    pub pen: PenState,
    /// Minimum spacing between accepted movement events
    pub move_delay: Duration,
    pub history_limit: usize,
    pub log_capacity: usize,
    pub menu_items: Vec<MenuItem>,
}

impl SurfaceSettings {
    /// Main drawing board parameters from the user configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            columns: config.board.columns,
            rows: config.board.rows,
            start: CursorPosition::clamped(
                config.board.start_x,
                config.board.start_y,
                config.board.columns,
                config.board.rows,
            ),
            mode: DrawingMode::Horizontal,
            pen: PenState::Disabled,
            move_delay: Duration::from_millis(config.input.move_delay_ms),
            history_limit: config.history.max_entries,
            log_capacity: config.log.action_log_capacity,
            menu_items: default_items(),
        }
    }

    /// A `columns × rows` practice board: cursor centred, pen down, no menu.
    pub fn practice(columns: usize, rows: usize, config: &Config) -> Self {
        Self {
            columns,
            rows,
            start: CursorPosition::new(columns / 2, rows / 2),
            mode: DrawingMode::Horizontal,
            pen: PenState::Pen,
            menu_items: Vec::new(),
            ..Self::from_config(config)
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Read-only view handed to the render layer.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    pub cursor: CursorPosition,
    pub mode: DrawingMode,
    pub pen: PenState,
    pub board: &'a BoardGrid,
    pub menu: &'a MenuState,
    pub log: &'a ActionLog,
    pub jaw: Option<JawIndicator>,
    pub drawn_cells: usize,
    pub last_action: Option<Instant>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// State machine driving one drawing surface.
///
/// Consumes bus events (see the `actions` and `menu` submodules), mutates
/// its board, and records a history snapshot after every mutating action.
/// Nothing outside this type writes to the board.
pub struct InteractionState {
    pub(super) board: BoardGrid,
    pub(super) cursor: CursorPosition,
    pub(super) mode: DrawingMode,
    pub(super) pen: PenState,
    pub(super) menu: MenuState,
    pub(super) history: History<StateSnapshot>,
    /// Arrival time of the last movement that passed the debounce gate
    pub(super) last_move: Option<Instant>,
    pub(super) move_delay: Duration,
    pub(super) jaw: Option<JawIndicator>,
    pub(super) log: ActionLog,
    pub(super) last_action: Option<Instant>,
    pub(super) pending_requests: Vec<SurfaceRequest>,
    /// Whether the view changed since the last render
    pub needs_redraw: bool,
}

impl InteractionState {
    /// Creates a surface with an empty board and records it as the first
    /// history entry, so the first undo can return to the blank board.
    pub fn new(settings: SurfaceSettings) -> Self {
        let columns = settings.columns.max(1);
        let rows = settings.rows.max(1);
        let mut state = Self {
            board: BoardGrid::new(columns, rows),
            cursor: CursorPosition::clamped(settings.start.x, settings.start.y, columns, rows),
            mode: settings.mode,
            pen: settings.pen,
            menu: MenuState::new(settings.menu_items),
            history: History::new(settings.history_limit),
            last_move: None,
            move_delay: settings.move_delay,
            jaw: None,
            log: ActionLog::new(settings.log_capacity),
            last_action: None,
            pending_requests: Vec::new(),
            needs_redraw: true,
        };
        state.record();
        state
    }

    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn history(&self) -> &History<StateSnapshot> {
        &self.history
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ActionLog {
        &mut self.log
    }

    pub fn jaw(&self) -> Option<JawIndicator> {
        self.jaw
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        if self.menu.is_active() {
            InteractionMode::MenuActive
        } else {
            InteractionMode::Navigating
        }
    }

    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            cursor: self.cursor,
            mode: self.mode,
            pen: self.pen,
            board: &self.board,
            menu: &self.menu,
            log: &self.log,
            jaw: self.jaw,
            drawn_cells: self.board.drawn_count(),
            last_action: self.last_action,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            board: self.board.clone(),
            cursor: self.cursor,
            mode: self.mode,
            pen: self.pen,
            menu: self.menu.snapshot(),
            timestamp: Utc::now(),
        }
    }

    /// Drains requests raised by menu actions.
    pub fn take_requests(&mut self) -> Vec<SurfaceRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    /// Restores the previous history entry. Returns `false` at the oldest.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.restore(&snapshot);
        self.log.push("Undo");
        true
    }

    /// Re-applies the next history entry. Returns `false` at the newest.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.restore(&snapshot);
        self.log.push("Redo");
        true
    }

    /// Wipes the board back to a fresh state at the configured start.
    ///
    /// Used when a practice level restarts; history starts over from the
    /// blank board.
    pub fn reset(&mut self, settings: SurfaceSettings) {
        *self = Self::new(settings);
    }

    pub(super) fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    pub(super) fn touch(&mut self, now: Instant) {
        self.last_action = Some(now);
        self.needs_redraw = true;
    }

    fn restore(&mut self, snapshot: &StateSnapshot) {
        self.board = snapshot.board.clone();
        self.cursor = snapshot.cursor;
        self.mode = snapshot.mode;
        self.pen = snapshot.pen;
        self.needs_redraw = true;
    }
}
