/// UI rendering: status line, board dump, menu and practice game summary
use std::time::Instant;

use crate::board::CursorPosition;
use crate::input::SurfaceView;
use crate::tutorial::{LevelStatus, TutorialSession};

/// Character for a drawn cell
const CELL_DRAWN: char = '#';
/// Character for an empty cell
const CELL_EMPTY: char = '.';
/// Character marking the cursor (drawn over the cell beneath it)
const CELL_CURSOR: char = '@';

/// One-line summary of a surface: mode, pen, cursor, drawn count and menu.
pub fn status_line(view: &SurfaceView<'_>) -> String {
    let mut line = format!(
        "[{} {}] [{}] cursor {} | {} cells drawn",
        view.mode.symbol(),
        view.mode.name(),
        view.pen.name(),
        view.cursor,
        view.drawn_cells
    );

    if view.menu.is_active() {
        match view.menu.selected_item() {
            Some(item) => line.push_str(&format!(" | MENU: {} {}", item.icon, item.name)),
            None => line.push_str(" | MENU"),
        }
    }

    if let Some(jaw) = view.jaw {
        line.push_str(&format!(" | Jaw clench: {} seconds", jaw.seconds));
    }

    line
}

/// Renders the board as text, one line per row.
pub fn render_board(view: &SurfaceView<'_>) -> String {
    let board = view.board;
    let mut out = String::with_capacity((board.columns() + 1) * board.rows());
    for y in 0..board.rows() {
        for x in 0..board.columns() {
            let pos = CursorPosition::new(x, y);
            let cell = if pos == view.cursor {
                CELL_CURSOR
            } else if board.is_drawn(pos) {
                CELL_DRAWN
            } else {
                CELL_EMPTY
            };
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

/// Lists menu entries with the highlighted one marked. Empty when the
/// menu is closed.
pub fn render_menu(view: &SurfaceView<'_>) -> Vec<String> {
    if !view.menu.is_active() {
        return Vec::new();
    }
    view.menu
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if index == view.menu.selection() { '>' } else { ' ' };
            format!("{marker} {index}: {} {}", item.icon, item.name)
        })
        .collect()
}

/// Practice game progress: level, moves, accuracy, time left and score.
pub fn tutorial_status(session: &TutorialSession, now: Instant) -> String {
    if session.is_finished() {
        return format!("Tutorial finished | score {}", session.score());
    }
    let Some(level) = session.level() else {
        return format!("Tutorial | score {}", session.score());
    };

    let state = match session.status() {
        LevelStatus::InProgress => String::from("in progress"),
        LevelStatus::Passed { score } => format!("complete (+{score})"),
        LevelStatus::TimedOut => String::from("time is up"),
    };

    format!(
        "{} ({}/{}) | moves {}/{} | accuracy {:.0}% | {}s left | score {} | {}",
        level.title,
        session.level_index() + 1,
        session.level_count(),
        session.moves(),
        level.max_moves,
        session.accuracy(),
        session.time_left(now).as_secs(),
        session.score(),
        state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DrawingMode, PenState};
    use crate::bus::{ConfirmTarget, Envelope, Event};
    use crate::config::Config;
    use crate::input::{InteractionState, SurfaceSettings};

    fn small_state() -> InteractionState {
        InteractionState::new(SurfaceSettings {
            columns: 4,
            rows: 3,
            start: CursorPosition::new(0, 1),
            pen: PenState::Pen,
            ..SurfaceSettings::default()
        })
    }

    #[test]
    fn board_marks_cursor_and_drawn_cells() {
        let mut state = small_state();
        let now = Instant::now();
        state.handle(&Envelope::new(Event::Movement(8), now));
        state.handle(&Envelope::new(
            Event::Movement(8),
            now + std::time::Duration::from_millis(250),
        ));

        assert_eq!(render_board(&state.view()), "....\n.#@.\n....\n");
    }

    #[test]
    fn status_line_reports_mode_pen_and_cursor() {
        let mut state = small_state();
        state.handle(&Envelope::new(Event::Mode(2), Instant::now()));

        let line = status_line(&state.view());
        assert_eq!(
            line,
            format!(
                "[↖ {}] [Pen] cursor (0, 1) | 0 cells drawn",
                DrawingMode::DiagonalNwSe.name()
            )
        );
    }

    #[test]
    fn open_menu_shows_highlight_and_jaw() {
        let mut state = InteractionState::new(SurfaceSettings::default());
        let now = Instant::now();
        state.handle(&Envelope::new(Event::Menu, now));
        state.handle(&Envelope::new(Event::Navigation(1), now));
        state.handle(&Envelope::new(Event::Jaw(3), now));

        let line = status_line(&state.view());
        assert!(line.ends_with("| MENU: 💾 Save Drawing | Jaw clench: 3 seconds"));

        let menu = render_menu(&state.view());
        assert_eq!(menu.len(), 4);
        assert_eq!(menu[1], "> 1: 💾 Save Drawing");
        assert!(menu[0].starts_with("  0:"));

        state.handle(&Envelope::new(
            Event::Confirm(ConfirmTarget::Index(2)),
            now,
        ));
        assert!(render_menu(&state.view()).is_empty());
        assert!(!status_line(&state.view()).contains("Jaw"));
    }

    #[test]
    fn tutorial_summary_shows_progress() {
        let now = Instant::now();
        let session = TutorialSession::new(&Config::default(), now);
        let line = tutorial_status(&session, now);
        assert!(line.starts_with("Level 1: Triangle (1/3) | moves 0/50 | accuracy 0%"));
        assert!(line.contains("300s left"));
        assert!(line.ends_with("in progress"));
    }

    #[test]
    fn finished_tutorial_shows_total() {
        let now = Instant::now();
        let mut session = TutorialSession::new(&Config::default(), now);
        session.skip();
        assert_eq!(tutorial_status(&session, now), "Tutorial finished | score 0");
    }
}
