//! Cursor, selection and drag state.
//!
//! The controller never checks adjacency or matches; it only pairs up two cells and
//! hands the pair to the engine, which decides whether the swap is legal.

use crossterm::event::{MouseButton, MouseEventKind};

use crate::types::{GameAction, Position};

/// What the controller wants the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swap(Position, Position),
    Hint,
    Restart,
}

#[derive(Debug, Clone)]
pub struct CursorController {
    rows: usize,
    cols: usize,
    cursor: Position,
    selected: Option<Position>,
    drag_from: Option<Position>,
}

impl CursorController {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cursor: Position::new(0, 0),
            selected: None,
            drag_from: None,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Forget the selection and any drag in progress.
    pub fn clear(&mut self) {
        self.selected = None;
        self.drag_from = None;
    }

    /// Interpret one keyboard action.
    ///
    /// With a tile selected, a direction swaps toward that neighbour; otherwise it
    /// moves the cursor, stopping at the edges.
    pub fn apply(&mut self, action: GameAction) -> Option<Command> {
        match action {
            GameAction::Move(dir) => match self.selected {
                Some(sel) => {
                    let target = sel.step(dir, self.rows, self.cols)?;
                    self.selected = None;
                    self.cursor = target;
                    Some(Command::Swap(sel, target))
                }
                None => {
                    if let Some(next) = self.cursor.step(dir, self.rows, self.cols) {
                        self.cursor = next;
                    }
                    None
                }
            },
            GameAction::Select => match self.selected.take() {
                None => {
                    self.selected = Some(self.cursor);
                    None
                }
                Some(sel) if sel == self.cursor => None,
                Some(sel) => Some(Command::Swap(sel, self.cursor)),
            },
            GameAction::Cancel => {
                self.clear();
                None
            }
            GameAction::Hint => Some(Command::Hint),
            GameAction::Restart => {
                self.clear();
                self.cursor = Position::new(0, 0);
                Some(Command::Restart)
            }
        }
    }

    /// Interpret a mouse event already mapped to a board cell (`None` = off board).
    pub fn handle_mouse(&mut self, kind: MouseEventKind, cell: Option<Position>) -> Option<Command> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(cell),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(pos) = cell {
                    self.cursor = pos;
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(cell),
            _ => None,
        }
    }

    /// Press on a cell: selects it, or swaps with an earlier selection.
    pub fn mouse_down(&mut self, cell: Option<Position>) -> Option<Command> {
        let Some(pos) = cell else {
            self.clear();
            return None;
        };
        self.cursor = pos;
        match self.selected {
            Some(sel) if sel != pos => {
                self.clear();
                Some(Command::Swap(sel, pos))
            }
            _ => {
                self.selected = Some(pos);
                self.drag_from = Some(pos);
                None
            }
        }
    }

    /// Release: a drag that ends on another cell requests a swap.
    pub fn mouse_up(&mut self, cell: Option<Position>) -> Option<Command> {
        let from = self.drag_from.take()?;
        let to = cell?;
        if to == from {
            return None;
        }
        self.selected = None;
        self.cursor = to;
        Some(Command::Swap(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn cursor_stops_at_edges() {
        let mut c = CursorController::new(3, 3);
        assert_eq!(c.apply(GameAction::Move(Direction::Up)), None);
        assert_eq!(c.cursor(), Position::new(0, 0));
        c.apply(GameAction::Move(Direction::Right));
        c.apply(GameAction::Move(Direction::Right));
        c.apply(GameAction::Move(Direction::Right));
        assert_eq!(c.cursor(), Position::new(0, 2));
    }

    #[test]
    fn select_then_direction_swaps() {
        let mut c = CursorController::new(3, 3);
        c.apply(GameAction::Select);
        assert_eq!(c.selected(), Some(Position::new(0, 0)));
        assert_eq!(
            c.apply(GameAction::Move(Direction::Down)),
            Some(Command::Swap(Position::new(0, 0), Position::new(1, 0)))
        );
        assert_eq!(c.selected(), None);
        assert_eq!(c.cursor(), Position::new(1, 0));
    }

    #[test]
    fn selected_direction_off_board_keeps_selection() {
        let mut c = CursorController::new(3, 3);
        c.apply(GameAction::Select);
        assert_eq!(c.apply(GameAction::Move(Direction::Left)), None);
        assert_eq!(c.selected(), Some(Position::new(0, 0)));
    }

    #[test]
    fn selecting_same_cell_twice_deselects() {
        let mut c = CursorController::new(3, 3);
        c.apply(GameAction::Select);
        assert_eq!(c.apply(GameAction::Select), None);
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn drag_requests_swap() {
        let mut c = CursorController::new(4, 4);
        let (a, b) = (Position::new(1, 1), Position::new(1, 2));
        assert_eq!(c.handle_mouse(MouseEventKind::Down(MouseButton::Left), Some(a)), None);
        assert_eq!(c.handle_mouse(MouseEventKind::Drag(MouseButton::Left), Some(b)), None);
        assert_eq!(
            c.handle_mouse(MouseEventKind::Up(MouseButton::Left), Some(b)),
            Some(Command::Swap(a, b))
        );
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn click_click_requests_swap() {
        let mut c = CursorController::new(4, 4);
        let (a, b) = (Position::new(2, 2), Position::new(3, 2));
        c.mouse_down(Some(a));
        assert_eq!(c.mouse_up(Some(a)), None);
        assert_eq!(c.selected(), Some(a));
        assert_eq!(c.mouse_down(Some(b)), Some(Command::Swap(a, b)));
    }

    #[test]
    fn restart_clears_selection() {
        let mut c = CursorController::new(3, 3);
        c.apply(GameAction::Move(Direction::Down));
        c.apply(GameAction::Select);
        assert_eq!(c.apply(GameAction::Restart), Some(Command::Restart));
        assert_eq!(c.selected(), None);
        assert_eq!(c.cursor(), Position::new(0, 0));
    }
}
