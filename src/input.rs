//! Keyboard handling for the skill tree screen.

use crate::skill_tree::{SkillId, SkillTree, SkillTreeError, Transition};
use crate::ui::pulse::PulseTracker;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

/// Cursor position and last feedback for the tree screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeUiState {
    pub branch: usize,
    pub row: usize,
    pub column: usize,
    /// Outcome of the most recent toggle, shown in the status line
    pub status: Option<Transition>,
}

/// Result of handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

impl TreeUiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skill under the cursor
    pub fn cursor_skill(&self, tree: &SkillTree) -> Option<SkillId> {
        let branch = tree.branches().get(self.branch)?;
        let index = *branch.rows.get(self.row)?.get(self.column)?;
        Some(SkillId::new(self.branch, index))
    }

    fn row_len(&self, tree: &SkillTree) -> usize {
        tree.branches()
            .get(self.branch)
            .and_then(|b| b.rows.get(self.row))
            .map_or(0, |r| r.len())
    }

    fn row_count(&self, tree: &SkillTree) -> usize {
        tree.branches()
            .get(self.branch)
            .map_or(0, |b| b.rows.len())
    }

    /// Keep row/column inside the current branch after a move
    fn clamp(&mut self, tree: &SkillTree) {
        self.row = self.row.min(self.row_count(tree).saturating_sub(1));
        self.column = self.column.min(self.row_len(tree).saturating_sub(1));
    }

    pub fn move_up(&mut self, tree: &SkillTree) {
        self.row = self.row.saturating_sub(1);
        self.clamp(tree);
    }

    pub fn move_down(&mut self, tree: &SkillTree) {
        if self.row + 1 < self.row_count(tree) {
            self.row += 1;
        }
        self.clamp(tree);
    }

    /// Left within the row, spilling into the previous branch
    pub fn move_left(&mut self, tree: &SkillTree) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.branch > 0 {
            self.branch -= 1;
            self.column = usize::MAX;
            self.clamp(tree);
        }
    }

    /// Right within the row, spilling into the next branch
    pub fn move_right(&mut self, tree: &SkillTree) {
        if self.column + 1 < self.row_len(tree) {
            self.column += 1;
        } else if self.branch + 1 < tree.branches().len() {
            self.branch += 1;
            self.column = 0;
            self.clamp(tree);
        }
    }
}

/// Dispatch one key press. Invalid references from the engine are bugs and
/// are passed up.
pub fn handle_tree_input(
    key: KeyEvent,
    tree: &mut SkillTree,
    ui: &mut TreeUiState,
    pulses: &mut PulseTracker,
) -> Result<InputResult, SkillTreeError> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(InputResult::Quit);
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            return Ok(InputResult::Quit);
        }
        KeyCode::Up | KeyCode::Char('k') => ui.move_up(tree),
        KeyCode::Down | KeyCode::Char('j') => ui.move_down(tree),
        KeyCode::Left | KeyCode::Char('h') => ui.move_left(tree),
        KeyCode::Right | KeyCode::Char('l') => ui.move_right(tree),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(skill) = ui.cursor_skill(tree) {
                let outcome = tree.toggle(skill.branch, skill.index)?;
                if let Some(event) = outcome.event {
                    pulses.trigger(&event);
                    info!(
                        skill = %skill,
                        transition = ?outcome.transition,
                        points = tree.remaining_points(),
                        "skill toggled"
                    );
                }
                ui.status = Some(outcome.transition);
            }
        }
        _ => {}
    }
    Ok(InputResult::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn send(
        code: KeyCode,
        tree: &mut SkillTree,
        ui: &mut TreeUiState,
        pulses: &mut PulseTracker,
    ) -> InputResult {
        handle_tree_input(press(code), tree, ui, pulses).unwrap()
    }

    #[test]
    fn test_enter_selects_root() {
        let mut tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        let mut pulses = PulseTracker::new();

        send(KeyCode::Enter, &mut tree, &mut ui, &mut pulses);

        assert!(tree.is_selected(0, 0).unwrap());
        assert_eq!(tree.remaining_points(), 19);
        assert_eq!(ui.status, Some(Transition::Selected));
        assert!(pulses.pulse_for(SkillId::new(0, 0)).is_some());
    }

    #[test]
    fn test_blocked_toggle_sets_status_without_pulse() {
        let mut tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        let mut pulses = PulseTracker::new();

        send(KeyCode::Down, &mut tree, &mut ui, &mut pulses);
        send(KeyCode::Char(' '), &mut tree, &mut ui, &mut pulses);

        assert_eq!(ui.status, Some(Transition::BlockedPrerequisite));
        assert!(pulses.is_empty());
        assert_eq!(tree.remaining_points(), 20);
    }

    #[test]
    fn test_navigation_walks_rows_and_columns() {
        let tree = SkillTree::default();
        let mut ui = TreeUiState::new();

        ui.move_down(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(0, 1)));
        ui.move_right(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(0, 2)));

        // Row 2 has a single skill; column clamps back to 0
        ui.move_down(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(0, 3)));
        assert_eq!(ui.column, 0);

        ui.move_up(&tree);
        ui.move_up(&tree);
        ui.move_up(&tree);
        assert_eq!(ui.row, 0);
    }

    #[test]
    fn test_horizontal_moves_cross_branches() {
        let tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        ui.move_down(&tree);
        ui.move_right(&tree);
        ui.move_right(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(1, 1)));

        ui.move_left(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(0, 2)));

        ui.branch = 2;
        ui.column = 1;
        ui.move_right(&tree);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(2, 2)));
    }

    #[test]
    fn test_down_stops_at_last_row() {
        let tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        for _ in 0..10 {
            ui.move_down(&tree);
        }
        assert_eq!(ui.row, 5);
        assert_eq!(ui.cursor_skill(&tree), Some(SkillId::new(0, 7)));
    }

    #[test]
    fn test_quit_keys() {
        let mut tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        let mut pulses = PulseTracker::new();
        assert_eq!(
            send(KeyCode::Char('q'), &mut tree, &mut ui, &mut pulses),
            InputResult::Quit
        );
        assert_eq!(
            send(KeyCode::Esc, &mut tree, &mut ui, &mut pulses),
            InputResult::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_tree_input(ctrl_c, &mut tree, &mut ui, &mut pulses).unwrap(),
            InputResult::Quit
        );
    }

    #[test]
    fn test_refund_pulses_again() {
        let mut tree = SkillTree::default();
        let mut ui = TreeUiState::new();
        let mut pulses = PulseTracker::new();
        send(KeyCode::Enter, &mut tree, &mut ui, &mut pulses);
        pulses.update(1.0);
        assert!(pulses.is_empty());

        send(KeyCode::Enter, &mut tree, &mut ui, &mut pulses);
        assert_eq!(ui.status, Some(Transition::Deselected));
        assert!(pulses.pulse_for(SkillId::new(0, 0)).is_some());
        assert_eq!(tree.remaining_points(), 20);
    }
}
