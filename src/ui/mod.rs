pub mod pulse;
pub mod tree_scene;

use crate::input::TreeUiState;
use crate::skill_tree::SkillTree;
use pulse::PulseTracker;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal the tree fits in
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, tree: &SkillTree, ui: &TreeUiState, pulses: &PulseTracker) {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }
    tree_scene::render_skill_tree(frame, area, tree, ui, pulses);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new(format!(
        "Terminal too small: need {}x{}, have {}x{}",
        MIN_WIDTH, MIN_HEIGHT, area.width, area.height
    ))
    .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}
