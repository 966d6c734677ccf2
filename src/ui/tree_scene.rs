//! Skill tree screen: branch columns, connectors, tooltip and status.

use super::pulse::PulseTracker;
use crate::input::TreeUiState;
use crate::skill_tree::{BranchDef, SkillId, SkillState, SkillTree, Transition};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const ACTIVE_LINE: Color = Color::Yellow;
const INACTIVE_LINE: Color = Color::DarkGray;

/// Render the whole tree screen
pub fn render_skill_tree(
    frame: &mut Frame,
    area: Rect,
    tree: &SkillTree,
    ui: &TreeUiState,
    pulses: &PulseTracker,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Skill Tree ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Points
            Constraint::Min(0),    // Branches
            Constraint::Length(5), // Tooltip
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(inner);

    render_points_bar(frame, chunks[0], tree);
    render_branches(frame, chunks[1], tree, ui, pulses);
    render_tooltip(frame, chunks[2], tree, ui);
    render_status(frame, chunks[3], ui.status);

    let help = Paragraph::new("[←↑↓→/hjkl] Move  [Enter/Space] Learn/Refund  [q/Esc] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}

fn render_points_bar(frame: &mut Frame, area: Rect, tree: &SkillTree) {
    let remaining = tree.remaining_points();
    let points_style = if remaining == 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled("Skill Points: ", Style::default().fg(Color::White)),
        Span::styled(format!("{}", remaining), points_style),
        Span::styled(
            format!("/{}", tree.initial_points()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Learned: {}", tree.total_selected()),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_branches(
    frame: &mut Frame,
    area: Rect,
    tree: &SkillTree,
    ui: &TreeUiState,
    pulses: &PulseTracker,
) {
    let count = tree.branches().len().max(1) as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (branch_index, branch) in tree.branches().iter().enumerate() {
        render_branch(
            frame,
            columns[branch_index],
            tree,
            branch_index,
            branch,
            ui,
            pulses,
        );
    }
}

fn render_branch(
    frame: &mut Frame,
    area: Rect,
    tree: &SkillTree,
    branch_index: usize,
    branch: &BranchDef,
    ui: &TreeUiState,
    pulses: &PulseTracker,
) {
    let focused = ui.branch == branch_index;
    let block = Block::default()
        .title(format!(" {} ", branch.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Node line per row, plus a connector line above every row but the first
    let mut constraints = Vec::with_capacity(branch.rows.len() * 2 + 1);
    for row in 0..branch.rows.len() {
        if row > 0 {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut line = 0;
    for (row, indices) in branch.rows.iter().enumerate() {
        let slots = split_slots(lines[line + usize::from(row > 0)], indices.len());
        if row > 0 {
            let above = branch.rows[row - 1].len();
            let connector_slots = split_slots(lines[line], indices.len());
            for (column, &index) in indices.iter().enumerate() {
                let lit = branch.rows[row - 1].iter().any(|&from| {
                    tree.connector_state(branch_index, from, index)
                        .unwrap_or(false)
                });
                let glyph = connector_glyph(above, indices.len(), column);
                let style = Style::default().fg(if lit { ACTIVE_LINE } else { INACTIVE_LINE });
                frame.render_widget(
                    Paragraph::new(Span::styled(glyph, style)).alignment(Alignment::Center),
                    connector_slots[column],
                );
            }
            line += 1;
        }

        for (column, &index) in indices.iter().enumerate() {
            let skill = SkillId::new(branch_index, index);
            let is_cursor = focused && ui.row == row && ui.column == column;
            frame.render_widget(
                Paragraph::new(skill_node(tree, skill, is_cursor, pulses))
                    .alignment(Alignment::Center),
                slots[column],
            );
        }
        line += 1;
    }
}

fn split_slots(area: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)).collect::<Vec<_>>())
        .split(area)
        .to_vec()
}

/// Glyph for the line leading into `column` of a row, given the widths of the
/// row above and this row.
fn connector_glyph(above: usize, width: usize, column: usize) -> &'static str {
    match (above, width) {
        (1, 1) => "│",
        // Fan out from one skill into two
        (1, 2) => {
            if column == 0 {
                "╱"
            } else {
                "╲"
            }
        }
        // Two skills merge into one
        (2, 1) => "╲ ╱",
        _ => "│",
    }
}

fn skill_node(
    tree: &SkillTree,
    skill: SkillId,
    is_cursor: bool,
    pulses: &PulseTracker,
) -> Line<'static> {
    let state = tree
        .skill_state(skill.branch, skill.index)
        .unwrap_or(SkillState::Locked);
    let label = tree
        .definition(skill)
        .map(|d| d.id.clone())
        .unwrap_or_else(|_| skill.to_string());

    let (marker, mut style) = match state {
        SkillState::Selected => (
            "◆",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        SkillState::Available => ("◇", Style::default().fg(Color::White)),
        SkillState::Locked => ("·", Style::default().fg(Color::DarkGray)),
    };
    if let Some(pulse) = pulses.pulse_for(skill) {
        style = pulse.style();
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Line::from(Span::styled(format!("{} {}", marker, label), style))
}

/// Terminal stand-in for the hover tooltip: details of the skill under the cursor
fn render_tooltip(frame: &mut Frame, area: Rect, tree: &SkillTree, ui: &TreeUiState) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(skill) = ui.cursor_skill(tree) else {
        return;
    };
    let Ok(def) = tree.definition(skill) else {
        return;
    };

    let state_span = match tree.skill_state(skill.branch, skill.index) {
        Ok(SkillState::Selected) => Span::styled("Learned", Style::default().fg(Color::Green)),
        Ok(SkillState::Available) => Span::styled("Available", Style::default().fg(Color::White)),
        _ => Span::styled("🔒 Locked", Style::default().fg(Color::Red)),
    };

    let text = vec![
        Line::from(vec![
            Span::styled(
                def.id.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            state_span,
            Span::styled(
                format!("  {}", def.image),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            def.explanation.clone(),
            Style::default().fg(Color::White),
        )),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<Transition>) {
    let Some(transition) = status else {
        return;
    };
    let color = if transition.is_applied() {
        Color::Green
    } else {
        Color::Red
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            transition.describe(),
            Style::default().fg(color),
        )),
        area,
    );
}
