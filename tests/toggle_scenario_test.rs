//! Toggle rules exercised through the public engine API.

use skilltree::skill_tree::{
    BranchDef, SkillDef, SkillId, SkillState, SkillTree, SkillTreeError, Transition, TreeEvent,
    TreeLayout,
};

/// Branch "B" with rows [[0],[1,2],[3]]
fn branch_b(points: u32) -> SkillTree {
    let layout = TreeLayout {
        initial_points: points,
        branches: vec![BranchDef {
            name: "B".to_string(),
            skills: (0..4)
                .map(|i| SkillDef {
                    id: format!("B-{}", i),
                    explanation: format!("B skill {}", i),
                    image: format!("/b-{}.png", i),
                })
                .collect(),
            rows: vec![vec![0], vec![1, 2], vec![3]],
        }],
    };
    SkillTree::new(layout).unwrap()
}

fn toggle(tree: &mut SkillTree, index: usize) -> Transition {
    tree.toggle(0, index).unwrap().transition
}

fn snapshot(tree: &SkillTree) -> (u32, Vec<SkillId>) {
    (tree.remaining_points(), tree.selected_skills())
}

// ============================================================================
// Reference walk-through
// ============================================================================

#[test]
fn test_branch_walkthrough() {
    let mut tree = branch_b(20);

    assert_eq!(toggle(&mut tree, 0), Transition::Selected);
    assert_eq!(tree.remaining_points(), 19);

    assert_eq!(toggle(&mut tree, 1), Transition::Selected);
    assert_eq!(tree.remaining_points(), 18);

    assert_eq!(toggle(&mut tree, 2), Transition::Selected);
    assert_eq!(tree.remaining_points(), 18);
    assert!(!tree.is_selected(0, 1).unwrap());
    assert!(tree.is_selected(0, 2).unwrap());

    assert_eq!(toggle(&mut tree, 3), Transition::Selected);
    assert_eq!(tree.remaining_points(), 17);

    let before = snapshot(&tree);
    assert_eq!(toggle(&mut tree, 0), Transition::BlockedDependents);
    assert_eq!(snapshot(&tree), before);
}

#[test]
fn test_unwind_branch_bottom_up() {
    let mut tree = branch_b(20);
    for i in [0, 2, 3] {
        toggle(&mut tree, i);
    }
    assert_eq!(toggle(&mut tree, 3), Transition::Deselected);
    assert_eq!(toggle(&mut tree, 2), Transition::Deselected);
    assert_eq!(toggle(&mut tree, 0), Transition::Deselected);
    assert_eq!(tree.remaining_points(), 20);
    assert_eq!(tree.total_selected(), 0);
}

// ============================================================================
// Blocked transitions leave state untouched
// ============================================================================

#[test]
fn test_prerequisite_block_is_a_no_op() {
    let mut tree = branch_b(20);
    let before = snapshot(&tree);
    for index in [1, 2, 3] {
        let outcome = tree.toggle(0, index).unwrap();
        assert_eq!(outcome.transition, Transition::BlockedPrerequisite);
        assert_eq!(outcome.event, None);
    }
    assert_eq!(snapshot(&tree), before);
}

#[test]
fn test_grandchild_needs_its_own_parent_row() {
    let mut tree = branch_b(20);
    toggle(&mut tree, 0);
    // Row 1 empty, so row 2 stays locked even with the root selected
    assert_eq!(toggle(&mut tree, 3), Transition::BlockedPrerequisite);
    assert_eq!(tree.skill_state(0, 3).unwrap(), SkillState::Locked);
}

#[test]
fn test_middle_row_refund_blocked_by_terminal_pick() {
    let mut tree = branch_b(20);
    for i in [0, 1, 3] {
        toggle(&mut tree, i);
    }
    let before = snapshot(&tree);
    assert_eq!(toggle(&mut tree, 1), Transition::BlockedDependents);
    assert_eq!(snapshot(&tree), before);
}

#[test]
fn test_swap_keeps_dependents_valid() {
    // Swapping inside row 1 keeps row 1 populated, so row 2 stays legal
    let mut tree = branch_b(20);
    for i in [0, 1, 3] {
        toggle(&mut tree, i);
    }
    assert_eq!(toggle(&mut tree, 2), Transition::Selected);
    assert!(tree.is_selected(0, 3).unwrap());
    assert_eq!(tree.remaining_points(), 17);
}

#[test]
fn test_zero_budget_blocks_selection() {
    let mut tree = branch_b(2);
    toggle(&mut tree, 0);
    toggle(&mut tree, 1);
    assert_eq!(tree.remaining_points(), 0);

    let before = snapshot(&tree);
    assert_eq!(toggle(&mut tree, 3), Transition::BlockedNoPoints);
    assert_eq!(toggle(&mut tree, 2), Transition::BlockedNoPoints);
    assert_eq!(snapshot(&tree), before);
}

#[test]
fn test_zero_point_tree_selects_nothing() {
    let mut tree = branch_b(0);
    assert_eq!(toggle(&mut tree, 0), Transition::BlockedNoPoints);
    assert_eq!(tree.total_selected(), 0);
}

// ============================================================================
// Round trip and events
// ============================================================================

#[test]
fn test_root_round_trip() {
    let mut tree = SkillTree::default();
    for branch in 0..3 {
        let points = tree.remaining_points();
        assert_eq!(
            tree.toggle(branch, 0).unwrap().transition,
            Transition::Selected
        );
        assert_eq!(
            tree.toggle(branch, 0).unwrap().transition,
            Transition::Deselected
        );
        assert_eq!(tree.remaining_points(), points);
        assert!(!tree.is_selected(branch, 0).unwrap());
    }
}

#[test]
fn test_events_name_the_clicked_skill() {
    let mut tree = branch_b(20);
    let events: Vec<TreeEvent> = [0, 1, 2, 2]
        .iter()
        .filter_map(|&i| tree.toggle(0, i).unwrap().event)
        .collect();
    assert_eq!(
        events,
        vec![
            TreeEvent::SkillSelected {
                skill: SkillId::new(0, 0),
                replaced: None
            },
            TreeEvent::SkillSelected {
                skill: SkillId::new(0, 1),
                replaced: None
            },
            TreeEvent::SkillSelected {
                skill: SkillId::new(0, 2),
                replaced: Some(SkillId::new(0, 1))
            },
            TreeEvent::SkillDeselected {
                skill: SkillId::new(0, 2)
            },
        ]
    );
}

// ============================================================================
// Invalid references
// ============================================================================

#[test]
fn test_invalid_references_are_errors_not_transitions() {
    let mut tree = SkillTree::default();
    assert!(matches!(
        tree.toggle(3, 0),
        Err(SkillTreeError::UnknownBranch { branch: 3, .. })
    ));
    assert!(matches!(
        tree.toggle(0, 8),
        Err(SkillTreeError::UnknownSkill { index: 8, .. })
    ));
    assert!(tree.connector_state(0, 0, 99).is_err());
    assert!(tree.connectors(5).is_err());
    assert_eq!(tree.remaining_points(), 20);
}

// ============================================================================
// Built-in layout
// ============================================================================

#[test]
fn test_builtin_branch_full_path() {
    let mut tree = SkillTree::default();
    // One pick per row: 0, 2, 3, 4, 6, 7
    for index in [0, 2, 3, 4, 6, 7] {
        assert_eq!(
            tree.toggle(1, index).unwrap().transition,
            Transition::Selected,
            "skill {}",
            index
        );
    }
    assert_eq!(tree.remaining_points(), 14);
    assert!(tree.connectors(1).unwrap().iter().filter(|c| c.active).count() == 5);
    assert!(tree.connector_state(1, 3, 4).unwrap());
    assert!(!tree.connector_state(1, 3, 5).unwrap());
}

#[test]
fn test_builtin_fan_in_uses_any_parent() {
    let mut tree = SkillTree::default();
    tree.toggle(0, 0).unwrap();
    tree.toggle(0, 1).unwrap();
    // Skill 3 merges skills 1 and 2; one parent is enough
    assert_eq!(tree.toggle(0, 3).unwrap().transition, Transition::Selected);
}
