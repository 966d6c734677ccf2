//! Skill tree value types shared by the engine and the view.

use std::fmt;

/// Position of a skill: branch index plus its index in the branch's skill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillId {
    pub branch: usize,
    pub index: usize,
}

impl SkillId {
    pub fn new(branch: usize, index: usize) -> Self {
        Self { branch, index }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}-s{}", self.branch + 1, self.index + 1)
    }
}

/// Result of a toggle attempt.
///
/// The `Blocked*` variants are normal outcomes of play: the tree is left
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Selected,
    Deselected,
    /// Nothing is selected in the row above.
    BlockedPrerequisite,
    /// A skill in the row below still depends on this one.
    BlockedDependents,
    /// Budget is exhausted.
    BlockedNoPoints,
}

impl Transition {
    /// Whether the toggle changed the tree
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Selected | Transition::Deselected)
    }

    /// Short status-line text
    pub fn describe(&self) -> &'static str {
        match self {
            Transition::Selected => "Skill learned",
            Transition::Deselected => "Skill refunded",
            Transition::BlockedPrerequisite => "Needs a skill from the previous row",
            Transition::BlockedDependents => "Refund the skills below it first",
            Transition::BlockedNoPoints => "No skill points left",
        }
    }
}

/// Per-skill state as seen by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillState {
    /// Prerequisite row has no selection
    Locked,
    Available,
    Selected,
}

/// Advisory notification for the view layer. Carries no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    SkillSelected {
        skill: SkillId,
        /// Skill in the same row that was dropped to make room
        replaced: Option<SkillId>,
    },
    SkillDeselected {
        skill: SkillId,
    },
}

impl TreeEvent {
    /// The skill that was clicked
    pub fn skill(&self) -> SkillId {
        match self {
            TreeEvent::SkillSelected { skill, .. } | TreeEvent::SkillDeselected { skill } => *skill,
        }
    }
}

/// What `toggle` returns: the transition plus its notification, if it applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub transition: Transition,
    pub event: Option<TreeEvent>,
}

impl ToggleOutcome {
    pub(crate) fn blocked(transition: Transition) -> Self {
        Self {
            transition,
            event: None,
        }
    }
}

/// Dependency line between a skill and one in the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    pub from: SkillId,
    pub to: SkillId,
    /// Both endpoints selected
    pub active: bool,
}
