//! Skill selection rules and point bookkeeping.

use super::error::{LayoutError, SkillTreeError};
use super::layout::{BranchDef, SkillDef, TreeLayout};
use super::types::{Connector, SkillId, SkillState, ToggleOutcome, Transition, TreeEvent};
use tracing::{debug, warn};

/// The engine. Owns the static layout, which skills are picked, and the budget.
#[derive(Debug, Clone)]
pub struct SkillTree {
    layout: TreeLayout,
    /// `selected[branch][index]`
    selected: Vec<Vec<bool>>,
    /// `row_of[branch][index]`: row holding each skill
    row_of: Vec<Vec<usize>>,
    points: u32,
}

impl Default for SkillTree {
    fn default() -> Self {
        Self::from_validated(TreeLayout::default())
    }
}

impl SkillTree {
    /// Build a fresh tree: nothing selected, full budget.
    pub fn new(layout: TreeLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self::from_validated(layout))
    }

    fn from_validated(layout: TreeLayout) -> Self {
        let selected = layout
            .branches
            .iter()
            .map(|b| vec![false; b.skills.len()])
            .collect();
        let row_of = layout
            .branches
            .iter()
            .map(|b| {
                let mut rows = vec![0; b.skills.len()];
                for (row, indices) in b.rows.iter().enumerate() {
                    for &index in indices {
                        rows[index] = row;
                    }
                }
                rows
            })
            .collect();
        let points = layout.initial_points;
        SkillTree {
            layout,
            selected,
            row_of,
            points,
        }
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    pub fn skill_definitions(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn branches(&self) -> &[BranchDef] {
        &self.layout.branches
    }

    pub fn branch(&self, branch: usize) -> Result<&BranchDef, SkillTreeError> {
        self.layout
            .branches
            .get(branch)
            .ok_or(SkillTreeError::UnknownBranch {
                branch,
                branch_count: self.layout.branches.len(),
            })
    }

    pub fn definition(&self, id: SkillId) -> Result<&SkillDef, SkillTreeError> {
        let id = self.resolve(id.branch, id.index)?;
        Ok(&self.layout.branches[id.branch].skills[id.index])
    }

    /// Validate a reference into the tree
    pub fn resolve(&self, branch: usize, index: usize) -> Result<SkillId, SkillTreeError> {
        let def = self.branch(branch)?;
        if index >= def.skills.len() {
            return Err(SkillTreeError::UnknownSkill {
                branch,
                index,
                skill_count: def.skills.len(),
            });
        }
        Ok(SkillId::new(branch, index))
    }

    pub fn row_of(&self, branch: usize, index: usize) -> Result<usize, SkillTreeError> {
        let id = self.resolve(branch, index)?;
        Ok(self.row_of[id.branch][id.index])
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn remaining_points(&self) -> u32 {
        self.points
    }

    pub fn initial_points(&self) -> u32 {
        self.layout.initial_points
    }

    /// Selected skills across every branch
    pub fn total_selected(&self) -> usize {
        self.selected.iter().flatten().filter(|&&s| s).count()
    }

    pub fn is_selected(&self, branch: usize, index: usize) -> Result<bool, SkillTreeError> {
        let id = self.resolve(branch, index)?;
        Ok(self.selected[id.branch][id.index])
    }

    /// Selected skills in tree order
    pub fn selected_skills(&self) -> Vec<SkillId> {
        self.selected
            .iter()
            .enumerate()
            .flat_map(|(branch, flags)| {
                flags
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| **s)
                    .map(move |(index, _)| SkillId::new(branch, index))
            })
            .collect()
    }

    pub fn skill_state(
        &self,
        branch: usize,
        index: usize,
    ) -> Result<SkillState, SkillTreeError> {
        let id = self.resolve(branch, index)?;
        if self.selected[id.branch][id.index] {
            return Ok(SkillState::Selected);
        }
        if self.prerequisite_met(id) {
            Ok(SkillState::Available)
        } else {
            Ok(SkillState::Locked)
        }
    }

    /// Whether the line between two skills in adjacent rows should be lit.
    /// Endpoints may be given in either order.
    pub fn connector_state(
        &self,
        branch: usize,
        from: usize,
        to: usize,
    ) -> Result<bool, SkillTreeError> {
        let from_row = self.row_of(branch, from)?;
        let to_row = self.row_of(branch, to)?;
        if from_row.abs_diff(to_row) != 1 {
            warn!(branch, from, to, "connector requested between non-adjacent rows");
            return Err(SkillTreeError::NotConnected { branch, from, to });
        }
        Ok(self.selected[branch][from] && self.selected[branch][to])
    }

    /// Every line in a branch, from each skill to each skill in the next row
    pub fn connectors(&self, branch: usize) -> Result<Vec<Connector>, SkillTreeError> {
        let def = self.branch(branch)?;
        let flags = &self.selected[branch];
        let connectors = def
            .rows
            .windows(2)
            .flat_map(move |pair| {
                let (upper, lower) = (&pair[0], &pair[1]);
                upper.iter().flat_map(move |&from| {
                    lower.iter().map(move |&to| Connector {
                        from: SkillId::new(branch, from),
                        to: SkillId::new(branch, to),
                        active: flags[from] && flags[to],
                    })
                })
            })
            .collect();
        Ok(connectors)
    }

    fn row_has_selection(&self, branch: usize, row: usize) -> bool {
        self.layout.branches[branch].rows[row]
            .iter()
            .any(|&i| self.selected[branch][i])
    }

    /// Row 0 is always unlocked; any pick in the row above unlocks the rest.
    fn prerequisite_met(&self, id: SkillId) -> bool {
        match self.row_of[id.branch][id.index] {
            0 => true,
            row => self.row_has_selection(id.branch, row - 1),
        }
    }

    fn has_dependents(&self, id: SkillId) -> bool {
        let row = self.row_of[id.branch][id.index];
        let rows = self.layout.branches[id.branch].rows.len();
        row + 1 < rows && self.row_has_selection(id.branch, row + 1)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Click a skill: select it, swap it in for its row, or refund it.
    pub fn toggle(
        &mut self,
        branch: usize,
        index: usize,
    ) -> Result<ToggleOutcome, SkillTreeError> {
        let id = match self.resolve(branch, index) {
            Ok(id) => id,
            Err(e) => {
                warn!(branch, index, error = %e, "toggle on invalid skill reference");
                return Err(e);
            }
        };

        let outcome = self.apply_toggle(id);
        debug!(
            skill = %id,
            transition = ?outcome.transition,
            points = self.points,
            "toggle"
        );
        Ok(outcome)
    }

    fn apply_toggle(&mut self, id: SkillId) -> ToggleOutcome {
        if !self.prerequisite_met(id) {
            return ToggleOutcome::blocked(Transition::BlockedPrerequisite);
        }

        if self.selected[id.branch][id.index] {
            if self.has_dependents(id) {
                return ToggleOutcome::blocked(Transition::BlockedDependents);
            }
            self.selected[id.branch][id.index] = false;
            self.points += 1;
            return ToggleOutcome {
                transition: Transition::Deselected,
                event: Some(TreeEvent::SkillDeselected { skill: id }),
            };
        }

        if self.points == 0 {
            return ToggleOutcome::blocked(Transition::BlockedNoPoints);
        }

        let row = self.row_of[id.branch][id.index];
        let replaced = self.layout.branches[id.branch].rows[row]
            .iter()
            .copied()
            .find(|&i| i != id.index && self.selected[id.branch][i]);

        match replaced {
            // Swapping within a row costs nothing
            Some(other) => self.selected[id.branch][other] = false,
            None => self.points -= 1,
        }
        self.selected[id.branch][id.index] = true;

        ToggleOutcome {
            transition: Transition::Selected,
            event: Some(TreeEvent::SkillSelected {
                skill: id,
                replaced: replaced.map(|i| SkillId::new(id.branch, i)),
            }),
        }
    }
}
