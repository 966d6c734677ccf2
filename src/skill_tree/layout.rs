//! Static tree layout: branches, skills, rows and the starting budget.

use super::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Points available in a fresh tree unless the layout says otherwise
pub const DEFAULT_SKILL_POINTS: u32 = 20;

/// Row grouping shared by every built-in branch: single, pair, single, pair, single, single.
pub const DEFAULT_ROWS: [&[usize]; 6] = [&[0], &[1, 2], &[3], &[4, 5], &[6], &[7]];

/// Display data for one skill. The engine passes it through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub explanation: String,
    pub image: String,
}

/// One progression line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDef {
    pub name: String,
    pub skills: Vec<SkillDef>,
    /// Rows from the root down, each a set of indices into `skills`
    pub rows: Vec<Vec<usize>>,
}

/// Complete static configuration for a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeLayout {
    #[serde(default = "default_points")]
    pub initial_points: u32,
    pub branches: Vec<BranchDef>,
}

fn default_points() -> u32 {
    DEFAULT_SKILL_POINTS
}

const OFFENSIVE: [&str; 8] = [
    "+%20 More damage when using blunt weapons",
    "Your hits make enemy bleed",
    "Your hits make enemy froze",
    "Gain +%25 Attack Power",
    "A perfect parry makes your next attack a critical attack",
    "Set your weapon on fire and make enemies burn",
    "Hitting enemies over time raises attack power by +%3. Stacks up to 5 times",
    "Activate the Meat Grinder. Gain +%20 Attack Power and +%20 Ability Power. Your Attacks restores Hp",
];

fn builtin_branch(
    number: usize,
    name: &str,
    image_prefix: &str,
    explain: impl Fn(usize) -> String,
) -> BranchDef {
    let skills = (0..8)
        .map(|i| SkillDef {
            id: format!("b{}-s{}", number, i + 1),
            explanation: explain(i),
            image: format!("/{}-skill{}.png", image_prefix, i + 1),
        })
        .collect();
    BranchDef {
        name: name.to_string(),
        skills,
        rows: DEFAULT_ROWS.iter().map(|row| row.to_vec()).collect(),
    }
}

impl Default for TreeLayout {
    /// Three eight-skill branches: offensive, defensive and active.
    fn default() -> Self {
        TreeLayout {
            initial_points: DEFAULT_SKILL_POINTS,
            branches: vec![
                builtin_branch(1, "Branch 1", "offensive", |i| OFFENSIVE[i].to_string()),
                builtin_branch(2, "Branch 2", "defensive", |i| {
                    format!("Defensive Skill {}", i + 1)
                }),
                builtin_branch(3, "Branch 3", "active", |i| format!("Active Skill {}", i + 1)),
            ],
        }
    }
}

impl TreeLayout {
    /// Parse and validate a JSON layout
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let layout: TreeLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read a JSON layout from disk
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every branch's rows partition its skills.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.branches.is_empty() {
            return Err(LayoutError::NoBranches);
        }
        for branch in &self.branches {
            if branch.skills.is_empty() {
                return Err(LayoutError::EmptyBranch {
                    branch: branch.name.clone(),
                });
            }
            let mut placed = vec![false; branch.skills.len()];
            for (row, indices) in branch.rows.iter().enumerate() {
                if indices.is_empty() {
                    return Err(LayoutError::EmptyRow {
                        branch: branch.name.clone(),
                        row,
                    });
                }
                for &index in indices {
                    match placed.get_mut(index) {
                        None => {
                            return Err(LayoutError::RowIndexOutOfRange {
                                branch: branch.name.clone(),
                                row,
                                index,
                                skill_count: branch.skills.len(),
                            })
                        }
                        Some(true) => {
                            return Err(LayoutError::DuplicateSkill {
                                branch: branch.name.clone(),
                                index,
                            })
                        }
                        Some(slot) => *slot = true,
                    }
                }
            }
            if let Some(index) = placed.iter().position(|p| !p) {
                return Err(LayoutError::UnplacedSkill {
                    branch: branch.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Total skills across all branches
    pub fn skill_count(&self) -> usize {
        self.branches.iter().map(|b| b.skills.len()).sum()
    }
}
