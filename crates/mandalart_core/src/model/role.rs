//! Cell role and theme derivation.
//!
//! # Responsibility
//! - Classify each of the 81 cells from its coordinates alone.
//! - Map each outer block to one of eight fixed color themes.
//!
//! # Invariants
//! - Roles are derived on every read and never stored alongside cell text.
//! - A sub-goal cell carries the theme of the outer block it feeds.
//! - Synced centers are never editable.

use crate::model::grid::{sync_target, BlockPos, CellPos, Grid};
use serde::{Deserialize, Serialize};

/// Display role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    /// The single top-level objective at `(4, 4)`.
    CoreGoal,
    /// Center-block cell that feeds one outer block center.
    SubGoal,
    /// Outer block center mirroring its sub-goal; read-only.
    SyncedCenter,
    /// Any other outer-block cell.
    ActionPlan,
}

impl CellRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::CoreGoal => "core_goal",
            Self::SubGoal => "sub_goal",
            Self::SyncedCenter => "synced_center",
            Self::ActionPlan => "action_plan",
        }
    }
}

/// Placeholder hint shown for empty editable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    CoreGoal,
    SubGoal,
    ActionPlan,
    None,
}

impl PlaceholderKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::CoreGoal => "core goal",
            Self::SubGoal => "sub goal",
            Self::ActionPlan => "action plan",
            Self::None => "",
        }
    }
}

/// One of the eight outer-block color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Pink,
}

/// Theme per block coordinate; the center block has none of its own.
const THEME_TABLE: [[Option<Theme>; 3]; 3] = [
    [Some(Theme::Red), Some(Theme::Orange), Some(Theme::Yellow)],
    [Some(Theme::Green), None, Some(Theme::Teal)],
    [Some(Theme::Blue), Some(Theme::Purple), Some(Theme::Pink)],
];

impl Theme {
    /// Returns the theme of an outer block, `None` for the center block.
    pub fn for_block(block: BlockPos) -> Option<Theme> {
        THEME_TABLE[block.row()][block.col()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

/// Derived presentation attributes of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDescriptor {
    pub role: CellRole,
    pub theme: Option<Theme>,
    pub editable: bool,
    pub placeholder: PlaceholderKind,
}

/// Resolves role, theme and editability from coordinates.
pub fn resolve_role(pos: CellPos) -> CellDescriptor {
    let block = BlockPos::of(pos);

    if block.is_center() {
        if pos.local() == (1, 1) {
            return CellDescriptor {
                role: CellRole::CoreGoal,
                theme: None,
                editable: true,
                placeholder: PlaceholderKind::CoreGoal,
            };
        }
        let theme = sync_target(pos).and_then(|target| Theme::for_block(BlockPos::of(target)));
        return CellDescriptor {
            role: CellRole::SubGoal,
            theme,
            editable: true,
            placeholder: PlaceholderKind::SubGoal,
        };
    }

    let theme = Theme::for_block(block);
    if pos.local() == (1, 1) {
        CellDescriptor {
            role: CellRole::SyncedCenter,
            theme,
            editable: false,
            placeholder: PlaceholderKind::None,
        }
    } else {
        CellDescriptor {
            role: CellRole::ActionPlan,
            theme,
            editable: true,
            placeholder: PlaceholderKind::ActionPlan,
        }
    }
}

/// Per-cell projection handed to the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub role: CellRole,
    pub editable: bool,
    pub placeholder: PlaceholderKind,
    pub theme: Option<Theme>,
}

impl CellView {
    /// Combines the stored text at `pos` with its derived descriptor.
    pub fn of(grid: &Grid, pos: CellPos) -> Self {
        let descriptor = resolve_role(pos);
        Self {
            row: pos.row(),
            col: pos.col(),
            text: grid.cell(pos).to_string(),
            role: descriptor.role,
            editable: descriptor.editable,
            placeholder: descriptor.placeholder,
            theme: descriptor.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_role, CellRole, PlaceholderKind, Theme};
    use crate::model::grid::{BlockPos, CellPos, SYNC_LINKS};
    use std::collections::HashSet;

    fn pos(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col).expect("test coordinates are in range")
    }

    #[test]
    fn core_goal_is_center_of_board() {
        let descriptor = resolve_role(pos(4, 4));
        assert_eq!(descriptor.role, CellRole::CoreGoal);
        assert!(descriptor.editable);
        assert_eq!(descriptor.placeholder.label(), "core goal");
        assert_eq!(descriptor.theme, None);
    }

    #[test]
    fn synced_center_is_read_only() {
        let descriptor = resolve_role(pos(1, 1));
        assert_eq!(descriptor.role, CellRole::SyncedCenter);
        assert!(!descriptor.editable);
        assert_eq!(descriptor.theme, Some(Theme::Red));
    }

    #[test]
    fn corner_is_action_plan() {
        let descriptor = resolve_role(pos(0, 0));
        assert_eq!(descriptor.role, CellRole::ActionPlan);
        assert!(descriptor.editable);
        assert_eq!(descriptor.placeholder, PlaceholderKind::ActionPlan);
    }

    #[test]
    fn sub_goal_shares_theme_with_fed_block() {
        for (source, target) in SYNC_LINKS {
            let sub_goal = resolve_role(source);
            let synced = resolve_role(target);
            assert_eq!(sub_goal.role, CellRole::SubGoal);
            assert_eq!(sub_goal.placeholder.label(), "sub goal");
            assert!(sub_goal.theme.is_some());
            assert_eq!(sub_goal.theme, synced.theme);
        }
    }

    #[test]
    fn role_counts_cover_board() {
        let roles: Vec<CellRole> = CellPos::all().map(|p| resolve_role(p).role).collect();
        let count = |role: CellRole| roles.iter().filter(|r| **r == role).count();
        assert_eq!(count(CellRole::CoreGoal), 1);
        assert_eq!(count(CellRole::SubGoal), 8);
        assert_eq!(count(CellRole::SyncedCenter), 8);
        assert_eq!(count(CellRole::ActionPlan), 64);
    }

    #[test]
    fn each_outer_block_has_distinct_theme() {
        let themes: HashSet<Theme> = BlockPos::outer()
            .map(|block| Theme::for_block(block).expect("outer blocks are themed"))
            .collect();
        assert_eq!(themes.len(), 8);
        assert_eq!(Theme::for_block(BlockPos::CENTER), None);
    }
}
