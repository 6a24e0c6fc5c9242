// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Capabilities the unglue action consumes from its host editor.
//!
//! The action never talks to a dialog, a banner or an undo log directly. The host passes
//! implementations of these traits in through [`Collaborators`].

use std::fmt;

use crate::history::UndoLog;
use crate::model::{Point, PointId};

/// How tags or memberships are split between an original point and its copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitPolicy {
    /// Only the original keeps them.
    KeepOnOriginal,
    /// Original and copies all get them.
    DuplicateOntoBoth,
    /// Only the copies get them.
    MoveToCopies,
}

impl SplitPolicy {
    pub fn opposite(self) -> Self {
        match self {
            Self::KeepOnOriginal => Self::MoveToCopies,
            Self::DuplicateOntoBoth => Self::DuplicateOntoBoth,
            Self::MoveToCopies => Self::KeepOnOriginal,
        }
    }
}

/// The user's answer. `None` means "no change" for that aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyChoice {
    pub tags: Option<SplitPolicy>,
    pub memberships: Option<SplitPolicy>,
}

impl PolicyChoice {
    pub fn new(tags: Option<SplitPolicy>, memberships: Option<SplitPolicy>) -> Self {
        Self { tags, memberships }
    }

    /// Both aspects flipped, see [`SplitPolicy::opposite`].
    pub fn opposite(self) -> Self {
        Self { tags: self.tags.map(SplitPolicy::opposite), memberships: self.memberships.map(SplitPolicy::opposite) }
    }
}

/// The user dismissed a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cancelled by user")
    }
}

pub trait PolicyChooser {
    /// Asks how to split tags and memberships of `candidates`.
    ///
    /// `require_tag_decision` is set when a single tagged point is being copied; the dialog
    /// should then default the tag choice to [`SplitPolicy::MoveToCopies`].
    fn choose_policy(
        &mut self,
        candidates: &[Point],
        require_tag_decision: bool,
    ) -> Result<PolicyChoice, Cancelled>;
}

/// Answers every request with the same choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPolicy(pub PolicyChoice);

impl PolicyChooser for FixedPolicy {
    fn choose_policy(&mut self, _: &[Point], _: bool) -> Result<PolicyChoice, Cancelled> {
        Ok(self.0)
    }
}

/// Confirmation for edits touching entities outside the loaded area.
pub trait OutlyingGate {
    fn confirm(&mut self, affected: &[PointId], operation: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl OutlyingGate for AllowAll {
    fn confirm(&mut self, _: &[PointId], _: &str) -> bool {
        true
    }
}

/// Non-blocking warning shown after a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Rewired lines are members of these groups (display names, sorted, unique).
    AffectedGroups { names: Vec<String> },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AffectedGroups { names } => {
                let count = names.len();
                write!(
                    f,
                    "Unglueing affected {count} {}: {}. Ensure that the {} not been broken!",
                    plural(count, "group", "groups"),
                    names.join(", "),
                    plural(count, "group has", "groups have"),
                )
            }
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _: &Notice) {}
}

/// Everything one invocation of the action may call out to.
pub struct Collaborators<'a> {
    pub policy: &'a mut dyn PolicyChooser,
    pub gate: &'a mut dyn OutlyingGate,
    pub notifier: &'a mut dyn Notifier,
    pub undo_log: &'a mut dyn UndoLog,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        policy: &'a mut dyn PolicyChooser,
        gate: &'a mut dyn OutlyingGate,
        notifier: &'a mut dyn Notifier,
        undo_log: &'a mut dyn UndoLog,
    ) -> Self {
        Self { policy, gate, notifier, undo_log }
    }
}

pub(crate) fn plural<'s>(count: usize, one: &'s str, many: &'s str) -> &'s str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, PolicyChoice, SplitPolicy};

    #[test]
    fn opposite_swaps_keep_and_move_only() {
        let choice = PolicyChoice::new(Some(SplitPolicy::MoveToCopies), Some(SplitPolicy::DuplicateOntoBoth));
        let flipped = choice.opposite();
        assert_eq!(flipped.tags, Some(SplitPolicy::KeepOnOriginal));
        assert_eq!(flipped.memberships, Some(SplitPolicy::DuplicateOntoBoth));
        assert_eq!(PolicyChoice::default().opposite(), PolicyChoice::default());
    }

    #[test]
    fn affected_groups_notice_is_pluralized() {
        let one = Notice::AffectedGroups { names: vec!["Bus 7".to_owned()] };
        assert_eq!(
            one.to_string(),
            "Unglueing affected 1 group: Bus 7. Ensure that the group has not been broken!"
        );

        let two = Notice::AffectedGroups { names: vec!["A".to_owned(), "B".to_owned()] };
        assert_eq!(
            two.to_string(),
            "Unglueing affected 2 groups: A, B. Ensure that the groups have not been broken!"
        );
    }
}
