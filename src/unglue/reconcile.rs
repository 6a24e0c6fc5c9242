// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::collab::SplitPolicy;
use crate::model::{EntityRef, Group, GroupId, Member, Point, PointId};
use crate::ops::Command;
use crate::query::Topology;

/// Accumulates group edits for one or more originals and emits one change per group.
#[derive(Debug)]
pub struct MembershipReconciler<'t, 'a> {
    topology: &'t Topology<'a>,
    pending: BTreeMap<GroupId, Group>,
}

impl<'t, 'a> MembershipReconciler<'t, 'a> {
    pub fn new(topology: &'t Topology<'a>) -> Self {
        Self { topology, pending: BTreeMap::new() }
    }

    /// Adds `copies` to every usable group holding `original`, according to `policy`.
    ///
    /// For each role under which a group references `original`, the copies are inserted right
    /// after the last slot with that role, in order. [`SplitPolicy::MoveToCopies`] also drops
    /// that slot. `None` and [`SplitPolicy::KeepOnOriginal`] leave groups alone.
    pub fn reconcile(&mut self, policy: Option<SplitPolicy>, original: PointId, copies: &[PointId]) {
        let Some(policy @ (SplitPolicy::DuplicateOntoBoth | SplitPolicy::MoveToCopies)) = policy else {
            return;
        };
        if copies.is_empty() {
            return;
        }

        let target = EntityRef::Point(original);
        for committed in self.topology.usable_parent_groups(target) {
            let group = self.pending.entry(committed.id()).or_insert_with(|| committed.clone());
            split_member_slots(group, target, copies, policy);
        }
    }

    pub fn finish(self) -> Vec<Command> {
        self.pending.into_values().map(Command::ChangeGroup).collect()
    }
}

fn split_member_slots(group: &mut Group, target: EntityRef, copies: &[PointId], policy: SplitPolicy) {
    // role -> index of its last slot holding `target`
    let mut roles: Vec<(SmolStr, usize)> = Vec::new();
    for (index, member) in group.members().iter().enumerate() {
        if member.target != target {
            continue;
        }
        match roles.iter_mut().find(|(role, _)| *role == member.role) {
            Some(entry) => entry.1 = index,
            None => roles.push((member.role.clone(), index)),
        }
    }

    // Highest index first so earlier positions stay valid.
    roles.sort_by(|a, b| b.1.cmp(&a.1));
    let members = group.members_mut();
    for (role, index) in roles {
        let inserted = copies.iter().map(|copy| Member::new(role.clone(), *copy));
        members.splice(index + 1..index + 1, inserted);
        if policy == SplitPolicy::MoveToCopies {
            members.remove(index);
        }
    }
}

/// One-shot form of [`MembershipReconciler`] for a single original.
pub fn reconcile_memberships(
    topology: &Topology<'_>,
    policy: Option<SplitPolicy>,
    original: PointId,
    copies: &[PointId],
) -> Vec<Command> {
    let mut reconciler = MembershipReconciler::new(topology);
    reconciler.reconcile(policy, original, copies);
    reconciler.finish()
}

/// Splits tags between `original` and its not-yet-added `copies`.
///
/// [`SplitPolicy::KeepOnOriginal`] strips the copies in place. [`SplitPolicy::MoveToCopies`]
/// returns a change clearing the original's tags (same id). Anything else changes nothing.
pub fn reconcile_tags(policy: Option<SplitPolicy>, original: &Point, copies: &mut [Point]) -> Option<Command> {
    match policy? {
        SplitPolicy::KeepOnOriginal => {
            for copy in copies {
                copy.tags_mut().clear();
            }
            None
        }
        SplitPolicy::MoveToCopies => {
            if !original.is_tagged() {
                return None;
            }
            let mut stripped = original.clone();
            stripped.tags_mut().clear();
            Some(Command::ChangePoint(stripped))
        }
        SplitPolicy::DuplicateOntoBoth => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{reconcile_memberships, reconcile_tags, MembershipReconciler};
    use crate::collab::SplitPolicy;
    use crate::model::fixtures::{bus_stop, gid, lid, pid, tags};
    use crate::model::{DataSet, EntityFlags, Group, Member};
    use crate::ops::Command;
    use crate::query::Topology;

    fn changed_group(commands: &[Command]) -> &Group {
        match commands {
            [Command::ChangeGroup(group)] => group,
            other => panic!("expected one group change, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_onto_both_inserts_after_original() {
        let data_set = bus_stop();
        let topology = Topology::build(&data_set);

        let commands =
            reconcile_memberships(&topology, Some(SplitPolicy::DuplicateOntoBoth), pid(1), &[pid(-1), pid(-2)]);
        let group = changed_group(&commands);
        assert_eq!(
            group.members(),
            &[
                Member::new("stop", pid(1)),
                Member::new("stop", pid(-1)),
                Member::new("stop", pid(-2)),
                Member::new("", lid(40)),
            ]
        );
    }

    #[test]
    fn move_to_copies_replaces_original_slot() {
        let data_set = bus_stop();
        let topology = Topology::build(&data_set);

        let commands = reconcile_memberships(&topology, Some(SplitPolicy::MoveToCopies), pid(1), &[pid(-1)]);
        let group = changed_group(&commands);
        assert_eq!(group.members(), &[Member::new("stop", pid(-1)), Member::new("", lid(40))]);
        assert_eq!(group.id(), gid(400));
    }

    #[rstest]
    #[case::keep(Some(SplitPolicy::KeepOnOriginal))]
    #[case::no_change(None)]
    fn keep_or_no_choice_touches_nothing(#[case] policy: Option<SplitPolicy>) {
        let data_set = bus_stop();
        let topology = Topology::build(&data_set);
        assert!(reconcile_memberships(&topology, policy, pid(1), &[pid(-1)]).is_empty());
    }

    #[test]
    fn deleted_groups_are_skipped() {
        let mut data_set = bus_stop();
        let group = data_set
            .group(gid(400))
            .expect("group")
            .clone()
            .with_flags(EntityFlags { deleted: true, ..EntityFlags::default() });
        data_set.insert_group(group);
        let topology = Topology::build(&data_set);

        assert!(reconcile_memberships(&topology, Some(SplitPolicy::MoveToCopies), pid(1), &[pid(-1)]).is_empty());
    }

    #[test]
    fn one_change_per_group_across_roles_and_originals() {
        let mut data_set: DataSet = bus_stop();
        let group = Group::new(
            gid(400),
            vec![
                Member::new("stop", pid(1)),
                Member::new("platform", pid(1)),
                Member::new("stop", pid(3)),
            ],
        );
        data_set.insert_group(group);
        let topology = Topology::build(&data_set);

        let mut reconciler = MembershipReconciler::new(&topology);
        reconciler.reconcile(Some(SplitPolicy::DuplicateOntoBoth), pid(1), &[pid(-1)]);
        reconciler.reconcile(Some(SplitPolicy::DuplicateOntoBoth), pid(3), &[pid(-2)]);
        let commands = reconciler.finish();

        let group = changed_group(&commands);
        assert_eq!(
            group.members(),
            &[
                Member::new("stop", pid(1)),
                Member::new("stop", pid(-1)),
                Member::new("platform", pid(1)),
                Member::new("platform", pid(-1)),
                Member::new("stop", pid(3)),
                Member::new("stop", pid(-2)),
            ]
        );
    }

    #[test]
    fn keep_on_original_strips_copies() {
        let data_set = bus_stop();
        let original = data_set.point(pid(1)).expect("point");
        let mut copies = vec![original.duplicate(pid(-1))];

        assert_eq!(reconcile_tags(Some(SplitPolicy::KeepOnOriginal), original, &mut copies), None);
        assert!(copies[0].tags().is_empty());
        assert!(original.is_tagged());
    }

    #[test]
    fn move_to_copies_clears_original_in_place() {
        let data_set = bus_stop();
        let original = data_set.point(pid(1)).expect("point");
        let mut copies = vec![original.duplicate(pid(-1))];

        let command = reconcile_tags(Some(SplitPolicy::MoveToCopies), original, &mut copies);
        let Some(Command::ChangePoint(stripped)) = command else {
            panic!("expected point change, got {command:?}");
        };
        assert_eq!(stripped.id(), pid(1));
        assert!(stripped.tags().is_empty());
        assert_eq!(copies[0].tags(), &tags(&[("highway", "bus_stop"), ("name", "Main St")]));
    }
}
