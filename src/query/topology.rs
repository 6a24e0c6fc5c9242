// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::model::{DataSet, EntityRef, Group, GroupId, Line, LineId, PointId};

/// Back-reference index over a committed [`DataSet`].
///
/// Parent lines and parent groups are enumerated in ascending id order, so locally created
/// (negative id) entities come first. Callers that pick "the first" parent rely on this.
#[derive(Debug)]
pub struct Topology<'a> {
    data_set: &'a DataSet,
    line_referrers: BTreeMap<PointId, SmallVec<[LineId; 4]>>,
    group_referrers: BTreeMap<EntityRef, SmallVec<[GroupId; 2]>>,
}

impl<'a> Topology<'a> {
    pub fn build(data_set: &'a DataSet) -> Self {
        let mut line_referrers: BTreeMap<PointId, SmallVec<[LineId; 4]>> = BTreeMap::new();
        for line in data_set.lines().values() {
            for point_id in line.nodes() {
                let referrers = line_referrers.entry(*point_id).or_default();
                if !referrers.contains(&line.id()) {
                    referrers.push(line.id());
                }
            }
        }

        let mut group_referrers: BTreeMap<EntityRef, SmallVec<[GroupId; 2]>> = BTreeMap::new();
        for group in data_set.groups().values() {
            for member in group.members() {
                let referrers = group_referrers.entry(member.target).or_default();
                if !referrers.contains(&group.id()) {
                    referrers.push(group.id());
                }
            }
        }

        Self { data_set, line_referrers, group_referrers }
    }

    pub fn data_set(&self) -> &'a DataSet {
        self.data_set
    }

    /// Every line referencing `point_id`, including deleted or incomplete ones.
    pub fn parent_lines(&self, point_id: PointId) -> impl Iterator<Item = &'a Line> + '_ {
        let data_set = self.data_set;
        self.line_referrers
            .get(&point_id)
            .into_iter()
            .flatten()
            .filter_map(move |line_id| data_set.line(*line_id))
    }

    pub fn usable_parent_lines(&self, point_id: PointId) -> impl Iterator<Item = &'a Line> + '_ {
        self.parent_lines(point_id).filter(|line| line.usable() && line.nodes_count() >= 1)
    }

    pub fn usable_parent_line_count(&self, point_id: PointId) -> usize {
        self.usable_parent_lines(point_id).count()
    }

    /// Every group with at least one member referencing `entity`.
    pub fn parent_groups(&self, entity: EntityRef) -> impl Iterator<Item = &'a Group> + '_ {
        let data_set = self.data_set;
        self.group_referrers
            .get(&entity)
            .into_iter()
            .flatten()
            .filter_map(move |group_id| data_set.group(*group_id))
    }

    pub fn usable_parent_groups(&self, entity: EntityRef) -> impl Iterator<Item = &'a Group> + '_ {
        self.parent_groups(entity).filter(|group| group.usable())
    }

    pub fn line_contains(&self, line_id: LineId, point_id: PointId) -> bool {
        self.data_set.line(line_id).is_some_and(|line| line.contains(point_id))
    }

    /// `false` for unknown, deleted or incomplete entities.
    pub fn usable(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Point(id) => self.data_set.point(id).is_some_and(|p| p.usable()),
            EntityRef::Line(id) => self.data_set.line(id).is_some_and(|l| l.usable()),
            EntityRef::Group(id) => self.data_set.group(id).is_some_and(|g| g.usable()),
        }
    }
}
