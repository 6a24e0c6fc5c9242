// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{EntityRef, Group, Line, Point};
use super::ids::{GroupId, IdAllocator, LineId, PointId};

/// The committed graph the editor works against, plus the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    points: BTreeMap<PointId, Point>,
    lines: BTreeMap<LineId, Line>,
    groups: BTreeMap<GroupId, Group>,
    selection: Vec<EntityRef>,
    locked: bool,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &BTreeMap<PointId, Point> {
        &self.points
    }

    pub fn lines(&self) -> &BTreeMap<LineId, Line> {
        &self.lines
    }

    pub fn groups(&self) -> &BTreeMap<GroupId, Group> {
        &self.groups
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(&id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Point(id) => self.points.contains_key(&id),
            EntityRef::Line(id) => self.lines.contains_key(&id),
            EntityRef::Group(id) => self.groups.contains_key(&id),
        }
    }

    /// Inserts or replaces a point. Intended for building data sets; edits go through `ops`.
    pub fn insert_point(&mut self, point: Point) -> Option<Point> {
        self.points.insert(point.id(), point)
    }

    pub fn insert_line(&mut self, line: Line) -> Option<Line> {
        self.lines.insert(line.id(), line)
    }

    pub fn insert_group(&mut self, group: Group) -> Option<Group> {
        self.groups.insert(group.id(), group)
    }

    pub(crate) fn remove_point(&mut self, id: PointId) -> Option<Point> {
        self.points.remove(&id)
    }

    pub(crate) fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(&id)
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(&id)
    }

    pub fn selection(&self) -> &[EntityRef] {
        &self.selection
    }

    /// Replaces the selection. Duplicates are dropped, first occurrence wins.
    pub fn set_selection(&mut self, selection: impl IntoIterator<Item = EntityRef>) {
        self.selection.clear();
        for entity in selection {
            if !self.selection.contains(&entity) {
                self.selection.push(entity);
            }
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Allocator for fresh unassigned ids that cannot collide with anything in this set.
    pub fn allocate_ids(&self) -> IdAllocator {
        let lowest = [
            self.points.keys().next().map(|id| id.value()),
            self.lines.keys().next().map(|id| id.value()),
            self.groups.keys().next().map(|id| id.value()),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(0);
        IdAllocator::below(lowest)
    }

    pub fn from_snapshot(snapshot: DataSetSnapshot) -> Result<Self, SnapshotError> {
        let mut data_set = Self::new();
        for point in snapshot.points {
            let id = point.id();
            if data_set.insert_point(point).is_some() {
                return Err(SnapshotError::DuplicateEntity(EntityRef::Point(id)));
            }
        }
        for line in snapshot.lines {
            let id = line.id();
            if data_set.insert_line(line).is_some() {
                return Err(SnapshotError::DuplicateEntity(EntityRef::Line(id)));
            }
        }
        for group in snapshot.groups {
            let id = group.id();
            if data_set.insert_group(group).is_some() {
                return Err(SnapshotError::DuplicateEntity(EntityRef::Group(id)));
            }
        }

        for line in data_set.lines.values() {
            if let Some(missing) = line.nodes().iter().find(|n| !data_set.points.contains_key(n)) {
                return Err(SnapshotError::DanglingReference {
                    from: EntityRef::Line(line.id()),
                    to: EntityRef::Point(*missing),
                });
            }
        }
        for group in data_set.groups.values() {
            if let Some(missing) = group.members().iter().find(|m| !data_set.contains(m.target)) {
                return Err(SnapshotError::DanglingReference {
                    from: EntityRef::Group(group.id()),
                    to: missing.target,
                });
            }
        }

        data_set.set_selection(snapshot.selection);
        if let Some(missing) = data_set.selection.iter().find(|e| !data_set.contains(**e)) {
            return Err(SnapshotError::UnknownSelection(*missing));
        }
        Ok(data_set)
    }

    pub fn to_snapshot(&self) -> DataSetSnapshot {
        DataSetSnapshot {
            points: self.points.values().cloned().collect(),
            lines: self.lines.values().cloned().collect(),
            groups: self.groups.values().cloned().collect(),
            selection: self.selection.clone(),
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, SnapshotError> {
        let snapshot: DataSetSnapshot = serde_json::from_str(input)?;
        Self::from_snapshot(snapshot)
    }
}

/// Flat, serializable form of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSetSnapshot {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub selection: Vec<EntityRef>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entity {0} appears more than once")]
    DuplicateEntity(EntityRef),
    #[error("{from} references missing entity {to}")]
    DanglingReference { from: EntityRef, to: EntityRef },
    #[error("selection references missing entity {0}")]
    UnknownSelection(EntityRef),
}
