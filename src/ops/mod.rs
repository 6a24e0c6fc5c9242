// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation records for the graph.
//!
//! Commands are plain values. Applying a batch is atomic: either every command lands, or the data
//! set is left untouched. Each applied command leaves behind the old value it replaced so the
//! batch can be reverted as a unit.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{DataSet, EntityRef, Group, GroupId, LatLon, Line, LineId, Point, PointId};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a point that does not exist yet.
    AddPoint(Point),
    /// Replace a point wholesale (same id).
    ChangePoint(Point),
    ChangeLine(Line),
    ChangeGroup(Group),
    /// Replace only the point sequence of a line.
    ChangeLineNodes { line_id: LineId, nodes: Vec<PointId> },
    MovePoint { point_id: PointId, coord: LatLon },
    Sequence(Vec<Command>),
}

impl Command {
    /// The entity this command targets, `None` for sequences.
    pub fn target(&self) -> Option<EntityRef> {
        match self {
            Self::AddPoint(point) | Self::ChangePoint(point) => Some(EntityRef::Point(point.id())),
            Self::ChangeLine(line) => Some(EntityRef::Line(line.id())),
            Self::ChangeGroup(group) => Some(EntityRef::Group(group.id())),
            Self::ChangeLineNodes { line_id, .. } => Some(EntityRef::Line(*line_id)),
            Self::MovePoint { point_id, .. } => Some(EntityRef::Point(*point_id)),
            Self::Sequence(_) => None,
        }
    }

    /// Number of leaf commands, counting through nested sequences.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Sequence(commands) => commands.iter().map(Command::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// Minimal delta describing which entities changed as the result of applying commands.
///
/// This is intentionally coarse: it reports only added/removed/updated `EntityRef`s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity: EntityRef) {
        self.removed.remove(&entity);
        self.updated.remove(&entity);
        self.added.insert(entity);
    }

    fn record_removed(&mut self, entity: EntityRef) {
        // Removing something added in the same batch nets out to nothing.
        if self.added.remove(&entity) {
            return;
        }
        self.updated.remove(&entity);
        self.removed.insert(entity);
    }

    fn record_updated(&mut self, entity: EntityRef) {
        if self.added.contains(&entity) || self.removed.contains(&entity) {
            return;
        }
        self.updated.insert(entity);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

/// Old value captured while applying one command.
#[derive(Debug, Clone, PartialEq)]
enum Revert {
    RemovePoint(PointId),
    RestorePoint(Point),
    RestoreLine(Line),
    RestoreGroup(Group),
}

/// A batch of commands that has been applied, with what is needed to take it back.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub applied: usize,
    pub delta: Delta,
    reverts: Vec<Revert>,
}

impl Applied {
    /// Restores every value this batch replaced, newest first. Returns the delta of the revert.
    pub fn revert(self, data_set: &mut DataSet) -> Delta {
        let mut delta = DeltaBuilder::default();
        revert_all(data_set, self.reverts, &mut delta);
        delta.finish()
    }
}

pub fn apply_commands(data_set: &mut DataSet, commands: &[Command]) -> Result<Applied, ApplyError> {
    let mut reverts = Vec::new();
    let mut delta = DeltaBuilder::default();
    let mut applied = 0usize;

    for command in commands {
        if let Err(err) = apply_command(data_set, command, &mut reverts, &mut delta, &mut applied) {
            revert_all(data_set, reverts, &mut DeltaBuilder::default());
            return Err(err);
        }
    }

    Ok(Applied { applied, delta: delta.finish(), reverts })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("entity already exists ({0})")]
    AlreadyExists(EntityRef),
    #[error("entity not found ({0})")]
    NotFound(EntityRef),
    #[error("line {line_id} references missing point {point_id}")]
    MissingPoint { line_id: LineId, point_id: PointId },
    #[error("group {group_id} references missing member {member}")]
    MissingMember { group_id: GroupId, member: EntityRef },
}

// Extracted command-application implementation.
include!("ops_impl.rs");
