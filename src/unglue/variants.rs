// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The four ways of building an unglue transaction.
//!
//! Every function here only reads the committed graph and returns a [`Plan`]. Nothing is
//! applied until the plan is handed to [`super::assemble::commit`].

use std::slice;

use crate::collab::{PolicyChoice, SplitPolicy};
use crate::model::{IdAllocator, LatLon, Line, LineId, Point, PointId};
use crate::ops::Command;
use crate::query::Topology;

use super::duplicate::{duplicate, duplicate_point, rewire};
use super::reconcile::{reconcile_memberships, reconcile_tags, MembershipReconciler};
use super::{dupe_into_label, dupe_points_into_label, UnglueError, UNGLUED_NODE_LABEL};

/// Commands for one transaction plus what to select once it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub name: String,
    pub commands: Vec<Command>,
    pub new_points: Vec<PointId>,
    pub select: Vec<PointId>,
    /// Lines whose parent groups should be reported after the commit.
    pub affected_lines: Vec<LineId>,
}

fn point<'a>(topology: &Topology<'a>, id: PointId) -> Result<&'a Point, UnglueError> {
    topology.data_set().point(id).ok_or(UnglueError::UnsupportedSelection)
}

/// Gives every parent line but one its own copy of `point`, or only `line` when given.
///
/// The line keeping the original is the first usable parent line on which `point` is not an
/// endpoint. If `point` is an endpoint everywhere, the first usable parent line keeps it.
pub fn multi_line(
    topology: &Topology<'_>,
    point_id: PointId,
    line: Option<LineId>,
    choice: PolicyChoice,
    ids: &mut IdAllocator,
) -> Result<Plan, UnglueError> {
    let original = point(topology, point_id)?;
    let lines = match line {
        Some(line_id) => {
            let line = topology.data_set().line(line_id).ok_or(UnglueError::UnsupportedSelection)?;
            vec![line]
        }
        None => lines_to_rewire(topology, point_id),
    };
    if lines.is_empty() {
        return Err(UnglueError::NotGlued);
    }

    let mut copies = Vec::with_capacity(lines.len());
    let mut rewired = Vec::with_capacity(lines.len());
    for line in &lines {
        let (copy, changed) = duplicate(original, line, ids);
        copies.push(copy);
        rewired.push(changed);
    }

    let tag_command = reconcile_tags(choice.tags, original, &mut copies);
    let copy_ids = copies.iter().map(Point::id).collect::<Vec<_>>();
    let group_commands = reconcile_memberships(topology, choice.memberships, point_id, &copy_ids);

    let affected_lines = rewired.iter().map(Line::id).collect();
    let mut commands = Vec::with_capacity(copies.len() * 2 + group_commands.len() + 1);
    for (copy, changed) in copies.into_iter().zip(rewired) {
        commands.push(Command::AddPoint(copy));
        commands.push(Command::ChangeLine(changed));
    }
    commands.extend(group_commands);
    commands.extend(tag_command);

    Ok(Plan {
        name: dupe_into_label(copy_ids.len()),
        commands,
        select: copy_ids.first().copied().into_iter().collect(),
        new_points: copy_ids,
        affected_lines,
    })
}

fn lines_to_rewire<'a>(topology: &Topology<'a>, point_id: PointId) -> Vec<&'a Line> {
    let mut owner = None;
    let mut rest = Vec::new();
    for line in topology.usable_parent_lines(point_id) {
        if owner.is_none() && !line.is_first_last_node(point_id) {
            owner = Some(line.id());
        } else {
            rest.push(line);
        }
    }
    if owner.is_none() && !rest.is_empty() {
        rest.remove(0);
    }
    rest
}

/// Keeps the first visit of `point_id` on `line_id` and gives every later visit a fresh copy.
pub fn self_crossing(
    topology: &Topology<'_>,
    point_id: PointId,
    line_id: LineId,
    choice: PolicyChoice,
    ids: &mut IdAllocator,
) -> Result<Plan, UnglueError> {
    let original = point(topology, point_id)?;
    let line = topology.data_set().line(line_id).ok_or(UnglueError::UnsupportedSelection)?;

    let mut seen = false;
    let mut copies = Vec::new();
    let mut nodes = Vec::with_capacity(line.nodes_count());
    for node in line.nodes() {
        if *node != point_id {
            nodes.push(*node);
        } else if !seen {
            nodes.push(*node);
            seen = true;
        } else {
            let copy = duplicate_point(original, ids);
            nodes.push(copy.id());
            copies.push(copy);
        }
    }
    if copies.is_empty() {
        return Err(UnglueError::NotGlued);
    }

    let tag_command = reconcile_tags(choice.tags, original, &mut copies);
    let copy_ids = copies.iter().map(Point::id).collect::<Vec<_>>();
    let group_commands = reconcile_memberships(topology, choice.memberships, point_id, &copy_ids);

    let mut commands = copies.into_iter().map(Command::AddPoint).collect::<Vec<_>>();
    commands.push(Command::ChangeLineNodes { line_id, nodes });
    commands.extend(group_commands);
    commands.extend(tag_command);

    Ok(Plan {
        name: dupe_into_label(copy_ids.len()),
        commands,
        select: copy_ids.first().copied().into_iter().collect(),
        new_points: copy_ids,
        affected_lines: vec![line_id],
    })
}

/// Copies a tagged point once.
///
/// When tags go to the copy, the copy takes the original's place in its line instead: the
/// line is rewired, tags and memberships are split with the opposite policies, and the
/// original is moved to `target` and selected. Otherwise the copy lands on `target`.
pub fn tagged_point(
    topology: &Topology<'_>,
    point_id: PointId,
    choice: PolicyChoice,
    target: Option<LatLon>,
    ids: &mut IdAllocator,
) -> Result<Plan, UnglueError> {
    let original = point(topology, point_id)?;
    let mut copy = duplicate_point(original, ids);
    let move_original = choice.tags == Some(SplitPolicy::MoveToCopies);

    let mut line_command = None;
    let mut policies = choice;
    if move_original {
        let line = topology
            .usable_parent_lines(point_id)
            .next()
            .or_else(|| topology.parent_lines(point_id).next())
            .ok_or(UnglueError::NotGlued)?;
        let rewired = rewire(line, point_id, copy.id());
        line_command = Some(Command::ChangeLineNodes { line_id: line.id(), nodes: rewired.nodes().to_vec() });
        policies = choice.opposite();
    } else if let Some(coord) = target {
        copy.set_coord(coord);
    }

    let tag_command = reconcile_tags(policies.tags, original, slice::from_mut(&mut copy));
    let group_commands = reconcile_memberships(topology, policies.memberships, point_id, &[copy.id()]);

    let copy_id = copy.id();
    let mut commands = vec![Command::AddPoint(copy)];
    commands.extend(line_command);
    commands.extend(group_commands);
    commands.extend(tag_command);
    if move_original {
        if let Some(coord) = target {
            commands.push(Command::MovePoint { point_id, coord });
        }
    }

    Ok(Plan {
        name: UNGLUED_NODE_LABEL.to_owned(),
        commands,
        new_points: vec![copy_id],
        select: vec![if move_original { point_id } else { copy_id }],
        affected_lines: Vec::new(),
    })
}

/// Gives `line_id` a fresh copy of each of `points`, leaving the other lines on the originals.
pub fn one_line_any_points(
    topology: &Topology<'_>,
    line_id: LineId,
    points: &[PointId],
    choice: PolicyChoice,
    ids: &mut IdAllocator,
) -> Result<Plan, UnglueError> {
    let mut line = topology.data_set().line(line_id).ok_or(UnglueError::UnsupportedSelection)?.clone();
    let mut reconciler = MembershipReconciler::new(topology);
    let mut commands = Vec::with_capacity(points.len() * 2 + 1);
    let mut copy_ids = Vec::with_capacity(points.len());

    for point_id in points {
        let original = point(topology, *point_id)?;
        let (copy, next) = duplicate(original, &line, ids);
        line = next;

        let mut copy = [copy];
        let tag_command = reconcile_tags(choice.tags, original, &mut copy);
        let [copy] = copy;
        reconciler.reconcile(choice.memberships, *point_id, &[copy.id()]);

        copy_ids.push(copy.id());
        commands.push(Command::AddPoint(copy));
        commands.extend(tag_command);
    }
    if copy_ids.is_empty() {
        return Err(UnglueError::NoGluedPoints { explicit: true });
    }

    commands.extend(reconciler.finish());
    // One replacement for the whole line, after every copy exists.
    commands.push(Command::ChangeLine(line));

    Ok(Plan {
        name: dupe_points_into_label(points.len(), points.len() + copy_ids.len()),
        commands,
        select: copy_ids.clone(),
        new_points: copy_ids,
        affected_lines: vec![line_id],
    })
}
