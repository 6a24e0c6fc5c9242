// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{EntityRef, LineId, PointId};
use crate::query::Topology;

use super::UnglueError;

/// What an unglue request will do, decided from the selection alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A point used by two or more lines. Every line but one gets its own copy, or only
    /// `line` when the user picked one.
    MultiLine { point: PointId, line: Option<LineId> },
    /// A point visited several times by its only line.
    SelfCrossing { point: PointId, line: LineId },
    /// A tagged point on at most one line: copy it once.
    TaggedPoint { point: PointId },
    /// One line and the points on it that are shared with other lines.
    OneLineAnyPoints { line: LineId, points: Vec<PointId> },
}

impl Shape {
    /// Points whose copies this shape creates, in processing order.
    pub fn points(&self) -> Vec<PointId> {
        match self {
            Self::MultiLine { point, .. }
            | Self::SelfCrossing { point, .. }
            | Self::TaggedPoint { point } => vec![*point],
            Self::OneLineAnyPoints { points, .. } => points.clone(),
        }
    }
}

/// Classifies `selection` against the committed graph.
pub fn classify(topology: &Topology<'_>, selection: &[EntityRef]) -> Result<Shape, UnglueError> {
    let data_set = topology.data_set();
    if selection.iter().any(|entity| !data_set.contains(*entity)) {
        return Err(UnglueError::UnsupportedSelection);
    }

    if let Some((point, line)) = one_point_at_most_one_line(topology, selection) {
        return classify_single_point(topology, selection, point, line);
    }

    if let Some((line, points)) = one_line_any_points(topology, selection) {
        let explicit = selection.len() > 1;
        let glued = points
            .into_iter()
            .filter(|p| topology.usable_parent_line_count(*p) >= 2)
            .collect::<Vec<_>>();
        if glued.is_empty() {
            return Err(UnglueError::NoGluedPoints { explicit });
        }
        return Ok(Shape::OneLineAnyPoints { line, points: glued });
    }

    Err(UnglueError::UnsupportedSelection)
}

fn classify_single_point(
    topology: &Topology<'_>,
    selection: &[EntityRef],
    point: PointId,
    line: Option<LineId>,
) -> Result<Shape, UnglueError> {
    let usable = topology.usable_parent_lines(point).collect::<Vec<_>>();
    if usable.len() >= 2 {
        return Ok(Shape::MultiLine { point, line });
    }

    if let [only] = usable.as_slice() {
        if only.occurrences(point) >= 2 {
            return Ok(Shape::SelfCrossing { point, line: only.id() });
        }
    }

    // Not enough lines: maybe the user wants a copy of a tagged point.
    let tagged = topology.data_set().point(point).is_some_and(|p| p.is_tagged());
    let on_any_line = topology.parent_lines(point).next().is_some();
    if selection.len() == 1 && tagged && on_any_line {
        return Ok(Shape::TaggedPoint { point });
    }

    Err(UnglueError::NotGlued)
}

/// Exactly one point, or one point and one line that contains it.
fn one_point_at_most_one_line(
    topology: &Topology<'_>,
    selection: &[EntityRef],
) -> Option<(PointId, Option<LineId>)> {
    match selection {
        [EntityRef::Point(point)] => Some((*point, None)),
        [EntityRef::Point(point), EntityRef::Line(line)]
        | [EntityRef::Line(line), EntityRef::Point(point)] => {
            topology.line_contains(*line, *point).then_some((*point, Some(*line)))
        }
        _ => None,
    }
}

/// Exactly one line plus any number of its own points. No points means all of them.
fn one_line_any_points(
    topology: &Topology<'_>,
    selection: &[EntityRef],
) -> Option<(LineId, Vec<PointId>)> {
    let mut line = None;
    let mut points = Vec::new();
    for entity in selection {
        match entity {
            EntityRef::Line(id) => {
                if line.replace(*id).is_some() {
                    return None;
                }
            }
            EntityRef::Point(id) => {
                if !points.contains(id) {
                    points.push(*id);
                }
            }
            EntityRef::Group(_) => return None,
        }
    }

    let line = line?;
    if !points.iter().all(|p| topology.line_contains(line, *p)) {
        return None;
    }

    if points.is_empty() {
        let nodes = topology.data_set().line(line)?.nodes();
        for node in nodes {
            if !points.contains(node) {
                points.push(*node);
            }
        }
    }
    Some((line, points))
}
