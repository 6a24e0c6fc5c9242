// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{IdAllocator, Line, Point, PointId};

/// Fresh copy of `original`: same coordinate and tags, unassigned id, no history.
pub fn duplicate_point(original: &Point, ids: &mut IdAllocator) -> Point {
    original.duplicate(ids.next_point_id())
}

/// Copies `original` and returns `line` with every occurrence of it replaced by the copy.
///
/// Nothing is applied: the caller adds the copy and replaces the line, once per physical line
/// even when several points of the same line are duplicated in a row.
pub fn duplicate(original: &Point, line: &Line, ids: &mut IdAllocator) -> (Point, Line) {
    let copy = duplicate_point(original, ids);
    let rewired = rewire(line, original.id(), copy.id());
    (copy, rewired)
}

/// `line` with every `from` replaced by `to`. Length and order are unchanged.
pub fn rewire(line: &Line, from: PointId, to: PointId) -> Line {
    let nodes = line.nodes().iter().map(|n| if *n == from { to } else { *n }).collect();
    let mut rewired = line.clone();
    rewired.set_nodes(nodes);
    rewired
}
