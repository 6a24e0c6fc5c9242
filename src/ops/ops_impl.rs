// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Command application helpers used by `apply_commands`.
/// Keeps `ops::mod` focused on public command types and orchestration.
fn apply_command(
    data_set: &mut DataSet,
    command: &Command,
    reverts: &mut Vec<Revert>,
    delta: &mut DeltaBuilder,
    applied: &mut usize,
) -> Result<(), ApplyError> {
    match command {
        Command::AddPoint(point) => {
            if data_set.point(point.id()).is_some() {
                return Err(ApplyError::AlreadyExists(EntityRef::Point(point.id())));
            }
            data_set.insert_point(point.clone());
            reverts.push(Revert::RemovePoint(point.id()));
            delta.record_added(EntityRef::Point(point.id()));
        }
        Command::ChangePoint(point) => {
            let Some(old) = data_set.point(point.id()).cloned() else {
                return Err(ApplyError::NotFound(EntityRef::Point(point.id())));
            };
            let mut replacement = point.clone();
            replacement.flags_mut().modified = true;
            data_set.insert_point(replacement);
            reverts.push(Revert::RestorePoint(old));
            delta.record_updated(EntityRef::Point(point.id()));
        }
        Command::ChangeLine(line) => {
            let Some(old) = data_set.line(line.id()).cloned() else {
                return Err(ApplyError::NotFound(EntityRef::Line(line.id())));
            };
            ensure_points_exist(data_set, line.id(), line.nodes())?;
            let mut replacement = line.clone();
            replacement.flags_mut().modified = true;
            data_set.insert_line(replacement);
            reverts.push(Revert::RestoreLine(old));
            delta.record_updated(EntityRef::Line(line.id()));
        }
        Command::ChangeGroup(group) => {
            let Some(old) = data_set.group(group.id()).cloned() else {
                return Err(ApplyError::NotFound(EntityRef::Group(group.id())));
            };
            if let Some(missing) = group.members().iter().find(|m| !data_set.contains(m.target)) {
                return Err(ApplyError::MissingMember { group_id: group.id(), member: missing.target });
            }
            let mut replacement = group.clone();
            replacement.flags_mut().modified = true;
            data_set.insert_group(replacement);
            reverts.push(Revert::RestoreGroup(old));
            delta.record_updated(EntityRef::Group(group.id()));
        }
        Command::ChangeLineNodes { line_id, nodes } => {
            ensure_points_exist(data_set, *line_id, nodes)?;
            let Some(line) = data_set.line_mut(*line_id) else {
                return Err(ApplyError::NotFound(EntityRef::Line(*line_id)));
            };
            let old = line.clone();
            line.set_nodes(nodes.clone());
            line.flags_mut().modified = true;
            reverts.push(Revert::RestoreLine(old));
            delta.record_updated(EntityRef::Line(*line_id));
        }
        Command::MovePoint { point_id, coord } => {
            let Some(point) = data_set.point_mut(*point_id) else {
                return Err(ApplyError::NotFound(EntityRef::Point(*point_id)));
            };
            let old = point.clone();
            point.set_coord(*coord);
            point.flags_mut().modified = true;
            reverts.push(Revert::RestorePoint(old));
            delta.record_updated(EntityRef::Point(*point_id));
        }
        Command::Sequence(commands) => {
            for command in commands {
                apply_command(data_set, command, reverts, delta, applied)?;
            }
            return Ok(());
        }
    }

    *applied += 1;
    Ok(())
}

fn ensure_points_exist(data_set: &DataSet, line_id: LineId, nodes: &[PointId]) -> Result<(), ApplyError> {
    match nodes.iter().find(|n| data_set.point(**n).is_none()) {
        Some(point_id) => Err(ApplyError::MissingPoint { line_id, point_id: *point_id }),
        None => Ok(()),
    }
}

fn revert_all(data_set: &mut DataSet, reverts: Vec<Revert>, delta: &mut DeltaBuilder) {
    for revert in reverts.into_iter().rev() {
        match revert {
            Revert::RemovePoint(point_id) => {
                data_set.remove_point(point_id);
                delta.record_removed(EntityRef::Point(point_id));
            }
            Revert::RestorePoint(point) => {
                delta.record_updated(EntityRef::Point(point.id()));
                data_set.insert_point(point);
            }
            Revert::RestoreLine(line) => {
                delta.record_updated(EntityRef::Line(line.id()));
                data_set.insert_line(line);
            }
            Revert::RestoreGroup(group) => {
                delta.record_updated(EntityRef::Group(group.id()));
                data_set.insert_group(group);
            }
        }
    }
}
