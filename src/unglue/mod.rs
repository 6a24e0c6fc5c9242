// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The unglue action.
//!
//! `run` reads the data set's selection, classifies it into a [`Shape`], asks the host for a
//! policy when one matters, builds the commands and commits them as one named transaction.
//! Classification, policy choice and planning never mutate the data set; the only write is
//! the final commit.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::collab::{plural, Collaborators, Notice, PolicyChoice, PolicyChooser};
use crate::history::Transaction;
use crate::model::{DataSet, EntityRef, LatLon, LineId, PointId};
use crate::ops::{ApplyError, Delta};
use crate::query::Topology;

pub mod assemble;
pub mod classify;
pub mod duplicate;
pub mod reconcile;
pub mod variants;

pub use classify::{classify, Shape};
pub use variants::Plan;

/// Label passed to the outlying-edit gate.
pub const OPERATION: &str = "unglue";

pub(crate) const UNGLUED_NODE_LABEL: &str = "Unglued Node";

const UNSUPPORTED_SELECTION: &str = "The current selection cannot be used for unglueing.

Select either:
* One tagged node, or
* One node that is used by more than one line, or
* One node that is used by more than one line and one of those lines, or
* One line that has one or more nodes that are used by more than one line, or
* One line and one or more of its nodes that are used by more than one line.

Note: If a line is selected, this line will get fresh copies of the unglued
nodes and the new nodes will be selected. Otherwise, all lines will get their
own copy and all nodes will be selected.";

/// Transaction name for splitting one point into `copies + 1` points.
pub fn dupe_into_label(copies: usize) -> String {
    let total = copies + 1;
    format!("Dupe into {total} {}", plural(total, "node", "nodes"))
}

/// Transaction name for splitting `points` points of one line into `total` points.
pub fn dupe_points_into_label(points: usize, total: usize) -> String {
    format!("Dupe {points} {} into {total} nodes", plural(points, "node", "nodes"))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnglueError {
    #[error("{}", UNSUPPORTED_SELECTION)]
    UnsupportedSelection,
    #[error("This node is not glued to anything else.")]
    NotGlued,
    /// `explicit` is set when the user picked the points instead of only a line.
    #[error("{}", no_glued_points_message(.explicit))]
    NoGluedPoints { explicit: bool },
    #[error("The data set is read-only.")]
    Locked,
    #[error("failed to apply unglue: {0}")]
    Apply(#[from] ApplyError),
}

fn no_glued_points_message(explicit: &bool) -> &'static str {
    if *explicit {
        "None of these nodes are glued to anything else."
    } else {
        "None of this line's nodes are glued to anything else."
    }
}

/// How long a host should keep an error on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Short,
    Default,
    VeryLong,
}

impl UnglueError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnsupportedSelection => Severity::VeryLong,
            Self::NotGlued => Severity::Short,
            Self::NoGluedPoints { .. } | Self::Locked | Self::Apply(_) => Severity::Default,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnglueConfig {
    /// Warn when a rewired line belongs to a group.
    #[serde(default = "default_true")]
    pub notify_affected_groups: bool,
    /// Ask the outlying-edit gate before building anything.
    #[serde(default = "default_true")]
    pub confirm_outlying: bool,
}

impl Default for UnglueConfig {
    fn default() -> Self {
        Self { notify_affected_groups: true, confirm_outlying: true }
    }
}

impl UnglueConfig {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnglueSummary {
    pub name: String,
    pub new_points: Vec<PointId>,
    pub delta: Delta,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnglueOutcome {
    Committed(UnglueSummary),
    /// The user backed out of a dialog. Nothing was changed.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct UnglueAction {
    config: UnglueConfig,
    target: Option<LatLon>,
}

impl UnglueAction {
    pub fn new(config: UnglueConfig) -> Self {
        Self { config, target: None }
    }

    /// Pointer location used when a tagged point is copied off its line.
    pub fn with_target(mut self, target: LatLon) -> Self {
        self.target = Some(target);
        self
    }

    pub fn config(&self) -> &UnglueConfig {
        &self.config
    }

    pub fn is_enabled(&self, data_set: &DataSet) -> bool {
        !data_set.selection().is_empty() && !data_set.is_locked()
    }

    pub fn run(
        &self,
        data_set: &mut DataSet,
        collab: &mut Collaborators<'_>,
    ) -> Result<UnglueOutcome, UnglueError> {
        if data_set.is_locked() {
            return Err(UnglueError::Locked);
        }

        let selection = data_set.selection().to_vec();
        let (plan, affected_groups) = {
            let topology = Topology::build(data_set);
            let shape = classify(&topology, &selection)?;
            debug!(?shape, selected = selection.len(), "classified unglue selection");

            let candidates = shape.points();
            if self.config.confirm_outlying && !collab.gate.confirm(&candidates, OPERATION) {
                trace!("outlying unglue not confirmed");
                return Ok(UnglueOutcome::Cancelled);
            }

            let require_tag_decision = matches!(shape, Shape::TaggedPoint { .. });
            let choice =
                match choose_policy_if_needed(&topology, &candidates, require_tag_decision, &mut *collab.policy) {
                    Ok(choice) => choice,
                    Err(cancelled) => {
                        trace!(%cancelled, "unglue policy choice cancelled");
                        return Ok(UnglueOutcome::Cancelled);
                    }
                };

            let mut ids = data_set.allocate_ids();
            let plan = match &shape {
                Shape::MultiLine { point, line } => variants::multi_line(&topology, *point, *line, choice, &mut ids),
                Shape::SelfCrossing { point, line } => {
                    variants::self_crossing(&topology, *point, *line, choice, &mut ids)
                }
                Shape::TaggedPoint { point } => {
                    variants::tagged_point(&topology, *point, choice, self.target, &mut ids)
                }
                Shape::OneLineAnyPoints { line, points } => {
                    variants::one_line_any_points(&topology, *line, points, choice, &mut ids)
                }
            }?;
            let affected_groups = affected_group_names(&topology, &plan.affected_lines);
            (plan, affected_groups)
        };

        let Plan { name, commands, new_points, select, .. } = plan;
        let transaction = Transaction::new(name.clone(), commands);
        let selection = select.into_iter().map(EntityRef::Point);
        let delta = match assemble::commit(data_set, &mut *collab.undo_log, transaction, selection) {
            Ok(delta) => delta,
            Err(err) => {
                warn!(%err, %name, "unglue transaction failed to apply");
                return Err(err.into());
            }
        };
        info!(%name, new_points = new_points.len(), "committed unglue");

        if self.config.notify_affected_groups && !affected_groups.is_empty() {
            collab.notifier.notify(&Notice::AffectedGroups { names: affected_groups });
        }

        Ok(UnglueOutcome::Committed(UnglueSummary { name, new_points, delta }))
    }
}

/// Asks `chooser` only when a candidate carries tags or belongs to a usable group.
fn choose_policy_if_needed(
    topology: &Topology<'_>,
    candidates: &[PointId],
    require_tag_decision: bool,
    chooser: &mut dyn PolicyChooser,
) -> Result<PolicyChoice, crate::collab::Cancelled> {
    let points = candidates
        .iter()
        .filter_map(|id| topology.data_set().point(*id))
        .cloned()
        .collect::<Vec<_>>();
    let needed = points.iter().any(|point| {
        point.is_tagged() || topology.usable_parent_groups(EntityRef::Point(point.id())).next().is_some()
    });
    if !needed {
        return Ok(PolicyChoice::default());
    }
    chooser.choose_policy(&points, require_tag_decision)
}

/// Sorted, unique display names of the usable groups containing any of `lines`.
fn affected_group_names(topology: &Topology<'_>, lines: &[LineId]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| topology.usable_parent_groups(EntityRef::Line(*line)))
        .map(|group| group.display_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
