// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A data set owns points, lines (ordered point references) and groups (role-tagged members),
//! plus the editor's current selection. Back-references are never stored here; see `query`.

pub mod dataset;
pub mod entity;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod tags;

pub use dataset::{DataSet, DataSetSnapshot, SnapshotError};
pub use entity::{EntityFlags, EntityRef, Group, LatLon, Line, Member, Point};
pub use ids::{GroupId, Id, IdAllocator, IdError, LineId, PointId};
pub use tags::Tags;
