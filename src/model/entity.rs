// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::{GroupId, LineId, PointId};
use super::tags::Tags;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7},{:.7}", self.lat, self.lon)
    }
}

/// Reference to any entity of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "ref", rename_all = "snake_case")]
pub enum EntityRef {
    Point(PointId),
    Line(LineId),
    Group(GroupId),
}

impl EntityRef {
    pub fn as_point(&self) -> Option<PointId> {
        match self {
            Self::Point(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<LineId> {
        match self {
            Self::Line(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<GroupId> {
        match self {
            Self::Group(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(id) => write!(f, "p{id}"),
            Self::Line(id) => write!(f, "l{id}"),
            Self::Group(id) => write!(f, "g{id}"),
        }
    }
}

impl From<PointId> for EntityRef {
    fn from(id: PointId) -> Self {
        Self::Point(id)
    }
}

impl From<LineId> for EntityRef {
    fn from(id: LineId) -> Self {
        Self::Line(id)
    }
}

impl From<GroupId> for EntityRef {
    fn from(id: GroupId) -> Self {
        Self::Group(id)
    }
}

/// Lifecycle flags shared by every entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFlags {
    pub modified: bool,
    pub deleted: bool,
    pub incomplete: bool,
}

impl EntityFlags {
    pub fn usable(&self) -> bool {
        !self.deleted && !self.incomplete
    }
}

/// A vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    #[serde(default)]
    version: u32,
    coord: LatLon,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    flags: EntityFlags,
}

impl Point {
    pub fn new(id: PointId, coord: LatLon) -> Self {
        Self { id, version: if id.is_new() { 0 } else { 1 }, coord, tags: Tags::new(), flags: EntityFlags::default() }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Copy of this point under `id`: same coordinate and tags, no version, fresh flags.
    pub fn duplicate(&self, id: PointId) -> Self {
        Self { id, version: 0, coord: self.coord, tags: self.tags.clone(), flags: EntityFlags::default() }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn coord(&self) -> LatLon {
        self.coord
    }

    pub fn set_coord(&mut self, coord: LatLon) {
        self.coord = coord;
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut EntityFlags {
        &mut self.flags
    }

    pub fn usable(&self) -> bool {
        self.flags.usable()
    }
}

/// An ordered polyline over shared points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    id: LineId,
    #[serde(default)]
    version: u32,
    nodes: Vec<PointId>,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    flags: EntityFlags,
}

impl Line {
    pub fn new(id: LineId, nodes: Vec<PointId>) -> Self {
        Self { id, version: if id.is_new() { 0 } else { 1 }, nodes, tags: Tags::new(), flags: EntityFlags::default() }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn nodes(&self) -> &[PointId] {
        &self.nodes
    }

    pub fn set_nodes(&mut self, nodes: Vec<PointId>) {
        self.nodes = nodes;
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, point_id: PointId) -> bool {
        self.nodes.contains(&point_id)
    }

    pub fn occurrences(&self, point_id: PointId) -> usize {
        self.nodes.iter().filter(|n| **n == point_id).count()
    }

    /// `true` when `point_id` is the first or the last node of the line.
    pub fn is_first_last_node(&self, point_id: PointId) -> bool {
        self.nodes.first() == Some(&point_id) || self.nodes.last() == Some(&point_id)
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut EntityFlags {
        &mut self.flags
    }

    pub fn usable(&self) -> bool {
        self.flags.usable()
    }
}

/// One slot of a group: a role and the entity filling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub role: SmolStr,
    pub target: EntityRef,
}

impl Member {
    pub fn new(role: impl Into<SmolStr>, target: impl Into<EntityRef>) -> Self {
        Self { role: role.into(), target: target.into() }
    }
}

/// A named aggregate of typed members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    #[serde(default)]
    version: u32,
    members: Vec<Member>,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    flags: EntityFlags,
}

impl Group {
    pub fn new(id: GroupId, members: Vec<Member>) -> Self {
        Self { id, version: if id.is_new() { 0 } else { 1 }, members, tags: Tags::new(), flags: EntityFlags::default() }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Vec<Member> {
        &mut self.members
    }

    pub fn has_member(&self, target: EntityRef) -> bool {
        self.members.iter().any(|m| m.target == target)
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut EntityFlags {
        &mut self.flags
    }

    pub fn usable(&self) -> bool {
        self.flags.usable()
    }

    /// Human readable label: `name`, then `ref`, then the id.
    pub fn display_name(&self) -> String {
        self.tags
            .get("name")
            .or_else(|| self.tags.get("ref"))
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("group {}", self.id))
    }
}
