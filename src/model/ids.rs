// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A numeric entity identifier, tagged with the entity kind it refers to.
///
/// Positive values are persistent ids assigned by the upstream database. Negative values are
/// *unassigned*: the entity was created locally and has no history yet. Zero is never valid.
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value == 0 {
            return Err(IdError::Zero);
        }
        Ok(Self { value, _marker: PhantomData })
    }

    pub(crate) fn new_unchecked(value: i64) -> Self {
        debug_assert_ne!(value, 0);
        Self { value, _marker: PhantomData }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// `true` when the id was allocated locally and carries no history.
    pub fn is_new(&self) -> bool {
        self.value < 0
    }
}

// Manual impls: deriving would put bounds on `T`, which is only a marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| IdError::NotNumeric(s.to_owned()))?;
        Self::new(value)
    }
}

impl<T> TryFrom<i64> for Id<T> {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be zero")]
    Zero,
    #[error("id must be an integer, got '{0}'")]
    NotNumeric(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointIdTag {}
pub type PointId = Id<PointIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineIdTag {}
pub type LineId = Id<LineIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupIdTag {}
pub type GroupId = Id<GroupIdTag>;

/// Hands out fresh unassigned ids below every id already present in a data set.
///
/// Allocation is local to the allocator; the data set it was derived from is not touched.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    pub(crate) fn below(lowest_in_use: i64) -> Self {
        Self { next: lowest_in_use.min(0).saturating_sub(1) }
    }

    pub fn next_point_id(&mut self) -> PointId {
        PointId::new_unchecked(self.bump())
    }

    pub fn next_line_id(&mut self) -> LineId {
        LineId::new_unchecked(self.bump())
    }

    pub fn next_group_id(&mut self) -> GroupId {
        GroupId::new_unchecked(self.bump())
    }

    fn bump(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.saturating_sub(1);
        id
    }
}
