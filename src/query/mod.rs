// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a data set.
//!
//! Back-references (which lines use a point, which groups contain an entity) are derived here
//! from the committed graph and never stored on the entities themselves.

pub mod topology;

pub use topology::Topology;
