// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unglue: split a point shared by several lines into position-identical copies.
//!
//! The graph lives in [`model`], derived back-references in [`query`], mutation records in
//! [`ops`] and undoable transactions in [`history`]. The action itself is [`unglue`]; the
//! dialogs and logs it talks to are traits in [`collab`].

pub mod collab;
pub mod history;
pub mod logging;
pub mod model;
pub mod ops;
pub mod query;
pub mod unglue;

pub use collab::{Collaborators, Notice, PolicyChoice, PolicyChooser, SplitPolicy};
pub use history::{Transaction, UndoLog, UndoStack};
pub use model::{DataSet, EntityRef, LatLon};
pub use unglue::{UnglueAction, UnglueConfig, UnglueError, UnglueOutcome};
