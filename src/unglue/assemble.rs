// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::history::{Transaction, UndoLog};
use crate::model::{DataSet, EntityRef};
use crate::ops::{ApplyError, Delta};

/// Applies `transaction`, hands it to `undo_log` and replaces the selection with `selection`.
///
/// On error nothing has changed: the data set, the log and the selection are untouched.
pub fn commit(
    data_set: &mut DataSet,
    undo_log: &mut dyn UndoLog,
    transaction: Transaction,
    selection: impl IntoIterator<Item = EntityRef>,
) -> Result<Delta, ApplyError> {
    let applied = transaction.execute(data_set)?;
    let delta = applied.delta().clone();
    undo_log.append(applied);
    data_set.set_selection(selection);
    Ok(delta)
}
