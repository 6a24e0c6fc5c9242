// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named transactions and the undo log capability.
//!
//! A transaction is applied to the data set as one unit and then handed to an [`UndoLog`]. The
//! log is passed in explicitly by the caller; nothing here is process-global.

use crate::model::DataSet;
use crate::ops::{apply_commands, Applied, ApplyError, Command, Delta};

/// An ordered, named batch of commands that is applied and reverted as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    name: String,
    commands: Vec<Command>,
}

impl Transaction {
    pub fn new(name: impl Into<String>, commands: Vec<Command>) -> Self {
        Self { name: name.into(), commands }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn execute(self, data_set: &mut DataSet) -> Result<AppliedTransaction, ApplyError> {
        let applied = apply_commands(data_set, &self.commands)?;
        Ok(AppliedTransaction { transaction: self, applied })
    }
}

/// A transaction that has been applied to a data set.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedTransaction {
    transaction: Transaction,
    applied: Applied,
}

impl AppliedTransaction {
    pub fn name(&self) -> &str {
        self.transaction.name()
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn delta(&self) -> &Delta {
        &self.applied.delta
    }

    /// Reverts the transaction. The returned transaction can be executed again to redo it.
    pub fn undo(self, data_set: &mut DataSet) -> (Transaction, Delta) {
        let delta = self.applied.revert(data_set);
        prune_selection(data_set);
        (self.transaction, delta)
    }
}

fn prune_selection(data_set: &mut DataSet) {
    let kept = data_set.selection().iter().copied().filter(|e| data_set.contains(*e)).collect::<Vec<_>>();
    data_set.set_selection(kept);
}

/// Receiver of committed transactions.
pub trait UndoLog {
    fn append(&mut self, transaction: AppliedTransaction);
}

/// Minimal in-memory undo/redo stack.
#[derive(Debug, Default)]
pub struct UndoStack {
    done: Vec<AppliedTransaction>,
    undone: Vec<Transaction>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    pub fn last(&self) -> Option<&AppliedTransaction> {
        self.done.last()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo(&mut self, data_set: &mut DataSet) -> Option<Delta> {
        let applied = self.done.pop()?;
        let (transaction, delta) = applied.undo(data_set);
        self.undone.push(transaction);
        Some(delta)
    }

    pub fn redo(&mut self, data_set: &mut DataSet) -> Result<Option<Delta>, ApplyError> {
        let Some(transaction) = self.undone.pop() else {
            return Ok(None);
        };
        match transaction.clone().execute(data_set) {
            Ok(applied) => {
                let delta = applied.delta().clone();
                self.done.push(applied);
                Ok(Some(delta))
            }
            Err(err) => {
                self.undone.push(transaction);
                Err(err)
            }
        }
    }
}

impl UndoLog for UndoStack {
    fn append(&mut self, transaction: AppliedTransaction) {
        self.done.push(transaction);
        self.undone.clear();
    }
}
