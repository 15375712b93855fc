//! Ledger entry sizes written by an applied transaction.

use stellar_xdr::curr::{
    LedgerEntry, LedgerEntryChange, LedgerEntryChanges, Limits, TransactionMeta, WriteXdr,
};

use crate::error::StatsError;

/// Every XDR union is prefixed by a 4-byte discriminant.
const UNION_DISCRIMINANT_LEN: usize = 4;

/// Per-operation change sets, for every metadata version.
pub fn operation_changes(meta: &TransactionMeta) -> Vec<&LedgerEntryChanges> {
    match meta {
        TransactionMeta::V0(ops) => ops.iter().map(|op| &op.changes).collect(),
        TransactionMeta::V1(v1) => v1.operations.iter().map(|op| &op.changes).collect(),
        TransactionMeta::V2(v2) => v2.operations.iter().map(|op| &op.changes).collect(),
        TransactionMeta::V3(v3) => v3.operations.iter().map(|op| &op.changes).collect(),
        TransactionMeta::V4(v4) => v4.operations.iter().map(|op| &op.changes).collect(),
    }
}

/// Serialized size of an entry's data, without the `LedgerEntryData`
/// discriminant.
pub fn entry_data_size(entry: &LedgerEntry) -> Result<u64, StatsError> {
    let len = entry.data.to_xdr(Limits::none())?.len();
    Ok(len.saturating_sub(UNION_DISCRIMINANT_LEN) as u64)
}

/// Size a change contributes, if any.
///
/// Only created and updated entries carry new data. Removals name a key,
/// and state/restored snapshots describe entries as they were before the
/// operation.
pub fn change_size(change: &LedgerEntryChange) -> Result<Option<u64>, StatsError> {
    match change {
        LedgerEntryChange::Created(entry) | LedgerEntryChange::Updated(entry) => {
            entry_data_size(entry).map(Some)
        }
        LedgerEntryChange::Removed(_)
        | LedgerEntryChange::State(_)
        | LedgerEntryChange::Restored(_) => Ok(None),
    }
}

/// Sizes of all created/updated entries across every operation, in order.
pub fn entry_sizes(meta: &TransactionMeta) -> Result<Vec<u64>, StatsError> {
    let mut sizes = Vec::new();
    for changes in operation_changes(meta) {
        for change in changes.0.iter() {
            if let Some(size) = change_size(change)? {
                sizes.push(size);
            }
        }
    }
    Ok(sizes)
}

/// Largest written entry, or 0 when nothing was written.
pub fn max_entry_size(meta: &TransactionMeta) -> Result<u64, StatsError> {
    Ok(entry_sizes(meta)?.into_iter().max().unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
