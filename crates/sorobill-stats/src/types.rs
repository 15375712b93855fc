//! Input views and output records.

use serde::Serialize;
use stellar_xdr::curr::{
    DiagnosticEvent, ScVal, SorobanTransactionData, TransactionEnvelope, TransactionMeta,
};

/// CPU and memory cost reported by a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// CPU instructions consumed
    pub cpu_instructions: u64,
    /// Memory bytes consumed
    pub memory_bytes: u64,
}

/// Decoded output of a successful `simulateTransaction` call.
#[derive(Debug, Clone)]
pub struct SimulationData {
    /// Events emitted during simulation, in emission order
    pub events: Vec<DiagnosticEvent>,
    /// Return value of the invocation, if any
    pub return_value: Option<ScVal>,
    /// Footprint and declared resource limits
    pub transaction_data: SorobanTransactionData,
    /// Simulated cost
    pub cost: CostBreakdown,
}

/// Decoded record of a transaction that was applied on-chain.
#[derive(Debug, Clone)]
pub struct ExecutionData {
    /// Versioned result metadata (`resultMetaXdr`)
    pub result_meta: TransactionMeta,
    /// Submitted envelope (`envelopeXdr`)
    pub envelope: TransactionEnvelope,
}

/// Resource statistics for a transaction.
///
/// `None` means the value cannot be computed from the available inputs,
/// which is distinct from a computed zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TxStats {
    pub cpu_insns: u64,
    pub mem_bytes: u64,
    pub entry_reads: u64,
    pub entry_writes: u64,
    pub read_bytes: u64,
    /// Covers both contract data entry size for invocations and the code
    /// size for Wasm uploads.
    pub write_bytes: u64,
    pub events_and_return_bytes: u64,
    /// Envelope size; the submitted transaction may grow once signatures
    /// are attached.
    pub min_txn_bytes: Option<u64>,
    /// Largest single ledger entry written by the transaction.
    pub max_entry_bytes: Option<u64>,
    pub max_key_bytes: Option<u64>,
}

/// Statistics derivable from a simulation alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    #[serde(rename = "CPU_instructions")]
    pub cpu_instructions: u64,
    #[serde(rename = "RAM")]
    pub ram: u64,
    pub ledger_entry_reads: u64,
    pub ledger_entry_writes: u64,
    pub ledger_write_bytes: u64,
    pub ledger_read_bytes: u64,
    pub events_and_return_value_size: u64,
}
