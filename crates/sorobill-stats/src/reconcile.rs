//! Reconcile simulated resources with on-chain execution metadata.

use stellar_xdr::curr::{Limits, WriteXdr};
use tracing::debug;

use crate::diagnostics::{diagnostic_events, merge_core_metrics};
use crate::error::StatsError;
use crate::events::events_and_return_bytes;
use crate::ledger_changes::max_entry_size;
use crate::metrics::{Metric, MetricsAccumulator};
use crate::types::{ExecutionData, SimulationData, SimulationStats, TxStats};

/// Compute resource statistics for a transaction.
///
/// Footprint and cost come from the simulation. When the applied
/// transaction is available, its `core_metrics` diagnostic events refine
/// the entry and byte counters and its ledger changes give the largest
/// written entry; otherwise those fields stay `None`.
pub fn reconcile(
    sim: &SimulationData,
    execution: Option<&ExecutionData>,
) -> Result<TxStats, StatsError> {
    let events_and_return_bytes =
        events_and_return_bytes(&sim.events, sim.return_value.as_ref())?;

    let mut metrics = MetricsAccumulator::from_footprint(&sim.transaction_data, &sim.cost);
    merge_core_metrics(
        execution.and_then(|exec| diagnostic_events(&exec.result_meta)),
        &mut metrics,
    )?;

    let (min_txn_bytes, max_entry_bytes) = match execution {
        Some(exec) => (
            Some(exec.envelope.to_xdr(Limits::none())?.len() as u64),
            Some(max_entry_size(&exec.result_meta)?),
        ),
        None => (None, None),
    };

    let stats = TxStats {
        cpu_insns: metrics.value(Metric::CpuInsn),
        mem_bytes: metrics.value(Metric::MemByte),
        entry_reads: metrics.value(Metric::ReadEntry),
        entry_writes: metrics.value(Metric::WriteEntry),
        read_bytes: metrics.value(Metric::LedgerReadByte),
        write_bytes: metrics.value(Metric::LedgerWriteByte),
        events_and_return_bytes,
        min_txn_bytes,
        max_entry_bytes,
        max_key_bytes: metrics.get(Metric::MaxRwKeyByte),
    };
    debug!(?stats, executed = execution.is_some(), "reconciled transaction stats");

    Ok(stats)
}

/// Statistics from a simulation alone.
pub fn simulation_stats(sim: &SimulationData) -> Result<SimulationStats, StatsError> {
    let resources = &sim.transaction_data.resources;

    Ok(SimulationStats {
        cpu_instructions: sim.cost.cpu_instructions,
        ram: sim.cost.memory_bytes,
        ledger_entry_reads: resources.footprint.read_only.len() as u64,
        ledger_entry_writes: resources.footprint.read_write.len() as u64,
        ledger_write_bytes: u64::from(resources.write_bytes),
        ledger_read_bytes: u64::from(resources.disk_read_bytes),
        events_and_return_value_size: events_and_return_bytes(
            &sim.events,
            sim.return_value.as_ref(),
        )?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
