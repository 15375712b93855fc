//! Resource metrics seeded from the simulation footprint.

use stellar_xdr::curr::SorobanTransactionData;

use crate::error::StatsError;
use crate::types::CostBreakdown;

/// Metrics tracked during reconciliation.
///
/// Names match the topics the host uses for its `core_metrics` diagnostic
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    WriteEntry,
    ReadEntry,
    LedgerWriteByte,
    LedgerReadByte,
    CpuInsn,
    MemByte,
    MaxRwKeyByte,
}

const METRIC_COUNT: usize = 7;

/// How a core metrics value is folded into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRule {
    /// Keep the simulated value
    Ignore,
    /// Use the reported value as is
    Replace,
    /// The host reports reads and writes under one counter; subtract the
    /// current write count to isolate reads
    SubtractWrites,
}

impl Metric {
    pub const ALL: [Metric; METRIC_COUNT] = [
        Metric::WriteEntry,
        Metric::ReadEntry,
        Metric::LedgerWriteByte,
        Metric::LedgerReadByte,
        Metric::CpuInsn,
        Metric::MemByte,
        Metric::MaxRwKeyByte,
    ];

    /// Topic literal identifying this metric.
    pub fn name(self) -> &'static str {
        match self {
            Metric::WriteEntry => "write_entry",
            Metric::ReadEntry => "read_entry",
            Metric::LedgerWriteByte => "ledger_write_byte",
            Metric::LedgerReadByte => "ledger_read_byte",
            Metric::CpuInsn => "cpu_insn",
            Metric::MemByte => "mem_byte",
            Metric::MaxRwKeyByte => "max_rw_key_byte",
        }
    }

    pub fn from_name(name: &[u8]) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name().as_bytes() == name)
    }

    pub fn override_rule(self) -> OverrideRule {
        match self {
            // Core metrics report more than the simulation for these, which
            // does not match what is actually charged.
            Metric::CpuInsn | Metric::MemByte => OverrideRule::Ignore,
            Metric::ReadEntry => OverrideRule::SubtractWrites,
            Metric::WriteEntry
            | Metric::LedgerWriteByte
            | Metric::LedgerReadByte
            | Metric::MaxRwKeyByte => OverrideRule::Replace,
        }
    }
}

/// Fixed-key metric table.
///
/// Every metric always has a slot; `None` means no source has provided a
/// value yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsAccumulator {
    values: [Option<u64>; METRIC_COUNT],
}

impl MetricsAccumulator {
    /// Seed from the declared resources and simulated cost.
    pub fn from_footprint(data: &SorobanTransactionData, cost: &CostBreakdown) -> Self {
        let resources = &data.resources;
        let mut acc = MetricsAccumulator::default();
        acc.set(
            Metric::WriteEntry,
            Some(resources.footprint.read_write.len() as u64),
        );
        acc.set(
            Metric::ReadEntry,
            Some(resources.footprint.read_only.len() as u64),
        );
        acc.set(
            Metric::LedgerWriteByte,
            Some(u64::from(resources.write_bytes)),
        );
        acc.set(
            Metric::LedgerReadByte,
            Some(u64::from(resources.disk_read_bytes)),
        );
        acc.set(Metric::CpuInsn, Some(cost.cpu_instructions));
        acc.set(Metric::MemByte, Some(cost.memory_bytes));
        acc.set(Metric::MaxRwKeyByte, None);
        acc
    }

    pub fn get(&self, metric: Metric) -> Option<u64> {
        self.values[metric as usize]
    }

    /// Value of a metric that is always seeded, or 0 if it is not.
    pub fn value(&self, metric: Metric) -> u64 {
        self.get(metric).unwrap_or(0)
    }

    fn set(&mut self, metric: Metric, value: Option<u64>) {
        self.values[metric as usize] = value;
    }

    /// Fold a reported core metrics value into the table.
    ///
    /// Returns the new value, or `None` if the metric ignores overrides.
    pub fn apply_override(
        &mut self,
        metric: Metric,
        reported: u64,
    ) -> Result<Option<u64>, StatsError> {
        let next = match metric.override_rule() {
            OverrideRule::Ignore => return Ok(None),
            OverrideRule::Replace => reported,
            OverrideRule::SubtractWrites => {
                let writes = self.value(Metric::WriteEntry);
                reported
                    .checked_sub(writes)
                    .ok_or_else(|| StatsError::MetricOutOfRange {
                        metric: metric.name(),
                        value: format!("{} - {}", reported, writes),
                    })?
            }
        };
        self.set(metric, Some(next));
        Ok(Some(next))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
