pub mod diagnostics;
pub mod error;
pub mod events;
pub mod format;
pub mod ledger_changes;
pub mod metrics;
pub mod reconcile;
pub mod response;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use error::StatsError;
pub use events::EventSize;
pub use metrics::{Metric, MetricsAccumulator};
pub use reconcile::{reconcile, simulation_stats};
pub use response::{parse_simulation, parse_transaction};
pub use types::{CostBreakdown, ExecutionData, SimulationData, SimulationStats, TxStats};
