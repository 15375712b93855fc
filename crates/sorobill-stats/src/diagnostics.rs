//! Merge authoritative `core_metrics` diagnostic events into the metric table.

use stellar_xdr::curr::{ContractEventBody, DiagnosticEvent, ScVal, TransactionMeta};
use tracing::{trace, warn};

use crate::error::StatsError;
use crate::metrics::{Metric, MetricsAccumulator, OverrideRule};

/// Topic marking an event as carrying post-execution resource metrics.
pub const CORE_METRICS_TOPIC: &str = "core_metrics";

/// Diagnostic events of an applied transaction.
///
/// `None` for metadata versions that predate Soroban, and for V3 metadata
/// without a Soroban section.
pub fn diagnostic_events(meta: &TransactionMeta) -> Option<&[DiagnosticEvent]> {
    match meta {
        TransactionMeta::V0(_) | TransactionMeta::V1(_) | TransactionMeta::V2(_) => None,
        TransactionMeta::V3(v3) => v3
            .soroban_meta
            .as_ref()
            .map(|soroban| &soroban.diagnostic_events[..]),
        TransactionMeta::V4(v4) => Some(&v4.diagnostic_events[..]),
    }
}

/// Literal string carried by a symbol or string topic.
fn topic_literal(topic: &ScVal) -> Option<&[u8]> {
    match topic {
        ScVal::Symbol(sym) => Some(sym.0.as_slice()),
        ScVal::String(s) => Some(s.0.as_slice()),
        _ => None,
    }
}

/// Decode a core metrics payload as an unsigned integer.
pub fn metric_value(metric: Metric, data: &ScVal) -> Result<u64, StatsError> {
    let out_of_range = |value: String| StatsError::MetricOutOfRange {
        metric: metric.name(),
        value,
    };

    match data {
        ScVal::U32(v) => Ok(u64::from(*v)),
        ScVal::I32(v) => u64::try_from(*v).map_err(|_| out_of_range(v.to_string())),
        ScVal::U64(v) => Ok(*v),
        ScVal::I64(v) => u64::try_from(*v).map_err(|_| out_of_range(v.to_string())),
        ScVal::U128(parts) => {
            let v = (u128::from(parts.hi) << 64) | u128::from(parts.lo);
            u64::try_from(v).map_err(|_| out_of_range(v.to_string()))
        }
        ScVal::I128(parts) => {
            let v = (i128::from(parts.hi) << 64) | i128::from(parts.lo);
            u64::try_from(v).map_err(|_| out_of_range(v.to_string()))
        }
        other => Err(StatsError::UnexpectedMetricValue {
            metric: metric.name(),
            kind: other.name().to_string(),
        }),
    }
}

/// Apply every `core_metrics` event, in order, to the accumulator.
///
/// An event applies to a metric when one of its topics is `core_metrics`
/// and another names the metric. Later events overwrite earlier ones.
pub fn merge_core_metrics(
    events: Option<&[DiagnosticEvent]>,
    acc: &mut MetricsAccumulator,
) -> Result<(), StatsError> {
    let Some(events) = events else {
        return Ok(());
    };

    for event in events {
        let body = match &event.event.body {
            ContractEventBody::V0(body) => body,
        };
        let literals: Vec<&[u8]> = body.topics.iter().filter_map(topic_literal).collect();

        if !literals.contains(&CORE_METRICS_TOPIC.as_bytes()) {
            continue;
        }

        for metric in Metric::ALL {
            if !literals.contains(&metric.name().as_bytes()) {
                continue;
            }

            if metric.override_rule() == OverrideRule::Ignore {
                warn!(
                    metric = metric.name(),
                    "ignoring core metric, keeping simulated value"
                );
                continue;
            }

            let reported = metric_value(metric, &body.data)?;
            let applied = acc.apply_override(metric, reported)?;
            trace!(metric = metric.name(), reported, ?applied, "applied core metric");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
