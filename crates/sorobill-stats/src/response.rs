//! Decode recorded Soroban RPC responses.
//!
//! Accepts either the full JSON-RPC envelope (`{"jsonrpc": .., "result": ..}`)
//! or just its `result` object, as saved by most tooling.

use serde_json::Value;
use stellar_xdr::curr::{
    DiagnosticEvent, Limits, ReadXdr, ScVal, SorobanTransactionData, TransactionEnvelope,
    TransactionMeta,
};
use tracing::{debug, warn};

use crate::error::StatsError;
use crate::types::{CostBreakdown, ExecutionData, SimulationData};

/// Unwrap the JSON-RPC envelope, surfacing a JSON-RPC error object.
pub(crate) fn rpc_result(response: &Value) -> Result<&Value, StatsError> {
    if let Some(error) = response.get("error").filter(|e| e.is_object()) {
        let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(StatsError::RpcError { code, message });
    }

    match response.get("result") {
        Some(result) if result.is_object() => Ok(result),
        _ => Ok(response),
    }
}

fn required_str<'a>(obj: &'a Value, field: &str) -> Result<&'a str, StatsError> {
    obj.get(field).and_then(|v| v.as_str()).ok_or_else(|| {
        StatsError::InvalidResponse(format!("missing or invalid '{}' field", field))
    })
}

fn decode<T: ReadXdr>(b64: &str, what: &str) -> Result<T, StatsError> {
    T::from_xdr_base64(b64, Limits::none())
        .map_err(|e| StatsError::Xdr(format!("{}: {}", what, e)))
}

/// Parse a cost figure sent either as a decimal string or a JSON integer.
fn cost_field(cost: &Value, field: &str) -> Result<u64, StatsError> {
    let value = cost
        .get(field)
        .ok_or_else(|| StatsError::InvalidResponse(format!("missing 'cost.{}' field", field)))?;

    let parsed = match value {
        Value::String(s) => s.parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| StatsError::MetricOutOfRange {
        metric: if field == "cpuInsns" { "cpu_insn" } else { "mem_byte" },
        value: value.to_string(),
    })
}

/// Decode a `simulateTransaction` response.
pub fn parse_simulation(response: &Value) -> Result<SimulationData, StatsError> {
    let result = rpc_result(response)?;

    if let Some(error) = result.get("error") {
        let error_str = error.as_str().unwrap_or("unknown simulation error");
        return Err(StatsError::SimulationFailed(error_str.to_string()));
    }

    if result.get("restorePreamble").is_some() {
        warn!("simulation carries a restore preamble; stats cover the invocation only");
    }

    let events = match result.get("events") {
        None | Some(Value::Null) => vec![],
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|e| {
                let b64 = e.as_str().ok_or_else(|| {
                    StatsError::InvalidResponse("event entry is not a string".to_string())
                })?;
                decode::<DiagnosticEvent>(b64, "event")
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(StatsError::InvalidResponse(
                "'events' is not an array".to_string(),
            ))
        }
    };

    // First entry of `results` carries the return value
    let return_value = match result
        .get("results")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("xdr"))
        .and_then(|v| v.as_str())
    {
        Some(b64) => Some(decode::<ScVal>(b64, "return value")?),
        None => None,
    };

    let transaction_data = decode::<SorobanTransactionData>(
        required_str(result, "transactionData")?,
        "transaction data",
    )?;

    let cost_obj = result
        .get("cost")
        .ok_or_else(|| StatsError::InvalidResponse("missing 'cost' field".to_string()))?;
    let cost = CostBreakdown {
        cpu_instructions: cost_field(cost_obj, "cpuInsns")?,
        memory_bytes: cost_field(cost_obj, "memBytes")?,
    };

    debug!(
        events = events.len(),
        has_return_value = return_value.is_some(),
        "decoded simulation"
    );

    Ok(SimulationData {
        events,
        return_value,
        transaction_data,
        cost,
    })
}

/// Decode a successful `getTransaction` response.
pub fn parse_transaction(response: &Value) -> Result<ExecutionData, StatsError> {
    let result = rpc_result(response)?;

    if let Some(status) = result.get("status").and_then(|v| v.as_str()) {
        if status != "SUCCESS" {
            return Err(StatsError::TransactionNotSuccessful(status.to_string()));
        }
    }

    let result_meta =
        decode::<TransactionMeta>(required_str(result, "resultMetaXdr")?, "result meta")?;
    let envelope =
        decode::<TransactionEnvelope>(required_str(result, "envelopeXdr")?, "envelope")?;

    debug!(meta_version = result_meta.name(), "decoded transaction");

    Ok(ExecutionData {
        result_meta,
        envelope,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
