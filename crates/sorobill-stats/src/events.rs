//! Event and return value sizing.

use stellar_xdr::curr::{ContractEventType, DiagnosticEvent, Limits, ScVal, WriteXdr};

use crate::error::StatsError;

/// Serialized size of a single contract event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSize {
    /// Emitting contract as a strkey (C...), if the event names one
    pub contract: Option<String>,
    /// Serialized `ContractEvent` length in bytes
    pub bytes: u64,
}

/// Size an event counts against the events budget.
///
/// Only `contract` events are billed; system and diagnostic events
/// contribute zero.
pub fn event_size(event: &DiagnosticEvent) -> Result<u64, StatsError> {
    if event.event.type_ != ContractEventType::Contract {
        return Ok(0);
    }
    Ok(event.event.to_xdr(Limits::none())?.len() as u64)
}

/// Per-event breakdown of the billed (contract) events.
pub fn contract_event_sizes(events: &[DiagnosticEvent]) -> Result<Vec<EventSize>, StatsError> {
    events
        .iter()
        .filter(|e| e.event.type_ == ContractEventType::Contract)
        .map(|e| {
            Ok(EventSize {
                contract: e
                    .event
                    .contract_id
                    .as_ref()
                    .map(|id| stellar_strkey::Contract(id.0 .0).to_string()),
                bytes: event_size(e)?,
            })
        })
        .collect()
}

/// Serialized size of the invocation's return value, or 0 when absent.
pub fn return_value_size(return_value: Option<&ScVal>) -> Result<u64, StatsError> {
    match return_value {
        Some(val) => Ok(val.to_xdr(Limits::none())?.len() as u64),
        None => Ok(0),
    }
}

/// Sum of billed event sizes plus the return value size.
pub fn events_and_return_bytes(
    events: &[DiagnosticEvent],
    return_value: Option<&ScVal>,
) -> Result<u64, StatsError> {
    let mut total = return_value_size(return_value)?;
    for event in events {
        total += event_size(event)?;
    }
    Ok(total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
