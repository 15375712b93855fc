//! Error types for statistics reconciliation.

use std::fmt;

/// Errors that can occur while decoding payloads or reconciling metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// RPC response carried a JSON-RPC error object
    RpcError { code: i64, message: String },
    /// simulateTransaction returned an error field
    SimulationFailed(String),
    /// getTransaction returned a non-successful status
    TransactionNotSuccessful(String),
    /// Invalid or unexpected payload format
    InvalidResponse(String),
    /// XDR serialization/deserialization error
    Xdr(String),
    /// A core metrics event carried a value that is not an integer
    UnexpectedMetricValue { metric: &'static str, kind: String },
    /// A numeric value does not fit the target integer type
    MetricOutOfRange { metric: &'static str, value: String },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::RpcError { code, message } => {
                write!(f, "RPC error (code {}): {}", code, message)
            }
            StatsError::SimulationFailed(msg) => write!(f, "simulation failed: {}", msg),
            StatsError::TransactionNotSuccessful(status) => {
                write!(f, "transaction status is {}, expected SUCCESS", status)
            }
            StatsError::InvalidResponse(msg) => write!(f, "invalid payload: {}", msg),
            StatsError::Xdr(msg) => write!(f, "XDR error: {}", msg),
            StatsError::UnexpectedMetricValue { metric, kind } => {
                write!(
                    f,
                    "core metric '{}' carries a non-integer value ({})",
                    metric, kind
                )
            }
            StatsError::MetricOutOfRange { metric, value } => {
                write!(f, "value {} for '{}' is out of range", value, metric)
            }
        }
    }
}

impl std::error::Error for StatsError {}

impl From<stellar_xdr::curr::Error> for StatsError {
    fn from(e: stellar_xdr::curr::Error) -> Self {
        StatsError::Xdr(e.to_string())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(e: serde_json::Error) -> Self {
        StatsError::InvalidResponse(format!("invalid JSON: {}", e))
    }
}
