//! The closed RPC result/error taxonomy every C2 operation returns.
//!
//! Higher layers never see a raw transport exception: every `call`, `batch`,
//! `get_storage_at`, and `get_code` returns an [`RpcResult`], and every
//! failure carries an [`RpcErrorKind`] drawn from this fixed set. Consumers
//! match on `kind`, never on `message`.

use serde::{Deserialize, Serialize};

/// One of a fixed set of reasons an RPC-backed operation failed.
///
/// This is deliberately not `#[non_exhaustive]`: the set is closed by
/// design (see the component design notes on the RPC client), and adding a
/// new standard failure mode is a deliberate, reviewed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcErrorKind {
    RpcError,
    ContractNotFound,
    FunctionNotFound,
    ExecutionReverted,
    CustomError,
    PanicError,
    Timeout,
    NetworkError,
    UnknownError,
}

/// A failed RPC-backed operation: a kind from the closed taxonomy, a
/// human-readable message, and optionally the raw revert payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFailure {
    pub kind: RpcErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
}

/// `Success(T)` or `Failure { .. }` — the tagged sum every outward-facing
/// C2 operation returns.
#[derive(Debug, Clone)]
pub enum RpcResult<T> {
    Success(T),
    Failure(RpcFailure),
}

impl<T> RpcResult<T> {
    pub fn success(value: T) -> Self {
        RpcResult::Success(value)
    }

    pub fn failure(kind: RpcErrorKind, message: impl Into<String>) -> Self {
        RpcResult::Failure(RpcFailure {
            kind,
            message: message.into(),
            raw_data: None,
        })
    }

    pub fn failure_with_raw(
        kind: RpcErrorKind,
        message: impl Into<String>,
        raw_data: impl Into<String>,
    ) -> Self {
        RpcResult::Failure(RpcFailure {
            kind,
            message: message.into(),
            raw_data: Some(raw_data.into()),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RpcResult::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            RpcResult::Success(value) => Some(value),
            RpcResult::Failure(_) => None,
        }
    }

    pub fn ok_ref(&self) -> Option<&T> {
        match self {
            RpcResult::Success(value) => Some(value),
            RpcResult::Failure(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcResult<U> {
        match self {
            RpcResult::Success(value) => RpcResult::Success(f(value)),
            RpcResult::Failure(failure) => RpcResult::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_extracts_success_only() {
        let ok: RpcResult<u32> = RpcResult::success(7);
        let err: RpcResult<u32> = RpcResult::failure(RpcErrorKind::Timeout, "deadline exceeded");
        assert_eq!(ok.ok(), Some(7));
        assert_eq!(err.ok(), None);
    }

    #[test]
    fn map_preserves_failure_kind() {
        let err: RpcResult<u32> =
            RpcResult::failure(RpcErrorKind::ExecutionReverted, "reverted");
        let mapped = err.map(|v| v + 1);
        match mapped {
            RpcResult::Failure(f) => assert_eq!(f.kind, RpcErrorKind::ExecutionReverted),
            RpcResult::Success(_) => panic!("expected failure"),
        }
    }
}
