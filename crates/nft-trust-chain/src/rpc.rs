//! C2: the typed, batched RPC client.
//!
//! Every transport or decode exception is mapped deterministically into one
//! [`RpcErrorKind`] here; nothing above this module ever sees a raw
//! `alloy_transport` error.

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use alloy_transport::{RpcError, TransportErrorKind};
use futures::future::join_all;
use nft_trust_types::rpc::{RpcErrorKind, RpcResult};
use std::future::Future;
use std::time::Duration;

/// `Panic(uint256)` selector, used to recognise a decoded Solidity panic.
const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// Per-call deadline used when a client is built with [`RpcClient::new`]
/// rather than [`RpcClient::with_timeout`].
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RpcClient {
    provider: RootProvider,
    chain_id: u64,
    rpc_url: String,
    call_timeout: Duration,
}

impl RpcClient {
    pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self, url::ParseError> {
        Self::with_timeout(rpc_url, chain_id, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(rpc_url: &str, chain_id: u64, call_timeout: Duration) -> Result<Self, url::ParseError> {
        let url: url::Url = rpc_url.parse()?;
        let provider = ProviderBuilder::new().connect_http(url);
        Ok(RpcClient {
            provider,
            chain_id,
            rpc_url: rpc_url.to_string(),
            call_timeout,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Run `fut` against the client's call timeout, mapping a blown local
    /// deadline onto [`RpcErrorKind::Timeout`] the same way a transport-level
    /// 408/504 is mapped in [`categorize`] — callers only ever see `RpcResult`.
    async fn with_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, RpcError<TransportErrorKind>>>,
    ) -> RpcResult<T> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(Ok(value)) => RpcResult::success(value),
            Ok(Err(error)) => categorize(error),
            Err(_elapsed) => RpcResult::failure(
                RpcErrorKind::Timeout,
                format!("rpc call exceeded local deadline of {:?}", self.call_timeout),
            ),
        }
    }

    /// A single typed `eth_call`, ABI-decoded into `C::Return`.
    pub async fn call<C>(&self, to: Address, call: C) -> RpcResult<C::Return>
    where
        C: SolCall + Send + Sync,
    {
        let tx = TransactionRequest::default()
            .to(to)
            .input(Bytes::from(call.abi_encode()).into());
        match self.with_deadline(async { self.provider.call(tx).await }).await {
            RpcResult::Success(raw) => match C::abi_decode_returns(&raw) {
                Ok(value) => RpcResult::success(value),
                Err(error) => {
                    tracing::trace!(%error, "abi decode of call return failed");
                    RpcResult::failure(RpcErrorKind::UnknownError, format!("decode error: {error}"))
                }
            },
            RpcResult::Failure(failure) => RpcResult::Failure(failure),
        }
    }

    /// Concurrently issue `calls` and gather the results in input order.
    /// Implemented as `join_all` over individual [`Self::call`]s rather
    /// than a true JSON-RPC batch envelope — the contract is only
    /// per-call error isolation and ordering, not the wire shape.
    pub async fn batch<C>(&self, calls: Vec<(Address, C)>) -> Vec<RpcResult<C::Return>>
    where
        C: SolCall + Send + Sync,
    {
        join_all(calls.into_iter().map(|(to, call)| self.call(to, call))).await
    }

    pub async fn get_storage_at(&self, address: Address, slot: U256) -> RpcResult<U256> {
        self.with_deadline(async { self.provider.get_storage_at(address, slot).await })
            .await
    }

    pub async fn get_code(&self, address: Address) -> RpcResult<Bytes> {
        self.with_deadline(async { self.provider.get_code_at(address).await })
            .await
    }

    pub async fn block_number(&self) -> RpcResult<u64> {
        self.with_deadline(async { self.provider.get_block_number().await })
            .await
    }
}

/// The categorisation cascade, adapted from the reference implementation's
/// exception-handling cascade against `alloy`'s error shapes instead of
/// `web3.py`'s.
fn categorize<T>(error: RpcError<TransportErrorKind>) -> RpcResult<T> {
    match &error {
        RpcError::ErrorResp(payload) => {
            let message = payload.message.to_lowercase();
            if message.contains("execution reverted") {
                if message.contains("function selector was not recognized")
                    || message.contains("function not found")
                    || message.contains("unrecognized selector")
                {
                    return RpcResult::failure(RpcErrorKind::FunctionNotFound, payload.message.clone());
                }
                if let Some(data) = payload.data.as_ref() {
                    let raw = data.get().trim_matches('"').to_string();
                    if is_panic_selector(&raw) {
                        return RpcResult::failure_with_raw(
                            RpcErrorKind::PanicError,
                            payload.message.clone(),
                            raw,
                        );
                    }
                    if is_custom_error_selector(&raw) {
                        return RpcResult::failure_with_raw(
                            RpcErrorKind::CustomError,
                            payload.message.clone(),
                            raw,
                        );
                    }
                }
                return RpcResult::failure(RpcErrorKind::ExecutionReverted, payload.message.clone());
            }
            if message.contains("no code at address") || message.contains("is contract deployed") {
                return RpcResult::failure(RpcErrorKind::ContractNotFound, payload.message.clone());
            }
            RpcResult::failure(RpcErrorKind::RpcError, payload.message.clone())
        }
        RpcError::Transport(kind) => match kind {
            TransportErrorKind::HttpError(http) if http.status == 408 || http.status == 504 => {
                RpcResult::failure(RpcErrorKind::Timeout, kind.to_string())
            }
            TransportErrorKind::HttpError(_)
            | TransportErrorKind::MissingBatchResponse
            | TransportErrorKind::BackendGone
            | TransportErrorKind::PubsubUnavailable => {
                RpcResult::failure(RpcErrorKind::NetworkError, kind.to_string())
            }
            _ => RpcResult::failure(RpcErrorKind::NetworkError, kind.to_string()),
        },
        RpcError::NullResp => {
            RpcResult::failure(RpcErrorKind::ContractNotFound, "null response".to_string())
        }
        RpcError::Deser { .. } => {
            RpcResult::failure(RpcErrorKind::UnknownError, error.to_string())
        }
        _ => RpcResult::failure(RpcErrorKind::UnknownError, error.to_string()),
    }
}

fn is_panic_selector(raw_hex: &str) -> bool {
    selector_bytes(raw_hex)
        .map(|selector| selector == PANIC_SELECTOR)
        .unwrap_or(false)
}

fn is_custom_error_selector(raw_hex: &str) -> bool {
    const STANDARD_ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0]; // Error(string)
    selector_bytes(raw_hex)
        .map(|selector| selector != STANDARD_ERROR_SELECTOR && selector != PANIC_SELECTOR)
        .unwrap_or(false)
}

fn selector_bytes(raw_hex: &str) -> Option<[u8; 4]> {
    let hex = raw_hex.strip_prefix("0x").unwrap_or(raw_hex);
    if hex.len() < 8 {
        return None;
    }
    let bytes = hex::decode(&hex[..8]).ok()?;
    bytes.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_selector_is_recognised() {
        assert!(is_panic_selector("0x4e487b710000000000000000000000000000000000000000000000000000000000000001"));
    }

    #[test]
    fn short_data_is_not_a_selector() {
        assert_eq!(selector_bytes("0x"), None);
    }

    #[tokio::test]
    async fn local_deadline_elapsing_categorizes_as_timeout() {
        let client = RpcClient::with_timeout(
            "https://eth.merkle.io",
            1,
            Duration::from_nanos(1),
        )
        .unwrap();
        match client.block_number().await {
            RpcResult::Failure(failure) => assert_eq!(failure.kind, RpcErrorKind::Timeout),
            RpcResult::Success(_) => panic!("expected a blown local deadline, got a result"),
        }
    }
}
