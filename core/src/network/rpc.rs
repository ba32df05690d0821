use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::{TransactionReceipt, TransactionRequest};
use super::{validate_provider_url, WalletProvider};
use crate::error::{Result, StakingError};

const METHOD_NOT_FOUND: i64 = -32601;
const USER_REJECTED: i64 = 4001;
const UNAUTHORIZED: i64 = 4100;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: B256,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<RawReceipt> for TransactionReceipt {
    fn from(raw: RawReceipt) -> Self {
        TransactionReceipt {
            hash: raw.transaction_hash,
            block_number: raw.block_number.as_deref().and_then(parse_quantity),
            // Pre-Byzantium receipts have no status field
            success: raw
                .status
                .as_deref()
                .map(|s| parse_quantity(s) == Some(1))
                .unwrap_or(true),
        }
    }
}

/// Failure classes of a single JSON-RPC round trip.
enum CallError {
    Transport(String),
    Rpc(RpcError),
}

enum AccountsFailure {
    /// The endpoint does not implement `eth_requestAccounts`.
    Unsupported,
    Failed(StakingError),
}

fn classify_accounts_error(e: CallError) -> AccountsFailure {
    match e {
        CallError::Rpc(err) if err.code == METHOD_NOT_FOUND => AccountsFailure::Unsupported,
        CallError::Rpc(err) if err.code == USER_REJECTED || err.code == UNAUTHORIZED => {
            AccountsFailure::Failed(StakingError::Transaction(format!(
                "Account access denied: {}",
                err.message
            )))
        }
        CallError::Rpc(err) => AccountsFailure::Failed(StakingError::Network(format!(
            "eth_requestAccounts: {} (code {})",
            err.message, err.code
        ))),
        CallError::Transport(msg) => AccountsFailure::Failed(StakingError::Network(msg)),
    }
}

/// Rejections and execution errors are both reported by the wallet as RPC errors.
fn send_error(e: CallError) -> StakingError {
    match e {
        CallError::Transport(msg) => StakingError::Network(msg),
        CallError::Rpc(err) => StakingError::Transaction(format!(
            "Transaction rejected: {} (code {})",
            err.message, err.code
        )),
    }
}

/// EIP-1193 wallet methods spoken over JSON-RPC/HTTP, e.g. against a
/// desktop wallet's local endpoint or a dev node with unlocked accounts.
pub struct JsonRpcProvider {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

fn parse_quantity(s: &str) -> Option<u64> {
    u64::from_str_radix(s.strip_prefix("0x")?, 16).ok()
}

impl JsonRpcProvider {
    pub fn new(url: &str, allow_insecure: bool) -> Result<Self> {
        validate_provider_url(url, allow_insecure)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StakingError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
            poll_interval: Duration::from_millis(1000),
            receipt_timeout: Duration::from_secs(300),
        })
    }

    pub fn with_receipt_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.receipt_timeout = timeout;
        self
    }

    async fn raw_request(&self, method: &str, params: Value) -> std::result::Result<Value, CallError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::debug!(method, id = request.id, "json-rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CallError::Transport(format!("{method} failed: {e}")))?;
        if !response.status().is_success() {
            return Err(CallError::Transport(format!(
                "{method} failed: HTTP {}",
                response.status()
            )));
        }
        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| CallError::Transport(format!("{method}: invalid response: {e}")))?;

        if let Some(err) = body.error {
            return Err(CallError::Rpc(err));
        }
        Ok(body.result.unwrap_or(Value::Null))
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let value = self.raw_request(method, params).await.map_err(|e| match e {
            CallError::Transport(msg) => StakingError::Network(msg),
            CallError::Rpc(err) => {
                StakingError::Network(format!("{method}: {} (code {})", err.message, err.code))
            }
        })?;
        serde_json::from_value(value)
            .map_err(|e| StakingError::Network(format!("{method}: unexpected result: {e}")))
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<TransactionReceipt> {
        let deadline = tokio::time::Instant::now() + self.receipt_timeout;
        loop {
            let raw: Option<RawReceipt> = self
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if let Some(raw) = raw {
                return Ok(raw.into());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(StakingError::Network(format!(
                    "Timed out waiting for receipt of {hash}"
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl WalletProvider for JsonRpcProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let value = match self.raw_request("eth_requestAccounts", json!([])).await {
            Ok(v) => v,
            Err(e) => match classify_accounts_error(e) {
                AccountsFailure::Unsupported => {
                    tracing::debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                    return self.request("eth_accounts", json!([])).await;
                }
                AccountsFailure::Failed(err) => return Err(err),
            },
        };
        serde_json::from_value(value)
            .map_err(|e| StakingError::Network(format!("eth_requestAccounts: unexpected result: {e}")))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let params = json!([{
            "from": tx.from,
            "to": tx.to,
            "value": format!("{:#x}", tx.value),
            "data": tx.data,
        }]);
        let value = self
            .raw_request("eth_sendTransaction", params)
            .await
            .map_err(send_error)?;
        let hash: B256 = serde_json::from_value(value).map_err(|e| {
            StakingError::Network(format!("eth_sendTransaction: unexpected result: {e}"))
        })?;
        tracing::info!(%hash, "transaction submitted, waiting for receipt");

        let receipt = self.wait_for_receipt(hash).await?;
        if !receipt.success {
            return Err(StakingError::Transaction(format!("Transaction {hash} reverted")));
        }
        Ok(receipt)
    }

    async fn chain_id(&self) -> Result<u64> {
        let hex: String = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&hex)
            .ok_or_else(|| StakingError::Network(format!("eth_chainId: invalid quantity '{hex}'")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
