//! Shared utilities for integration testing.
//!
//! `MockNode` is a JSON-RPC endpoint on an ephemeral port. It plays both the
//! chain node and the wallet: a test supplies replies for the methods it
//! cares about and everything else gets a canned answer.

#![allow(dead_code)]

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use wallet_bridge::commands::{CommandArgs, WalletBridge};
use wallet_bridge::config::BridgeConfig;
use wallet_bridge::host::MemoryHost;

/// First Anvil dev account.
pub const ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// Second Anvil dev account.
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const TOKEN: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub const NFT_CONTRACT: &str = "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512";
pub const TX_HASH: &str = "0x9fc76417374aa880d4449a1f7f31ec597f00b1f6f3dd2d66f4c9c6c445836d8b";

/// What the mock answers for one call.
pub enum Reply {
    Result(Value),
    Error(i64, &'static str),
    /// Answer with the inner reply after a pause.
    Delayed(Duration, Box<Reply>),
}

type Handler = dyn Fn(&str, &Value) -> Option<Reply> + Send + Sync;

#[derive(Clone)]
struct NodeState {
    handler: Arc<Handler>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

pub struct MockNode {
    url: String,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockNode {
    /// Start a node. `handler` returns `None` to fall back to [`default_reply`].
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Option<Reply> + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = NodeState {
            handler: Arc::new(handler),
            calls: calls.clone(),
        };

        let app = Router::new().route("/", post(rpc)).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/", addr),
            calls,
        }
    }

    /// A node that only gives canned answers.
    pub async fn plain() -> Self {
        Self::start(|_, _| None).await
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method names received, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Params of every call to `method`.
    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.params_of(method).len()
    }
}

async fn rpc(State(state): State<NodeState>, Json(body): Json<Value>) -> Json<Value> {
    match body {
        Value::Array(batch) => {
            let mut answers = Vec::with_capacity(batch.len());
            for req in &batch {
                answers.push(answer(&state, req).await);
            }
            Json(Value::Array(answers))
        }
        req => Json(answer(&state, &req).await),
    }
}

async fn answer(state: &NodeState, req: &Value) -> Value {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let params = req.get("params").cloned().unwrap_or(Value::Null);
    state
        .calls
        .lock()
        .unwrap()
        .push((method.clone(), params.clone()));

    let mut reply = (state.handler)(&method, &params).unwrap_or_else(|| default_reply(&method));
    while let Reply::Delayed(pause, inner) = reply {
        tokio::time::sleep(pause).await;
        reply = *inner;
    }

    match reply {
        Reply::Result(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Reply::Error(code, message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message },
        }),
        Reply::Delayed(..) => unreachable!(),
    }
}

/// Canned answers: one authorized account, 2.5 native units, chain 1.
pub fn default_reply(method: &str) -> Reply {
    match method {
        "eth_accounts" | "eth_requestAccounts" => Reply::Result(json!([ACCOUNT])),
        "eth_chainId" => Reply::Result(json!("0x1")),
        "eth_getBalance" => Reply::Result(json!("0x22b1c8c1227a0000")),
        "eth_call" => Reply::Result(json!(word(0))),
        "eth_sendTransaction" => Reply::Result(json!(TX_HASH)),
        "eth_getTransactionReceipt" => Reply::Result(Value::Null),
        _ => Reply::Error(-32601, "method not found"),
    }
}

/// ABI-encode an unsigned integer as one 32-byte word.
pub fn word(value: u128) -> String {
    format!("0x{:064x}", value)
}

/// Bridge whose default network and wallet are both `node`.
pub fn bridge_for(node: &MockNode) -> (WalletBridge, Arc<MemoryHost>) {
    let mut config = BridgeConfig::default();
    config.network.rpc_url = node.url().to_string();
    bridge_with(config)
}

pub fn bridge_with(config: BridgeConfig) -> (WalletBridge, Arc<MemoryHost>) {
    let host = Arc::new(MemoryHost::default());
    let bridge = WalletBridge::new(&config, host.clone(), host.clone()).unwrap();
    (bridge, host)
}

/// Bridge that has already connected through `node`.
pub async fn connected_bridge(node: &MockNode) -> (WalletBridge, Arc<MemoryHost>) {
    let (bridge, host) = bridge_for(node);
    bridge
        .execute("ConnectWallet", &CommandArgs::new())
        .await
        .unwrap();
    (bridge, host)
}
