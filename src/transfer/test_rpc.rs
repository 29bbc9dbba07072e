//! JSON-RPC node stand-in for transfer tests.

use super::TransferClient;
use crate::{route::Route, PacketIndexer, PollSettings};
use ethers::providers::{Http, Provider};
use ethers::signers::LocalWallet;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use std::time::Duration;

pub(crate) const TX_HASH: &str = "0x5f0e6a8d11c2b0a9c46a5e4e3f1b2d7c8a9e0f1d2c3b4a5968778695a4b3c2d1";
const BLOCK_HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
const WALLET_KEY: &str = "e908f86dbb4d55ac876378565aafeabc187f6690f046459397b17d9b9a19688e";

/// An ABI-encoded uint256 return value.
pub(crate) fn word(value: u64) -> String {
    format!("0x{value:064x}")
}

fn reply(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

/// Answers every `method` call whose body also contains each of `needles`.
pub(crate) async fn mock_rpc<'a>(
    server: &'a MockServer,
    method: &str,
    needles: &[&str],
    result: Value,
) -> Mock<'a> {
    let method = format!("\"method\":\"{method}\"");
    let needles: Vec<String> = needles.iter().map(|n| n.to_string()).collect();
    server
        .mock_async(|mut when, then| {
            when = when.method(POST).path("/rpc").body_contains(method.as_str());
            for needle in &needles {
                when = when.body_contains(needle.as_str());
            }
            then.status(200).json_body(reply(result));
        })
        .await
}

/// Like [`mock_rpc`], but the node answers with a JSON-RPC error.
pub(crate) async fn mock_rpc_error<'a>(
    server: &'a MockServer,
    method: &str,
    needles: &[&str],
    message: &str,
) -> Mock<'a> {
    let method = format!("\"method\":\"{method}\"");
    let needles: Vec<String> = needles.iter().map(|n| n.to_string()).collect();
    server
        .mock_async(|mut when, then| {
            when = when.method(POST).path("/rpc").body_contains(method.as_str());
            for needle in &needles {
                when = when.body_contains(needle.as_str());
            }
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 1,
                "error": {"code": -32000, "message": message}
            }));
        })
        .await
}

pub(crate) async fn mock_nonce(server: &MockServer) -> Mock<'_> {
    mock_rpc(server, "eth_getTransactionCount", &[], json!("0x7")).await
}

/// Mined transaction plus a receipt with `status`.
pub(crate) async fn mock_mined(server: &MockServer, status: u64) {
    mock_rpc(
        server,
        "eth_getTransactionByHash",
        &[],
        json!({
            "hash": TX_HASH, "nonce": "0x7", "blockHash": BLOCK_HASH, "blockNumber": "0x10",
            "transactionIndex": "0x0", "from": "0x0000000000000000000000000000000000000001",
            "to": "0x0000000000000000000000000000000000000002", "value": "0x0",
            "gas": "0x493e0", "gasPrice": "0x1", "input": "0x", "v": "0x0", "r": "0x1", "s": "0x1",
            "type": "0x2", "chainId": "0x1"
        }),
    )
    .await;
    mock_rpc(
        server,
        "eth_getTransactionReceipt",
        &[],
        json!({
            "transactionHash": TX_HASH, "transactionIndex": "0x0", "blockHash": BLOCK_HASH,
            "blockNumber": "0x10", "from": "0x0000000000000000000000000000000000000001",
            "to": "0x0000000000000000000000000000000000000002", "cumulativeGasUsed": "0x5208",
            "gasUsed": "0x5208", "contractAddress": null, "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)), "status": format!("0x{status:x}"),
            "type": "0x2", "effectiveGasPrice": "0x1"
        }),
    )
    .await;
}

/// Client for `route` against `server`'s `/rpc`, with the indexer at `/graphql`.
pub(crate) fn client(server: &MockServer, route: &'static Route) -> TransferClient {
    let provider = Provider::<Http>::try_from(server.url("/rpc").as_str())
        .unwrap()
        .interval(Duration::from_millis(10));
    let settings = PollSettings {
        retries: 2,
        interval: Duration::from_millis(10),
    };
    let indexer = PacketIndexer::new(None, Some(server.url("/graphql").as_str()), settings).unwrap();
    let wallet: LocalWallet = WALLET_KEY.parse().unwrap();
    TransferClient::with_provider(route, provider, wallet, indexer)
}
