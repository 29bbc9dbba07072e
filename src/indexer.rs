use crate::{
    consts::{BROWSER_USER_AGENT, PACKET_POLL_INTERVAL, PACKET_POLL_RETRIES, UNION_APP_ORIGIN, UNION_GRAPHQL_URL},
    prelude::Result,
    req::{header_map, HttpClient},
    Error,
};
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PACKET_HASH_QUERY: &str = "query ($submission_tx_hash: String!) {
    v2_transfers(args: {p_transaction_hash: $submission_tx_hash}) {
        packet_hash
    }
}";

#[derive(Serialize, Debug)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: PacketHashVariables,
}

#[derive(Serialize, Debug)]
struct PacketHashVariables {
    submission_tx_hash: String,
}

#[derive(Deserialize, Debug)]
struct GraphQlResponse {
    data: Option<TransfersData>,
}

#[derive(Deserialize, Debug)]
struct TransfersData {
    #[serde(default)]
    v2_transfers: Vec<TransferRow>,
}

#[derive(Deserialize, Debug)]
struct TransferRow {
    packet_hash: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub retries: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            retries: PACKET_POLL_RETRIES,
            interval: PACKET_POLL_INTERVAL,
        }
    }
}

/// Looks up relayed packets on the Union GraphQL indexer.
#[derive(Debug, Clone)]
pub struct PacketIndexer {
    http_client: HttpClient,
    settings: PollSettings,
}

pub(crate) fn with_hex_prefix(tx_hash: &str) -> String {
    if tx_hash.starts_with("0x") {
        tx_hash.to_string()
    } else {
        format!("0x{tx_hash}")
    }
}

impl PacketIndexer {
    pub fn new(client: Option<Client>, endpoint: Option<&str>, settings: PollSettings) -> Result<Self> {
        let headers = header_map(&[
            ("accept", "application/graphql-response+json, application/json"),
            ("accept-language", "en-US,en;q=0.9"),
            ("origin", UNION_APP_ORIGIN),
            ("referer", "https://app.union.build/"),
            ("user-agent", BROWSER_USER_AGENT),
        ])?;
        Ok(PacketIndexer {
            http_client: HttpClient::new(
                client.unwrap_or_default(),
                endpoint.unwrap_or(UNION_GRAPHQL_URL),
                headers,
            ),
            settings,
        })
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Single lookup; `Ok(None)` while the indexer has not seen the packet yet.
    pub async fn packet_hash(&self, tx_hash: &str) -> Result<Option<String>> {
        let request = GraphQlRequest {
            query: PACKET_HASH_QUERY,
            variables: PacketHashVariables {
                submission_tx_hash: with_hex_prefix(tx_hash),
            },
        };
        let data = serde_json::to_string(&request).map_err(|e| Error::JsonParse(e.to_string()))?;
        let response = self.http_client.post("", data).await?;
        let parsed: GraphQlResponse =
            serde_json::from_str(&response).map_err(|e| Error::JsonParse(e.to_string()))?;

        Ok(parsed
            .data
            .and_then(|data| data.v2_transfers.into_iter().next())
            .and_then(|row| row.packet_hash)
            .filter(|hash| !hash.is_empty()))
    }

    /// Polls at a fixed interval until a packet hash shows up or retries run out.
    pub async fn poll_packet_hash(&self, tx_hash: &str) -> Result<Option<String>> {
        let PollSettings { retries, interval } = self.settings;
        for attempt in 1..=retries {
            info!("Attempt {attempt}/{retries} to get packet hash...");
            match self.packet_hash(tx_hash).await {
                Ok(Some(packet_hash)) => {
                    info!("Found packet hash {packet_hash}");
                    return Ok(Some(packet_hash));
                }
                Ok(None) => info!("Packet hash not found yet, waiting..."),
                Err(e) => error!("Error querying packet hash: {e}"),
            }
            tokio::time::sleep(interval).await;
        }

        warn!("No packet hash found after {retries} retries.");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn fast() -> PollSettings {
        PollSettings {
            retries: 3,
            interval: Duration::from_millis(10),
        }
    }

    #[test]
    fn tx_hash_gets_prefixed_once() {
        assert_eq!(with_hex_prefix("abc"), "0xabc");
        assert_eq!(with_hex_prefix("0xabc"), "0xabc");
    }

    #[tokio::test]
    async fn returns_first_packet_hash() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/graphql")
                    .body_contains("\"submission_tx_hash\":\"0xfeed\"");
                then.status(200).json_body(json!({
                    "data": {"v2_transfers": [{"packet_hash": "0xpacket"}, {"packet_hash": "0xother"}]}
                }));
            })
            .await;

        let indexer = PacketIndexer::new(None, Some(server.url("/v1/graphql").as_str()), fast()).unwrap();
        let found = indexer.poll_packet_hash("feed").await.unwrap();
        assert_eq!(found.as_deref(), Some("0xpacket"));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn gives_up_after_configured_retries() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/graphql");
                then.status(200).json_body(json!({"data": {"v2_transfers": []}}));
            })
            .await;

        let indexer = PacketIndexer::new(None, Some(server.url("/v1/graphql").as_str()), fast()).unwrap();
        assert_eq!(indexer.poll_packet_hash("0xfeed").await.unwrap(), None);
        mock.assert_hits_async(3).await;
    }

    #[tokio::test]
    async fn request_errors_count_as_attempts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/graphql");
                then.status(500).body("indexer down");
            })
            .await;

        let indexer = PacketIndexer::new(None, Some(server.url("/v1/graphql").as_str()), fast()).unwrap();
        assert_eq!(indexer.poll_packet_hash("0xfeed").await.unwrap(), None);
        mock.assert_hits_async(3).await;
    }

    #[tokio::test]
    async fn empty_packet_hash_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/graphql");
                then.status(200)
                    .json_body(json!({"data": {"v2_transfers": [{"packet_hash": null}]}}));
            })
            .await;

        let indexer = PacketIndexer::new(None, Some(server.url("/v1/graphql").as_str()), fast()).unwrap();
        assert_eq!(indexer.packet_hash("0xfeed").await.unwrap(), None);
    }
}
