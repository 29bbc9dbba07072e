use ethers::types::{Address, U256};
use union_autobridge::{
    payload::{sender_field, to_32_byte_hex, SpliceFields, EXPECTED_REPLACEMENTS},
    ApprovalPolicy, Asset, Network, Route, TransferPlan,
};

/// Test data builders
mod test_data {
    use super::*;

    pub fn sender() -> Address {
        "0x9d3c4f1e2b7a6c5d8e0f1a2b3c4d5e6f7a8b9c0d".parse().unwrap()
    }

    pub fn fields(amount: u64) -> SpliceFields {
        SpliceFields {
            timestamp: to_32_byte_hex(U256::from(1_750_000_000_000_000_000u64)),
            salt: [0x11; 32],
            sender: sender(),
            amount: U256::from(amount),
        }
    }
}

/// Splicing every registered route template
mod splicing_tests {
    use super::*;

    #[test]
    fn every_route_splices_all_fields_and_keeps_length() {
        for route in Route::all() {
            let spliced = route.template.splice(&test_data::fields(1234)).unwrap();
            assert_eq!(spliced.replacements, EXPECTED_REPLACEMENTS, "{}", route.key());
            assert_eq!(spliced.calldata.len() * 2, route.template.hex_len(), "{}", route.key());

            let hex = hex::encode(&spliced.calldata);
            assert!(hex.starts_with(route.template.selector()));
            assert_eq!(hex.matches(&sender_field(test_data::sender())).count(), 2);
            assert_eq!(hex.matches(&to_32_byte_hex(U256::from(1234u64))).count(), 2);
            assert!(hex.contains(&"11".repeat(32)));
        }
    }

    #[test]
    fn splicing_twice_from_the_same_template_is_independent() {
        let route = Route::from_key("sei-corn-sei").unwrap();
        let first = route.template.splice(&test_data::fields(1)).unwrap();
        let second = route.template.splice(&test_data::fields(2)).unwrap();
        assert_ne!(first.calldata, second.calldata);
        assert_eq!(second.replacements, EXPECTED_REPLACEMENTS);
    }
}

/// Registry lookups and transfer plans
mod route_tests {
    use super::*;

    #[test]
    fn registry_covers_the_supported_routes() {
        let keys: Vec<String> = Route::all().iter().map(Route::key).collect();
        for key in [
            "holesky-sepolia-eth",
            "holesky-sepolia-usdc",
            "holesky-sepolia-link",
            "holesky-sepolia-eurc",
            "sepolia-holesky-usdc",
            "sepolia-holesky-eurc",
            "sei-corn-sei",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {key}");
        }
    }

    #[test]
    fn sepolia_eurc_approves_per_transfer() {
        let route = Route::find(Network::Sepolia, Network::Holesky, Asset::Eurc).unwrap();
        assert!(matches!(route.approval, ApprovalPolicy::PerTransfer { .. }));
        let usdc = Route::find(Network::Holesky, Network::Sepolia, Asset::Usdc).unwrap();
        assert!(matches!(usdc.approval, ApprovalPolicy::Upfront { .. }));
    }

    #[test]
    fn plans_use_route_decimals() {
        let route = Route::from_key("holesky-sepolia-usdc").unwrap();
        let plan = TransferPlan::new(route.default_amount, route.decimals, 5, Default::default())
            .unwrap();
        assert_eq!(plan.amount, U256::from(1u64));
        assert_eq!(plan.total_amount().unwrap(), U256::from(5u64));
    }
}

/// HTTP-facing clients against mock servers
mod http_tests {
    use httpmock::prelude::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::time::Duration;
    use union_autobridge::{
        dashboard::rank::next_rank_progress, DashboardClient, Error, PacketIndexer, PollSettings,
    };

    fn jwt(sub: &str, exp: i64) -> String {
        let claims = json!({"sub": sub, "exp": exp});
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"sig")).unwrap();
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn packet_hash_found_after_a_miss() {
        let server = MockServer::start_async().await;
        let mut miss = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({"data": {"v2_transfers": []}}));
            })
            .await;

        let settings = PollSettings {
            retries: 5,
            interval: Duration::from_millis(20),
        };
        let indexer = PacketIndexer::new(None, Some(server.url("/graphql").as_str()), settings).unwrap();
        assert_eq!(indexer.packet_hash("0xabc").await.unwrap(), None);

        miss.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .json_body(json!({"data": {"v2_transfers": [{"packet_hash": "0xbeef"}]}}));
            })
            .await;
        assert_eq!(
            indexer.poll_packet_hash("0xabc").await.unwrap().as_deref(),
            Some("0xbeef")
        );
    }

    #[tokio::test]
    async fn dashboard_reports_rank_progress() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/leaderboard")
                    .query_param("user_id", "eq.abc");
                then.status(200).json_body(json!({
                    "user_id": "abc", "title": "Junior Captain", "level": 10,
                    "current_xp": 100, "total_xp": 1800, "xp_required": 400, "rank": 9
                }));
            })
            .await;

        let client =
            DashboardClient::new(None, Some(server.base_url().as_str()), &jwt("abc", 4_102_444_800)).unwrap();
        let entry = client.leaderboard_entry().await.unwrap();
        let progress = next_rank_progress(entry.total_xp);
        assert_eq!(progress.name, "Captain");
        assert_eq!(progress.xp_needed, 200);
        assert_eq!(progress.percentage, 50.0);
    }

    #[tokio::test]
    async fn dashboard_errors_surface_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/achievements");
                then.status(503).body("maintenance");
            })
            .await;

        let client =
            DashboardClient::new(None, Some(server.base_url().as_str()), &jwt("abc", 4_102_444_800)).unwrap();
        assert!(matches!(
            client.all_achievements().await,
            Err(Error::ServerRequest { status_code: 503, .. })
        ));
    }
}
