use super::jwt::{bearer, JwtClaims};
use super::response_structs::{Achievement, LeaderboardEntry, UserAchievement};
use crate::{
    consts::{DASHBOARD_TIMEOUT, UNION_APP_ORIGIN, UNION_DASHBOARD_API_KEY, UNION_DASHBOARD_URL},
    prelude::Result,
    req::{header_map, HttpClient},
    Error,
};
use log::{info, warn};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;

const CATEGORY_EMBED: &str = "category:categories!achievements_category_fkey(id,title),\
subcategory:categories!achievements_subcategory_fkey(id,title)";

/// Read-only client for the dashboard's PostgREST API, acting as one user.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http_client: HttpClient,
    claims: JwtClaims,
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::JsonParse(e.to_string()))
}

impl DashboardClient {
    /// Fails with [`Error::JwtExpired`] before any request when the token is stale.
    pub fn new(client: Option<Client>, base_url: Option<&str>, jwt: &str) -> Result<Self> {
        let claims = JwtClaims::decode_fresh(jwt)?;

        let authorization = bearer(jwt);
        let headers = header_map(&[
            ("accept", "application/json"),
            ("apikey", UNION_DASHBOARD_API_KEY),
            ("authorization", authorization.as_str()),
            ("origin", UNION_APP_ORIGIN),
            ("referer", "https://app.union.build/"),
        ])?;
        let http_client = HttpClient::new(
            client.unwrap_or_default(),
            base_url.unwrap_or(UNION_DASHBOARD_URL),
            headers,
        )
        .with_timeout(DASHBOARD_TIMEOUT);

        Ok(DashboardClient {
            http_client,
            claims,
        })
    }

    pub fn claims(&self) -> &JwtClaims {
        &self.claims
    }

    fn user_filter(&self) -> String {
        format!("eq.{}", self.claims.sub)
    }

    pub async fn leaderboard_entry(&self) -> Result<LeaderboardEntry> {
        info!("Fetching dashboard data for user {}", self.claims.sub);
        let single = header_map(&[("accept", "application/vnd.pgrst.object+json")])?;
        let body = self
            .http_client
            .get(
                "/leaderboard",
                &[("select", "*".to_string()), ("user_id", self.user_filter())],
                single,
            )
            .await?;
        parse(&body)
    }

    /// Achievements the user holds. Any failure yields an empty list.
    pub async fn user_achievements(&self) -> Vec<UserAchievement> {
        let select = format!("*,achievement:achievements(*,{CATEGORY_EMBED})");
        let result = self
            .http_client
            .get(
                "/user_achievements",
                &[("select", select), ("user_id", self.user_filter())],
                HeaderMap::new(),
            )
            .await
            .and_then(|body| parse(&body));
        match result {
            Ok(achievements) => achievements,
            Err(e) => {
                warn!("User achievements endpoint not available: {e}");
                Vec::new()
            }
        }
    }

    pub async fn all_achievements(&self) -> Result<Vec<Achievement>> {
        let select = format!("*,reward_achievements(rewards(*)),{CATEGORY_EMBED}");
        let body = self
            .http_client
            .get("/achievements", &[("select", select)], HeaderMap::new())
            .await?;
        parse(&body)
    }
}
