use crate::{prelude::Result, Error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

/// Error body shape shared by PostgREST and most JSON APIs we talk to.
#[derive(Deserialize, Debug)]
struct ErrorData {
    code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
    pub base_url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

async fn parse_response(response: Response) -> Result<String> {
    let status_code = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| Error::GenericRequest(e.to_string()))?;

    if status_code < 400 {
        return Ok(text);
    }
    let error_data = serde_json::from_str::<ErrorData>(&text);
    if (400..500).contains(&status_code) {
        let client_error = match error_data {
            Ok(error_data) => Error::ClientRequest {
                status_code,
                error_code: error_data.code,
                error_message: error_data.message.or(error_data.msg).unwrap_or(text),
            },
            Err(_) => Error::ClientRequest {
                status_code,
                error_message: text,
                error_code: None,
            },
        };
        return Err(client_error);
    }

    Err(Error::ServerRequest {
        status_code,
        error_message: text,
    })
}

/// Builds a header map from lowercase static names.
pub fn header_map(pairs: &[(&'static str, &str)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::GenericRequest(format!("invalid header {name}: {e}")))?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}

impl HttpClient {
    pub fn new(client: Client, base_url: impl Into<String>, headers: HeaderMap) -> Self {
        HttpClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn url(&self, url_path: &str) -> String {
        format!("{}{url_path}", self.base_url)
    }

    async fn execute(&self, builder: RequestBuilder, extra_headers: HeaderMap) -> Result<String> {
        let builder = builder.headers(self.headers.clone()).headers(extra_headers);
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let request = builder
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;
        let result = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::GenericRequest(e.to_string()))?;
        parse_response(result).await
    }

    pub async fn post(&self, url_path: &str, data: String) -> Result<String> {
        let builder = self.client.post(self.url(url_path)).body(data);
        let json = header_map(&[("content-type", "application/json")])?;
        self.execute(builder, json).await
    }

    /// GET with query parameters; `extra_headers` override the client defaults.
    pub async fn get(
        &self,
        url_path: &str,
        query: &[(&str, String)],
        extra_headers: HeaderMap,
    ) -> Result<String> {
        let builder = self.client.get(self.url(url_path)).query(query);
        self.execute(builder, extra_headers).await
    }
}
