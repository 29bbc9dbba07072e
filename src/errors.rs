use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Client error: status code: {status_code}, error message: {error_message}, error code: {error_code:?}")]
    ClientRequest {
        status_code: u16,
        error_code: Option<String>,
        error_message: String,
    },
    #[error("Server error: status code: {status_code}, error message: {error_message}")]
    ServerRequest {
        status_code: u16,
        error_message: String,
    },
    #[error("Generic request error: {0:?}")]
    GenericRequest(String),
    #[error("Json parse error: {0:?}")]
    JsonParse(String),
    #[error("Generic parse error: {0:?}")]
    GenericParse(String),
    #[error("Wallet error: {0:?}")]
    Wallet(String),
    #[error("Private key parse error: {0:?}")]
    PrivateKeyParse(String),
    #[error("Missing configuration value: {0}")]
    ConfigMissing(String),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Invalid transfer plan: {0}")]
    InvalidPlan(String),
    #[error("No route from {from} to {to} for {asset}")]
    RouteNotFound {
        from: String,
        to: String,
        asset: String,
    },
    #[error("Unknown network: {0:?}")]
    UnknownNetwork(String),
    #[error("Payload error: {0}")]
    Payload(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Transaction {tx_hash} failed: {reason}")]
    TransactionFailed { tx_hash: String, reason: String },
    #[error("Insufficient {symbol} balance. Have: {have}, need: {need}")]
    InsufficientBalance {
        symbol: String,
        have: String,
        need: String,
    },
    #[error("JWT error: {0}")]
    Jwt(String),
    #[error("JWT expired at {0}")]
    JwtExpired(i64),
}
