pub mod config;
mod consts;
pub mod dashboard;
mod errors;
pub mod helpers;
pub mod indexer;
mod network;
pub mod payload;
pub mod prelude;
mod req;
pub mod route;
pub mod transfer;

pub use config::BotConfig;
pub use consts::{UNION_CONTRACT_ADDRESS, UNION_DASHBOARD_URL, UNION_GRAPHQL_URL};
pub use dashboard::DashboardClient;
pub use errors::Error;
pub use indexer::{PacketIndexer, PollSettings};
pub use network::Network;
pub use route::{ApprovalPolicy, Asset, Route};
pub use transfer::{run_batch, BatchReport, TransferClient, TransferOutcome, TransferPlan};
