pub mod achievements;
pub mod dashboard_client;
mod jwt;
pub mod rank;
mod response_structs;

pub use dashboard_client::DashboardClient;
pub use jwt::{bearer, JwtClaims};
pub use response_structs::*;
