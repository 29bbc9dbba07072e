mod batch;
mod client;
pub mod erc20;
#[cfg(test)]
mod test_rpc;

pub use batch::{run_batch, BatchReport, TransferPlan};
pub use client::{build_transfer_request, FeeData, TransferClient, TransferOutcome};
