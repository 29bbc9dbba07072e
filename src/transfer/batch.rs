use super::client::{TransferClient, TransferOutcome};
use crate::{helpers::parse_amount, prelude::Result, route::ApprovalPolicy, Error};
use ethers::types::U256;
use log::{error, info};
use std::time::Duration;

/// Amount per transfer, how many transfers, and the pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub amount: U256,
    pub count: u32,
    pub delay: Duration,
}

impl TransferPlan {
    pub fn new(amount: &str, decimals: u32, count: u32, delay: Duration) -> Result<Self> {
        if count < 1 {
            return Err(Error::InvalidPlan(
                "number of transactions must be at least 1".to_string(),
            ));
        }
        Ok(TransferPlan {
            amount: parse_amount(amount, decimals)?,
            count,
            delay,
        })
    }

    /// What an upfront approval has to cover.
    pub fn total_amount(&self) -> Result<U256> {
        self.amount
            .checked_mul(U256::from(self.count))
            .ok_or_else(|| Error::InvalidPlan("total amount overflows uint256".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<std::result::Result<TransferOutcome, Error>>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Ok(o) if o.success))
            .count()
    }

    pub fn relayed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Ok(o) if o.packet_hash.is_some()))
            .count()
    }
}

/// Runs the plan sequentially. A failed transfer is recorded and the batch moves on;
/// only a failed upfront approval stops it.
pub async fn run_batch(client: &TransferClient, plan: &TransferPlan) -> Result<BatchReport> {
    let route = client.route;
    info!(
        "Starting {} transfer(s) on {route}, delay {}s",
        plan.count,
        plan.delay.as_secs()
    );

    if let ApprovalPolicy::Upfront { gas_limit } = route.approval {
        client
            .ensure_allowance(plan.total_amount()?, gas_limit)
            .await?;
    }

    let mut report = BatchReport::default();
    for i in 0..plan.count {
        if i > 0 && !plan.delay.is_zero() {
            info!("Waiting for {} seconds before next transfer...", plan.delay.as_secs());
            tokio::time::sleep(plan.delay).await;
        }
        info!("Executing transfer {}/{}", i + 1, plan.count);
        let outcome = client.send_transfer(plan.amount).await;
        if let Err(e) = &outcome {
            error!("Transfer {}/{} failed: {e}", i + 1, plan.count);
        }
        report.outcomes.push(outcome);
    }
    Ok(report)
}
