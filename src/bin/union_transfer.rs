use clap::{Parser, Subcommand};
use log::info;
use std::time::Duration;
use union_autobridge::{
    helpers::format_amount, prelude::Result, run_batch, ApprovalPolicy, BotConfig, PacketIndexer,
    Route, TransferClient, TransferPlan,
};

#[derive(Debug, Parser)]
#[command(name = "union_transfer", about = "Repeated Union bridge transfers from captured calldata")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the supported routes
    Routes,
    /// Run a batch of transfers over one route
    Send {
        /// Route key, e.g. holesky-sepolia-usdc
        #[arg(long)]
        route: String,
        /// Amount per transfer in whole tokens; the route default when omitted
        #[arg(long)]
        amount: Option<String>,
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Seconds to wait between transfers
        #[arg(long, default_value_t = 0)]
        delay: u64,
    },
    /// Wallet balance, plus the bridge allowance for token routes
    Balance {
        #[arg(long)]
        route: String,
    },
    /// Look up the packet hash of a submitted transaction
    Packet {
        #[arg(long)]
        tx_hash: String,
    },
}

fn approval_label(policy: ApprovalPolicy) -> &'static str {
    match policy {
        ApprovalPolicy::None => "native",
        ApprovalPolicy::Upfront { .. } => "approve once",
        ApprovalPolicy::PerTransfer { .. } => "approve per transfer",
    }
}

fn indexer(config: &BotConfig) -> Result<PacketIndexer> {
    PacketIndexer::new(None, Some(config.graphql_url.as_str()), config.poll)
}

fn transfer_client(config: &BotConfig, route: &'static Route) -> Result<TransferClient> {
    let rpc_url = config.rpc_url(route.source);
    info!("Using {} RPC {rpc_url}", route.source);
    TransferClient::new(route, &rpc_url, config.wallet()?, indexer(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = BotConfig::from_env()?;

    match cli.command {
        Command::Routes => {
            for route in Route::all() {
                println!(
                    "{:<24} {route}  default {} {}, {}",
                    route.key(),
                    route.default_amount,
                    route.asset,
                    approval_label(route.approval)
                );
            }
        }
        Command::Send {
            route,
            amount,
            count,
            delay,
        } => {
            let route = Route::from_key(&route)?;
            let amount = amount.as_deref().unwrap_or(route.default_amount);
            let plan = TransferPlan::new(amount, route.decimals, count, Duration::from_secs(delay))?;
            let client = transfer_client(&config, route)?;
            println!("Wallet: {:?}", client.address());

            let report = run_batch(&client, &plan).await?;
            for (i, outcome) in report.outcomes.iter().enumerate() {
                match outcome {
                    Ok(outcome) => println!(
                        "#{} {} {} packet {}",
                        i + 1,
                        if outcome.success { "ok" } else { "reverted" },
                        outcome.explorer_url,
                        outcome.packet_hash.as_deref().unwrap_or("not found")
                    ),
                    Err(e) => println!("#{} error: {e}", i + 1),
                }
            }
            println!(
                "{}/{} confirmed, {} relayed",
                report.succeeded(),
                plan.count,
                report.relayed()
            );
        }
        Command::Balance { route } => {
            let route = Route::from_key(&route)?;
            let client = transfer_client(&config, route)?;
            println!("Wallet: {:?}", client.address());
            if route.asset.is_native() {
                let balance = client.native_balance().await?;
                println!(
                    "Balance: {} {}",
                    format_amount(balance, route.decimals),
                    route.source.native_symbol()
                );
            } else {
                let balance = client.token_balance().await?;
                let allowance = client.allowance().await?;
                println!("Balance: {} {}", format_amount(balance, route.decimals), route.asset);
                println!("Allowance: {} {}", format_amount(allowance, route.decimals), route.asset);
            }
        }
        Command::Packet { tx_hash } => {
            let indexer = indexer(&config)?;
            let settings = indexer.settings();
            info!(
                "Polling up to {} times every {}s",
                settings.retries,
                settings.interval.as_secs()
            );
            match indexer.poll_packet_hash(&tx_hash).await? {
                Some(packet_hash) => println!("Packet hash: {packet_hash}"),
                None => println!("No packet hash found for {tx_hash}"),
            }
        }
    }
    Ok(())
}
