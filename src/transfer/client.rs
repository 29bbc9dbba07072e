use super::erc20::{create_allowance_data, create_approve_data, create_balance_of_data, decode_uint};
use crate::{
    consts::FALLBACK_MAX_FEE_GWEI,
    helpers::format_amount,
    indexer::PacketIndexer,
    network::gwei_to_wei,
    payload::{SpliceFields, EXPECTED_REPLACEMENTS},
    prelude::Result,
    route::{ApprovalPolicy, Route},
    Error, Network,
};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{
    transaction::eip2718::TypedTransaction, Address, BlockNumber, Bytes, Eip1559TransactionRequest,
    TransactionReceipt, TxHash, U256, U64,
};
use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeData {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

impl FeeData {
    /// Node estimate when there is one, otherwise 20 gwei and the network tip.
    /// The tip never exceeds the max fee.
    pub fn resolve(estimate: Option<(U256, U256)>, network: Network) -> Self {
        let (max_fee_per_gas, max_priority_fee_per_gas) = estimate.unwrap_or_else(|| {
            (
                gwei_to_wei(&FALLBACK_MAX_FEE_GWEI.to_string()),
                network.fallback_priority_fee(),
            )
        });
        FeeData {
            max_fee_per_gas,
            max_priority_fee_per_gas: max_priority_fee_per_gas.min(max_fee_per_gas),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub tx_hash: TxHash,
    pub success: bool,
    pub packet_hash: Option<String>,
    pub salt: String,
    pub timestamp: String,
    pub explorer_url: String,
}

/// Signs and submits spliced bridge calls for one route.
#[derive(Debug)]
pub struct TransferClient {
    pub route: &'static Route,
    client: SignerMiddleware<Provider<Http>, LocalWallet>,
    indexer: PacketIndexer,
}

fn rpc_error(e: impl std::fmt::Display) -> Error {
    Error::Rpc(e.to_string())
}

fn is_success(receipt: &TransactionReceipt) -> bool {
    receipt.status == Some(U64::from(1))
}

/// The bridge call for one transfer; native assets ride along as value.
pub fn build_transfer_request(
    route: &Route,
    calldata: Bytes,
    amount: U256,
    nonce: U256,
    fees: FeeData,
) -> Result<Eip1559TransactionRequest> {
    let value = if route.asset.is_native() {
        amount
    } else {
        U256::zero()
    };
    Ok(Eip1559TransactionRequest::new()
        .to(route.bridge_address()?)
        .data(calldata)
        .value(value)
        .gas(route.gas_limit)
        .max_fee_per_gas(fees.max_fee_per_gas)
        .max_priority_fee_per_gas(fees.max_priority_fee_per_gas)
        .nonce(nonce)
        .chain_id(route.source.chain_id()))
}

impl TransferClient {
    pub fn new(
        route: &'static Route,
        rpc_url: &str,
        wallet: LocalWallet,
        indexer: PacketIndexer,
    ) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| Error::GenericRequest(format!("invalid rpc url {rpc_url}: {e}")))?;
        Ok(Self::with_provider(route, provider, wallet, indexer))
    }

    /// Receipts are polled at the provider's interval.
    pub fn with_provider(
        route: &'static Route,
        provider: Provider<Http>,
        wallet: LocalWallet,
        indexer: PacketIndexer,
    ) -> Self {
        let wallet = wallet.with_chain_id(route.source.chain_id());
        TransferClient {
            route,
            client: SignerMiddleware::new(provider, wallet),
            indexer,
        }
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }

    pub async fn fee_data(&self) -> FeeData {
        let estimate = match self.client.estimate_eip1559_fees(None).await {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                warn!("Fee estimation failed, using fallback fees: {e}");
                None
            }
        };
        FeeData::resolve(estimate, self.route.source)
    }

    pub async fn pending_nonce(&self) -> Result<U256> {
        self.client
            .get_transaction_count(self.address(), Some(BlockNumber::Pending.into()))
            .await
            .map_err(rpc_error)
    }

    fn token(&self) -> Result<Address> {
        self.route.token_address()?.ok_or_else(|| {
            Error::GenericRequest(format!("{} is a native asset", self.route.asset))
        })
    }

    async fn call_uint(&self, to: Address, data: Bytes) -> Result<U256> {
        let tx: TypedTransaction = Eip1559TransactionRequest::new().to(to).data(data).into();
        let output = self.client.call(&tx, None).await.map_err(rpc_error)?;
        decode_uint(&output)
    }

    pub async fn token_balance(&self) -> Result<U256> {
        let token = self.token()?;
        self.call_uint(token, create_balance_of_data(self.address()))
            .await
    }

    pub async fn native_balance(&self) -> Result<U256> {
        self.client
            .get_balance(self.address(), None)
            .await
            .map_err(rpc_error)
    }

    pub async fn allowance(&self) -> Result<U256> {
        let token = self.token()?;
        let spender = self.route.bridge_address()?;
        self.call_uint(token, create_allowance_data(self.address(), spender))
            .await
    }

    async fn submit(&self, tx: Eip1559TransactionRequest) -> Result<(TxHash, bool)> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(rpc_error)?;
        let tx_hash = pending.tx_hash();
        info!(
            "Transaction hash: {tx_hash:?} ({})",
            self.route.source.explorer_tx_url(&format!("{tx_hash:?}"))
        );
        let receipt = pending.await.map_err(rpc_error)?.ok_or_else(|| {
            Error::TransactionFailed {
                tx_hash: format!("{tx_hash:?}"),
                reason: "dropped from mempool".to_string(),
            }
        })?;
        Ok((tx_hash, is_success(&receipt)))
    }

    /// Lets the bridge contract pull `amount` of the route token.
    pub async fn approve(&self, amount: U256, gas_limit: u64) -> Result<TxHash> {
        let token = self.token()?;
        let spender = self.route.bridge_address()?;
        let nonce = self.pending_nonce().await?;
        let fees = self.fee_data().await;

        info!(
            "Approving {} {}...",
            format_amount(amount, self.route.decimals),
            self.route.asset
        );
        let tx = Eip1559TransactionRequest::new()
            .to(token)
            .data(create_approve_data(spender, amount))
            .value(U256::zero())
            .gas(gas_limit)
            .max_fee_per_gas(fees.max_fee_per_gas)
            .max_priority_fee_per_gas(fees.max_priority_fee_per_gas)
            .nonce(nonce)
            .chain_id(self.route.source.chain_id());

        let (tx_hash, success) = self.submit(tx).await?;
        if !success {
            return Err(Error::TransactionFailed {
                tx_hash: format!("{tx_hash:?}"),
                reason: "approval reverted".to_string(),
            });
        }
        info!("Approval confirmed");
        Ok(tx_hash)
    }

    /// Approves only when the current allowance is short of `amount`.
    pub async fn ensure_allowance(&self, amount: U256, gas_limit: u64) -> Result<Option<TxHash>> {
        let allowance = self.allowance().await?;
        if allowance >= amount {
            info!("Sufficient allowance already set.");
            return Ok(None);
        }
        self.approve(amount, gas_limit).await.map(Some)
    }

    pub async fn ensure_balance(&self, amount: U256) -> Result<()> {
        let balance = self.token_balance().await?;
        if balance < amount {
            return Err(Error::InsufficientBalance {
                symbol: self.route.asset.to_string(),
                have: format_amount(balance, self.route.decimals),
                need: format_amount(amount, self.route.decimals),
            });
        }
        Ok(())
    }

    /// Splices, submits and confirms one transfer, then waits on the indexer.
    pub async fn send_transfer(&self, amount: U256) -> Result<TransferOutcome> {
        if let ApprovalPolicy::PerTransfer { gas_limit } = self.route.approval {
            self.ensure_balance(amount).await?;
            self.approve(amount, gas_limit).await?;
        }

        let nonce = self.pending_nonce().await?;
        let fees = self.fee_data().await;
        let fields = SpliceFields::fresh(self.address(), amount);
        let spliced = self.route.template.splice(&fields)?;
        if spliced.replacements < EXPECTED_REPLACEMENTS {
            warn!(
                "Only {}/{} payload fields were replaced",
                spliced.replacements,
                EXPECTED_REPLACEMENTS
            );
        }

        info!(
            "Sending {} {} ({amount} units) from {:?}",
            format_amount(amount, self.route.decimals),
            self.route.asset,
            self.address()
        );
        info!(
            "Gas fees: maxFeePerGas={}, maxPriorityFeePerGas={}",
            fees.max_fee_per_gas, fees.max_priority_fee_per_gas
        );
        info!("Salt: 0x{}", fields.salt_hex());
        info!("Timestamp: 0x{}", fields.timestamp);

        let tx = build_transfer_request(self.route, spliced.calldata.clone(), amount, nonce, fees)?;
        let (tx_hash, success) = match self.submit(tx).await {
            Ok(submitted) => submitted,
            Err(e) => {
                error!("Transaction error: {e}");
                error!("Modified payload: {}", spliced.calldata);
                return Err(e);
            }
        };

        let tx_hash_hex = format!("{tx_hash:?}");
        let packet_hash = if success {
            info!("Transaction status: success, checking for packet hash...");
            self.indexer.poll_packet_hash(&tx_hash_hex).await?
        } else {
            error!("Transaction status: failed");
            None
        };

        Ok(TransferOutcome {
            explorer_url: self.route.source.explorer_tx_url(&tx_hash_hex),
            tx_hash,
            success,
            packet_hash,
            salt: format!("0x{}", fields.salt_hex()),
            timestamp: format!("0x{}", fields.timestamp),
        })
    }
}
