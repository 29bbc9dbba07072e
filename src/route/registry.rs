use super::{ApprovalPolicy, Asset, Route};
use crate::{consts::TRANSFER_GAS_LIMIT, payload::PayloadTemplate, Network};
use lazy_static::lazy_static;

/// Sender word every captured payload was recorded with
const CAPTURED_SENDER: &str = "78ff133dd6be81621062971a7b0f142e9f532d51000000000000000000000000";

const HOLESKY_SEPOLIA_ETH: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/holesky_sepolia_eth.hex"),
    timestamp: "00000000000000000000000000000000000000000000000018474fb9da048380",
    salt: "c1e7948530253bb4440306fc6214e93677f52fdb680e844ef32bf421c6d7ee19",
    sender: CAPTURED_SENDER,
    amount: "000000000000000000000000000000000000000000000000000009184e72a000",
};

const HOLESKY_SEPOLIA_USDC: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/holesky_sepolia_usdc.hex"),
    timestamp: "000000000000000000000000000000000000000000000000184808dd98a236c0",
    salt: "d480c6109e4833dce96ec9432d727031d722ef8c274eb7c2a6e80e2faa694b3f",
    sender: CAPTURED_SENDER,
    amount: "0000000000000000000000000000000000000000000000000000000000002710",
};

const HOLESKY_SEPOLIA_LINK: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/holesky_sepolia_link.hex"),
    timestamp: "00000000000000000000000000000000000000000000000018480aa568870b40",
    salt: "76c0014de1f1ac8f1b17facdfcee643c281a437230c528e018aeef439e2d1353",
    sender: CAPTURED_SENDER,
    amount: "000000000000000000000000000000000000000000000000016345785d8a0000",
};

const HOLESKY_SEPOLIA_EURC: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/holesky_sepolia_eurc.hex"),
    timestamp: "00000000000000000000000000000000000000000000000018480b0377040fc0",
    salt: "8ab4e35e7a22ebdcd150d0447380f41670b760df07488fa5bd6c35cb5d2a9714",
    sender: CAPTURED_SENDER,
    amount: "00000000000000000000000000000000000000000000000000000000000186a0",
};

const SEPOLIA_HOLESKY_USDC: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/sepolia_holesky_usdc.hex"),
    timestamp: "0000000000000000000000000000000000000000000000001847fd16b0cc1680",
    salt: "c4a4ac8498b7672663317420ea7d0276e8c735805650517d6491ed3703a2c1f3",
    sender: CAPTURED_SENDER,
    amount: "00000000000000000000000000000000000000000000000000000000000f4240",
};

const SEPOLIA_HOLESKY_EURC: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/sepolia_holesky_eurc.hex"),
    timestamp: "0000000000000000000000000000000000000000000000001847f6d89a404880",
    salt: "c7c436fa954985d8ffed47561a11059ee777cf9a0f27d0d35f43362a7217c0aa",
    sender: CAPTURED_SENDER,
    amount: "00000000000000000000000000000000000000000000000000000000000f4240",
};

const SEI_CORN_SEI: PayloadTemplate = PayloadTemplate {
    blob: include_str!("../../payloads/sei_corn_sei.hex"),
    timestamp: "0000000000000000000000000000000000000000000000001847a593844ad7c0",
    salt: "c82ddebd23943e322bf17303f3ea6e97c0580f5d199029cbceb86855ef398443",
    sender: CAPTURED_SENDER,
    amount: "00000000000000000000000000000000000000000000000000005af3107a4000",
};

lazy_static! {
    pub static ref ROUTES: Vec<Route> = vec![
        Route {
            source: Network::Holesky,
            destination: Network::Sepolia,
            asset: Asset::Eth,
            decimals: 18,
            token_contract: None,
            template: HOLESKY_SEPOLIA_ETH,
            approval: ApprovalPolicy::None,
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.00001",
        },
        Route {
            source: Network::Holesky,
            destination: Network::Sepolia,
            asset: Asset::Usdc,
            decimals: 6,
            token_contract: Some("0x57978Bfe465ad9B1c0bf80f6C1539d300705EA50"),
            template: HOLESKY_SEPOLIA_USDC,
            approval: ApprovalPolicy::Upfront { gas_limit: 0xc6ea },
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.000001",
        },
        Route {
            source: Network::Holesky,
            destination: Network::Sepolia,
            asset: Asset::Link,
            decimals: 18,
            token_contract: Some("0x9eEB76a58A096D7EE093B90c4559348512648771"),
            template: HOLESKY_SEPOLIA_LINK,
            approval: ApprovalPolicy::Upfront { gas_limit: 0x12b85 },
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.000001",
        },
        Route {
            source: Network::Holesky,
            destination: Network::Sepolia,
            asset: Asset::Eurc,
            decimals: 6,
            token_contract: Some("0x3C0E9FF724F741f8597908Cd9216F4621ABB357D"),
            template: HOLESKY_SEPOLIA_EURC,
            approval: ApprovalPolicy::Upfront { gas_limit: 0x12b4f },
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.000001",
        },
        Route {
            source: Network::Sepolia,
            destination: Network::Holesky,
            asset: Asset::Usdc,
            decimals: 6,
            token_contract: Some("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
            template: SEPOLIA_HOLESKY_USDC,
            approval: ApprovalPolicy::Upfront { gas_limit: 100_000 },
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.000001",
        },
        Route {
            source: Network::Sepolia,
            destination: Network::Holesky,
            asset: Asset::Eurc,
            decimals: 6,
            token_contract: Some("0x08210F9170F89Ab7658F0B5E3fF39b0E03C594D4"),
            template: SEPOLIA_HOLESKY_EURC,
            approval: ApprovalPolicy::PerTransfer { gas_limit: 100_000 },
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.000001",
        },
        Route {
            source: Network::SeiTestnet,
            destination: Network::CornTestnet,
            asset: Asset::Sei,
            decimals: 18,
            token_contract: None,
            template: SEI_CORN_SEI,
            approval: ApprovalPolicy::None,
            gas_limit: TRANSFER_GAS_LIMIT,
            default_amount: "0.0001",
        },
    ];
}
