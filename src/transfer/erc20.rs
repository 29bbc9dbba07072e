//! Hand-built ERC-20 calldata for the few token calls a route needs.

use crate::consts::{ERC20_ALLOWANCE_SELECTOR, ERC20_APPROVE_SELECTOR, ERC20_BALANCE_OF_SELECTOR};
use crate::payload::to_32_byte_hex;
use crate::{prelude::Result, Error};
use ethers::types::{Address, Bytes, U256};

fn address_word(address: Address) -> String {
    format!("{:0>64}", hex::encode(address.as_bytes()))
}

fn encode(hex_calldata: String) -> Bytes {
    // selectors and words are produced locally, always valid hex
    hex::decode(hex_calldata).unwrap_or_default().into()
}

/// approve(address,uint256)
pub fn create_approve_data(spender: Address, amount: U256) -> Bytes {
    encode(format!(
        "{ERC20_APPROVE_SELECTOR}{}{}",
        address_word(spender),
        to_32_byte_hex(amount)
    ))
}

/// balanceOf(address)
pub fn create_balance_of_data(owner: Address) -> Bytes {
    encode(format!("{ERC20_BALANCE_OF_SELECTOR}{}", address_word(owner)))
}

/// allowance(address,address)
pub fn create_allowance_data(owner: Address, spender: Address) -> Bytes {
    encode(format!(
        "{ERC20_ALLOWANCE_SELECTOR}{}{}",
        address_word(owner),
        address_word(spender)
    ))
}

/// Reads a single uint256 return value.
pub fn decode_uint(output: &Bytes) -> Result<U256> {
    if output.len() < 32 {
        return Err(Error::Rpc(format!(
            "expected a 32-byte return value, got {} bytes",
            output.len()
        )));
    }
    Ok(U256::from_big_endian(&output[..32]))
}
