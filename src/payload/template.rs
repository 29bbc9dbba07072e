use super::splice::{replace_first, sender_field, strip_hex_prefix, to_32_byte_hex};
use crate::{helpers, prelude::Result, Error};
use ethers::types::{Address, Bytes, U256};
use log::{debug, warn};

/// A captured bridge call and the literal words inside it that get replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadTemplate {
    pub blob: &'static str,
    pub timestamp: &'static str,
    pub salt: &'static str,
    pub sender: &'static str,
    pub amount: &'static str,
}

/// Values spliced into a template for a single transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceFields {
    pub timestamp: String,
    pub salt: [u8; 32],
    pub sender: Address,
    pub amount: U256,
}

impl SpliceFields {
    /// Fresh timeout and salt for `sender` moving `amount` base units.
    pub fn fresh(sender: Address, amount: U256) -> Self {
        SpliceFields {
            timestamp: helpers::next_timeout_timestamp_hex(),
            salt: helpers::generate_salt(),
            sender,
            amount,
        }
    }

    pub fn salt_hex(&self) -> String {
        hex::encode(self.salt)
    }
}

#[derive(Debug, Clone)]
pub struct SplicedPayload {
    pub calldata: Bytes,
    /// Out of six: timestamp, salt, sender twice, amount twice
    pub replacements: usize,
}

const SENDER_OCCURRENCES: usize = 2;
const AMOUNT_OCCURRENCES: usize = 2;
pub const EXPECTED_REPLACEMENTS: usize = 2 + SENDER_OCCURRENCES + AMOUNT_OCCURRENCES;

impl PayloadTemplate {
    pub fn selector(&self) -> &str {
        let blob = strip_hex_prefix(self.blob);
        &blob[..blob.len().min(8)]
    }

    pub fn hex_len(&self) -> usize {
        strip_hex_prefix(self.blob).len()
    }

    /// Checks the blob is well-formed hex and carries every anchor often enough.
    pub fn verify(&self) -> Result<()> {
        let blob = strip_hex_prefix(self.blob);
        if blob.len() % 2 != 0 || hex::decode(blob).is_err() {
            return Err(Error::Payload(format!(
                "template {} is not valid hex ({} chars)",
                self.selector(),
                blob.len()
            )));
        }

        let lowered = blob.to_ascii_lowercase();
        let anchors = [
            ("timestamp", self.timestamp, 1),
            ("salt", self.salt, 1),
            ("sender", self.sender, SENDER_OCCURRENCES),
            ("amount", self.amount, AMOUNT_OCCURRENCES),
        ];
        for (name, anchor, wanted) in anchors {
            let anchor = strip_hex_prefix(anchor).to_ascii_lowercase();
            if anchor.len() != 64 {
                return Err(Error::Payload(format!(
                    "{name} anchor must be 64 hex chars, got {}",
                    anchor.len()
                )));
            }
            let found = lowered.matches(anchor.as_str()).count();
            if found < wanted {
                return Err(Error::Payload(format!(
                    "{name} anchor found {found} times, expected {wanted}"
                )));
            }
        }
        Ok(())
    }

    /// Timestamp, salt, sender (twice) and amount (twice), in that order.
    pub fn splice(&self, fields: &SpliceFields) -> Result<SplicedPayload> {
        let salt = fields.salt_hex();
        let sender = sender_field(fields.sender);
        let amount = to_32_byte_hex(fields.amount);

        let steps: [(&str, &str); EXPECTED_REPLACEMENTS] = [
            (self.timestamp, &fields.timestamp),
            (self.salt, &salt),
            (self.sender, &sender),
            (self.sender, &sender),
            (self.amount, &amount),
            (self.amount, &amount),
        ];

        let mut payload = strip_hex_prefix(self.blob).to_string();
        let mut replacements = 0;
        for (old_field, new_field) in steps {
            match replace_first(&payload, old_field, new_field) {
                Some(next) => {
                    payload = next;
                    replacements += 1;
                }
                None => warn!("No replacement occurred for field {}", strip_hex_prefix(old_field)),
            }
        }
        debug!(
            "spliced {replacements}/{EXPECTED_REPLACEMENTS} fields into {} payload",
            self.selector()
        );

        let calldata = hex::decode(&payload)
            .map_err(|e| Error::Payload(format!("spliced payload is not valid hex: {e}")))?;
        Ok(SplicedPayload {
            calldata: calldata.into(),
            replacements,
        })
    }
}
