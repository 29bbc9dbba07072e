//! Calldata splicing.
//!
//! Transfers are never ABI-encoded here. Each route ships one captured call to
//! the bridge contract, and only the handful of 32-byte words that must change
//! per transfer are swapped out by locating their literal hex text.

mod splice;
mod template;

pub use splice::{replace_32_byte_field, sender_field, strip_hex_prefix, to_32_byte_hex};
pub use template::{PayloadTemplate, SpliceFields, SplicedPayload, EXPECTED_REPLACEMENTS};
