use ethers::types::{Address, U256};
use log::warn;

pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Replace the first case-insensitive occurrence of `old_field` in `payload`.
///
/// All three inputs may carry a `0x` prefix; the result never does. When the
/// field is absent the payload comes back unchanged and a warning is logged.
pub fn replace_32_byte_field(payload: &str, old_field: &str, new_field: &str) -> String {
    replace_first(payload, old_field, new_field).unwrap_or_else(|| {
        warn!("No replacement occurred for field {}", strip_hex_prefix(old_field));
        strip_hex_prefix(payload).to_string()
    })
}

/// `None` when `old_field` is empty or absent.
pub(super) fn replace_first(payload: &str, old_field: &str, new_field: &str) -> Option<String> {
    let payload = strip_hex_prefix(payload);
    let old_field = strip_hex_prefix(old_field);
    let new_field = strip_hex_prefix(new_field);
    if old_field.is_empty() {
        return None;
    }

    // hex text is ASCII, so byte offsets agree between the lowered and original strings
    let start = payload
        .to_ascii_lowercase()
        .find(&old_field.to_ascii_lowercase())?;
    let mut result = String::with_capacity(payload.len() - old_field.len() + new_field.len());
    result.push_str(&payload[..start]);
    result.push_str(new_field);
    result.push_str(&payload[start + old_field.len()..]);
    Some(result)
}

pub fn to_32_byte_hex(value: U256) -> String {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    hex::encode(word)
}

/// Sender is stored as left-aligned bytes, so it is padded on the right.
pub fn sender_field(sender: Address) -> String {
    format!("{:0<64}", hex::encode(sender.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_the_first_match() {
        let payload = "0xaaaa1111bbbb1111";
        assert_eq!(replace_32_byte_field(payload, "1111", "2222"), "aaaa2222bbbb1111");
    }

    #[test]
    fn matching_ignores_case_but_keeps_new_value_verbatim() {
        let payload = "00ABcdEF00";
        assert_eq!(replace_32_byte_field(payload, "0xabCDef", "FfFfFf"), "00FfFfFf00");
    }

    #[test]
    fn missing_field_leaves_payload_untouched() {
        assert_eq!(replace_32_byte_field("0xdeadbeef", "cafe", "0000"), "deadbeef");
        assert_eq!(replace_32_byte_field("deadbeef", "", "0000"), "deadbeef");
    }

    #[test]
    fn identical_value_still_counts_as_found() {
        assert_eq!(replace_first("0xaa11", "11", "11").as_deref(), Some("aa11"));
        assert_eq!(replace_first("aa11", "22", "11"), None);
    }

    #[test]
    fn words_are_left_padded() {
        let word = to_32_byte_hex(U256::from(10_000u64));
        assert_eq!(word.len(), 64);
        assert!(word.ends_with("2710"));
        assert!(word.starts_with("0000"));
    }

    #[test]
    fn sender_is_right_padded() {
        let sender: Address = "0x78ff133DD6Be81621062971a7B0f142E9F532d51".parse().unwrap();
        assert_eq!(
            sender_field(sender),
            "78ff133dd6be81621062971a7b0f142e9f532d51000000000000000000000000"
        );
    }
}
