//! Canonical text rendering of decoded values.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::hex;
use itertools::Itertools;

/// Formats a decoded value as canonical Solidity-flavored text.
///
/// Addresses are checksummed, byte blobs are 0x-prefixed hex, strings are
/// quoted and escaped, and sequences recurse with bracket and parenthesis
/// delimiters.
pub fn format_token(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Function(f) => f.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(num, _) => num.to_string(),
        DynSolValue::Uint(num, _) => num.to_string(),
        DynSolValue::FixedBytes(bytes, size) => hex::encode_prefixed(&bytes[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", values.iter().map(format_token).format(", "))
        }
        DynSolValue::Tuple(values) => {
            format!("({})", values.iter().map(format_token).format(", "))
        }
    }
}
