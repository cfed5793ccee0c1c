//! Value-driven refinement of inferred parameter types.
//!
//! The shape search deliberately emits the widest type for everything it
//! sees: a word is `bytes32`, a blob is `bytes`. Once a candidate has been
//! accepted, the decoded values are available, and their zero-byte layout
//! and content narrow those types into what a human would have written.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::B256;

/// Refines one parameter type using its decoded value.
pub(crate) fn prettify(ty: &DynSolType, value: &DynSolValue) -> DynSolType {
    match (ty, value) {
        (DynSolType::FixedBytes(32), DynSolValue::FixedBytes(word, 32)) => refine_word(word),
        (DynSolType::Bytes, DynSolValue::Bytes(bytes)) => {
            // Empty tails stay `bytes`; content is what argues for text.
            if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() {
                DynSolType::String
            } else {
                DynSolType::Bytes
            }
        }
        (DynSolType::Tuple(types), DynSolValue::Tuple(values)) if types.len() == values.len() => {
            DynSolType::Tuple(types.iter().zip(values).map(|(t, v)| prettify(t, v)).collect())
        }
        (DynSolType::Array(element), DynSolValue::Array(values)) => {
            // Per-element refinements are merged so the array stays uniform.
            let refined = values
                .iter()
                .map(|v| prettify(element, v))
                .reduce(merge)
                .unwrap_or_else(|| (**element).clone());
            DynSolType::Array(Box::new(refined))
        }
        _ => ty.clone(),
    }
}

/// Narrows a 32-byte word from its zero-byte layout.
///
/// 12 to 17 leading zero bytes read as an address: exactly 12 is the ABI
/// padding of a full-entropy address, and a handful more covers addresses
/// that begin with zero bytes of their own. Heavier left padding reads as an
/// integer, and right padding as a short byte vector.
fn refine_word(word: &B256) -> DynSolType {
    let leading = word.iter().take_while(|b| **b == 0).count();
    if (12..=17).contains(&leading) {
        return DynSolType::Address;
    }
    if leading > 16 {
        return DynSolType::Uint(256);
    }
    let trailing = word.iter().rev().take_while(|b| **b == 0).count();
    if trailing > 0 {
        return DynSolType::FixedBytes(32 - trailing);
    }
    DynSolType::FixedBytes(32)
}

/// Folds two refinements of the same underlying shape into one type.
pub(crate) fn merge(a: DynSolType, b: DynSolType) -> DynSolType {
    if a == b {
        return a;
    }
    match (a, b) {
        (DynSolType::Tuple(lhs), DynSolType::Tuple(rhs)) if lhs.len() == rhs.len() => {
            DynSolType::Tuple(lhs.into_iter().zip(rhs).map(|(l, r)| merge(l, r)).collect())
        }
        (DynSolType::Array(lhs), DynSolType::Array(rhs)) => {
            DynSolType::Array(Box::new(merge(*lhs, *rhs)))
        }
        (DynSolType::String, DynSolType::Bytes) | (DynSolType::Bytes, DynSolType::String) => {
            DynSolType::Bytes
        }
        (DynSolType::Uint(256), _) | (_, DynSolType::Uint(256)) => DynSolType::Uint(256),
        _ => DynSolType::FixedBytes(32),
    }
}
