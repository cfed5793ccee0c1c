//! Recover plausible function signatures from raw ABI-encoded calldata.
//!
//! Given a transaction's input bytes and no ABI, [`guess_fragment`] searches
//! for a parameter list whose shape is consistent with the payload, validates
//! every candidate against the reference ABI decoder, refines the surviving
//! types from the decoded values, and returns a display-ready fragment.
//! When no consistent parse exists it returns `None`.
//!
//! The first four bytes are treated as an opaque selector; nothing is looked
//! up anywhere. Selector-less payloads such as revert data or constructor
//! arguments go through [`guess_params`] instead.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod fmt;
mod fragment;
mod infer;
mod oracle;
mod pretty;
mod word;

pub use fragment::GuessedFragment;

use alloy_dyn_abi::DynSolType;
use alloy_primitives::Selector;

/// The length of a function selector, in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Guesses a function fragment for `calldata`.
///
/// Returns `None` when the payload is shorter than a selector or when no
/// parameter list consistent with the remaining bytes exists.
pub fn guess_fragment(calldata: &[u8]) -> Option<GuessedFragment> {
    if calldata.len() < SELECTOR_LEN {
        return None;
    }
    let (selector, data) = calldata.split_at(SELECTOR_LEN);
    let inputs = guess_params(data)?;
    let fragment = GuessedFragment { selector: Selector::from_slice(selector), inputs };
    debug!(target: "guesser", %fragment, "guessed fragment");
    Some(fragment)
}

/// Guesses the parameter list of a selector-less ABI blob.
///
/// This is the entry point for payloads that carry no selector, such as
/// revert data or constructor arguments. On success the returned types are
/// guaranteed to decode `data` without error.
pub fn guess_params(data: &[u8]) -> Option<Vec<DynSolType>> {
    trace!(target: "guesser", len = data.len(), "inferring parameter shape");
    let inferred = infer::infer_params(data)?;
    // One more oracle pass for the values that drive refinement.
    let values = oracle::try_decode(&inferred, data).ok()?;
    Some(inferred.iter().zip(&values).map(|(t, v)| pretty::prettify(t, v)).collect())
}
