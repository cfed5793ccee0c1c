//! Validation of candidate parameter lists against the data plane.

use crate::fmt::format_token;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use itertools::Itertools;
use thiserror::Error;

/// Possible errors when checking a candidate parameter list against the
/// buffer.
#[derive(Debug, Error)]
pub(crate) enum OracleError {
    /// The reference decoder rejected the encoding.
    #[error(transparent)]
    Decode(#[from] alloy_dyn_abi::Error),
    /// The decoder returned something other than the requested tuple.
    #[error("expected a decoded tuple")]
    NotATuple,
}

/// Decodes `data` under `params` with the reference ABI decoder, then
/// coerces every decoded value to its canonical text rendering.
///
/// The shape search proposes parameter lists from buffer geometry alone;
/// this is the one place a candidate meets the actual values. Any failure
/// here sends the search back to its nearest branching point.
pub(crate) fn try_decode(
    params: &[DynSolType],
    data: &[u8],
) -> Result<Vec<DynSolValue>, OracleError> {
    let decoded = DynSolType::Tuple(params.to_vec()).abi_decode_params(data)?;
    let values = match decoded {
        DynSolValue::Tuple(values) => values,
        _ => return Err(OracleError::NotATuple),
    };
    trace!(
        target: "guesser",
        values = %values.iter().map(format_token).format(", "),
        "candidate survived the data plane"
    );
    Ok(values)
}
