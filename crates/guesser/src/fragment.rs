//! The guessed function fragment.

use alloy_dyn_abi::DynSolType;
use alloy_primitives::{hex, Selector};
use itertools::Itertools;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A function fragment reconstructed from calldata alone.
///
/// The name is cosmetic, derived from the selector; only the parameter list
/// carries semantic weight.
#[derive(Clone, Debug, PartialEq)]
pub struct GuessedFragment {
    /// The opaque 4-byte selector, carried through verbatim.
    pub selector: Selector,
    /// The recovered parameter types, in calldata order.
    pub inputs: Vec<DynSolType>,
}

impl GuessedFragment {
    /// The display name: `guessed_` followed by the hex-encoded selector.
    pub fn name(&self) -> String {
        format!("guessed_{}", hex::encode(self.selector))
    }

    /// The Solidity-style signature, `name(type,...)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name(), self.inputs.iter().map(|t| t.sol_type_name()).format(","))
    }
}

impl fmt::Display for GuessedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

impl Serialize for GuessedFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("GuessedFragment", 3)?;
        s.serialize_field("name", &self.name())?;
        s.serialize_field(
            "inputs",
            &self.inputs.iter().map(|t| t.sol_type_name()).collect::<Vec<_>>(),
        )?;
        s.serialize_field("signature", &self.signature())?;
        s.end()
    }
}
