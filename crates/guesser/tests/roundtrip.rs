//! Randomized round-trips: encode a known shape, guess, and require the
//! guessed parameter list to reproduce the bytes exactly.
//!
//! Shape equality with the original is not the property being tested: a
//! payload can legitimately parse as more than one shape (a scalar that
//! happens to look like a pointer), and scalars are deliberately widened.
//! What must always hold is that the guessed types decode the payload and
//! re-encode it byte for byte.

use abi_guesser::guess_params;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, B256, U256};
use proptest::prelude::*;

/// Shapes the guesser can be expected to recover, modulo scalar widening.
fn shape() -> impl Strategy<Value = DynSolType> {
    let leaf = prop_oneof![
        Just(DynSolType::Uint(256)),
        Just(DynSolType::FixedBytes(32)),
        Just(DynSolType::Address),
        Just(DynSolType::Bool),
        Just(DynSolType::Bytes),
        Just(DynSolType::String),
    ];
    leaf.prop_recursive(3, 12, 4, |element| {
        prop_oneof![
            prop::collection::vec(element.clone(), 1..4).prop_map(DynSolType::Tuple),
            element.prop_map(|t| DynSolType::Array(Box::new(t))),
        ]
    })
}

/// A value strategy for one parameter type.
///
/// Words are drawn at full entropy so that a scalar colliding with a valid
/// in-buffer pointer stays out of the generated corpus.
fn value(ty: &DynSolType) -> BoxedStrategy<DynSolValue> {
    match ty {
        DynSolType::Uint(256) => any::<[u8; 32]>()
            .prop_map(|bytes| DynSolValue::Uint(U256::from_be_bytes(bytes), 256))
            .boxed(),
        DynSolType::FixedBytes(32) => any::<[u8; 32]>()
            .prop_map(|bytes| DynSolValue::FixedBytes(B256::from(bytes), 32))
            .boxed(),
        DynSolType::Address => any::<[u8; 20]>()
            .prop_map(|bytes| DynSolValue::Address(Address::from(bytes)))
            .boxed(),
        DynSolType::Bool => any::<bool>().prop_map(DynSolValue::Bool).boxed(),
        DynSolType::Bytes => prop::collection::vec(any::<u8>(), 0..48)
            .prop_map(DynSolValue::Bytes)
            .boxed(),
        DynSolType::String => "[ -~]{0,24}".prop_map(DynSolValue::String).boxed(),
        DynSolType::Tuple(types) => types
            .iter()
            .map(value)
            .collect::<Vec<_>>()
            .prop_map(DynSolValue::Tuple)
            .boxed(),
        DynSolType::Array(element) => {
            let element = (**element).clone();
            prop::collection::vec(value(&element), 0..4).prop_map(DynSolValue::Array).boxed()
        }
        _ => unreachable!("the shape strategy does not generate {ty:?}"),
    }
}

/// A parameter list and matching values for it.
fn params() -> impl Strategy<Value = (Vec<DynSolType>, Vec<DynSolValue>)> {
    prop::collection::vec(shape(), 0..4).prop_flat_map(|types| {
        types
            .iter()
            .map(value)
            .collect::<Vec<_>>()
            .prop_map(move |values| (types.clone(), values))
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, ..ProptestConfig::default() })]

    #[test]
    fn guessed_types_reencode_the_payload_exactly((types, values) in params()) {
        let data = DynSolValue::Tuple(values).abi_encode_params();

        let guessed = guess_params(&data);
        prop_assert!(guessed.is_some(), "no parse found for {types:?}");
        let guessed = guessed.unwrap();

        let decoded = DynSolType::Tuple(guessed.clone()).abi_decode_params(&data);
        prop_assert!(decoded.is_ok(), "guessed {guessed:?} does not decode its own payload");

        let reencoded = decoded.unwrap().abi_encode_params();
        prop_assert_eq!(reencoded, data, "guessed {:?} for {:?}", guessed, types);
    }

    #[test]
    fn static_heads_keep_one_parameter_per_word(words in prop::collection::vec(any::<[u8; 32]>(), 1..8)) {
        let values: Vec<DynSolValue> =
            words.iter().map(|w| DynSolValue::FixedBytes(B256::from(*w), 32)).collect();
        let data = DynSolValue::Tuple(values).abi_encode_params();

        let guessed = guess_params(&data).expect("static heads always parse");
        prop_assert_eq!(guessed.len(), words.len());
    }
}
