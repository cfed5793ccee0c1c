//! The calldata shape search.
//!
//! A tuple encoding is a static head of one 32-byte word per parameter,
//! followed by the dynamic tails those words may point into. With no ABI to
//! consult, every head word is ambiguous: it could be a scalar, or an offset
//! to a length-prefixed region, or an offset to a nested tuple. The search
//! classifies each word depth-first in that order of suspicion, resolves the
//! pointed-to regions recursively, and lets the reference decoder arbitrate
//! whichever candidate parameter list survives.

use crate::{
    oracle,
    word::{probe_length, probe_offset},
};
use alloy_dyn_abi::DynSolType;
use itertools::Itertools;

/// Pins head-slot classification at one recursion depth.
///
/// The elements of a dynamic-element array are all length-prefixed or all
/// not, so when a tail is re-entered as an array head the pointer kind is
/// fixed for every slot at that depth and static classification is
/// forbidden. At every other depth the mode is inert.
#[derive(Clone, Copy, Debug)]
struct LengthMode {
    depth: usize,
    assume_length: bool,
}

/// A classified head slot awaiting tail resolution.
#[derive(Clone, Debug)]
enum Slot {
    /// A 32-byte static word, standing in for any word-wide scalar.
    Word,
    /// A pointer into the tail region, with the length word found at its
    /// target when one fits there.
    Pending { offset: usize, length: Option<usize> },
}

/// Infers a parameter list for the tuple encoding in `data`.
///
/// Returns the first oracle-validated classification of the buffer, or
/// `None` when every branch of the search is rejected.
pub(crate) fn infer_params(data: &[u8]) -> Option<Vec<DynSolType>> {
    infer_tuple(data, 0, None)
}

fn infer_tuple(data: &[u8], depth: usize, mode: Option<LengthMode>) -> Option<Vec<DynSolType>> {
    // A head that is not whole words is not a head.
    if data.len() % 32 != 0 {
        return None;
    }
    classify(data, depth, 0, &mut Vec::new(), data.len(), mode)
}

/// Classifies head slots depth-first.
///
/// `end_of_static` is the tightest upper bound on the head seen so far; every
/// discovered pointer shrinks it, since tails follow the head. A rejected
/// branch pops its slot back off `acc` before the next interpretation is
/// tried, so siblings never observe each other's state.
fn classify(
    data: &[u8],
    depth: usize,
    slot: usize,
    acc: &mut Vec<Slot>,
    end_of_static: usize,
    mode: Option<LengthMode>,
) -> Option<Vec<DynSolType>> {
    if slot * 32 >= end_of_static {
        return resolve(data, depth, acc);
    }
    let pos = slot * 32;
    let pinned = mode.filter(|m| m.depth == depth);

    if let Some(offset) = probe_offset(data, pos) {
        // The length-prefixed reading is the more constrained one; when it is
        // valid it is almost always the true parse, so it goes first.
        if pinned.map_or(true, |m| m.assume_length) {
            if let Some(length) = probe_length(data, offset) {
                acc.push(Slot::Pending { offset, length: Some(length) });
                let found =
                    classify(data, depth, slot + 1, acc, end_of_static.min(offset), mode);
                acc.pop();
                if found.is_some() {
                    return found;
                }
            }
        }
        // A nested dynamic tuple starts with another pointer, not a length.
        if pinned.map_or(true, |m| !m.assume_length) {
            acc.push(Slot::Pending { offset, length: None });
            let found = classify(data, depth, slot + 1, acc, end_of_static.min(offset), mode);
            acc.pop();
            if found.is_some() {
                return found;
            }
        }
    }
    if pinned.is_none() {
        acc.push(Slot::Word);
        let found = classify(data, depth, slot + 1, acc, end_of_static, mode);
        acc.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Resolves every pending pointer against the tail region and submits the
/// completed parameter list to the oracle.
///
/// Tails are laid out in pointer order and cover the buffer to its end, so
/// each pending slot's region runs to the next pending offset, and the last
/// one runs to the end of the buffer.
fn resolve(data: &[u8], depth: usize, slots: &[Slot]) -> Option<Vec<DynSolType>> {
    let pending: Vec<(usize, usize, Option<usize>)> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, s)| match *s {
            Slot::Pending { offset, length } => Some((i, offset, length)),
            Slot::Word => None,
        })
        .collect();

    let mut params: Vec<Option<DynSolType>> = slots
        .iter()
        .map(|s| match s {
            Slot::Word => Some(DynSolType::FixedBytes(32)),
            Slot::Pending { .. } => None,
        })
        .collect();

    for (j, &(i, offset, length)) in pending.iter().enumerate() {
        let start = offset + if length.is_some() { 32 } else { 0 };
        let end = pending.get(j + 1).map_or(data.len(), |&(_, next, _)| next);
        if start > end {
            return None;
        }
        let tail = &data[start..end];
        let last = j + 1 == pending.len();
        params[i] = Some(match length {
            None => DynSolType::Tuple(infer_tuple(tail, depth + 1, None)?),
            Some(count) => resolve_counted(tail, count, depth, last)?,
        });
    }

    let params = params.into_iter().collect::<Option<Vec<_>>>()?;
    if oracle::try_decode(&params, data).is_err() {
        return None;
    }
    trace!(
        target: "guesser",
        depth,
        params = %params.iter().map(|t| t.sol_type_name()).format(","),
        "accepted candidate"
    );
    Some(params)
}

/// Types a length-prefixed tail.
///
/// With only a count and the bytes to go on, the tail is read as a byte
/// blob, an array of dynamic elements, an array of statically packed
/// elements, or `count` chunks of one decoded tuple, in that order.
fn resolve_counted(tail: &[u8], count: usize, depth: usize, last: bool) -> Option<DynSolType> {
    if is_byte_blob(tail, count, last) {
        return Some(DynSolType::Bytes);
    }
    if count == 0 {
        // No array interpretation can put zero elements over live bytes.
        return None;
    }
    if tail.len() / 32 > count && (0..count).all(|i| probe_offset(tail, i * 32).is_some()) {
        return dynamic_elements(tail, count, depth);
    }
    static_elements(tail, count, depth, last).or_else(|| chunked_elements(tail, count, depth))
}

/// Does a length of `count` read as a `bytes` blob over this tail?
///
/// The ABI right-pads partial-word blobs with zeros, so a partial final word
/// must be zero past byte `count - 1`. Whole-word lengths carry no padding
/// and must instead match the tail geometry exactly, except behind the final
/// pointer where the buffer end is the only boundary.
fn is_byte_blob(tail: &[u8], count: usize, last: bool) -> bool {
    if count % 32 == 0 {
        if count == 0 && tail.is_empty() {
            return true;
        }
        return last || count == tail.len();
    }
    let padded_end = (count / 32 + 1) * 32;
    match tail.get(count..padded_end) {
        Some(padding) => padding.iter().all(|b| *b == 0),
        None => false,
    }
}

/// Types a tail whose first `count` words all point further into it: an
/// array of `count` dynamic elements.
///
/// The tail is re-entered as a head of exactly `count` pointers, once under
/// each pointer kind. The length-prefixed reading is the stricter
/// hypothesis, so it wins when both parse. All elements must come back the
/// same type.
fn dynamic_elements(tail: &[u8], count: usize, depth: usize) -> Option<DynSolType> {
    let inner = [true, false].into_iter().find_map(|assume_length| {
        infer_tuple(tail, depth + 1, Some(LengthMode { depth: depth + 1, assume_length }))
    })?;
    if inner.len() != count || !inner.iter().map(DynSolType::sol_type_name).all_equal() {
        return None;
    }
    inner.into_iter().next().map(|element| DynSolType::Array(Box::new(element)))
}

/// Types a tail of `count` statically packed elements, each the same whole
/// number of words.
fn static_elements(tail: &[u8], count: usize, depth: usize, last: bool) -> Option<DynSolType> {
    let words = tail.len() / 32;
    let element_words = words / count;
    if element_words == 0 {
        return None;
    }
    let used = element_words * count * 32;
    // Leftover bytes are only tolerated behind the final pointer, where
    // nothing else accounts for them; elsewhere the packing must be exact.
    if used != tail.len() && !last {
        return None;
    }
    let mut shapes = Vec::with_capacity(count);
    for element in tail[..used].chunks(element_words * 32) {
        shapes.push(infer_tuple(element, depth + 1, None)?);
    }
    array_of(shapes)
}

/// Fallback for a tail that packs neither statically nor dynamically: decode
/// the whole tail as one tuple and split its parameters into `count` equal
/// runs.
fn chunked_elements(tail: &[u8], count: usize, depth: usize) -> Option<DynSolType> {
    let inner = infer_tuple(tail, depth + 1, None)?;
    if inner.is_empty() || inner.len() % count != 0 {
        return None;
    }
    let size = inner.len() / count;
    array_of(inner.chunks(size).map(<[DynSolType]>::to_vec).collect())
}

/// Wraps uniform element shapes as `E[]`.
///
/// Single-component elements shed their tuple wrapper, except `bytes`: a
/// bare `bytes` element would claim a length prefix the packed slices do not
/// carry.
fn array_of(shapes: Vec<Vec<DynSolType>>) -> Option<DynSolType> {
    if !shapes.iter().all_equal() {
        return None;
    }
    let mut first = shapes.into_iter().next()?;
    let element = if first.len() == 1 && !matches!(first[0], DynSolType::Bytes) {
        first.pop()?
    } else {
        DynSolType::Tuple(first)
    };
    Some(DynSolType::Array(Box::new(element)))
}
