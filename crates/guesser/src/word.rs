//! 32-byte word reads over raw calldata, and the plausibility probes the
//! shape search is built on.

use alloy_primitives::U256;

/// Words at or above this bound are never real calldata geometry; keeping
/// offsets and lengths below it keeps all downstream arithmetic exact.
const MAX_SAFE_WORD: u64 = (1 << 53) - 1;

/// Reads the 32-byte big-endian word at `pos`, if the buffer holds one.
pub(crate) fn read_word(data: &[u8], pos: usize) -> Option<U256> {
    let word = data.get(pos..pos.checked_add(32)?)?;
    Some(U256::from_be_slice(word))
}

/// Reads the word at `pos` as a small unsigned integer.
fn read_safe(data: &[u8], pos: usize) -> Option<usize> {
    let word = read_word(data, pos)?;
    if word >= U256::from(MAX_SAFE_WORD) {
        return None;
    }
    Some(word.to::<usize>())
}

/// Is the word at `pos` plausibly an offset into `data`?
///
/// Dynamic tails always follow the static head, so self-referential and
/// backward pointers are rejected, as is anything not on a word boundary.
pub(crate) fn probe_offset(data: &[u8], pos: usize) -> Option<usize> {
    let offset = read_safe(data, pos)?;
    (offset > pos && offset < data.len() && offset % 32 == 0).then_some(offset)
}

/// Is the word at `offset` plausibly a length prefix for a region that fits
/// in `data`?
///
/// No alignment requirement: element counts and byte counts need not be
/// multiples of 32.
pub(crate) fn probe_length(data: &[u8], offset: usize) -> Option<usize> {
    let length = read_safe(data, offset)?;
    (offset + 32 + length <= data.len()).then_some(length)
}
