//! Suffix array construction.
//!
//! Building the suffix array itself is treated as an external collaborator:
//! the rest of this crate only depends on the contract "give me a
//! permutation of `0..N` ordering the suffixes of `text` lexicographically",
//! not on any particular construction algorithm. [`sort_suffixes`] below is
//! a direct, comparison-based reference implementation of that contract —
//! correct for any input, but not the linear-time SA-IS/DC3 family a
//! production build would swap in without touching any other module.

use crate::error::EncodeError;

/// Sorts the suffixes of `text` and returns their starting positions in
/// ascending lexicographic order of the suffix they start.
///
/// `text.len()` must fit in `i32` (mirrors the bound the rest of the block
/// coder places on block size); returns [`EncodeError::SortFailed`] if not.
pub fn sort_suffixes(text: &[u8]) -> Result<Vec<u32>, EncodeError> {
    let n = text.len();
    if n > i32::MAX as usize {
        return Err(EncodeError::SortFailed);
    }
    let mut sa: Vec<u32> = (0..n as u32).collect();
    sa.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    Ok(sa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_banana() {
        let sa = sort_suffixes(b"banana").unwrap();
        // Suffixes of "banana": a, a.., ana, anana, banana, na, nana
        let order: Vec<&[u8]> = sa.iter().map(|&i| &b"banana"[i as usize..]).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn handles_all_equal_bytes() {
        let sa = sort_suffixes(&[b'a'; 8]).unwrap();
        assert_eq!(sa.len(), 8);
        // suffix starting later is lexicographically smaller ("aa" < "aaa" is false,
        // shorter prefix of equal bytes sorts first), so positions should be ascending
        // from longest to shortest remaining suffix... verify it's a valid permutation.
        let mut sorted = sa.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0u32..8).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input() {
        let sa = sort_suffixes(&[]).unwrap();
        assert!(sa.is_empty());
    }
}
