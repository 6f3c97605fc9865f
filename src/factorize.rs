//! Match-length measurement for every position's PSV/NSV candidates.
//!
//! [`crate::psvnsv`] only tells us *where* the two candidate back-references
//! for each position are; this module measures *how long* the match
//! actually runs by comparing bytes forward from each position and its
//! candidate. Comparisons read eight bytes at a time and use a
//! trailing-zero-count on the first differing word to locate the exact
//! mismatching byte, falling back to a byte-at-a-time tail comparison for
//! the last (< 8)-byte remainder.
//!
//! Matches are measured in increasing position order, which lets a chain of
//! positions whose candidate also advances by exactly one byte reuse the
//! previous match length minus one as a starting lower bound: if
//! `text[p..p+L] == text[c..c+L]`, then trivially
//! `text[p+1..p+1+(L-1)] == text[c+1..c+1+(L-1)]`, so the first `L-1` bytes
//! of the next comparison never need to be re-examined.

use crate::psvnsv::PsvNsv;

/// Minimum length (in bytes, prior to any rounding) of a matched run.
const MIN_MATCH_LOOKUP: usize = 0;

/// Per-position candidate match lengths (the corresponding offsets are
/// `p - psvnsv.psv[p]` / `p - psvnsv.nsv[p]`). A length of `0` means the
/// side has no candidate at all.
pub struct Candidates {
    pub psv_len: Vec<u32>,
    pub nsv_len: Vec<u32>,
}

#[inline]
fn lcp(text: &[u8], a: usize, b: usize) -> u32 {
    let max_len = (text.len() - a).min(text.len() - b);
    let mut i = MIN_MATCH_LOOKUP;
    while i + 8 <= max_len {
        let wa = u64::from_le_bytes(text[a + i..a + i + 8].try_into().unwrap());
        let wb = u64::from_le_bytes(text[b + i..b + i + 8].try_into().unwrap());
        let diff = wa ^ wb;
        if diff != 0 {
            return (i + (diff.trailing_zeros() / 8) as usize) as u32;
        }
        i += 8;
    }
    while i < max_len && text[a + i] == text[b + i] {
        i += 1;
    }
    i as u32
}

/// Same as [`lcp`] but starts the comparison at `floor` bytes in, skipping
/// bytes already proven equal by the caller. `floor` must never exceed the
/// true LCP, or this silently overstates the match.
#[inline]
fn lcp_from(text: &[u8], a: usize, b: usize, floor: u32) -> u32 {
    let max_len = (text.len() - a).min(text.len() - b);
    let floor = (floor as usize).min(max_len);
    let mut i = floor;
    while i + 8 <= max_len {
        let wa = u64::from_le_bytes(text[a + i..a + i + 8].try_into().unwrap());
        let wb = u64::from_le_bytes(text[b + i..b + i + 8].try_into().unwrap());
        let diff = wa ^ wb;
        if diff != 0 {
            return (i + (diff.trailing_zeros() / 8) as usize) as u32;
        }
        i += 8;
    }
    while i < max_len && text[a + i] == text[b + i] {
        i += 1;
    }
    i as u32
}

/// Measures the PSV/NSV match length at every position of `text`.
pub fn compute(text: &[u8], psvnsv: &PsvNsv) -> Candidates {
    let n = text.len();
    let mut psv_len = vec![0u32; n];
    let mut nsv_len = vec![0u32; n];

    let mut prev_psv_candidate: Option<u32> = None;
    let mut prev_psv_len: u32 = 0;
    let mut prev_nsv_candidate: Option<u32> = None;
    let mut prev_nsv_len: u32 = 0;

    for p in 0..n {
        if let Some(c) = psvnsv.psv[p] {
            let c = c as usize;
            let floor = if prev_psv_candidate.map(|pc| pc + 1) == Some(c as u32) {
                prev_psv_len.saturating_sub(1)
            } else {
                0
            };
            let len = lcp_from(text, p, c, floor);
            psv_len[p] = len;
            prev_psv_candidate = Some(c as u32);
            prev_psv_len = len;
        } else {
            prev_psv_candidate = None;
            prev_psv_len = 0;
        }

        if let Some(c) = psvnsv.nsv[p] {
            let c = c as usize;
            let floor = if prev_nsv_candidate.map(|pc| pc + 1) == Some(c as u32) {
                prev_nsv_len.saturating_sub(1)
            } else {
                0
            };
            let len = lcp_from(text, p, c, floor);
            nsv_len[p] = len;
            prev_nsv_candidate = Some(c as u32);
            prev_nsv_len = len;
        } else {
            prev_nsv_candidate = None;
            prev_nsv_len = 0;
        }
    }

    Candidates { psv_len, nsv_len }
}
