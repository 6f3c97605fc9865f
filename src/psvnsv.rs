//! Previous/Next-Smaller-Value derivation over a suffix array.
//!
//! For every text position `p`, the suffix array gives two useful
//! neighbours: the closest earlier-occurring suffix that sorts just before
//! `p`'s suffix (PSV) and the closest one that sorts just after it (NSV).
//! Comparing `text[p..]` against either neighbour's suffix yields a
//! candidate match; [`crate::factorize`] measures how long those matches
//! actually run.
//!
//! Both neighbours are derived from one monotone-stack pass over the
//! suffix array extended with sentinel value `-1` at rank `0` and rank
//! `N+1`: for each rank, the previous-smaller-value is whatever remains on
//! the stack after popping every entry whose suffix-array value exceeds the
//! current one, and each popped entry's next-smaller-value is the rank that
//! popped it. A `None` result means the sentinel was hit: no earlier
//! occurrence exists to reference.

use crate::error::EncodeError;

/// Per-position PSV/NSV candidates, as text positions (not suffix-array
/// ranks). `None` means no earlier occurrence exists on that side.
pub struct PsvNsv {
    pub psv: Vec<Option<u32>>,
    pub nsv: Vec<Option<u32>>,
}

/// Computes PSV/NSV for every position of a text of length `n`, given its
/// suffix array `sa` (a permutation of `0..n`).
pub fn compute(sa: &[u32], n: usize) -> Result<PsvNsv, EncodeError> {
    if sa.len() != n {
        return Err(EncodeError::Internal);
    }
    if n == 0 {
        return Ok(PsvNsv {
            psv: Vec::new(),
            nsv: Vec::new(),
        });
    }

    // ext[0] and ext[n+1] are sentinels; ext[1..=n] holds the suffix array,
    // shifted by one to make room for the left sentinel.
    let mut ext = vec![-1i64; n + 2];
    for (k, &pos) in sa.iter().enumerate() {
        ext[k + 1] = pos as i64;
    }

    let mut psv_rank = vec![0usize; n + 2];
    let mut nsv_rank = vec![n + 1; n + 2];
    let mut stack: Vec<usize> = vec![0];

    for i in 1..=n {
        while stack.len() > 1 && ext[*stack.last().unwrap()] > ext[i] {
            let popped = stack.pop().unwrap();
            nsv_rank[popped] = i;
        }
        psv_rank[i] = *stack.last().unwrap();
        stack.push(i);
    }

    // Inverse suffix array: isa[pos] = rank (1-indexed into `ext`).
    let mut isa = vec![0usize; n];
    for (k, &pos) in sa.iter().enumerate() {
        isa[pos as usize] = k + 1;
    }

    let rank_to_pos = |rank: usize| -> Option<u32> {
        let v = ext[rank];
        if v < 0 {
            None
        } else {
            Some(v as u32)
        }
    };

    let mut psv = Vec::with_capacity(n);
    let mut nsv = Vec::with_capacity(n);
    for p in 0..n {
        let rank = isa[p];
        psv.push(rank_to_pos(psv_rank[rank]));
        nsv.push(rank_to_pos(nsv_rank[rank]));
    }

    Ok(PsvNsv { psv, nsv })
}
