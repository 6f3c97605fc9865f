//! Optimal parsing: a backward shortest-path dynamic program over exact bit
//! costs.
//!
//! `cost[i]` is the minimum number of bits needed to encode `text[i..]`.
//! From position `i` there are up to three outgoing edges: emit one literal
//! byte and move to `i+1` at a cost of 9 bits (a one-bit flag plus the raw
//! byte), or take the PSV or NSV candidate as a factor and move to
//! `i+len` at a cost of `1 + offset_bits(d) + length_bits(len)` bits. The
//! suffix-array candidates measured by [`crate::factorize`] are exact
//! longest matches, so only their full lengths need to be tried — no
//! shorter prefix of either match can do better under this cost model.
//!
//! Ties are broken deterministically: a literal is preferred over a factor
//! of equal cost, and among factors the PSV candidate is preferred over the
//! NSV candidate. This keeps parsing a pure function of the input with no
//! hidden dependency on iteration order.

use crate::factorize::Candidates;
use crate::psvnsv::PsvNsv;
use crate::vlc;

/// Minimum factor length this format can express (the length code is
/// `vlc::gr3` applied to `len - MIN_FACTOR_LEN`).
pub const MIN_FACTOR_LEN: u32 = 3;

/// Bits needed for a literal byte: one flag bit plus eight raw bits.
const LITERAL_BITS: u32 = 9;

/// Bits needed to encode offset `d` (`d >= 1`): one raw byte for the low
/// eight bits of `d - 1`, plus a `vnibble` for the remaining high bits.
#[inline]
pub fn offset_bits(d: u32) -> u32 {
    8 + vlc::vnibble_len_bits((d - 1) >> 8)
}

/// Bits needed to encode factor length `len` (`len >= MIN_FACTOR_LEN`).
#[inline]
pub fn length_bits(len: u32) -> u32 {
    vlc::gr3_len_bits(len - MIN_FACTOR_LEN)
}

/// A chosen parse move at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Literal,
    Factor { offset: u32, len: u32 },
}

/// The result of optimal parsing: one chosen move per position, and the
/// total bit cost of encoding from each position to the end.
pub struct Parse {
    pub choice: Vec<Move>,
    pub cost: Vec<u32>,
}

/// Runs the backward cost dynamic program over `text`.
pub fn compute(text: &[u8], psvnsv: &PsvNsv, candidates: &Candidates) -> Parse {
    let n = text.len();
    let mut cost = vec![0u32; n + 1];
    let mut choice = vec![Move::Literal; n.max(1)];

    for i in (0..n).rev() {
        let lit_cost = LITERAL_BITS + cost[i + 1];
        let mut best_cost = lit_cost;
        let mut best_move = Move::Literal;

        if let Some(c) = psvnsv.psv[i] {
            let len = candidates.psv_len[i].min((n - i) as u32);
            if len >= MIN_FACTOR_LEN {
                let offset = i as u32 - c;
                let factor_cost = 1 + offset_bits(offset) + length_bits(len) + cost[i + len as usize];
                if factor_cost < best_cost {
                    best_cost = factor_cost;
                    best_move = Move::Factor { offset, len };
                }
            }
        }

        if let Some(c) = psvnsv.nsv[i] {
            let len = candidates.nsv_len[i].min((n - i) as u32);
            if len >= MIN_FACTOR_LEN {
                let offset = i as u32 - c;
                let factor_cost = 1 + offset_bits(offset) + length_bits(len) + cost[i + len as usize];
                if factor_cost < best_cost {
                    best_cost = factor_cost;
                    best_move = Move::Factor { offset, len };
                }
            }
        }

        cost[i] = best_cost;
        choice[i] = best_move;
    }

    Parse { choice, cost }
}
