//! Token stream decoding: the safe, fully bounds-checked mirror of
//! [`crate::emit`].
//!
//! Every potential out-of-bounds access — a truncated bitstream, an offset
//! reaching before the start of the output, a length that would overrun the
//! destination buffer — is checked at runtime and turned into
//! [`DecodeError::Malformed`] rather than trusted. Factor copies are
//! performed one byte at a time in ascending order, which is what makes
//! overlapping copies (offset smaller than length) correct: a byte written
//! earlier in the same copy is visible to a later read within it.
//!
//! The decode loop itself is driven by the caller-known output length
//! (`dst.len()`), not by [`BitReader::empty`] — the decoder always knows
//! exactly how many bytes it must produce, so that's the authoritative
//! terminator. Once it's produced them all, the stream must have nothing
//! left but what the reader has already consumed; any unconsumed byte past
//! that point is trailing garbage, checked via `empty()` and rejected.

use crate::bitstream::BitReader;
use crate::error::DecodeError;
use crate::optimize::MIN_FACTOR_LEN;

/// Decodes a token stream produced by [`crate::emit::emit`] into `dst`,
/// filling it exactly (`dst.len()` is the caller-known decompressed
/// length). Returns the number of bytes written, always equal to
/// `dst.len()` on success.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut r = BitReader::new(src)?;
    let cap = dst.len();
    let mut out_pos = 0usize;

    while out_pos < cap {
        let is_factor = r.read_bit()?;
        if is_factor {
            let od_hi = r.read_vnibble()?;
            let od_low = r.read_byte()? as u32;
            let od = (od_hi << 8) | od_low;
            let offset = od.checked_add(1).ok_or(DecodeError::Malformed)? as usize;
            let len = r
                .read_gr3()?
                .checked_add(MIN_FACTOR_LEN)
                .ok_or(DecodeError::Malformed)? as usize;

            if offset == 0 || offset > out_pos {
                return Err(DecodeError::Malformed);
            }
            let start = out_pos - offset;
            let end = out_pos.checked_add(len).ok_or(DecodeError::Malformed)?;
            if end > cap {
                return Err(DecodeError::Malformed);
            }
            for k in 0..len {
                dst[out_pos + k] = dst[start + k];
            }
            out_pos = end;
        } else {
            if out_pos >= cap {
                return Err(DecodeError::Malformed);
            }
            dst[out_pos] = r.read_byte()?;
            out_pos += 1;
        }
    }

    if !r.empty() {
        return Err(DecodeError::Malformed);
    }

    Ok(out_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit;
    use crate::{factorize, optimize, psvnsv};
    use crate::suffix_array::sort_suffixes;

    fn encode(text: &[u8]) -> Vec<u8> {
        let active_n = text.len() - crate::emit::TAIL_LITERAL_LEN;
        let active = &text[..active_n];
        let sa = sort_suffixes(active).unwrap();
        let pn = psvnsv::compute(&sa, active_n).unwrap();
        let cand = factorize::compute(active, &pn);
        let parse = optimize::compute(active, &pn, &cand);
        let mut buf = vec![0u8; text.len() * 2 + 64];
        let len = emit(text, &parse, &mut buf).unwrap();
        buf.truncate(len);
        buf
    }

    #[test]
    fn roundtrips_repeated_text() {
        let text = b"the quick brown fox the quick brown fox the quick brown fox";
        let stream = encode(text);
        let mut out = vec![0u8; text.len()];
        let written = decode(&stream, &mut out).unwrap();
        assert_eq!(written, text.len());
        assert_eq!(&out, text);
    }

    #[test]
    fn roundtrips_overlapping_factor() {
        let text = b"abababababababababab";
        let stream = encode(text);
        let mut out = vec![0u8; text.len()];
        decode(&stream, &mut out).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn rejects_offset_before_start() {
        // Hand-build a single bogus factor token: flag=1, offset raw byte
        // large enough that offset > out_pos at position 0.
        let mut buf = [0u8; 16];
        let total = {
            let mut w = crate::bitstream::BitWriter::new(&mut buf).unwrap();
            w.write_bit(true).unwrap();
            w.write_vnibble(0).unwrap();
            w.write_byte(5).unwrap();
            w.write_gr3(0).unwrap();
            w.finish().unwrap()
        };
        let mut out = vec![0u8; 9];
        assert_eq!(
            decode(&buf[..total], &mut out),
            Err(DecodeError::Malformed)
        );
    }

    #[test]
    fn rejects_truncated_stream() {
        let text = b"aaaaaaaaaaaaaaaaaaaa";
        let mut stream = encode(text);
        stream.truncate(stream.len() / 2);
        let mut out = vec![0u8; text.len()];
        assert_eq!(decode(&stream, &mut out), Err(DecodeError::Malformed));
    }

    #[test]
    fn rejects_trailing_garbage_after_a_complete_stream() {
        // A well-formed stream that fully accounts for dst, followed by
        // extra bytes the decoder never needed to touch. Driving the loop
        // on out_pos alone would stop right after the last real token and
        // report success; only the empty() check after the loop catches
        // that the payload had more to it than the declared output.
        let text = b"the quick brown fox the quick brown fox the quick brown fox";
        let mut stream = encode(text);
        stream.extend_from_slice(&[0xAB, 0xCD, 0xEF, 0x01]);
        let mut out = vec![0u8; text.len()];
        assert_eq!(decode(&stream, &mut out), Err(DecodeError::Malformed));
    }
}
