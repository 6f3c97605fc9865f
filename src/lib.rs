// SALZ — a suffix-array-driven, optimally-parsed LZ77 byte-stream compressor

pub mod bitstream;
pub mod block;
pub mod cli;
pub mod decode;
pub mod emit;
pub mod error;
pub mod factorize;
pub mod optimize;
pub mod psvnsv;
pub mod suffix_array;
pub mod vlc;

/// Compresses `src` into a single framed block. Equivalent to
/// `LZ4_compress_default` in spirit: one call, caller-provided destination
/// sized via [`compress_bound`].
pub use block::encode_block as compress_block;
/// Decompresses a single framed block into `dst`, which must be exactly the
/// declared decompressed length.
pub use block::decode_block as decompress_block;
/// Upper bound on [`compress_block`]'s output size for an input of `n` bytes.
pub use block::compress_bound;

pub use error::{DecodeError, EncodeError};

/// Crate version string, mirrors `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compresses `src` into a freshly-allocated `Vec<u8>`.
pub fn compress_block_to_vec(src: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let written = compress_block(src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}

/// Decompresses a single framed block into a freshly-allocated `Vec<u8>` of
/// exactly `decompressed_len` bytes.
pub fn decompress_block_to_vec(src: &[u8], decompressed_len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut dst = vec![0u8; decompressed_len];
    decompress_block(src, &mut dst)?;
    Ok(dst)
}
