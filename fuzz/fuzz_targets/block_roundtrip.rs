#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The block coder refuses anything shorter than its minimum block
    // length outright; nothing to round-trip below that.
    if data.len() < salz::block::MIN_BLOCK_LEN {
        return;
    }

    let mut dst = vec![0u8; salz::compress_bound(data.len())];
    let written = match salz::compress_block(data, &mut dst) {
        Ok(n) => n,
        Err(_) => return,
    };
    dst.truncate(written);

    let mut out = vec![0u8; data.len()];
    let recovered_len = salz::decompress_block(&dst, &mut out)
        .expect("a block this crate just compressed must decompress cleanly");
    assert_eq!(recovered_len, data.len());
    assert_eq!(
        out, data,
        "block round-trip mismatch: compressed {} bytes back to {} bytes (expected {})",
        dst.len(),
        out.len(),
        data.len()
    );
});
