#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the block decoder. Err results are
    // expected and fine; what we verify is no panics or out-of-bounds
    // access, regardless of what the (possibly bogus) header claims.

    // Zero-length output buffer.
    {
        let mut dst = vec![0u8; 0];
        let _ = salz::decompress_block(data, &mut dst);
    }

    // 4 KiB output buffer — covers most real block sizes.
    {
        let mut dst = vec![0u8; 4096];
        let _ = salz::decompress_block(data, &mut dst);
    }

    // Output buffer as large as the input itself (a common heuristic).
    if !data.is_empty() {
        let mut dst = vec![0u8; data.len()];
        let _ = salz::decompress_block(data, &mut dst);
    }

    // Large output buffer to stress the length/bounds-checking path.
    {
        // Cap at 1 MiB so the fuzzer doesn't OOM on tiny inputs that claim
        // a huge decompressed length.
        let large = (data.len().saturating_mul(255)).min(1 << 20);
        let mut dst = vec![0u8; large];
        let _ = salz::decompress_block(data, &mut dst);
    }
});
