#![no_main]
use libfuzzer_sys::fuzz_target;

use lz4split::block::{decompress_block, decompress_parallel, split_block};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as one raw block. Errors are expected; panics are not.
    let sequential = decompress_block(data);

    match split_block(data) {
        Ok(split) => {
            // Splitting succeeds exactly when sequential decoding does, and
            // the parallel decode must then reproduce it byte for byte.
            let sequential = sequential.expect("split succeeded but decode failed");
            assert_eq!(split.decompressed_len(), sequential.len());
            let parallel = decompress_parallel(data, &split, 2).expect("parallel decode failed");
            assert_eq!(parallel, sequential);
        }
        Err(_) => assert!(sequential.is_err()),
    }
});
