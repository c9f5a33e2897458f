#![no_main]
use libfuzzer_sys::fuzz_target;

use lz4split::frame::{decompress_frame, parse_frame_with};
use lz4split::DecodeOptions;

fuzz_target!(|data: &[u8]| {
    // Both the unchecked and the checksum-verifying paths must fail cleanly.
    for verify_checksums in [false, true] {
        let opts = DecodeOptions { verify_checksums, nb_workers: 1 };
        if let Ok(frame) = parse_frame_with(data, &opts) {
            let _ = decompress_frame(&frame, &opts);
        }
    }
});
