#![no_main]
use libfuzzer_sys::fuzz_target;
use tensorhead::config::HeaderConfig;

fuzz_target!(|data: &[u8]| {
    // Small ceiling keeps allocations cheap under the fuzzer.
    let cfg = HeaderConfig { max_header_len: 1 << 16 };
    let _ = tensorhead::header::parse_header_bytes(data, &cfg);
});
