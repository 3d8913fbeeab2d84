#![no_main]
use libfuzzer_sys::fuzz_target;
use pwa_vault::vault::codec::{JsonCodec, RonCodec};
use pwa_vault::vault::ports::VaultCodec;

fuzz_target!(|data: &[u8]| {
    // Whatever sits in storage, decoding must fail cleanly, never panic.
    let blob = String::from_utf8_lossy(data);
    let _ = JsonCodec.decode(&blob);
    let _ = RonCodec.decode(&blob);
});
