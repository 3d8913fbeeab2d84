#![no_main]
use libfuzzer_sys::fuzz_target;
use pwa_vault::offline::request::AssetRequest;

fuzz_target!(|raw: &str| {
    let request = AssetRequest::new(raw);
    // Normalizing twice changes nothing.
    assert_eq!(AssetRequest::new(&request.to_string()), request);
    let _ = request.digest();
});
