#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz TOML parsing and name resolution: invalid input must surface as a
    // parse or validation error, never a panic.
    let parsed = toml::from_str::<reach_config::RawConfig>(data);
    match parsed {
        Ok(cfg) => {
            // Ensure resolve() does not panic
            let _ = cfg.resolve();
        }
        Err(_e) => {
            // parse error is acceptable
        }
    }
});
