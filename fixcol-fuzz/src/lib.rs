//! Fuzzing entry points for fixcol-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Call these functions from a fuzz target: cargo fuzz run fuzz_decode

use fixcol_core::{DecodeConfig, RangeSpec, RecordLayout};

#[derive(Debug, Default)]
struct Probe {
    text: String,
    number: i64,
    flag: Option<bool>,
    raw: Vec<u8>,
}

/// Split `data` into a range spec and a line at the first newline
fn split_input(data: &[u8]) -> (String, String) {
    let text = String::from_utf8_lossy(data);
    match text.split_once('\n') {
        Some((spec, line)) => (spec.to_string(), line.to_string()),
        None => (text.to_string(), String::new()),
    }
}

pub fn fuzz_range(data: &[u8]) {
    let (spec, delimiter) = split_input(data);

    // Should never panic, whatever the spec or delimiter
    if let Ok(range) = RangeSpec::parse(&spec, &delimiter) {
        let _ = range.resolve(spec.len());
    }
    let _ = spec.parse::<RangeSpec>();
}

pub fn fuzz_decode(data: &[u8]) {
    let (spec, line) = split_input(data);

    let layout = RecordLayout::<Probe>::builder()
        .formatted_field("text", spec.as_str(), "trim", |p: &mut Probe, v: String| {
            p.text = v
        })
        .field("number", spec.as_str(), |p: &mut Probe, v: i64| p.number = v)
        .field("flag", spec.as_str(), |p: &mut Probe, v: Option<bool>| p.flag = v)
        .field("raw", spec.as_str(), |p: &mut Probe, v: Vec<u8>| p.raw = v)
        .build();
    let config = DecodeConfig::new().with_standard_formatters();

    // Should either decode or return an error, never panic
    let _ = layout.decode_new(&line, &config);
}
