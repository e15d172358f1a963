//! Fuzz target: TCODE line parser.
//!
//! Throws arbitrary byte soup at `tcode::parse` and verifies:
//! - No panics for any input
//! - Accepted lines always hold 1..=32 non-empty tokens
//! - A reported checksum pair is internally consistent (given == calculated)
//!
//! cargo fuzz run fuzz_line_parser

#![no_main]

use bakesim::tcode::{self, MAX_TOKENS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(parsed) = tcode::parse(line) {
        assert!(!parsed.tokens().is_empty());
        assert!(parsed.tokens().len() <= MAX_TOKENS);
        assert!(parsed.tokens().iter().all(|t| !t.is_empty()));
        if let Some(checksum) = parsed.checksum() {
            // A mismatch must never survive as an Ok parse.
            assert_eq!(checksum.given, checksum.calculated);
        }
    }
});
