//! Build script for nutricalc
//!
//! Stamps every report with the build that produced it. CI can pin the
//! build number with `NUTRICALC_BUILD_NUMBER` and the timestamp with
//! `SOURCE_DATE_EPOCH`; local builds count up in `build_number.txt`.

use std::env;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=NUTRICALC_BUILD_NUMBER");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let build_number = match pinned_build_number() {
        Some(n) => n,
        None => next_local_build(Path::new(COUNTER_FILE)),
    };
    let timestamp = build_time().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=NUTRICALC_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NUTRICALC_BUILD_TIMESTAMP={}", timestamp);
}

fn pinned_build_number() -> Option<u64> {
    env::var("NUTRICALC_BUILD_NUMBER").ok()?.trim().parse().ok()
}

fn next_local_build(path: &Path) -> u64 {
    let current: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = current + 1;

    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=Could not persist build number: {}", e);
    }
    next
}

fn build_time() -> DateTime<Utc> {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}
