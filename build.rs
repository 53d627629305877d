// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// True if `feature` is listed in comma-separated `CARGO_CFG_TARGET_FEATURE`
fn has_feature(list: &str, feature: &str) -> bool {
    list.split(',').any(|f| f == feature)
}

/// f64 lanes per native vector register for the target.
fn native_f64_lanes(arch: &str, feats: &str) -> usize {
    match arch {
        "x86_64" | "x86" => {
            if has_feature(feats, "avx512f") {
                8
            } else if has_feature(feats, "avx2") || has_feature(feats, "avx") {
                4
            } else {
                2
            }
        }
        // NEON and simd128 are both 128-bit.
        "aarch64" | "arm" | "wasm32" => 2,
        _ => 2,
    }
}

fn main() {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let feats = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();

    // The chunked reduction needs at least two independent lane sums, so the
    // scalar/soft targets still get a 2-lane width.
    //
    // Override format: SIMD_LANES_OVERRIDE="16"
    let w64 = match env::var("SIMD_LANES_OVERRIDE") {
        Ok(val) => match val.trim().parse::<usize>() {
            Ok(n) if n >= 2 && n <= 64 && n.is_power_of_two() => {
                println!("cargo:warning=SIMD_LANES_OVERRIDE applied: {n}");
                n
            }
            _ => panic!(
                "Invalid SIMD_LANES_OVERRIDE. Expected a power of two in 2..=64, e.g., \"8\""
            ),
        },
        Err(_) => native_f64_lanes(&arch, &feats).max(2),
    };

    let out_path = Path::new(&env::var("OUT_DIR").expect("OUT_DIR is set by cargo"))
        .join("simd_lanes.rs");

    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated SIMD lane width from build.rs

/// Lane count for 64-bit floats, and the chunk width of the chunked reduction.
/// Determined at build time from the target features, floored at 2,
/// or overridden via `SIMD_LANES_OVERRIDE`.
#[allow(non_upper_case_globals, dead_code)]
pub const W64: usize = {w64};
"
        ),
    )
    .expect("failed to write simd_lanes.rs");

    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_ARCH");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!("cargo:rerun-if-env-changed=SIMD_LANES_OVERRIDE");
}
