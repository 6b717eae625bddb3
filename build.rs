// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the traffic light firmware
//!
//! Places the RP2350 memory layout where `cortex-m-rt` looks for it:
//! - Copies `memory.x` into the build output directory
//! - Adds that directory to the linker search path
//! - Reruns when the memory layout changes
//!
//! # Memory Layout
//! The `memory.x` file defines the RP2350's memory regions:
//! - **FLASH**: 4MB starting at 0x10000000 (program code storage)
//! - **RAM**: 512KB starting at 0x20000000 (runtime data)
//! - **SRAM8**: 4KB starting at 0x20080000 (dedicated memory bank 8)
//! - **SRAM9**: 4KB starting at 0x20081000 (dedicated memory bank 9)
//!
//! The `-Tlink.x` and `-Tdefmt.x` arguments only apply to the
//! `thumbv8m.main-none-eabihf` target (see `.cargo/config.toml`), so host
//! builds of the library and its tests ignore the copied file.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Copies `memory.x` next to the other build artifacts.
///
/// # Panics
/// Panics if `OUT_DIR` is not set or `memory.x` cannot be written there.
fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR for build scripts"));

    File::create(out.join("memory.x"))
        .expect("create memory.x in OUT_DIR")
        .write_all(include_bytes!("memory.x"))
        .expect("write memory.x to OUT_DIR");

    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
