// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350 Table-Driven Traffic Light
//!
//! Firmware for a two-way intersection with a pedestrian crossing, run by a
//! Moore state machine on the Embassy HAL.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Vehicle lamps**: GPIO 2-7 (N/S green, yellow, red; E/W green, yellow, red)
//! - **Pedestrian lamps**: GPIO 8 (don't walk), GPIO 9 (walk)
//! - **Sensors**: GPIO 10 (E/W car), GPIO 11 (N/S car), GPIO 12 (pedestrian)
//!
//! # Features
//! - Nine-state Moore machine with sensor-indexed transitions
//! - Flashing don't-walk clearance after every walk phase
//! - State table checked for conflicting greens at compile time
//! - Real-time defmt logging for debugging
//!
//! # Build
//! ```bash
//! cargo build --release --target thumbv8m.main-none-eabihf
//! ```
//!
//! # Flash
//! ```bash
//! cargo run --release --target thumbv8m.main-none-eabihf
//! ```

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use defmt::info;
    use embassy_executor::Spawner;
    use traffic_light::TrafficLightController;
    use traffic_light::board::Board;
    use {defmt_rtt as _, panic_probe as _};

    /// Program metadata for picotool info command
    ///
    /// This information is embedded in the binary and can be read by picotool
    /// to display program information when querying the firmware.
    #[unsafe(link_section = ".bi_entries")]
    #[used]
    pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
        embassy_rp::binary_info::rp_program_name!(c"Traffic Light"),
        embassy_rp::binary_info::rp_program_description!(c"RP2350A Table-Driven Traffic Light"),
        embassy_rp::binary_info::rp_cargo_version!(),
        embassy_rp::binary_info::rp_program_build_attribute!(),
    ];

    /// Main traffic light task
    ///
    /// Claims the GPIOs, configures the ports and hands control to the
    /// state machine loop.
    ///
    /// # Safety
    /// Never returns. Runs indefinitely until power loss or reset.
    #[embassy_executor::main]
    async fn main(_spawner: Spawner) {
        info!("RP2350A Traffic Light Starting!");
        let p = embassy_rp::init(Default::default());

        let mut board = Board::new(p);
        let mut controller = TrafficLightController::new();
        controller.initialize(&mut board);
        controller.run_forever(&mut board);
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    println!("traffic-light is firmware; build it with --target thumbv8m.main-none-eabihf");
}
