// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration, port encodings and pin mappings for the
//! RP2350 traffic light.
//!
//! The controller only ever sees three logical ports. Each logical bit is
//! wired to one GPIO; the board layer resolves the mapping below.
//!
//! # Traffic Light Port (6 bits)
//!
//! ```text
//!   bit   5      4       3      2      1       0
//!       E/W R  E/W Y  E/W G  N/S R  N/S Y  N/S G
//! GPIO    7      6       5      4      3       2
//! ```
//!
//! # Pedestrian Port
//! - **bit 3**: walk (GPIO 9)
//! - **bit 1**: don't walk (GPIO 8)
//!
//! # Sensor Port (3 bits, active high)
//! - **bit 2**: pedestrian present (GPIO 12)
//! - **bit 1**: north/south car present (GPIO 11)
//! - **bit 0**: east/west car present (GPIO 10)
//!
//! # Timing
//!
//! Dwell times in the state table are counted in 10 ms ticks.

/// Length of one dwell tick in milliseconds
pub const DWELL_TICK_MS: u32 = 10;

/// North/south green lamp
pub const NS_GREEN: u8 = 1 << 0;
/// North/south yellow lamp
pub const NS_YELLOW: u8 = 1 << 1;
/// North/south red lamp
pub const NS_RED: u8 = 1 << 2;
/// East/west green lamp
pub const EW_GREEN: u8 = 1 << 3;
/// East/west yellow lamp
pub const EW_YELLOW: u8 = 1 << 4;
/// East/west red lamp
pub const EW_RED: u8 = 1 << 5;

/// All six traffic lamps
pub const TRAFFIC_LIGHT_MASK: u8 = NS_GREEN | NS_YELLOW | NS_RED | EW_GREEN | EW_YELLOW | EW_RED;

/// "Don't walk" lamp
pub const DONT_WALK: u8 = 1 << 1;
/// "Walk" lamp
pub const WALK: u8 = 1 << 3;

/// Both pedestrian lamps
pub const PEDESTRIAN_MASK: u8 = WALK | DONT_WALK;

/// East/west car detector
pub const EW_CAR_SENSOR: u8 = 1 << 0;
/// North/south car detector
pub const NS_CAR_SENSOR: u8 = 1 << 1;
/// Pedestrian push button / detector
pub const PEDESTRIAN_SENSOR: u8 = 1 << 2;

/// All three sensors
pub const SENSOR_MASK: u8 = EW_CAR_SENSOR | NS_CAR_SENSOR | PEDESTRIAN_SENSOR;

/// Number of distinct sensor words (`SENSOR_MASK + 1`)
pub const SENSOR_COMBINATIONS: usize = SENSOR_MASK as usize + 1;

/// Bit positions of the traffic light port, in GPIO order
pub const TRAFFIC_LIGHT_BITS: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// GPIO numbers for `TRAFFIC_LIGHT_BITS`
#[allow(dead_code)]
pub const TRAFFIC_LIGHT_PINS: [u8; 6] = [2, 3, 4, 5, 6, 7];

/// Bit positions of the pedestrian port (don't walk, walk)
pub const PEDESTRIAN_BITS: [u8; 2] = [1, 3];

/// GPIO numbers for `PEDESTRIAN_BITS`
#[allow(dead_code)]
pub const PEDESTRIAN_PINS: [u8; 2] = [8, 9];

/// Bit positions of the sensor port
pub const SENSOR_BITS: [u8; 3] = [0, 1, 2];

/// GPIO numbers for `SENSOR_BITS`
#[allow(dead_code)]
pub const SENSOR_PINS: [u8; 3] = [10, 11, 12];
