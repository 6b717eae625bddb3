// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Table-driven traffic light controller for the RP2350.
//!
//! Two perpendicular vehicle signals and one pedestrian signal are run by a
//! Moore state machine whose outputs, dwell times and transitions live in a
//! single static table (see [`fsm`]). Three sensors (east/west car,
//! north/south car, pedestrian) form a 3-bit word that indexes each state's
//! transition row.
//!
//! # Layout
//! - [`config`]: port encodings and pin map
//! - [`platform`]: the hardware boundary the controller drives
//! - [`signal`]: lamp and sensor decoding
//! - [`fsm`]: state table, transition lookup and validation
//! - [`controller`]: start-up and the control loop
//! - `board`: RP2350 implementation of [`platform::Platform`] (target only)
//!
//! The library is `no_std`; host builds are used for the test suite.

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod config;
pub mod controller;
pub mod fsm;
pub mod platform;
pub mod signal;

#[cfg(target_os = "none")]
pub mod board;

pub use controller::TrafficLightController;
pub use fsm::{State, StateId, TableError, FSM};
pub use platform::{Platform, Port};
pub use signal::SensorInput;
