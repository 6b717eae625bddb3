// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Decoded views of the raw port values.
//!
//! The state table stores raw bit patterns because that is what the ports
//! take. The types here turn those patterns back into lamp aspects so the
//! safety rules can be checked, both by the const table validation and by
//! the tests.

use crate::config::{
    DONT_WALK, EW_CAR_SENSOR, EW_GREEN, EW_RED, EW_YELLOW, NS_CAR_SENSOR, NS_GREEN, NS_RED,
    NS_YELLOW, PEDESTRIAN_SENSOR, SENSOR_MASK, WALK,
};

/// Aspect shown by one vehicle signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Aspect {
    Red,
    Yellow,
    Green,
    /// No lamp lit
    Dark,
    /// More than one lamp lit
    Ambiguous,
}

impl Aspect {
    /// Decodes one signal head from its red/yellow/green bits in `value`.
    pub const fn decode(value: u8, red: u8, yellow: u8, green: u8) -> Self {
        let r = value & red != 0;
        let y = value & yellow != 0;
        let g = value & green != 0;
        match (r, y, g) {
            (true, false, false) => Aspect::Red,
            (false, true, false) => Aspect::Yellow,
            (false, false, true) => Aspect::Green,
            (false, false, false) => Aspect::Dark,
            _ => Aspect::Ambiguous,
        }
    }

    /// `true` when this aspect lets traffic enter the intersection.
    pub const fn permits_traffic(self) -> bool {
        matches!(self, Aspect::Green | Aspect::Yellow)
    }

    /// `true` only for a single lit red lamp.
    pub const fn is_red(self) -> bool {
        matches!(self, Aspect::Red)
    }
}

/// Both vehicle signal heads decoded from the traffic light port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct TrafficLights {
    pub east_west: Aspect,
    pub north_south: Aspect,
}

impl TrafficLights {
    pub const fn decode(value: u8) -> Self {
        Self {
            east_west: Aspect::decode(value, EW_RED, EW_YELLOW, EW_GREEN),
            north_south: Aspect::decode(value, NS_RED, NS_YELLOW, NS_GREEN),
        }
    }

    /// `false` if both directions are shown green or yellow at once.
    pub const fn is_conflict_free(&self) -> bool {
        !(self.east_west.permits_traffic() && self.north_south.permits_traffic())
    }

    /// `true` when every direction is held at red.
    pub const fn is_all_red(&self) -> bool {
        self.east_west.is_red() && self.north_south.is_red()
    }

    /// `true` when each direction lights exactly one lamp.
    pub const fn is_well_formed(&self) -> bool {
        !matches!(self.east_west, Aspect::Dark | Aspect::Ambiguous)
            && !matches!(self.north_south, Aspect::Dark | Aspect::Ambiguous)
    }
}

/// Pedestrian signal decoded from the pedestrian port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum PedestrianSignal {
    Walk,
    DontWalk,
    /// Both lamps off; the "off" half of the flashing phase
    Dark,
    /// Walk and don't walk lit together
    Ambiguous,
}

impl PedestrianSignal {
    pub const fn decode(value: u8) -> Self {
        match (value & WALK != 0, value & DONT_WALK != 0) {
            (true, false) => PedestrianSignal::Walk,
            (false, true) => PedestrianSignal::DontWalk,
            (false, false) => PedestrianSignal::Dark,
            (true, true) => PedestrianSignal::Ambiguous,
        }
    }
}

/// One sample of the sensor port.
///
/// Always in `0..8`, so it indexes a transition row without a bounds
/// failure whatever the port returns in its upper bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct SensorInput(u8);

impl SensorInput {
    /// No car and no pedestrian
    pub const IDLE: Self = Self(0);

    /// Keeps the three sensor bits of a raw port read.
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw & SENSOR_MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Row offset into a state's transition list.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn east_west_car(self) -> bool {
        self.0 & EW_CAR_SENSOR != 0
    }

    pub const fn north_south_car(self) -> bool {
        self.0 & NS_CAR_SENSOR != 0
    }

    pub const fn pedestrian(self) -> bool {
        self.0 & PEDESTRIAN_SENSOR != 0
    }
}

impl From<u8> for SensorInput {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}
