// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Moore state table for the intersection.
//!
//! Each state fixes the vehicle lamps, the pedestrian lamps and how long they
//! stay lit. After the dwell the sensor word (0..8) picks the successor
//! directly from the state's transition row.
//!
//! # States
//!
//! ```text
//!  GoWest ──► SlowWest ──► GoSouth ──► SlowSouth ──► GoWest
//!                 │                        │
//!                 └──────► GoWalk ◄────────┘
//!                            │
//!          AllRed ─► WalkOff ─► AllRed2 ─► WalkOff2 ─► GoWest / GoSouth / GoWalk
//! ```
//!
//! The four states after `GoWalk` flash the don't-walk lamp before traffic
//! resumes. A pedestrian arriving during the flash sends the machine back to
//! `GoWalk`.
//!
//! # Validation
//!
//! The table is checked at compile time by [`validate`]. A row that lights
//! conflicting greens, shows walk without an all-red, or leaves a signal head
//! dark stops the build.

use crate::config::{DWELL_TICK_MS, SENSOR_COMBINATIONS};
use crate::signal::{PedestrianSignal, SensorInput, TrafficLights};

/// Number of states in the table
pub const STATE_COUNT: usize = 9;

/// Identifier of a table row.
///
/// Successors are stored as `StateId`, so every transition names a row that
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
#[repr(u8)]
pub enum StateId {
    /// East/west green
    GoWest = 0,
    /// East/west yellow
    SlowWest = 1,
    /// North/south green
    GoSouth = 2,
    /// North/south yellow
    SlowSouth = 3,
    /// All vehicles red, walk lit
    GoWalk = 4,
    /// Don't walk on (flash phase 1)
    AllRed = 5,
    /// Pedestrian lamps off (flash phase 1)
    WalkOff = 6,
    /// Don't walk on (flash phase 2)
    AllRed2 = 7,
    /// Pedestrian lamps off, then resume traffic
    WalkOff2 = 8,
}

impl StateId {
    /// Every state, in table order
    pub const ALL: [StateId; STATE_COUNT] = [
        StateId::GoWest,
        StateId::SlowWest,
        StateId::GoSouth,
        StateId::SlowSouth,
        StateId::GoWalk,
        StateId::AllRed,
        StateId::WalkOff,
        StateId::AllRed2,
        StateId::WalkOff2,
    ];

    /// State the controller starts in after reset
    pub const INITIAL: StateId = StateId::GoWest;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < STATE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }
}

/// One row of the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Raw value for the traffic light port
    pub light_output: u8,
    /// Raw value for the pedestrian port
    pub pedestrian_output: u8,
    /// Dwell in `DWELL_TICK_MS` ticks
    pub dwell_ticks: u16,
    /// Successor for each sensor word
    pub next: [StateId; SENSOR_COMBINATIONS],
}

impl State {
    pub const fn dwell_ms(&self) -> u32 {
        self.dwell_ticks as u32 * DWELL_TICK_MS
    }

    pub const fn next_state(&self, input: SensorInput) -> StateId {
        self.next[input.index()]
    }

    pub const fn lights(&self) -> TrafficLights {
        TrafficLights::decode(self.light_output)
    }

    pub const fn pedestrian(&self) -> PedestrianSignal {
        PedestrianSignal::decode(self.pedestrian_output)
    }
}

/// A complete state table, one row per [`StateId`].
pub type Table = [State; STATE_COUNT];

/// Reasons a state table is unsafe to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum TableError {
    #[error("{state:?} lets both directions move at once")]
    ConflictingGreen { state: StateId },
    #[error("{state:?} shows walk while vehicles may move")]
    WalkWithoutAllRed { state: StateId },
    #[error("{state:?} does not light exactly one lamp per direction")]
    MalformedLights { state: StateId },
    #[error("{state:?} lights walk and don't walk together")]
    AmbiguousPedestrian { state: StateId },
    #[error("{state:?} has no dwell time")]
    ZeroDwell { state: StateId },
}

use StateId::{AllRed, AllRed2, GoSouth, GoWalk, GoWest, SlowSouth, SlowWest, WalkOff, WalkOff2};

const TABLE: Table = [
    // GoWest: E/W green, N/S red
    State {
        light_output: 0x0C,
        pedestrian_output: 0x02,
        dwell_ticks: 100,
        next: [GoWest, GoWest, SlowWest, SlowWest, SlowWest, SlowWest, SlowWest, SlowWest],
    },
    // SlowWest: E/W yellow, N/S red
    State {
        light_output: 0x14,
        pedestrian_output: 0x02,
        dwell_ticks: 50,
        next: [GoSouth, GoSouth, GoSouth, GoSouth, GoWalk, GoWalk, GoWalk, GoSouth],
    },
    // GoSouth: E/W red, N/S green
    State {
        light_output: 0x21,
        pedestrian_output: 0x02,
        dwell_ticks: 100,
        next: [GoSouth, SlowSouth, GoSouth, SlowSouth, SlowSouth, SlowSouth, SlowSouth, SlowSouth],
    },
    // SlowSouth: E/W red, N/S yellow
    State {
        light_output: 0x22,
        pedestrian_output: 0x02,
        dwell_ticks: 50,
        next: [GoWest, GoWest, GoWest, GoWest, GoWalk, GoWalk, GoWalk, GoWalk],
    },
    // GoWalk: all red, walk
    State {
        light_output: 0x24,
        pedestrian_output: 0x08,
        dwell_ticks: 100,
        next: [GoWalk, AllRed, AllRed, AllRed, GoWalk, AllRed, AllRed, AllRed],
    },
    // AllRed: all red, don't walk
    State {
        light_output: 0x24,
        pedestrian_output: 0x02,
        dwell_ticks: 25,
        next: [WalkOff, WalkOff, WalkOff, WalkOff, GoWalk, WalkOff, WalkOff, WalkOff],
    },
    // WalkOff: all red, pedestrian dark
    State {
        light_output: 0x24,
        pedestrian_output: 0x00,
        dwell_ticks: 10,
        next: [AllRed2, AllRed2, AllRed2, AllRed2, GoWalk, AllRed2, AllRed2, AllRed2],
    },
    // AllRed2: all red, don't walk
    State {
        light_output: 0x24,
        pedestrian_output: 0x02,
        dwell_ticks: 25,
        next: [WalkOff2, WalkOff2, WalkOff2, WalkOff2, GoWalk, WalkOff2, WalkOff2, WalkOff2],
    },
    // WalkOff2: all red, pedestrian dark
    State {
        light_output: 0x24,
        pedestrian_output: 0x00,
        dwell_ticks: 10,
        next: [GoWest, GoWest, GoSouth, GoWest, GoWalk, GoWest, GoSouth, GoWest],
    },
];

const _: () = {
    if validate(&TABLE).is_err() {
        panic!("traffic light state table violates a safety rule");
    }
};

/// The intersection's state table.
pub static FSM: Table = TABLE;

/// Checks every row of `table` against the intersection's safety rules.
///
/// Returns the first violation in table order.
pub const fn validate(table: &Table) -> Result<(), TableError> {
    let mut i = 0;
    while i < STATE_COUNT {
        let state = StateId::ALL[i];
        let row = &table[i];
        let lights = row.lights();

        if !lights.is_well_formed() {
            return Err(TableError::MalformedLights { state });
        }
        if !lights.is_conflict_free() {
            return Err(TableError::ConflictingGreen { state });
        }
        match row.pedestrian() {
            PedestrianSignal::Ambiguous => {
                return Err(TableError::AmbiguousPedestrian { state });
            }
            PedestrianSignal::Walk if !lights.is_all_red() => {
                return Err(TableError::WalkWithoutAllRed { state });
            }
            _ => {}
        }
        if row.dwell_ticks == 0 {
            return Err(TableError::ZeroDwell { state });
        }
        i += 1;
    }
    Ok(())
}

/// Row of the state table for `state`.
pub fn row(state: StateId) -> &'static State {
    &FSM[state.index()]
}

/// Successor of `state` when the sensors read `input`.
pub fn transition(state: StateId, input: SensorInput) -> StateId {
    row(state).next_state(input)
}
