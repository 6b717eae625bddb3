// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Traffic light controller and its control loop.
//!
//! This module runs the Moore machine from `fsm` against a [`Platform`]:
//! - Pin configuration at start-up
//! - Output, dwell, sample, transition on every step
//! - Endless polling loop
//!
//! # Step Order
//!
//! Every iteration performs, exactly once and in this order:
//!
//! 1. Write the state's lamps to the traffic light port
//! 2. Write the state's lamps to the pedestrian port
//! 3. Busy-wait for the state's dwell
//! 4. Sample the sensor port
//! 5. Move to the successor picked by the sample
//!
//! Sensors are only sampled once the lamps have been shown for the full
//! dwell, so a sample never races a lamp change.

use crate::config::{PEDESTRIAN_MASK, SENSOR_MASK, TRAFFIC_LIGHT_MASK};
use crate::fsm::{self, State, StateId};
use crate::platform::{Platform, Port};
use crate::signal::SensorInput;

/// Table-driven traffic light controller.
///
/// Holds only the current state; outputs, dwell and successors all come
/// from the static state table.
pub struct TrafficLightController {
    /// State whose outputs are shown on the next step
    current: StateId,
}

impl TrafficLightController {
    /// Creates a controller parked in the initial state.
    ///
    /// # Returns
    ///
    /// A new `TrafficLightController` starting at `GoWest`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut controller = TrafficLightController::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            current: StateId::INITIAL,
        }
    }

    /// Returns the state whose outputs are shown on the next step.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Returns the table row of the current state.
    pub fn current_state(&self) -> &'static State {
        fsm::row(self.current)
    }

    /// Configures the ports and resets the machine.
    ///
    /// Interrupts are held off while the pins change mode and enabled
    /// again once every port is configured.
    ///
    /// # Arguments
    ///
    /// * `platform` - Board services
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut board = Board::new(p);
    /// controller.initialize(&mut board);
    /// ```
    pub fn initialize<P: Platform>(&mut self, platform: &mut P) {
        platform.disable_interrupts();
        platform.configure_digital_input_pins(Port::Sensors, SENSOR_MASK);
        platform.configure_digital_output_pins(Port::TrafficLights, TRAFFIC_LIGHT_MASK);
        platform.configure_digital_output_pins(Port::Pedestrian, PEDESTRIAN_MASK);
        self.current = StateId::INITIAL;
        platform.enable_interrupts();
        info!("Traffic light ready in {}", self.current);
    }

    /// Runs one iteration of the control loop.
    ///
    /// # Arguments
    ///
    /// * `platform` - Board services
    ///
    /// # Returns
    ///
    /// The state entered after sampling the sensors.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let next = controller.step(&mut board);
    /// ```
    pub fn step<P: Platform>(&mut self, platform: &mut P) -> StateId {
        let state = self.current_state();

        platform.write_outputs(Port::TrafficLights, state.light_output);
        platform.write_outputs(Port::Pedestrian, state.pedestrian_output);
        platform.wait_milliseconds(state.dwell_ms());

        let input = SensorInput::from_raw(platform.read_inputs(Port::Sensors));
        trace!("Sensors: {}", input.bits());

        let next = state.next_state(input);
        if next != self.current {
            debug!("{} -> {}", self.current, next);
        }
        self.current = next;
        next
    }

    /// Runs the control loop until power loss or reset.
    ///
    /// # Arguments
    ///
    /// * `platform` - Board services, already set up by [`Self::initialize`]
    pub fn run_forever<P: Platform>(&mut self, platform: &mut P) -> ! {
        loop {
            self.step(platform);
        }
    }
}

/// Same as [`TrafficLightController::new`].
impl Default for TrafficLightController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Output(Port, u8),
        Input(Port, u8),
        Write(Port, u8),
        Read(Port),
        Wait(u32),
        EnableIrq,
        DisableIrq,
    }

    /// Records every call and replays scripted sensor words.
    struct MockPlatform {
        calls: Vec<Call>,
        sensor_words: Vec<u8>,
    }

    impl MockPlatform {
        fn with_sensors(words: &[u8]) -> Self {
            let mut sensor_words = words.to_vec();
            sensor_words.reverse();
            Self {
                calls: Vec::new(),
                sensor_words,
            }
        }
    }

    impl Platform for MockPlatform {
        fn configure_digital_output_pins(&mut self, port: Port, mask: u8) {
            self.calls.push(Call::Output(port, mask));
        }

        fn configure_digital_input_pins(&mut self, port: Port, mask: u8) {
            self.calls.push(Call::Input(port, mask));
        }

        fn write_outputs(&mut self, port: Port, value: u8) {
            self.calls.push(Call::Write(port, value));
        }

        fn read_inputs(&mut self, port: Port) -> u8 {
            self.calls.push(Call::Read(port));
            self.sensor_words.pop().unwrap_or(0)
        }

        fn wait_milliseconds(&mut self, duration_ms: u32) {
            self.calls.push(Call::Wait(duration_ms));
        }

        fn enable_interrupts(&mut self) {
            self.calls.push(Call::EnableIrq);
        }

        fn disable_interrupts(&mut self) {
            self.calls.push(Call::DisableIrq);
        }
    }

    #[test]
    fn initialize_configures_all_three_ports() {
        let mut platform = MockPlatform::with_sensors(&[]);
        let mut controller = TrafficLightController::new();
        controller.initialize(&mut platform);

        assert_eq!(
            platform.calls,
            [
                Call::DisableIrq,
                Call::Input(Port::Sensors, 0x07),
                Call::Output(Port::TrafficLights, 0x3F),
                Call::Output(Port::Pedestrian, 0x0A),
                Call::EnableIrq,
            ]
        );
        assert_eq!(controller.current(), StateId::GoWest);
    }

    #[test]
    fn initialize_resets_to_go_west() {
        let mut platform = MockPlatform::with_sensors(&[4]);
        let mut controller = TrafficLightController::default();
        controller.step(&mut platform);
        assert_eq!(controller.current(), StateId::SlowWest);

        controller.initialize(&mut platform);
        assert_eq!(controller.current(), StateId::GoWest);
    }

    #[test]
    fn step_writes_waits_reads_then_transitions() {
        let mut platform = MockPlatform::with_sensors(&[0]);
        let mut controller = TrafficLightController::new();

        let next = controller.step(&mut platform);

        assert_eq!(next, StateId::GoWest);
        assert_eq!(
            platform.calls,
            [
                Call::Write(Port::TrafficLights, 0x0C),
                Call::Write(Port::Pedestrian, 0x02),
                Call::Wait(1000),
                Call::Read(Port::Sensors),
            ]
        );
    }

    #[test]
    fn step_shows_outputs_of_the_state_it_leaves() {
        let mut platform = MockPlatform::with_sensors(&[2, 0]);
        let mut controller = TrafficLightController::new();

        assert_eq!(controller.step(&mut platform), StateId::SlowWest);
        assert_eq!(controller.step(&mut platform), StateId::GoSouth);

        assert_eq!(platform.calls[4], Call::Write(Port::TrafficLights, 0x14));
        assert_eq!(platform.calls[6], Call::Wait(500));
    }

    #[test]
    fn upper_sensor_bits_are_ignored() {
        let mut platform = MockPlatform::with_sensors(&[0xF8]);
        let mut controller = TrafficLightController::new();
        assert_eq!(controller.step(&mut platform), StateId::GoWest);
    }

    #[test]
    fn pedestrian_cycle_flashes_then_returns_to_traffic() {
        // GoWest -> SlowWest -> GoWalk -> AllRed -> WalkOff -> AllRed2 -> WalkOff2 -> GoSouth
        let mut platform = MockPlatform::with_sensors(&[4, 4, 2, 2, 2, 2, 2]);
        let mut controller = TrafficLightController::new();

        let trace: Vec<StateId> = (0..7).map(|_| controller.step(&mut platform)).collect();

        assert_eq!(
            trace,
            [
                StateId::SlowWest,
                StateId::GoWalk,
                StateId::AllRed,
                StateId::WalkOff,
                StateId::AllRed2,
                StateId::WalkOff2,
                StateId::GoSouth,
            ]
        );

        let pedestrian: Vec<u8> = platform
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Write(Port::Pedestrian, value) => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(pedestrian, [0x02, 0x02, 0x08, 0x02, 0x00, 0x02, 0x00]);
    }
}
