// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Property tests for the state table and the control loop.

use proptest::prelude::*;
use traffic_light::fsm::{self, STATE_COUNT, transition, validate};
use traffic_light::signal::{Aspect, PedestrianSignal};
use traffic_light::{FSM, Platform, Port, SensorInput, StateId, TrafficLightController};

/// Plays back sensor words and keeps what the controller showed each step.
#[derive(Default)]
struct ScriptedPlatform {
    sensor_words: Vec<u8>,
    cursor: usize,
    shown: Vec<(u8, u8, u32)>,
    pending: (u8, u8),
    irq_enabled: bool,
}

impl ScriptedPlatform {
    fn new(sensor_words: Vec<u8>) -> Self {
        Self {
            sensor_words,
            ..Self::default()
        }
    }
}

impl Platform for ScriptedPlatform {
    fn configure_digital_output_pins(&mut self, _port: Port, _mask: u8) {}

    fn configure_digital_input_pins(&mut self, _port: Port, _mask: u8) {}

    fn write_outputs(&mut self, port: Port, value: u8) {
        match port {
            Port::TrafficLights => self.pending.0 = value,
            Port::Pedestrian => self.pending.1 = value,
            Port::Sensors => panic!("sensor port written"),
        }
    }

    fn read_inputs(&mut self, port: Port) -> u8 {
        assert_eq!(port, Port::Sensors);
        let word = self.sensor_words[self.cursor];
        self.cursor += 1;
        word
    }

    fn wait_milliseconds(&mut self, duration_ms: u32) {
        self.shown.push((self.pending.0, self.pending.1, duration_ms));
    }

    fn enable_interrupts(&mut self) {
        self.irq_enabled = true;
    }

    fn disable_interrupts(&mut self) {
        self.irq_enabled = false;
    }
}

fn any_state() -> impl Strategy<Value = StateId> {
    (0..STATE_COUNT).prop_map(|i| StateId::ALL[i])
}

#[test]
fn every_state_and_input_has_a_successor() {
    for state in StateId::ALL {
        for raw in 0..8u8 {
            let next = transition(state, SensorInput::from_raw(raw));
            assert!(StateId::ALL.contains(&next), "{state:?}/{raw} -> {next:?}");
        }
    }
}

#[test]
fn no_state_moves_both_directions() {
    for state in StateId::ALL {
        let lights = fsm::row(state).lights();
        assert!(lights.is_conflict_free(), "{state:?} shows {lights:?}");
    }
}

#[test]
fn walk_only_over_all_red() {
    for state in StateId::ALL {
        let row = fsm::row(state);
        if row.pedestrian() == PedestrianSignal::Walk {
            assert_eq!(row.lights().east_west, Aspect::Red, "{state:?}");
            assert_eq!(row.lights().north_south, Aspect::Red, "{state:?}");
        }
    }
}

#[test]
fn shipped_table_passes_validation() {
    assert_eq!(validate(&FSM), Ok(()));
}

#[test]
fn idle_go_west_loops_on_itself() {
    let mut platform = ScriptedPlatform::new(vec![0]);
    let mut controller = TrafficLightController::new();
    controller.initialize(&mut platform);

    assert!(platform.irq_enabled);
    assert_eq!(controller.step(&mut platform), StateId::GoWest);
    assert_eq!(platform.shown, [(0x0C, 0x02, 1000)]);
}

#[test]
fn pedestrian_at_go_west_slows_west_first() {
    assert_eq!(transition(StateId::GoWest, SensorInput::from_raw(4)), StateId::SlowWest);
}

#[test]
fn north_south_car_after_walk_goes_south() {
    assert_eq!(transition(StateId::WalkOff2, SensorInput::from_raw(2)), StateId::GoSouth);
}

proptest! {
    #[test]
    fn transition_is_deterministic(state in any_state(), raw in any::<u8>()) {
        let input = SensorInput::from_raw(raw);
        prop_assert_eq!(transition(state, input), transition(state, input));
        prop_assert_eq!(transition(state, input), FSM[state.index()].next[(raw & 0x07) as usize]);
    }

    #[test]
    fn controller_follows_the_table(words in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut platform = ScriptedPlatform::new(words.clone());
        let mut controller = TrafficLightController::new();
        controller.initialize(&mut platform);

        let mut expected = StateId::GoWest;
        for (step, raw) in words.iter().enumerate() {
            let row = fsm::row(expected);
            let next = controller.step(&mut platform);

            prop_assert_eq!(
                platform.shown[step],
                (row.light_output, row.pedestrian_output, row.dwell_ms())
            );
            expected = transition(expected, SensorInput::from_raw(*raw));
            prop_assert_eq!(next, expected);
            prop_assert_eq!(controller.current(), expected);
        }
    }

    #[test]
    fn identical_runs_produce_identical_outputs(words in prop::collection::vec(0..8u8, 1..32)) {
        let run = |words: &[u8]| {
            let mut platform = ScriptedPlatform::new(words.to_vec());
            let mut controller = TrafficLightController::new();
            controller.initialize(&mut platform);
            let trace: Vec<StateId> = words.iter().map(|_| controller.step(&mut platform)).collect();
            (trace, platform.shown)
        };
        prop_assert_eq!(run(&words), run(&words));
    }

    #[test]
    fn green_phases_hold_against_pedestrians(raw in any::<u8>()) {
        let input = SensorInput::from_raw(raw);
        prop_assert_ne!(transition(StateId::GoWest, input), StateId::GoWalk);
        prop_assert_ne!(transition(StateId::GoSouth, input), StateId::GoWalk);
    }
}
