// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware boundary for the traffic light controller.
//!
//! The controller never touches GPIO, timers or interrupt state itself. It
//! drives a [`Platform`], which the firmware implements on top of the RP2350
//! HAL (see `board`) and the tests implement with recording mocks.

/// Logical I/O ports used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Port {
    /// Six vehicle lamps, red/yellow/green for both directions
    TrafficLights,
    /// Walk / don't walk lamps
    Pedestrian,
    /// East/west car, north/south car and pedestrian detectors
    Sensors,
}

/// Services the controller needs from the board.
///
/// Port values are raw bit patterns; see `config` for the encodings.
/// All operations are infallible: a fixed-function loop has no way to
/// report or recover from a hardware fault.
pub trait Platform {
    /// Switches the pins selected by `mask` on `port` to digital outputs.
    fn configure_digital_output_pins(&mut self, port: Port, mask: u8);

    /// Switches the pins selected by `mask` on `port` to digital inputs.
    fn configure_digital_input_pins(&mut self, port: Port, mask: u8);

    /// Drives every configured output pin of `port` from the matching bit of `value`.
    fn write_outputs(&mut self, port: Port, value: u8);

    /// Samples every configured input pin of `port` into its bit position.
    fn read_inputs(&mut self, port: Port) -> u8;

    /// Blocks for `duration_ms` milliseconds.
    ///
    /// Implementations busy-wait; the control loop must not be preempted
    /// between writing outputs and sampling inputs.
    fn wait_milliseconds(&mut self, duration_ms: u32);

    /// Globally enables interrupts.
    fn enable_interrupts(&mut self);

    /// Globally disables interrupts.
    fn disable_interrupts(&mut self);
}
