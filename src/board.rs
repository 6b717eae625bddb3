// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350 implementation of the controller's [`Platform`].
//!
//! Every logical port bit is backed by one `Flex` GPIO so its direction can
//! be chosen at run time by the controller's configuration calls.
//!
//! # Pin Configuration
//!
//! ## Traffic Lights
//! - N/S green, yellow, red: GPIO 2, 3, 4
//! - E/W green, yellow, red: GPIO 5, 6, 7
//!
//! ## Pedestrian
//! - Don't walk: GPIO 8
//! - Walk: GPIO 9
//!
//! ## Sensors (pull-down, active high)
//! - E/W car: GPIO 10
//! - N/S car: GPIO 11
//! - Pedestrian: GPIO 12
//!
//! # Examples
//!
//! ```ignore
//! let p = embassy_rp::init(Default::default());
//! let mut board = Board::new(p);
//! controller.initialize(&mut board);
//! ```

use embassy_rp::gpio::{Flex, Level, Pull};
use embassy_time::{Duration, block_for};

use crate::config::{PEDESTRIAN_BITS, SENSOR_BITS, TRAFFIC_LIGHT_BITS};
use crate::platform::{Platform, Port};

/// GPIOs backing one logical port.
struct PortPins<const N: usize> {
    /// Port bit carried by each pin
    bits: [u8; N],
    pins: [Flex<'static>; N],
    /// Bits currently configured as outputs
    outputs: u8,
    /// Bits currently configured as inputs
    inputs: u8,
}

impl<const N: usize> PortPins<N> {
    fn new(bits: [u8; N], pins: [Flex<'static>; N]) -> Self {
        Self {
            bits,
            pins,
            outputs: 0,
            inputs: 0,
        }
    }

    fn configure_outputs(&mut self, mask: u8) {
        for (bit, pin) in self.bits.iter().zip(self.pins.iter_mut()) {
            let bit = 1u8 << *bit;
            if mask & bit != 0 {
                // Lamps start dark until the first write
                pin.set_low();
                pin.set_as_output();
                self.outputs |= bit;
                self.inputs &= !bit;
            }
        }
    }

    fn configure_inputs(&mut self, mask: u8) {
        for (bit, pin) in self.bits.iter().zip(self.pins.iter_mut()) {
            let bit = 1u8 << *bit;
            if mask & bit != 0 {
                pin.set_pull(Pull::Down);
                pin.set_as_input();
                self.inputs |= bit;
                self.outputs &= !bit;
            }
        }
    }

    fn write(&mut self, value: u8) {
        for (bit, pin) in self.bits.iter().zip(self.pins.iter_mut()) {
            let bit = 1u8 << *bit;
            if self.outputs & bit != 0 {
                pin.set_level(if value & bit != 0 { Level::High } else { Level::Low });
            }
        }
    }

    fn read(&self) -> u8 {
        let mut word = 0;
        for (bit, pin) in self.bits.iter().zip(self.pins.iter()) {
            let bit = 1u8 << *bit;
            if self.inputs & bit != 0 && pin.is_high() {
                word |= bit;
            }
        }
        word
    }
}

/// Traffic light board: lamps, pedestrian lamps and sensors on RP2350 GPIO.
pub struct Board {
    lights: PortPins<6>,
    pedestrian: PortPins<2>,
    sensors: PortPins<3>,
}

impl Board {
    /// Claims the controller's GPIOs from the HAL peripherals.
    ///
    /// All pins stay in their reset mode until the controller configures
    /// them.
    ///
    /// # Arguments
    ///
    /// * `p` - Peripheral singleton from `embassy_rp::init()`
    pub fn new(p: embassy_rp::Peripherals) -> Self {
        Self {
            lights: PortPins::new(
                TRAFFIC_LIGHT_BITS,
                [
                    Flex::new(p.PIN_2),
                    Flex::new(p.PIN_3),
                    Flex::new(p.PIN_4),
                    Flex::new(p.PIN_5),
                    Flex::new(p.PIN_6),
                    Flex::new(p.PIN_7),
                ],
            ),
            pedestrian: PortPins::new(PEDESTRIAN_BITS, [Flex::new(p.PIN_8), Flex::new(p.PIN_9)]),
            sensors: PortPins::new(
                SENSOR_BITS,
                [Flex::new(p.PIN_10), Flex::new(p.PIN_11), Flex::new(p.PIN_12)],
            ),
        }
    }
}

impl Platform for Board {
    fn configure_digital_output_pins(&mut self, port: Port, mask: u8) {
        debug!("{} outputs: {}", port, mask);
        match port {
            Port::TrafficLights => self.lights.configure_outputs(mask),
            Port::Pedestrian => self.pedestrian.configure_outputs(mask),
            Port::Sensors => self.sensors.configure_outputs(mask),
        }
    }

    fn configure_digital_input_pins(&mut self, port: Port, mask: u8) {
        debug!("{} inputs: {}", port, mask);
        match port {
            Port::TrafficLights => self.lights.configure_inputs(mask),
            Port::Pedestrian => self.pedestrian.configure_inputs(mask),
            Port::Sensors => self.sensors.configure_inputs(mask),
        }
    }

    fn write_outputs(&mut self, port: Port, value: u8) {
        let pins = match port {
            Port::TrafficLights => {
                self.lights.write(value);
                self.lights.outputs
            }
            Port::Pedestrian => {
                self.pedestrian.write(value);
                self.pedestrian.outputs
            }
            Port::Sensors => {
                self.sensors.write(value);
                self.sensors.outputs
            }
        };
        if value & !pins != 0 {
            warn!("{} has no output pin for bits {}", port, value & !pins);
        }
    }

    fn read_inputs(&mut self, port: Port) -> u8 {
        match port {
            Port::TrafficLights => self.lights.read(),
            Port::Pedestrian => self.pedestrian.read(),
            Port::Sensors => self.sensors.read(),
        }
    }

    fn wait_milliseconds(&mut self, duration_ms: u32) {
        block_for(Duration::from_millis(u64::from(duration_ms)));
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: the control loop shares no data with interrupt handlers.
        unsafe { cortex_m::interrupt::enable() };
    }

    fn disable_interrupts(&mut self) {
        cortex_m::interrupt::disable();
    }
}
