// dualtrack_core/src/sensors.rs

//! Software stand-ins for the drive encoders and the inertial sensor.
//!
//! Each simulated device is split in two halves sharing one register block:
//! the device itself, handed to the `PoseEstimator`, and a cloneable driver
//! that feeds it the robot's true motion. Resets behave like hardware: the
//! physical accumulation keeps going and the reported value is taken relative
//! to the last reset.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::abstractions::{Encoder, InertialSensor};

// =========================================================================
// == Encoder ==
// =========================================================================

#[derive(Debug, Default)]
struct EncoderRegisters {
    /// Total shaft rotation since power-on, in degrees.
    travel: f64,
    /// Value of `travel` at the last reset.
    zero: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedEncoder {
    registers: Arc<Mutex<EncoderRegisters>>,
}

/// Driver side of a `SimulatedEncoder`.
#[derive(Debug, Clone)]
pub struct EncoderDriver {
    registers: Arc<Mutex<EncoderRegisters>>,
}

impl SimulatedEncoder {
    pub fn new() -> (Self, EncoderDriver) {
        let registers = Arc::new(Mutex::new(EncoderRegisters::default()));
        (
            Self {
                registers: registers.clone(),
            },
            EncoderDriver { registers },
        )
    }
}

impl Encoder for SimulatedEncoder {
    fn position(&self) -> f64 {
        let r = self.registers.lock();
        r.travel - r.zero
    }

    fn reset_position(&mut self) {
        let mut r = self.registers.lock();
        r.zero = r.travel;
    }
}

impl EncoderDriver {
    /// Rotates the shaft by `degrees`.
    pub fn advance(&self, degrees: f64) {
        self.registers.lock().travel += degrees;
    }

    /// Sets the total shaft rotation since power-on.
    pub fn set_travel(&self, degrees: f64) {
        self.registers.lock().travel = degrees;
    }

    pub fn travel(&self) -> f64 {
        self.registers.lock().travel
    }
}

// =========================================================================
// == Inertial Sensor ==
// =========================================================================

#[derive(Debug, Default)]
struct InertialRegisters {
    /// Physical yaw since power-on, in degrees, unwrapped.
    yaw: f64,
    heading_offset: f64,
    rotation_offset: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedInertial {
    registers: Arc<Mutex<InertialRegisters>>,
}

/// Driver side of a `SimulatedInertial`.
#[derive(Debug, Clone)]
pub struct InertialDriver {
    registers: Arc<Mutex<InertialRegisters>>,
}

impl SimulatedInertial {
    pub fn new() -> (Self, InertialDriver) {
        let registers = Arc::new(Mutex::new(InertialRegisters::default()));
        (
            Self {
                registers: registers.clone(),
            },
            InertialDriver { registers },
        )
    }
}

impl InertialSensor for SimulatedInertial {
    fn heading(&self) -> f64 {
        let r = self.registers.lock();
        r.yaw - r.heading_offset
    }

    fn rotation(&self) -> f64 {
        let r = self.registers.lock();
        r.yaw - r.rotation_offset
    }

    fn reset_rotation(&mut self) {
        self.set_rotation(0.0);
    }

    fn set_rotation(&mut self, value: f64) {
        let mut r = self.registers.lock();
        r.rotation_offset = r.yaw - value;
    }

    fn reset_heading(&mut self) {
        self.set_heading(0.0);
    }

    fn set_heading(&mut self, value: f64) {
        let mut r = self.registers.lock();
        r.heading_offset = r.yaw - value;
    }
}

impl InertialDriver {
    /// Turns the sensor by `degrees`.
    pub fn rotate(&self, degrees: f64) {
        self.registers.lock().yaw += degrees;
    }

    /// Sets the physical yaw since power-on.
    pub fn set_yaw(&self, degrees: f64) {
        self.registers.lock().yaw = degrees;
    }

    pub fn yaw(&self) -> f64 {
        self.registers.lock().yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_encoder_reset_is_relative_to_travel() {
        let (mut encoder, driver) = SimulatedEncoder::new();
        driver.advance(90.0);
        assert_relative_eq!(encoder.position(), 90.0);

        encoder.reset_position();
        assert_relative_eq!(encoder.position(), 0.0);
        assert_relative_eq!(driver.travel(), 90.0);

        driver.advance(-30.0);
        assert_relative_eq!(encoder.position(), -30.0);
    }

    #[test]
    fn test_inertial_registers_are_independent() {
        let (mut imu, driver) = SimulatedInertial::new();
        driver.set_yaw(45.0);

        imu.reset_heading();
        assert_relative_eq!(imu.heading(), 0.0);
        assert_relative_eq!(imu.rotation(), 45.0);

        imu.set_rotation(10.0);
        driver.rotate(400.0);
        // Neither register wraps.
        assert_relative_eq!(imu.heading(), 400.0);
        assert_relative_eq!(imu.rotation(), 410.0);

        imu.set_heading(-90.0);
        assert_relative_eq!(imu.heading(), -90.0);
        imu.reset_rotation();
        assert_relative_eq!(imu.rotation(), 0.0);
    }
}
