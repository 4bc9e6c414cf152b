//! Latest-wins input slot between an external controller and the flight loop.
//!
//! The controller (stick input, autopilot, network bridge) submits motor
//! commands and gimbal angles whenever it likes; the flight loop reads the
//! newest values once per tick. Nothing is queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{Result, SimError};

/// Normalized per-motor command, each value clamped to [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct MotorCommand(Vec<f64>);

impl MotorCommand {
    /// NaN entries become 0.
    pub fn new(values: &[f64]) -> Self {
        Self(
            values
                .iter()
                .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
                .collect(),
        )
    }

    /// The same value on every motor.
    pub fn uniform(motor_count: usize, value: f64) -> Self {
        Self::new(&vec![value; motor_count])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the flight loop sees on one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlInput {
    /// `None` until the controller has sent its first command.
    pub motors: Option<MotorCommand>,
    pub gimbal_roll: f64,
    pub gimbal_pitch: f64,
}

#[derive(Default)]
struct Pending {
    motors: Option<MotorCommand>,
    gimbal_roll: f64,
    gimbal_pitch: f64,
}

/// Thread-safe slot holding the newest controller input.
pub struct CommandSlot {
    motor_count: usize,
    pending: Mutex<Pending>,
    ready: Condvar,
    version: AtomicU64,
}

impl CommandSlot {
    pub fn new(motor_count: usize) -> Self {
        Self {
            motor_count,
            pending: Mutex::new(Pending::default()),
            ready: Condvar::new(),
            version: AtomicU64::new(0),
        }
    }

    pub fn motor_count(&self) -> usize {
        self.motor_count
    }

    /// Number of motor commands submitted so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Replaces the pending motor command.
    pub fn submit(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.motor_count {
            return Err(SimError::MotorCount {
                expected: self.motor_count,
                got: values.len(),
            });
        }
        let command = MotorCommand::new(values);
        self.pending.lock().motors = Some(command);
        self.version.fetch_add(1, Ordering::Release);
        self.ready.notify_all();
        Ok(())
    }

    /// Sets the commanded gimbal angles (degrees).
    pub fn set_gimbal(&self, roll: f64, pitch: f64) {
        let mut pending = self.pending.lock();
        pending.gimbal_roll = roll;
        pending.gimbal_pitch = pitch;
    }

    /// Newest input without waiting.
    pub fn latest(&self) -> ControlInput {
        let pending = self.pending.lock();
        ControlInput {
            motors: pending.motors.clone(),
            gimbal_roll: pending.gimbal_roll,
            gimbal_pitch: pending.gimbal_pitch,
        }
    }

    /// Newest input, waiting at most `timeout` if no motor command has
    /// arrived yet. Once a command exists it is returned immediately on every
    /// call until replaced.
    pub fn wait_latest(&self, timeout: Duration) -> ControlInput {
        let deadline = Instant::now() + timeout;
        let mut pending = self.pending.lock();
        while pending.motors.is_none() {
            if self.ready.wait_until(&mut pending, deadline).timed_out() {
                break;
            }
        }
        ControlInput {
            motors: pending.motors.clone(),
            gimbal_roll: pending.gimbal_roll,
            gimbal_pitch: pending.gimbal_pitch,
        }
    }
}

pub type SharedCommandSlot = Arc<CommandSlot>;

pub fn command_slot(motor_count: usize) -> SharedCommandSlot {
    Arc::new(CommandSlot::new(motor_count))
}
