//! Kinematics hand-off from the flight thread to the consumer thread.
//!
//! ```text
//! Flight Thread                         Render Thread
//! ┌──────────────────┐                  ┌──────────────────┐
//! │ dynamics.step()  │                  │ tick()           │
//! │       ↓          │                  │       ↑          │
//! │ publish() ──────────SnapshotSlot───────→ read()        │
//! └──────────────────┘                  └──────────────────┘
//! ```
//!
//! The slot holds exactly one snapshot. A publish overwrites it and a read
//! copies it, both under the same short lock, so a reader sees all fields of
//! one publish and never a mix of two.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nalgebra::{UnitQuaternion, Vector3};
use parking_lot::Mutex;

/// Externally visible output of one dynamics tick.
#[derive(Debug, PartialEq)]
pub struct KinematicsSnapshot {
    /// Monotonic publish counter of the flight loop
    pub tick: u64,
    pub position: Vector3<f64>,
    /// Euler angles (roll, pitch, yaw) in radians
    pub orientation: Vector3<f64>,
    /// Per-motor values in [0, 1], used for prop animation and sound
    pub motor_values: Vec<f64>,
    pub gimbal_roll: f64,
    pub gimbal_pitch: f64,
    /// The model is crashed and frozen
    pub crashed: bool,
}

impl KinematicsSnapshot {
    pub fn new(motor_count: usize) -> Self {
        Self {
            tick: 0,
            position: Vector3::zeros(),
            orientation: Vector3::zeros(),
            motor_values: vec![0.0; motor_count],
            gimbal_roll: 0.0,
            gimbal_pitch: 0.0,
            crashed: false,
        }
    }

    pub fn attitude(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
        )
    }

    /// Mean motor value, for audio pitch/volume modulation.
    pub fn motor_mean(&self) -> f64 {
        if self.motor_values.is_empty() {
            return 0.0;
        }
        self.motor_values.iter().sum::<f64>() / self.motor_values.len() as f64
    }
}

impl Clone for KinematicsSnapshot {
    fn clone(&self) -> Self {
        Self {
            tick: self.tick,
            position: self.position,
            orientation: self.orientation,
            motor_values: self.motor_values.clone(),
            gimbal_roll: self.gimbal_roll,
            gimbal_pitch: self.gimbal_pitch,
            crashed: self.crashed,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tick = source.tick;
        self.position = source.position;
        self.orientation = source.orientation;
        self.motor_values.clone_from(&source.motor_values);
        self.gimbal_roll = source.gimbal_roll;
        self.gimbal_pitch = source.gimbal_pitch;
        self.crashed = source.crashed;
    }
}

/// Single-snapshot, newest-wins slot.
pub struct SnapshotSlot {
    snapshot: Mutex<KinematicsSnapshot>,
    version: AtomicU64,
}

impl SnapshotSlot {
    pub fn new(initial: KinematicsSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(initial),
            version: AtomicU64::new(0),
        }
    }

    /// Number of publishes so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Overwrites the held snapshot. Reuses the motor buffer, so steady-state
    /// publishing does not allocate.
    pub fn publish(&self, snapshot: &KinematicsSnapshot) {
        self.snapshot.lock().clone_from(snapshot);
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Copy of the newest snapshot.
    pub fn read(&self) -> KinematicsSnapshot {
        self.snapshot.lock().clone()
    }

    /// Copies the newest snapshot into `out`, reusing its buffers.
    pub fn read_into(&self, out: &mut KinematicsSnapshot) {
        out.clone_from(&self.snapshot.lock());
    }
}

pub type SharedSnapshotSlot = Arc<SnapshotSlot>;
