//! Flight manager: runs a [`Dynamics`] model on its own thread.
//!
//! The flight thread owns the model outright. Each tick it reads the newest
//! controller input, advances the model by one fixed timestep and publishes a
//! [`KinematicsSnapshot`]. The render thread only ever reads snapshots.
//!
//! A crash freezes the model; snapshots keep flowing (so the gimbal still
//! follows its commands) with `crashed` set. Recovery is the owner's job:
//! stop this manager and create a fresh one.

use std::sync::Arc;

use crossbeam_channel::select;
use nalgebra::Vector3;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::control::SharedCommandSlot;
use crate::dynamics::{Dynamics, Pose};
use crate::error::{Result, SimError};
use crate::frame::Frame;
use crate::snapshot::{KinematicsSnapshot, SharedSnapshotSlot, SnapshotSlot};
use crate::worker::{StopSignal, ThreadedWorker, WorkerHandle};

/// Threaded flight dynamics worker.
pub struct FlightManager {
    snapshots: SharedSnapshotSlot,
    worker: WorkerHandle,
    motor_count: usize,
}

impl FlightManager {
    /// Builds the model at `start`, publishes tick 0 and launches the flight
    /// thread.
    pub fn create(
        frame: Frame,
        config: &SimConfig,
        start: &Pose,
        commands: SharedCommandSlot,
    ) -> Result<Self> {
        config.validate()?;
        if commands.motor_count() != frame.motor_count() {
            return Err(SimError::MotorCount {
                expected: frame.motor_count(),
                got: commands.motor_count(),
            });
        }

        let motor_count = frame.motor_count();
        let name = format!("flight-{}", frame.name());
        let mut dynamics = Dynamics::new(frame, config.dynamics);
        dynamics.reset(start);

        let initial = KinematicsSnapshot {
            position: start.position,
            orientation: start.orientation,
            ..KinematicsSnapshot::new(motor_count)
        };
        let snapshots = Arc::new(SnapshotSlot::new(initial));

        let flight_loop = FlightLoop {
            dynamics,
            commands,
            snapshots: Arc::clone(&snapshots),
            config: config.clone(),
        };
        let worker = WorkerHandle::spawn(name, move |stop| flight_loop.run(stop))?;

        info!(
            x = start.position.x,
            y = start.position.y,
            z = start.position.z,
            tick_hz = config.tick_hz,
            "flight manager created"
        );
        Ok(Self {
            snapshots,
            worker,
            motor_count,
        })
    }

    pub fn motor_count(&self) -> usize {
        self.motor_count
    }

    /// Newest snapshot (crash flag included), or `None` once stopped.
    pub fn kinematics(&self) -> Option<KinematicsSnapshot> {
        if !self.worker.is_running() {
            return None;
        }
        Some(self.snapshots.read())
    }

    /// Out-parameter form of [`FlightManager::kinematics`]: fills the pose and
    /// as many motor values as `motor_values` holds. Returns the crash flag,
    /// or `None` once stopped (outputs untouched).
    pub fn copy_kinematics(
        &self,
        position: &mut Vector3<f64>,
        orientation: &mut Vector3<f64>,
        motor_values: &mut [f64],
    ) -> Option<bool> {
        let snapshot = self.kinematics()?;
        *position = snapshot.position;
        *orientation = snapshot.orientation;
        for (out, value) in motor_values.iter_mut().zip(&snapshot.motor_values) {
            *out = *value;
        }
        Some(snapshot.crashed)
    }

    /// Newest gimbal (roll, pitch), regardless of crash state.
    pub fn gimbal(&self) -> Option<(f64, f64)> {
        self.kinematics().map(|k| (k.gimbal_roll, k.gimbal_pitch))
    }

    /// Ticks published so far.
    pub fn tick(&self) -> u64 {
        self.snapshots.version()
    }

    /// Short status line for a debug overlay.
    pub fn message(&self) -> String {
        match self.kinematics() {
            Some(k) => format!(
                "tick {} alt {:.2} m{}",
                k.tick,
                k.position.z,
                if k.crashed { " CRASHED" } else { "" }
            ),
            None => "stopped".to_string(),
        }
    }
}

impl ThreadedWorker for FlightManager {
    fn stop(&mut self) {
        self.worker.stop();
    }

    fn is_running(&self) -> bool {
        self.worker.is_running()
    }
}

/// Everything the flight thread owns.
struct FlightLoop {
    dynamics: Dynamics,
    commands: SharedCommandSlot,
    snapshots: SharedSnapshotSlot,
    config: SimConfig,
}

impl FlightLoop {
    fn run(mut self, stop: StopSignal) {
        let dt = self.config.timestep();
        let timeout = self.config.command_timeout();
        let ticker = self
            .config
            .realtime
            .then(|| crossbeam_channel::tick(self.config.tick_period()));

        let mut snapshot = KinematicsSnapshot::new(self.dynamics.frame().motor_count());
        let mut tick = 0u64;
        let mut reported = false;

        loop {
            match &ticker {
                Some(ticker) => select! {
                    recv(stop.receiver()) -> _ => break,
                    recv(ticker) -> _ => {}
                },
                None => {
                    if stop.is_stopped() {
                        break;
                    }
                }
            }

            let input = self.commands.wait_latest(timeout);
            if let Some(motors) = &input.motors {
                self.dynamics.step(motors.as_slice(), dt);
            }

            if let Some(reason) = self.dynamics.crash_reason() {
                if !reported {
                    let state = self.dynamics.state();
                    warn!(
                        ?reason,
                        tick,
                        z = state.position_z,
                        vz = state.velocity_z,
                        "vehicle crashed; holding state"
                    );
                    reported = true;
                }
            }

            tick += 1;
            let state = self.dynamics.state();
            snapshot.tick = tick;
            snapshot.position = state.position();
            snapshot.orientation = state.orientation();
            snapshot.motor_values.copy_from_slice(self.dynamics.motor_values());
            snapshot.gimbal_roll = input.gimbal_roll;
            snapshot.gimbal_pitch = input.gimbal_pitch;
            snapshot.crashed = self.dynamics.is_crashed();
            self.snapshots.publish(&snapshot);
        }

        debug!(tick, "flight loop exited");
    }
}
