//! Consumer-side adapter for one simulated vehicle.
//!
//! The host calls [`VehicleSession::begin_play`] once a scene is loaded,
//! [`VehicleSession::tick`] once per rendered frame and
//! [`VehicleSession::end_play`] on teardown. A crash is handled by a hard
//! respawn: the flight worker is stopped and a new one is created at the
//! original ground-truth pose.

use tracing::{debug, error, info, warn};

use crate::config::SimConfig;
use crate::control::SharedCommandSlot;
use crate::dynamics::Pose;
use crate::error::{Result, SimError};
use crate::flight::FlightManager;
use crate::frame::Frame;
use crate::snapshot::KinematicsSnapshot;
use crate::worker::stop_threaded_worker;

pub struct VehicleSession {
    frame: Frame,
    config: SimConfig,
    commands: SharedCommandSlot,
    start: Option<Pose>,
    flight: Option<FlightManager>,
    /// Render ticks seen by this session, for warm-up gating
    ticks: u64,
    respawns: u64,
}

impl VehicleSession {
    pub fn new(frame: Frame, config: SimConfig, commands: SharedCommandSlot) -> Self {
        Self {
            frame,
            config,
            commands,
            start: None,
            flight: None,
            ticks: 0,
            respawns: 0,
        }
    }

    /// Starts the flight worker at the scene's start pose.
    ///
    /// `None` means no map is selected: nothing is started and the host must
    /// not run the simulation.
    pub fn begin_play(&mut self, start: Option<Pose>) -> Result<()> {
        let Some(start) = start else {
            error!("no map selected; simulation not started");
            return Err(SimError::NoStartPose);
        };
        self.start = Some(start);
        self.start_workers()?;
        info!(frame = self.frame.name(), "session started");
        Ok(())
    }

    /// Per-render-frame read of the newest kinematics.
    ///
    /// Returns `None` while no worker runs and during the first
    /// `warmup_ticks` frames. On a crash the crashed snapshot is returned and
    /// the worker is respawned at the start pose.
    pub fn tick(&mut self) -> Result<Option<KinematicsSnapshot>> {
        let Some(flight) = &self.flight else {
            return Ok(None);
        };
        self.ticks += 1;
        if self.ticks <= self.config.warmup_ticks {
            return Ok(None);
        }

        let Some(snapshot) = flight.kinematics() else {
            return Ok(None);
        };
        if snapshot.crashed {
            warn!(tick = snapshot.tick, respawns = self.respawns, "crash observed; respawning");
            self.stop_workers();
            self.start_workers()?;
            self.respawns += 1;
        }
        Ok(Some(snapshot))
    }

    /// Newest gimbal (roll, pitch), or `None` while no worker runs.
    pub fn gimbal(&self) -> Option<(f64, f64)> {
        self.flight.as_ref().and_then(FlightManager::gimbal)
    }

    pub fn message(&self) -> String {
        self.flight
            .as_ref()
            .map_or_else(|| "stopped".to_string(), FlightManager::message)
    }

    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    pub fn is_running(&self) -> bool {
        self.flight.is_some()
    }

    pub fn start_pose(&self) -> Option<&Pose> {
        self.start.as_ref()
    }

    /// Stops the worker. Safe to call without `begin_play` and repeatedly.
    pub fn end_play(&mut self) {
        if self.flight.is_some() {
            info!(respawns = self.respawns, "session ended");
        }
        self.stop_workers();
    }

    fn start_workers(&mut self) -> Result<()> {
        let start = self.start.ok_or(SimError::NoStartPose)?;
        let flight = FlightManager::create(
            self.frame.clone(),
            &self.config,
            &start,
            self.commands.clone(),
        )?;
        self.flight = Some(flight);
        debug!("flight worker started");
        Ok(())
    }

    fn stop_workers(&mut self) {
        self.flight = stop_threaded_worker(self.flight.take());
    }
}

impl Drop for VehicleSession {
    fn drop(&mut self) {
        self.stop_workers();
    }
}
