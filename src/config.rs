//! Simulation configuration.
//!
//! Everything here is handed in by the host as plain values; the builder
//! setters follow the `with_*` style.
//!
//! # Example
//! ```ignore
//! let config = SimConfig::default()
//!     .with_tick_hz(1000.0)
//!     .with_realtime(false)
//!     .with_dynamics(DynamicsConfig::default().with_floor(0.0));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Standard gravity (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Parameters of the numeric model that are not tied to an airframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Gravitational acceleration (m/s², acts along -z)
    pub gravity: f64,
    /// Altitude of the ground plane (m)
    pub floor_z: f64,
    /// Optional speed limit; exceeding it counts as a crash
    pub max_speed: Option<f64>,
    /// Absolute tolerance for the integrator (relative tolerance is 10x)
    pub tolerance: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            floor_z: 0.0,
            max_speed: None,
            tolerance: 1e-6,
        }
    }
}

impl DynamicsConfig {
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_floor(mut self, floor_z: f64) -> Self {
        self.floor_z = floor_z;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite and non-negative, got {}",
                self.gravity
            )));
        }
        if !self.floor_z.is_finite() {
            return Err(SimError::InvalidConfig("floor_z must be finite".into()));
        }
        if let Some(limit) = self.max_speed {
            if !(limit > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "max_speed must be positive, got {limit}"
                )));
            }
        }
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Configuration of a flight worker and the session that drives it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed dynamics tick rate (Hz); the timestep is `1 / tick_hz`
    pub tick_hz: f64,
    /// Pace ticks against the wall clock. When false the loop free-runs.
    pub realtime: bool,
    /// Longest the loop waits for a first motor command before holding (ms)
    pub command_timeout_ms: u64,
    /// Render ticks to skip before the first kinematics read
    pub warmup_ticks: u64,
    pub dynamics: DynamicsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: 1000.0,
            realtime: true,
            command_timeout_ms: 5,
            warmup_ticks: 10,
            dynamics: DynamicsConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn with_tick_hz(mut self, tick_hz: f64) -> Self {
        self.tick_hz = tick_hz;
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_warmup_ticks(mut self, ticks: u64) -> Self {
        self.warmup_ticks = ticks;
        self
    }

    pub fn with_dynamics(mut self, dynamics: DynamicsConfig) -> Self {
        self.dynamics = dynamics;
        self
    }

    /// Fixed integration timestep (s).
    pub fn timestep(&self) -> f64 {
        1.0 / self.tick_hz
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.timestep())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "tick_hz must be finite and positive, got {}",
                self.tick_hz
            )));
        }
        match Duration::try_from_secs_f64(self.timestep()) {
            Ok(period) if !period.is_zero() => {}
            _ => {
                return Err(SimError::InvalidConfig(format!(
                    "tick_hz {} has no representable tick period",
                    self.tick_hz
                )))
            }
        }
        self.dynamics.validate()
    }
}
