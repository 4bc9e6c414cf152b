//! Flight dynamics core for multirotor simulators.
//!
//! The numeric model ([`dynamics`]) integrates rigid-body equations of motion
//! for a [`frame::Frame`] under normalized motor commands. A
//! [`flight::FlightManager`] runs that model on a dedicated thread at a fixed
//! tick rate and publishes tear-free [`snapshot::KinematicsSnapshot`]s that a
//! render loop reads at its own pace through a [`session::VehicleSession`].

pub mod config;
pub mod control;
pub mod dynamics;
pub mod error;
pub mod flight;
pub mod frame;
pub mod session;
pub mod snapshot;
pub mod worker;

pub use config::{DynamicsConfig, SimConfig};
pub use control::{command_slot, CommandSlot, MotorCommand, SharedCommandSlot};
pub use dynamics::{CrashReason, Dynamics, Pose, State};
pub use error::SimError;
pub use flight::FlightManager;
pub use frame::{Frame, FrameKind, FrameParams, Rotor};
pub use session::VehicleSession;
pub use snapshot::KinematicsSnapshot;
pub use worker::{stop_threaded_worker, ThreadedWorker};
