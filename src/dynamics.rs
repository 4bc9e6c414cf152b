use nalgebra::{Rotation3, Vector3};

use crate::config::DynamicsConfig;
use crate::frame::Frame;

/// Represents the complete rigid-body state of a multirotor in 3D space.
///
/// # Fields
///
/// * `position_x`, `position_y`, `position_z` - Position coordinates in the inertial frame (meters, z up)
/// * `velocity_x`, `velocity_y`, `velocity_z` - Linear velocities in the inertial frame (m/s)
/// * `roll`, `pitch`, `yaw` - Euler angles representing orientation (radians)
/// * `roll_rate`, `pitch_rate`, `yaw_rate` - Angular velocities in the body frame (rad/s)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct State {
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub velocity_z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll_rate: f64,
    pub pitch_rate: f64,
    pub yaw_rate: f64,
}

impl State {
    /// Converts the state structure to a fixed-size array.
    ///
    /// Order: [pos_x, pos_y, pos_z, vel_x, vel_y, vel_z, roll, pitch, yaw, roll_rate, pitch_rate, yaw_rate]
    pub fn to_array(&self) -> [f64; 12] {
        [
            self.position_x,
            self.position_y,
            self.position_z,
            self.velocity_x,
            self.velocity_y,
            self.velocity_z,
            self.roll,
            self.pitch,
            self.yaw,
            self.roll_rate,
            self.pitch_rate,
            self.yaw_rate,
        ]
    }

    /// Creates a state from an array in the same order as `to_array()`.
    pub fn from_array(arr: &[f64; 12]) -> Self {
        State {
            position_x: arr[0],
            position_y: arr[1],
            position_z: arr[2],
            velocity_x: arr[3],
            velocity_y: arr[4],
            velocity_z: arr[5],
            roll: arr[6],
            pitch: arr[7],
            yaw: arr[8],
            roll_rate: arr[9],
            pitch_rate: arr[10],
            yaw_rate: arr[11],
        }
    }

    /// A state at rest in the given pose.
    pub fn from_pose(pose: &Pose) -> Self {
        State {
            position_x: pose.position.x,
            position_y: pose.position.y,
            position_z: pose.position.z,
            roll: pose.orientation.x,
            pitch: pose.orientation.y,
            yaw: pose.orientation.z,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.position_x, self.position_y, self.position_z)
    }

    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.velocity_x, self.velocity_y, self.velocity_z)
    }

    /// Euler angles as (roll, pitch, yaw).
    pub fn orientation(&self) -> Vector3<f64> {
        Vector3::new(self.roll, self.pitch, self.yaw)
    }

    pub fn angular_velocity(&self) -> Vector3<f64> {
        Vector3::new(self.roll_rate, self.pitch_rate, self.yaw_rate)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position(), self.orientation())
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Position plus Euler orientation (roll, pitch, yaw in radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: Vector3<f64>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: Vector3<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Level pose at the given position.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z), Vector3::zeros())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }
}

/// Physical constants needed by the equations of motion.
///
/// # Fields
///
/// * `g` - Gravitational acceleration (m/s²)
/// * `mass` - Total mass (kg)
/// * `ixx`, `iyy`, `izz` - Principal moments of inertia about body axes (kg⋅m²)
/// * `jr` - Rotor inertia (kg⋅m²), for gyroscopic coupling
#[derive(Clone, Copy, Debug)]
pub struct Consts {
    pub g: f64,
    pub mass: f64,
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    pub jr: f64,
}

/// Why the model stopped integrating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashReason {
    /// Crossed the floor on a downward trajectory.
    GroundImpact,
    /// Forces or the integrated state were not finite.
    NonFinite,
    /// Exceeded the configured speed limit.
    OverSpeed,
}

/// ODE system for a multirotor under constant rotor loads over one timestep.
///
/// # Fields
///
/// * `consts` - Physical constants
/// * `forces` - Applied forces in the body frame (N)
/// * `torques` - Applied torques about body axes (N⋅m)
/// * `rotor_speed` - Net signed rotor speed Σ dir·ω (rad/s), drives gyroscopic terms
pub struct MultirotorODE {
    pub consts: Consts,
    pub forces: Vector3<f64>,
    pub torques: Vector3<f64>,
    pub rotor_speed: f64,
}

impl fast_ode::DifferentialEquation<12> for MultirotorODE {
    /// Computes the time derivatives of the state vector.
    ///
    /// 1. Position derivatives: ẋ = v
    /// 2. Velocity derivatives: v̇ = R·F/m - g
    /// 3. Attitude derivatives: Euler angle kinematics
    /// 4. Angular velocity derivatives: Euler's equations plus rotor gyroscopic coupling
    fn ode_dot_y(&self, _t: f64, y: &fast_ode::Coord<12>) -> (fast_ode::Coord<12>, bool) {
        let state = y.0;

        let phi = state[6]; // roll
        let theta = state[7]; // pitch
        let psi = state[8]; // yaw
        let p = state[9]; // roll rate
        let q = state[10]; // pitch rate
        let r = state[11]; // yaw rate

        let cos_phi = phi.cos();
        let sin_phi = phi.sin();
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let tan_theta = theta.tan();
        let cos_psi = psi.cos();
        let sin_psi = psi.sin();

        let fx_body = self.forces.x;
        let fy_body = self.forces.y;
        let fz_body = self.forces.z;

        // R = Rz(ψ) * Ry(θ) * Rx(φ)
        let fx_inertial = (cos_theta * cos_psi) * fx_body
            + (sin_phi * sin_theta * cos_psi - cos_phi * sin_psi) * fy_body
            + (cos_phi * sin_theta * cos_psi + sin_phi * sin_psi) * fz_body;

        let fy_inertial = (cos_theta * sin_psi) * fx_body
            + (sin_phi * sin_theta * sin_psi + cos_phi * cos_psi) * fy_body
            + (cos_phi * sin_theta * sin_psi - sin_phi * cos_psi) * fz_body;

        let fz_inertial = (-sin_theta) * fx_body
            + (sin_phi * cos_theta) * fy_body
            + (cos_phi * cos_theta) * fz_body;

        let mut dot_y = [0.0; 12];

        dot_y[0] = state[3];
        dot_y[1] = state[4];
        dot_y[2] = state[5];

        let mass = self.consts.mass;
        dot_y[3] = fx_inertial / mass;
        dot_y[4] = fy_inertial / mass;
        dot_y[5] = fz_inertial / mass - self.consts.g;

        dot_y[6] = p + q * sin_phi * tan_theta + r * cos_phi * tan_theta; // φ̇
        dot_y[7] = q * cos_phi - r * sin_phi; // θ̇
        dot_y[8] = if cos_theta.abs() > 1e-6 {
            q * sin_phi / cos_theta + r * cos_phi / cos_theta // ψ̇
        } else {
            0.0 // Avoid singularity at θ = ±π/2
        };

        let ixx = self.consts.ixx;
        let iyy = self.consts.iyy;
        let izz = self.consts.izz;
        let jr = self.consts.jr;
        let omega = self.rotor_speed;

        dot_y[9] = (self.torques.x + (iyy - izz) * q * r - jr * q * omega) / ixx; // ṗ
        dot_y[10] = (self.torques.y + (izz - ixx) * r * p + jr * p * omega) / iyy; // q̇
        dot_y[11] = (self.torques.z + (ixx - iyy) * p * q) / izz; // ṙ

        (fast_ode::Coord(dot_y), true)
    }
}

/// Integrates `ode` from `initial_state` over `[0, dt]`.
///
/// Returns `None` if the solver gives up before reaching `dt`.
pub fn integrate(
    ode: &MultirotorODE,
    initial_state: &State,
    dt: f64,
    tolerance: f64,
) -> Option<State> {
    let initial_coord = fast_ode::Coord(initial_state.to_array());

    let result = fast_ode::solve_ivp(
        ode,
        (0.0, dt),
        initial_coord,
        |_, _| true,
        tolerance,
        tolerance * 10.0,
    );

    match result {
        fast_ode::IvpResult::FinalTimeReached(final_coord) => {
            Some(State::from_array(&final_coord.0))
        }
        _ => None,
    }
}

/// Body-frame loads produced by the rotors for one command.
#[derive(Clone, Copy, Debug)]
struct RotorLoads {
    force: Vector3<f64>,
    torque: Vector3<f64>,
    rotor_speed: f64,
}

impl RotorLoads {
    fn is_finite(&self) -> bool {
        self.force.iter().chain(self.torque.iter()).all(|v| v.is_finite())
            && self.rotor_speed.is_finite()
    }
}

/// Numeric flight model for one airframe.
///
/// Owns the rigid-body state exclusively. No I/O and no shared state: the
/// owner drives it with [`Dynamics::step`] and reads copies back.
pub struct Dynamics {
    frame: Frame,
    config: DynamicsConfig,
    state: State,
    motor_values: Vec<f64>,
    rotor_speeds: Vec<f64>,
    airborne: bool,
    crash: Option<CrashReason>,
}

impl Dynamics {
    /// Creates a model resting at the origin.
    pub fn new(frame: Frame, config: DynamicsConfig) -> Self {
        let motors = frame.motor_count();
        let mut dynamics = Self {
            frame,
            config,
            state: State::default(),
            motor_values: vec![0.0; motors],
            rotor_speeds: vec![0.0; motors],
            airborne: false,
            crash: None,
        };
        dynamics.reset(&Pose::default());
        dynamics
    }

    /// Puts the vehicle at rest in `pose` and clears any crash.
    ///
    /// A pose at or below the floor starts grounded: the vehicle sits still
    /// until thrust exceeds weight.
    pub fn reset(&mut self, pose: &Pose) {
        self.state = State::from_pose(pose);
        self.motor_values.iter_mut().for_each(|v| *v = 0.0);
        self.rotor_speeds.iter_mut().for_each(|v| *v = 0.0);
        self.airborne = pose.position.z > self.config.floor_z;
        self.crash = None;
    }

    /// Current state by value.
    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_crashed(&self) -> bool {
        self.crash.is_some()
    }

    pub fn crash_reason(&self) -> Option<CrashReason> {
        self.crash
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// Clamped motor commands applied on the last step.
    pub fn motor_values(&self) -> &[f64] {
        &self.motor_values
    }

    /// Rotor angular speeds (rad/s) from the last step.
    pub fn rotor_speeds(&self) -> &[f64] {
        &self.rotor_speeds
    }

    /// Advances the state by `dt` seconds under `command`.
    ///
    /// Commands are clamped to [0, 1]; missing entries count as zero and extra
    /// entries are ignored. A non-positive `dt` or a crashed model leaves the
    /// state untouched.
    pub fn step(&mut self, command: &[f64], dt: f64) -> State {
        if self.crash.is_some() || !dt.is_finite() || dt <= 0.0 {
            return self.state;
        }

        let loads = self.apply_command(command);
        if !loads.is_finite() {
            self.crash = Some(CrashReason::NonFinite);
            return self.state;
        }

        let p = self.frame.params();
        let consts = Consts {
            g: self.config.gravity,
            mass: p.m,
            ixx: p.ix,
            iyy: p.iy,
            izz: p.iz,
            jr: p.jr,
        };

        if !self.airborne {
            let rotation =
                Rotation3::from_euler_angles(self.state.roll, self.state.pitch, self.state.yaw);
            let lift = (rotation * loads.force).z / consts.mass - consts.g;
            if lift <= 0.0 {
                return self.state;
            }
            self.airborne = true;
        }

        let ode = MultirotorODE {
            consts,
            forces: loads.force,
            torques: loads.torque,
            rotor_speed: loads.rotor_speed,
        };

        let next = match integrate(&ode, &self.state, dt, self.config.tolerance) {
            Some(next) if next.is_finite() => next,
            _ => {
                self.crash = Some(CrashReason::NonFinite);
                return self.state;
            }
        };

        self.state = next;
        self.crash = self.check_limits();
        next
    }

    fn check_limits(&self) -> Option<CrashReason> {
        if self.state.position_z < self.config.floor_z && self.state.velocity_z < 0.0 {
            return Some(CrashReason::GroundImpact);
        }
        match self.config.max_speed {
            Some(limit) if self.state.velocity().norm() > limit => Some(CrashReason::OverSpeed),
            _ => None,
        }
    }

    /// Converts a command into rotor speeds and body loads.
    fn apply_command(&mut self, command: &[f64]) -> RotorLoads {
        let p = *self.frame.params();
        let max_omega = p.max_omega();

        let mut thrust = 0.0;
        let mut torque = Vector3::zeros();
        let mut rotor_speed = 0.0;

        for (i, rotor) in self.frame.rotors().iter().enumerate() {
            let value = command.get(i).copied().unwrap_or(0.0);
            // NaN commands count as zero
            let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
            let omega = value * max_omega;
            let omega_sq = omega * omega;
            let t = p.b * omega_sq;

            thrust += t;
            torque.x += p.l * rotor.roll * t;
            torque.y += p.l * rotor.pitch * t;
            torque.z += p.d * rotor.direction * omega_sq;
            rotor_speed += rotor.direction * omega;

            self.motor_values[i] = value;
            self.rotor_speeds[i] = omega;
        }

        RotorLoads {
            force: Vector3::new(0.0, 0.0, thrust),
            torque,
            rotor_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameParams, Rotor};
    use approx::assert_relative_eq;

    const DT: f64 = 0.001;

    fn big_quad() -> Dynamics {
        Dynamics::new(Frame::big_quad(), DynamicsConfig::default())
    }

    /// Reset followed by a read returns exactly the pose, at rest.
    #[test]
    fn test_reset_then_state_returns_pose() {
        let mut dynamics = big_quad();
        let pose = Pose::new(Vector3::new(1.5, -2.0, 7.25), Vector3::new(0.1, -0.2, 1.3));
        dynamics.reset(&pose);

        let state = dynamics.state();
        assert_eq!(state.pose(), pose);
        assert_eq!(state.velocity(), Vector3::zeros());
        assert_eq!(state.angular_velocity(), Vector3::zeros());
        assert!(dynamics.rotor_speeds().iter().all(|w| *w == 0.0));
        assert!(!dynamics.is_crashed());
    }

    /// With thrust equal to weight the vertical acceleration stays at zero.
    #[test]
    fn test_hover_simulation() {
        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 10.0));
        let hover = dynamics.frame().hover_command(dynamics.config().gravity);
        let command = [hover; 4];

        let mut previous = dynamics.state();
        for _ in 0..1000 {
            let state = dynamics.step(&command, DT);
            let accel_z = (state.velocity_z - previous.velocity_z) / DT;
            assert!(accel_z.abs() < 1e-6, "vertical acceleration {}", accel_z);
            previous = state;
        }

        let state = dynamics.state();
        assert!((state.position_z - 10.0).abs() < 1e-6);
        assert!(state.velocity_z.abs() < 1e-6);
        assert!(state.angular_velocity().norm() < 1e-9);
        assert!(!dynamics.is_crashed());
    }

    /// Zero commands give a free fall under gravity alone.
    #[test]
    fn test_free_fall() {
        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 10.0));
        let g = dynamics.config().gravity;

        let mut previous = dynamics.state();
        for _ in 0..500 {
            let state = dynamics.step(&[0.0; 4], DT);
            let accel_z = (state.velocity_z - previous.velocity_z) / DT;
            assert_relative_eq!(accel_z, -g, epsilon = 1e-6);
            previous = state;
        }

        let t = 500.0 * DT;
        let state = dynamics.state();
        assert_relative_eq!(state.velocity_z, -g * t, epsilon = 1e-6);
        assert_relative_eq!(state.position_z, 10.0 - 0.5 * g * t * t, epsilon = 1e-6);
        assert!(!dynamics.is_crashed());
    }

    /// The step that crosses the floor going down reports the crash, and the
    /// model stays frozen until reset.
    #[test]
    fn test_ground_impact_freezes_model() {
        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 0.05));

        let mut crossed = None;
        for i in 0..1000 {
            let before = dynamics.state();
            let after = dynamics.step(&[0.0; 4], DT);
            if dynamics.is_crashed() {
                assert!(before.position_z >= 0.0);
                assert!(after.position_z < 0.0);
                assert!(after.velocity_z < 0.0);
                crossed = Some(i);
                break;
            }
            assert!(after.position_z >= 0.0);
        }
        assert!(crossed.is_some(), "vehicle never reached the floor");
        assert_eq!(dynamics.crash_reason(), Some(CrashReason::GroundImpact));

        let frozen = dynamics.state();
        for _ in 0..10 {
            assert_eq!(dynamics.step(&[1.0; 4], DT), frozen);
        }

        dynamics.reset(&Pose::at(0.0, 0.0, 3.0));
        assert!(!dynamics.is_crashed());
        let state = dynamics.step(&[0.0; 4], DT);
        assert!(state.position_z < 3.0);
    }

    /// A vehicle resting on the floor with too little thrust neither moves
    /// nor crashes, and lifts off once thrust exceeds weight.
    #[test]
    fn test_grounded_vehicle_waits_for_lift() {
        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 0.0));
        assert!(!dynamics.is_airborne());

        let resting = dynamics.state();
        for _ in 0..100 {
            assert_eq!(dynamics.step(&[0.5; 4], DT), resting);
        }
        assert!(!dynamics.is_crashed());

        for _ in 0..100 {
            dynamics.step(&[1.0; 4], DT);
        }
        assert!(dynamics.is_airborne());
        assert!(dynamics.state().position_z > 0.0);
        assert!(dynamics.state().velocity_z > 0.0);
    }

    #[test]
    fn test_non_finite_forces_crash_and_keep_state() {
        let params = FrameParams {
            b: 1e307,
            ..*Frame::phantom().params()
        };
        let frame =
            Frame::custom("overpowered", params, Frame::phantom().rotors().to_vec()).unwrap();
        let mut dynamics = Dynamics::new(frame, DynamicsConfig::default());
        dynamics.reset(&Pose::at(0.0, 0.0, 5.0));

        let state = dynamics.step(&[1.0; 4], DT);
        assert_eq!(dynamics.crash_reason(), Some(CrashReason::NonFinite));
        assert!(state.is_finite());
        assert_eq!(state.position_z, 5.0);
    }

    /// Loads that are finite but overflow inside the solver also crash the
    /// model and keep the last finite state.
    #[test]
    fn test_solver_overflow_crashes_and_keeps_state() {
        let params = FrameParams {
            b: 1e300,
            ..*Frame::phantom().params()
        };
        let frame =
            Frame::custom("overflowing", params, Frame::phantom().rotors().to_vec()).unwrap();
        let mut dynamics = Dynamics::new(frame, DynamicsConfig::default());
        dynamics.reset(&Pose::at(0.0, 0.0, 5.0));

        let state = dynamics.step(&[1.0; 4], DT);
        assert!(dynamics.rotor_speeds().iter().all(|w| w.is_finite()));
        assert_eq!(dynamics.crash_reason(), Some(CrashReason::NonFinite));
        assert!(state.is_finite());
        assert_eq!(state, dynamics.state());
        assert_eq!(state.position_z, 5.0);
    }

    /// With the vehicle rolling, a net rotor speed couples into pitch through
    /// rotor inertia, with the sign of the net speed.
    #[test]
    fn test_gyroscopic_coupling() {
        let frame = Frame::big_quad();
        let params = *frame.params();
        let max_omega = params.max_omega();
        let roll_rate = 1.0;

        let pitch_rate_after = |command: [f64; 4]| {
            let mut dynamics = Dynamics::new(frame.clone(), DynamicsConfig::default());
            dynamics.reset(&Pose::at(0.0, 0.0, 10.0));
            dynamics.state.roll_rate = roll_rate;
            dynamics.step(&command, DT).pitch_rate
        };

        // FR and RL spin one way, FL and RR the other: no roll or pitch torque
        let net_omega = 2.0 * (0.6 - 0.5) * max_omega;
        let expected = params.jr * roll_rate * net_omega / params.iy * DT;

        let ccw_heavy = pitch_rate_after([0.5, 0.5, 0.6, 0.6]);
        assert_relative_eq!(ccw_heavy, expected, max_relative = 0.01);

        let cw_heavy = pitch_rate_after([0.6, 0.6, 0.5, 0.5]);
        assert_relative_eq!(cw_heavy, -expected, max_relative = 0.01);

        let balanced = pitch_rate_after([0.55; 4]);
        assert!(balanced.abs() < 1e-12);
    }

    #[test]
    fn test_speed_limit() {
        let config = DynamicsConfig::default().with_max_speed(2.0);
        let mut dynamics = Dynamics::new(Frame::big_quad(), config);
        dynamics.reset(&Pose::at(0.0, 0.0, 100.0));

        for _ in 0..1000 {
            dynamics.step(&[0.0; 4], DT);
            if dynamics.is_crashed() {
                break;
            }
        }
        assert_eq!(dynamics.crash_reason(), Some(CrashReason::OverSpeed));
        assert!(dynamics.state().velocity().norm() > 2.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 10.0));
        let start = dynamics.state();

        assert_eq!(dynamics.step(&[1.0; 4], 0.0), start);
        assert_eq!(dynamics.step(&[1.0; 4], -0.01), start);
        assert_eq!(dynamics.step(&[1.0; 4], f64::NAN), start);

        dynamics.step(&[2.0, -1.0, f64::NAN], DT);
        assert_eq!(dynamics.motor_values(), &[1.0, 0.0, 0.0, 0.0]);
        let max_omega = dynamics.frame().params().max_omega();
        assert_relative_eq!(dynamics.rotor_speeds()[0], max_omega);
        assert!(dynamics.state().is_finite());
    }

    /// Extra thrust on the left rotors rolls right side up; extra thrust on
    /// the positive-direction rotors yaws positively.
    #[test]
    fn test_differential_thrust_torques() {
        let hover = Frame::big_quad().hover_command(9.80665);

        let mut dynamics = big_quad();
        dynamics.reset(&Pose::at(0.0, 0.0, 50.0));
        for _ in 0..100 {
            dynamics.step(&[hover, hover + 0.05, hover + 0.05, hover], DT);
        }
        let state = dynamics.state();
        assert!(state.roll_rate > 0.0);
        assert!(state.roll > 0.0);
        assert!(state.pitch_rate.abs() < 1e-9);

        dynamics.reset(&Pose::at(0.0, 0.0, 50.0));
        for _ in 0..100 {
            dynamics.step(&[hover, hover, hover + 0.05, hover + 0.05], DT);
        }
        let state = dynamics.state();
        assert!(state.yaw_rate > 0.0);
        assert!(state.roll_rate.abs() < 1e-9);
    }

    #[test]
    fn test_custom_frame_rotor_count() {
        let rotors = vec![
            Rotor::new(0.0, -1.0, 1.0),
            Rotor::new(0.866, 0.5, -1.0),
            Rotor::new(-0.866, 0.5, 1.0),
        ];
        let frame = Frame::custom("tri", *Frame::phantom().params(), rotors).unwrap();
        let mut dynamics = Dynamics::new(frame, DynamicsConfig::default());
        dynamics.reset(&Pose::at(0.0, 0.0, 2.0));

        dynamics.step(&[0.3, 0.3, 0.3, 0.9], DT);
        assert_eq!(dynamics.motor_values().len(), 3);
        assert_eq!(dynamics.rotor_speeds().len(), 3);
    }
}
