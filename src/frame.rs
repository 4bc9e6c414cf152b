//! Vehicle frame parameter sets.
//!
//! A [`Frame`] is plain data: the physical constants of one airframe plus the
//! rotor layout used to mix thrusts into body torques. The integration code in
//! [`crate::dynamics`] is shared by every frame.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Physical constants of a multirotor airframe.
///
/// # Fields
///
/// * `b` - Thrust coefficient (N⋅s²/rad²)
/// * `d` - Drag (reaction torque) coefficient (N⋅m⋅s²/rad²)
/// * `m` - Total mass (kg)
/// * `l` - Arm length, center to rotor (m)
/// * `ix`, `iy`, `iz` - Principal moments of inertia (kg⋅m²)
/// * `jr` - Rotor inertia (kg⋅m²)
/// * `max_rpm` - Rotor speed at a full (1.0) motor command
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    pub b: f64,
    pub d: f64,
    pub m: f64,
    pub l: f64,
    pub ix: f64,
    pub iy: f64,
    pub iz: f64,
    pub jr: f64,
    pub max_rpm: f64,
}

impl FrameParams {
    /// Rotor angular speed (rad/s) at a full motor command.
    pub fn max_omega(&self) -> f64 {
        self.max_rpm * PI / 30.0
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("b", self.b),
            ("d", self.d),
            ("m", self.m),
            ("l", self.l),
            ("ix", self.ix),
            ("iy", self.iy),
            ("iz", self.iz),
            ("jr", self.jr),
            ("max_rpm", self.max_rpm),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidFrame(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Placement and spin of a single rotor.
///
/// `roll` and `pitch` are the rotor's mixing factors in units of arm length:
/// a thrust `T` on this rotor produces `l * roll * T` of roll torque and
/// `l * pitch * T` of pitch torque. `direction` is `+1.0` or `-1.0` and sets
/// the sign of its reaction (yaw) torque.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotor {
    pub roll: f64,
    pub pitch: f64,
    pub direction: f64,
}

impl Rotor {
    pub const fn new(roll: f64, pitch: f64, direction: f64) -> Self {
        Self {
            roll,
            pitch,
            direction,
        }
    }
}

// X-frame in ArduPilot motor order: front-right, rear-left, front-left, rear-right.
// Body axes are x forward, y left, z up.
const QUAD_X: [Rotor; 4] = [
    Rotor::new(-1.0, -1.0, -1.0),
    Rotor::new(1.0, 1.0, -1.0),
    Rotor::new(1.0, -1.0, 1.0),
    Rotor::new(-1.0, 1.0, 1.0),
];

/// An airframe: constants plus rotor layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    name: String,
    params: FrameParams,
    rotors: Vec<Rotor>,
}

impl Frame {
    /// Builds a frame from host-supplied tables.
    pub fn custom(
        name: impl Into<String>,
        params: FrameParams,
        rotors: Vec<Rotor>,
    ) -> Result<Self> {
        params.validate()?;
        if rotors.is_empty() {
            return Err(SimError::InvalidFrame("frame has no rotors".into()));
        }
        for (i, rotor) in rotors.iter().enumerate() {
            if rotor.direction.abs() != 1.0 {
                return Err(SimError::InvalidFrame(format!(
                    "rotor {i} direction must be +1 or -1, got {}",
                    rotor.direction
                )));
            }
            if !rotor.roll.is_finite() || !rotor.pitch.is_finite() {
                return Err(SimError::InvalidFrame(format!(
                    "rotor {i} has non-finite mixing factors"
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            params,
            rotors,
        })
    }

    /// Small quad-X (DJI Phantom class).
    pub fn phantom() -> Self {
        Self {
            name: "phantom".into(),
            params: FrameParams {
                b: 5.30216718361085e-5,
                d: 2.23656692806239e-6,
                m: 1.380,
                l: 0.350,
                ix: 2.0,
                iy: 2.0,
                iz: 3.0,
                jr: 3.08013e-4,
                max_rpm: 15000.0,
            },
            rotors: QUAD_X.to_vec(),
        }
    }

    /// Large (1.2m, 16kg) quad-X.
    pub fn big_quad() -> Self {
        Self {
            name: "bigquad".into(),
            params: FrameParams {
                b: 5.30216718361085e-5,
                d: 2.23656692806239e-6,
                m: 16.47,
                l: 0.6,
                ix: 2.0,
                iy: 2.0,
                iz: 3.0,
                jr: 3.08013e-4,
                max_rpm: 10000.0,
            },
            rotors: QUAD_X.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub fn motor_count(&self) -> usize {
        self.rotors.len()
    }

    /// Spin direction per motor, in motor order.
    pub fn motor_directions(&self) -> Vec<f64> {
        self.rotors.iter().map(|r| r.direction).collect()
    }

    /// Normalized motor command at which total thrust balances weight under
    /// gravity `g`. Values above 1.0 mean the frame cannot hover.
    pub fn hover_command(&self, g: f64) -> f64 {
        let p = &self.params;
        let omega = (p.m * g / (self.rotors.len() as f64 * p.b)).sqrt();
        omega / p.max_omega()
    }
}

/// Closed set of built-in airframes, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Phantom,
    BigQuad,
}

impl FrameKind {
    /// Factory for the selected airframe.
    pub fn create(self) -> Frame {
        match self {
            FrameKind::Phantom => Frame::phantom(),
            FrameKind::BigQuad => Frame::big_quad(),
        }
    }
}

impl FromStr for FrameKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phantom" => Ok(FrameKind::Phantom),
            "bigquad" | "big_quad" | "big-quad" => Ok(FrameKind::BigQuad),
            other => Err(SimError::InvalidFrame(format!("unknown frame '{other}'"))),
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Phantom => write!(f, "phantom"),
            FrameKind::BigQuad => write!(f, "bigquad"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hover_command_balances_weight() {
        let g = 9.80665;
        for frame in [Frame::phantom(), Frame::big_quad()] {
            let p = *frame.params();
            let u = frame.hover_command(g);
            assert!(u > 0.0 && u < 1.0, "{} cannot hover: {}", frame.name(), u);

            let omega = u * p.max_omega();
            let thrust = frame.motor_count() as f64 * p.b * omega * omega;
            assert_relative_eq!(thrust, p.m * g, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_quad_x_layout_is_balanced() {
        let frame = Frame::big_quad();
        let roll: f64 = frame.rotors().iter().map(|r| r.roll).sum();
        let pitch: f64 = frame.rotors().iter().map(|r| r.pitch).sum();
        let yaw: f64 = frame.motor_directions().iter().sum();
        assert_eq!(roll, 0.0);
        assert_eq!(pitch, 0.0);
        assert_eq!(yaw, 0.0);
    }

    #[test]
    fn test_factory_by_name() {
        assert_eq!("Phantom".parse::<FrameKind>().unwrap(), FrameKind::Phantom);
        assert_eq!("big-quad".parse::<FrameKind>().unwrap(), FrameKind::BigQuad);
        assert!("octo".parse::<FrameKind>().is_err());

        let frame = FrameKind::BigQuad.create();
        assert_eq!(frame.name(), "bigquad");
        assert_eq!(frame.params().m, 16.47);
        assert_eq!(frame.motor_count(), 4);
    }

    #[test]
    fn test_custom_frame_validation() {
        let params = *Frame::phantom().params();

        let no_rotors = Frame::custom("empty", params, vec![]);
        assert!(matches!(no_rotors, Err(SimError::InvalidFrame(_))));

        let bad_mass = FrameParams { m: 0.0, ..params };
        assert!(Frame::custom("light", bad_mass, QUAD_X.to_vec()).is_err());

        let bad_dir = vec![Rotor::new(1.0, 0.0, 0.5)];
        assert!(Frame::custom("wobbly", params, bad_dir).is_err());

        let tri = vec![
            Rotor::new(0.0, -1.0, 1.0),
            Rotor::new(0.866, 0.5, -1.0),
            Rotor::new(-0.866, 0.5, 1.0),
        ];
        let frame = Frame::custom("tri", params, tri).unwrap();
        assert_eq!(frame.motor_count(), 3);
    }

    #[test]
    fn test_frame_tables_from_json() {
        let json = r#"{
            "b": 5.3e-5, "d": 2.2e-6, "m": 1.2, "l": 0.25,
            "ix": 0.01, "iy": 0.01, "iz": 0.02, "jr": 3e-4, "max_rpm": 12000
        }"#;
        let params: FrameParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.max_rpm, 12000.0);

        let kind: FrameKind = serde_json::from_str("\"bigquad\"").unwrap();
        assert_eq!(kind, FrameKind::BigQuad);
        assert_eq!(kind.to_string(), "bigquad");
    }
}
