//! Directional command flags and the sources that produce them.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of network outputs consumed by [`Controls::from_outputs`].
pub const CONTROL_OUTPUTS: usize = 4;

/// Which command source steers a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Always drives forward, never steers.
    Dummy,
    /// Commands are supplied by the host every frame.
    Manual,
    /// Commands come from the vehicle's own network.
    Agent,
}

/// Directional command flags for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    /// Accelerate forwards.
    pub forward: bool,
    /// Turn left (counter-clockwise on screen while moving forward).
    pub left: bool,
    /// Turn right.
    pub right: bool,
    /// Accelerate backwards.
    pub reverse: bool,
}

impl Controls {
    /// The constant policy of dummy traffic.
    pub fn always_forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    /// Maps network outputs `[forward, left, right, reverse]` to flags.
    pub fn from_outputs(outputs: &Array1<f32>) -> Self {
        assert_eq!(
            outputs.len(),
            CONTROL_OUTPUTS,
            "controls need {} network outputs, got {}",
            CONTROL_OUTPUTS,
            outputs.len()
        );

        Self {
            forward: outputs[0] > 0.5,
            left: outputs[1] > 0.5,
            right: outputs[2] > 0.5,
            reverse: outputs[3] > 0.5,
        }
    }
}
