use serde::{Deserialize, Serialize};

/// Stable identifier for a body. Assigned once at creation and never reused
/// within a `BodySet`, so selection survives deletions of other bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Which pointer button started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value. Unknown buttons yield `None`.
    pub fn from_dom(button: u32) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Attraction law: the exponent on distance in the force denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForceLaw {
    #[default]
    InverseSquare,
    InverseLinear,
    InverseCube,
}

impl ForceLaw {
    /// Parse the camelCase name used in documents and by the UI.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inverseSquare" => Some(ForceLaw::InverseSquare),
            "inverseLinear" => Some(ForceLaw::InverseLinear),
            "inverseCube" => Some(ForceLaw::InverseCube),
            _ => None,
        }
    }

    pub fn exponent(self) -> i32 {
        match self {
            ForceLaw::InverseLinear => 1,
            ForceLaw::InverseSquare => 2,
            ForceLaw::InverseCube => 3,
        }
    }

    /// `d^p` for this law.
    pub fn denominator(self, distance: f64) -> f64 {
        distance.powi(self.exponent())
    }
}

/// How a body's mass follows from its radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MassFormula {
    /// `4πρr³/3`
    #[default]
    VolumeDensity,
    /// `πρr²`
    AreaDensity,
    /// `ρ` is the mass itself.
    Fixed,
}

impl MassFormula {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "volumeDensity" => Some(MassFormula::VolumeDensity),
            "areaDensity" => Some(MassFormula::AreaDensity),
            "fixed" => Some(MassFormula::Fixed),
            _ => None,
        }
    }
}
