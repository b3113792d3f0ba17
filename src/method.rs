use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Selector used when the user does not pick a method.
pub const DEFAULT_METHOD: &str = "telea";

/// Which inpainting algorithm fills the brush mask.
///
/// * `Telea` uses fast marching: values propagate inward from the mask
///   boundary, nearby pixels first. Cheap, and good for small smooth holes.
/// * `NavierStokes` propagates image structure with partial differential
///   equations. Slower, but keeps edges and texture across larger holes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InpaintMethod {
    #[default]
    Telea,
    NavierStokes,
}

impl InpaintMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telea => "telea",
            Self::NavierStokes => "ns",
        }
    }
}

impl FromStr for InpaintMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telea" => Ok(Self::Telea),
            "ns" => Ok(Self::NavierStokes),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for InpaintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
