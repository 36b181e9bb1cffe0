//! Field vocabulary
//!
//! The reference dataset exports a fixed, small set of quantities. They are
//! modelled as a closed enum so that a misspelled field is a compile error in
//! Rust code and a construction error when parsing dataset keys.

use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

// =================================================================================================
// Field dimensionality
// =================================================================================================

/// How a field varies in space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Time series only (0D in space), e.g. terminal voltage
    Series,

    /// Varies over the (y, z) cross-section and time
    Spatial,
}

// =================================================================================================
// Field names (Type-safe identifiers)
// =================================================================================================

/// Known reference fields
///
/// # Dataset keys
///
/// | Variant                     | Dataset key                     | Kind    |
/// |-----------------------------|---------------------------------|---------|
/// | `TerminalVoltage`           | `voltage`                       | Series  |
/// | `VolumeAveragedTemperature` | `volume-averaged temperature`   | Series  |
/// | `NegativeCollectorPotential`| `phi_s_cn`                      | Spatial |
/// | `PositiveCollectorPotential`| `phi_s_cp`                      | Spatial |
/// | `Temperature`               | `temperature`                   | Spatial |
/// | `CurrentDensity`            | `current`                       | Spatial |
///
/// # Example
/// ```
/// use fieldref::fields::{FieldKind, FieldName};
///
/// let field: FieldName = "phi_s_cn".parse().unwrap();
/// assert_eq!(field, FieldName::NegativeCollectorPotential);
/// assert_eq!(field.kind(), FieldKind::Spatial);
/// assert!("pressure".parse::<FieldName>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// Terminal voltage (V)
    TerminalVoltage,

    /// Volume-averaged cell temperature (K)
    VolumeAveragedTemperature,

    /// Negative current collector potential (V)
    NegativeCollectorPotential,

    /// Positive current collector potential (V)
    PositiveCollectorPotential,

    /// X-averaged cell temperature over the cross-section (K)
    Temperature,

    /// Current collector current density (A.m-2)
    CurrentDensity,
}

impl FieldName {
    /// Every field, series first
    pub const ALL: [FieldName; 6] = [
        FieldName::TerminalVoltage,
        FieldName::VolumeAveragedTemperature,
        FieldName::NegativeCollectorPotential,
        FieldName::PositiveCollectorPotential,
        FieldName::Temperature,
        FieldName::CurrentDensity,
    ];

    /// Key used by the scattered dataset export
    pub fn dataset_key(&self) -> &'static str {
        match self {
            FieldName::TerminalVoltage => "voltage",
            FieldName::VolumeAveragedTemperature => "volume-averaged temperature",
            FieldName::NegativeCollectorPotential => "phi_s_cn",
            FieldName::PositiveCollectorPotential => "phi_s_cp",
            FieldName::Temperature => "temperature",
            FieldName::CurrentDensity => "current",
        }
    }

    /// Human readable variable name, with unit
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldName::TerminalVoltage => "Terminal voltage [V]",
            FieldName::VolumeAveragedTemperature => "Volume-averaged cell temperature [K]",
            FieldName::NegativeCollectorPotential => "Negative current collector potential [V]",
            FieldName::PositiveCollectorPotential => "Positive current collector potential [V]",
            FieldName::Temperature => "X-averaged cell temperature [K]",
            FieldName::CurrentDensity => "Current collector current density [A.m-2]",
        }
    }

    /// Physical unit
    pub fn unit(&self) -> &'static str {
        match self {
            FieldName::TerminalVoltage
            | FieldName::NegativeCollectorPotential
            | FieldName::PositiveCollectorPotential => "V",
            FieldName::VolumeAveragedTemperature | FieldName::Temperature => "K",
            FieldName::CurrentDensity => "A.m-2",
        }
    }

    /// Spatial dimensionality of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldName::TerminalVoltage | FieldName::VolumeAveragedTemperature => FieldKind::Series,
            _ => FieldKind::Spatial,
        }
    }

    /// Shorthand for `kind() == FieldKind::Spatial`
    pub fn is_spatial(&self) -> bool {
        self.kind() == FieldKind::Spatial
    }
}

impl FromStr for FieldName {
    type Err = FieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.dataset_key() == key)
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
