//! Error types for joint generation.
//!
//! Configuration problems surface while settings are built or merged,
//! geometry problems while a contour or edge is laid out.

use crate::settings::ParamKind;
use thiserror::Error;

/// Errors raised while building or merging joint settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The override names a parameter the family does not declare.
    #[error("Unknown parameter for {family}: {name}")]
    UnknownParameter { family: String, name: String },

    /// A declaration uses a value type the settings model cannot carry.
    #[error("Type not supported for {family}.{name}: {reason}")]
    UnsupportedType {
        family: String,
        name: String,
        reason: String,
    },

    /// An override has a different type than the declared default.
    #[error("Parameter '{family}.{name}' expects {expected}, got {found}")]
    TypeMismatch {
        family: String,
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },

    /// An override is not one of the declared choices.
    #[error("Invalid choice for '{family}.{name}': {value} (valid: {choices})")]
    InvalidChoice {
        family: String,
        name: String,
        value: String,
        choices: String,
    },

    /// Overrides were supplied for a family that does not exist.
    #[error("Unknown joint family: {0}")]
    UnknownFamily(String),

    /// No edge is registered under the tag.
    #[error("Unknown edge type '{0}'")]
    UnknownEdge(char),

    /// A family needs another family registered first.
    #[error("Missing dependency: {0}")]
    MissingDependency(String),
}

/// Errors raised while laying out edges and contours.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The requested length cannot hold the fixed part of the profile.
    #[error("{edge}: length {length:.3} is shorter than the fixed profile length {required:.3}")]
    LengthTooShort {
        edge: String,
        length: f64,
        required: f64,
    },

    /// Hinge layout selector outside {1, 2, 3}.
    #[error("Hinge layout must be 1, 2 or 3 (got {0})")]
    InvalidLayout(u8),

    /// The first contour vertex carries a corner radius.
    #[error("The corner radius at point 0 must be 0 (got {0})")]
    StartCornerRadius(f64),

    /// A contour needs at least three vertices.
    #[error("A contour needs at least 3 vertices (got {0})")]
    TooFewVertices(usize),

    /// Two consecutive contour vertices coincide.
    #[error("Contour side {0} has zero length")]
    DegenerateSide(usize),

    /// Parameters describe a profile that cannot be drawn.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// A segmented edge whose parts do not add up to the requested total.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Wrong length for {edge}: expected {expected:.5}, got {actual:.5}")]
pub struct LengthMismatchError {
    pub edge: String,
    pub expected: f64,
    pub actual: f64,
}

/// Top-level error for joint generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JointError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    LengthMismatch(#[from] LengthMismatchError),
}

/// Result type for joint generation.
pub type Result<T> = std::result::Result<T, JointError>;

/// Result type for settings construction.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl GeometryError {
    /// Shorthand for [`GeometryError::LengthTooShort`].
    pub fn too_short(edge: impl Into<String>, length: f64, required: f64) -> Self {
        Self::LengthTooShort {
            edge: edge.into(),
            length,
            required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownParameter {
            family: "FingerJoint".to_string(),
            name: "fingers".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown parameter for FingerJoint: fingers");

        let err = ConfigError::TypeMismatch {
            family: "Hinge".to_string(),
            name: "outset".to_string(),
            expected: ParamKind::Bool,
            found: ParamKind::Float,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'Hinge.outset' expects bool, got float"
        );
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::too_short("hinge pin", 4.0, 12.5);
        assert_eq!(
            err.to_string(),
            "hinge pin: length 4.000 is shorter than the fixed profile length 12.500"
        );

        let err = GeometryError::InvalidLayout(4);
        assert_eq!(err.to_string(), "Hinge layout must be 1, 2 or 3 (got 4)");
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = LengthMismatchError {
            edge: "CompoundEdge".to_string(),
            expected: 100.0,
            actual: 90.0,
        };
        assert_eq!(
            err.to_string(),
            "Wrong length for CompoundEdge: expected 100.00000, got 90.00000"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: JointError = ConfigError::UnknownEdge('z').into();
        assert!(matches!(err, JointError::Config(_)));

        let err: JointError = GeometryError::StartCornerRadius(2.0).into();
        assert!(matches!(err, JointError::Geometry(_)));

        let err: JointError = LengthMismatchError {
            edge: "SlottedEdge".to_string(),
            expected: 1.0,
            actual: 2.0,
        }
        .into();
        assert!(matches!(err, JointError::LengthMismatch(_)));
    }
}
