//! Interfaces to external collaborators
//!
//! The reference model is built and compared against services this crate
//! does not own:
//!
//! - a **parameter service** resolving the characteristic scales,
//! - a **mesh service** exposing the candidate solver's grid edges,
//! - the **candidate** solution itself, queried as a callable.
//!
//! Each is a small trait. Closures implement the candidate traits directly,
//! and simple in-memory implementations of the services are provided for
//! scripts and tests.

use ndarray::Array2;
use std::collections::HashMap;

use crate::scaling::ScaleParameter;

// =================================================================================================
// Parameter service
// =================================================================================================

/// Resolves symbolic scale parameters to numbers
pub trait ParameterSource {
    /// Numeric value of `parameter`, or `None` if the parameter set lacks it
    fn evaluate(&self, parameter: ScaleParameter) -> Option<f64>;
}

/// Map-backed parameter set
///
/// # Example
///
/// ```rust
/// use fieldref::external::{ParameterSource, ParameterValues};
/// use fieldref::scaling::ScaleParameter;
///
/// let parameters = ParameterValues::new(0.137, 3600.0);
/// assert_eq!(parameters.evaluate(ScaleParameter::DischargeTimescale), Some(3600.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterValues {
    values: HashMap<ScaleParameter, f64>,
}

impl ParameterValues {
    /// Create with both scales set
    pub fn new(length: f64, timescale: f64) -> Self {
        let mut values = Self::empty();
        values.set(ScaleParameter::CharacteristicLength, length);
        values.set(ScaleParameter::DischargeTimescale, timescale);
        values
    }

    /// Create an empty parameter set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a parameter
    pub fn set(&mut self, parameter: ScaleParameter, value: f64) {
        self.values.insert(parameter, value);
    }
}

impl ParameterSource for ParameterValues {
    fn evaluate(&self, parameter: ScaleParameter) -> Option<f64> {
        self.values.get(&parameter).copied()
    }
}

// =================================================================================================
// Mesh service
// =================================================================================================

/// Spatial axes of the cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialAxis {
    /// Horizontal axis
    Y,

    /// Vertical axis
    Z,
}

impl SpatialAxis {
    /// Axis label
    pub fn label(&self) -> &'static str {
        match self {
            SpatialAxis::Y => "y",
            SpatialAxis::Z => "z",
        }
    }
}

/// Exposes non-dimensional grid-edge coordinates of named domains
pub trait MeshGeometry {
    /// Edge coordinates of `domain` along `axis`, or `None` if unknown
    fn edges(&self, domain: &str, axis: SpatialAxis) -> Option<Vec<f64>>;
}

/// In-memory mesh holding explicit edge coordinates per domain
///
/// # Example
///
/// ```rust
/// use fieldref::external::{EdgeMesh, MeshGeometry, SpatialAxis};
///
/// let mesh = EdgeMesh::uniform("current collector", 1.0, 2.0, 3, 5);
/// assert_eq!(mesh.edges("current collector", SpatialAxis::Y), Some(vec![0.0, 0.5, 1.0]));
/// assert_eq!(mesh.edges("separator", SpatialAxis::Y), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeMesh {
    domains: HashMap<String, (Vec<f64>, Vec<f64>)>,
}

impl EdgeMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a domain with explicit y and z edges
    pub fn with_domain(mut self, domain: &str, y_edges: Vec<f64>, z_edges: Vec<f64>) -> Self {
        self.domains.insert(domain.to_string(), (y_edges, z_edges));
        self
    }

    /// Single domain with evenly spaced edges on `[0, y_extent] × [0, z_extent]`
    pub fn uniform(domain: &str, y_extent: f64, z_extent: f64, y_points: usize, z_points: usize) -> Self {
        Self::new().with_domain(
            domain,
            linspace(0.0, y_extent, y_points),
            linspace(0.0, z_extent, z_points),
        )
    }
}

impl MeshGeometry for EdgeMesh {
    fn edges(&self, domain: &str, axis: SpatialAxis) -> Option<Vec<f64>> {
        self.domains.get(domain).map(|(y, z)| match axis {
            SpatialAxis::Y => y.clone(),
            SpatialAxis::Z => z.clone(),
        })
    }
}

fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            // computed from the index so the last edge is exactly `end`
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

// =================================================================================================
// Candidate solution
// =================================================================================================

/// Axis order of a 2D array returned by a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridOrientation {
    /// Rows follow y, columns follow z (`[y, z]`)
    #[default]
    YZ,

    /// Rows follow z, columns follow y (`[z, y]`), the reference convention
    ZY,
}

/// Spatial field of the candidate solution
///
/// Called with non-dimensional y ticks, z ticks and time; returns one value
/// per (y, z) node, laid out as [`orientation`](CandidateField::orientation)
/// declares (`[y, z]` unless overridden).
///
/// Any `Fn(&[f64], &[f64], f64) -> Array2<f64>` is a candidate field:
///
/// ```rust
/// use fieldref::external::{CandidateField, GridOrientation};
/// use ndarray::Array2;
///
/// let candidate = |y: &[f64], z: &[f64], t: f64| {
///     Array2::from_shape_fn((y.len(), z.len()), |(i, j)| y[i] + z[j] + t)
/// };
/// assert_eq!(candidate.orientation(), GridOrientation::YZ);
/// assert_eq!(candidate.evaluate(&[0.0, 1.0], &[0.5], 0.0).dim(), (2, 1));
/// ```
pub trait CandidateField {
    /// Evaluate on the tensor grid `y × z` at time `t` (all non-dimensional)
    fn evaluate(&self, y: &[f64], z: &[f64], t: f64) -> Array2<f64>;

    /// Axis order of the returned arrays
    fn orientation(&self) -> GridOrientation {
        GridOrientation::YZ
    }

    /// Wrap this candidate with an explicit orientation
    fn with_orientation(self, orientation: GridOrientation) -> Oriented<Self>
    where
        Self: Sized,
    {
        Oriented { inner: self, orientation }
    }
}

impl<F> CandidateField for F
where
    F: Fn(&[f64], &[f64], f64) -> Array2<f64>,
{
    fn evaluate(&self, y: &[f64], z: &[f64], t: f64) -> Array2<f64> {
        self(y, z, t)
    }
}

/// Candidate field with an overridden orientation
#[derive(Debug, Clone)]
pub struct Oriented<C> {
    inner: C,
    orientation: GridOrientation,
}

impl<C: CandidateField> CandidateField for Oriented<C> {
    fn evaluate(&self, y: &[f64], z: &[f64], t: f64) -> Array2<f64> {
        self.inner.evaluate(y, z, t)
    }

    fn orientation(&self) -> GridOrientation {
        self.orientation
    }
}

/// Time-only field of the candidate solution (terminal voltage, averages)
///
/// Called with non-dimensional times; returns one value per time.
pub trait CandidateSeries {
    /// Evaluate at each non-dimensional time
    fn evaluate(&self, t: &[f64]) -> Vec<f64>;
}

impl<F> CandidateSeries for F
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn evaluate(&self, t: &[f64]) -> Vec<f64> {
        self(t)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
