//! Delaunay triangulation of scattered 2D positions
//!
//! # Algorithm
//!
//! Bowyer–Watson incremental insertion:
//!
//! 1. Positions are deduplicated and mapped to a unit box centred on the
//!    origin (a similarity transform, which preserves the Delaunay property
//!    and barycentric coordinates).
//! 2. A large super-triangle enclosing the box seeds the triangulation.
//! 3. Each vertex is inserted by removing every triangle whose circumcircle
//!    strictly contains it and re-triangulating the cavity from the vertex.
//! 4. Triangles touching the super-triangle are removed.
//! 5. Concave pockets left on the hull (nearly collinear hull vertices whose
//!    circumcircle reached the super-triangle) are closed so the triangulated
//!    region equals the convex hull.
//!
//! After construction, the triangulation stores for every triangle its
//! neighbours (opposite each vertex) and the affine map to barycentric
//! coordinates, which is all the Clough–Tocher and linear schemes need.
//!
//! # Convex hull limitation
//!
//! [`Triangulation::locate`] returns `None` outside the convex hull. Grid
//! nodes there are NaN in every interpolated field.

use nalgebra::{Matrix2, Point2, Vector2};
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{FieldError, Result};
use crate::grid::QueryGrid;

/// Relative tolerance of the in-circumcircle predicate
const INCIRCLE_TOLERANCE: f64 = 1e-12;

/// Orientation below which three (normalised) points count as collinear
const ORIENTATION_TOLERANCE: f64 = 1e-12;

/// Distance (normalised) below which all points count as lying on one line
const COLLINEAR_TOLERANCE: f64 = 1e-10;

/// Negative barycentric slack accepted when locating points on edges
const BARYCENTRIC_TOLERANCE: f64 = 1e-10;

/// Half-size of the super-triangle, in normalised units
const SUPER_TRIANGLE_SCALE: f64 = 1.0e3;

// =================================================================================================
// Point location
// =================================================================================================

/// Triangle containing a query point, with the point's barycentric coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Triangle index
    pub triangle: usize,

    /// Barycentric coordinates relative to the triangle's vertices (sum to 1)
    pub barycentric: [f64; 3],
}

/// Locations of every node of a [`QueryGrid`], `[z, y]` row-major
#[derive(Debug, Clone, PartialEq)]
pub struct GridLocations {
    shape: (usize, usize),
    nodes: Vec<Option<Location>>,
}

impl GridLocations {
    /// Grid shape `(nz, ny)`
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Location of node `[iz, iy]`, `None` outside the convex hull
    pub fn get(&self, iz: usize, iy: usize) -> Option<&Location> {
        self.nodes.get(iz * self.shape.1 + iy).and_then(Option::as_ref)
    }

    /// Locations in `[z, y]` row-major order
    pub fn iter(&self) -> impl Iterator<Item = Option<&Location>> + '_ {
        self.nodes.iter().map(Option::as_ref)
    }

    /// Number of nodes outside the convex hull
    pub fn outside_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_none()).count()
    }

    /// Evaluate `f` at every located node; nodes outside the hull are NaN
    pub fn map<F>(&self, mut f: F) -> Array2<f64>
    where
        F: FnMut(&Location) -> f64,
    {
        let values: Vec<f64> = self
            .nodes
            .iter()
            .map(|node| node.as_ref().map_or(f64::NAN, &mut f))
            .collect();

        Array2::from_shape_vec(self.shape, values)
            .unwrap_or_else(|_| Array2::from_elem(self.shape, f64::NAN))
    }
}

// =================================================================================================
// Triangulation
// =================================================================================================

/// Delaunay triangulation of a scatter cloud
///
/// # Example
///
/// ```rust
/// use fieldref::interpolation::Triangulation;
/// use nalgebra::Point2;
///
/// let positions = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(1.0, 1.0),
/// ];
/// let triangulation = Triangulation::new(&positions).unwrap();
///
/// assert_eq!(triangulation.triangle_count(), 2);
/// assert!(triangulation.locate(Point2::new(0.25, 0.5)).is_some());
/// assert!(triangulation.locate(Point2::new(1.5, 0.5)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// Distinct positions, original units
    vertices: Vec<Point2<f64>>,

    /// Distinct positions mapped into the unit box
    scaled: Vec<Point2<f64>>,

    /// Index of the sample each vertex came from
    sources: Vec<usize>,

    /// Number of samples the triangulation was built from (duplicates included)
    sample_count: usize,

    /// Counter-clockwise vertex triples
    triangles: Vec<[usize; 3]>,

    /// `neighbors[t][k]` shares the edge opposite vertex `k` of triangle `t`
    neighbors: Vec<[Option<usize>; 3]>,

    /// Inverse of `[v0 - v2, v1 - v2]`, per triangle, in normalised units
    transforms: Vec<Matrix2<f64>>,

    /// Sorted vertex adjacency lists
    adjacency: Vec<Vec<usize>>,

    /// Centre of the normalisation
    center: Point2<f64>,

    /// Extent of the normalisation
    extent: f64,
}

impl Triangulation {
    /// Triangulate scattered positions
    ///
    /// Exact duplicate positions are ignored (the first occurrence is the
    /// vertex) and reported at `warn` level.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if a position is not finite, if fewer than three
    /// distinct positions remain, or if all positions are collinear.
    pub fn new(positions: &[Point2<f64>]) -> Result<Self> {
        // ====== Step 1: Distinct vertices ======

        if positions.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(FieldError::insufficient_data("scatter positions must be finite"));
        }

        let mut seen = HashSet::with_capacity(positions.len());
        let mut vertices = Vec::with_capacity(positions.len());
        let mut sources = Vec::with_capacity(positions.len());

        for (index, p) in positions.iter().enumerate() {
            // + 0.0 folds -0.0 onto 0.0
            if seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())) {
                vertices.push(*p);
                sources.push(index);
            }
        }

        let duplicates = positions.len() - vertices.len();
        if duplicates > 0 {
            log::warn!("Ignoring {duplicates} duplicate scatter position(s)");
        }

        if vertices.len() < 3 {
            return Err(FieldError::insufficient_data(format!(
                "{} distinct scatter point(s), at least 3 non-collinear points are required",
                vertices.len()
            )));
        }

        // ====== Step 2: Normalisation ======

        let (lower, upper) = bounds(&vertices);
        let center = nalgebra::center(&lower, &upper);
        let extent = (upper - lower).max();
        let scaled: Vec<Point2<f64>> = vertices
            .iter()
            .map(|p| Point2::from((p - center) / extent))
            .collect();

        if is_collinear(&scaled) {
            return Err(FieldError::insufficient_data(format!(
                "all {} scatter points are collinear",
                scaled.len()
            )));
        }

        // ====== Step 3: Bowyer-Watson ======

        let n = scaled.len();
        let mut points = scaled.clone();
        points.push(Point2::new(-SUPER_TRIANGLE_SCALE, -SUPER_TRIANGLE_SCALE));
        points.push(Point2::new(SUPER_TRIANGLE_SCALE, -SUPER_TRIANGLE_SCALE));
        points.push(Point2::new(0.0, SUPER_TRIANGLE_SCALE));

        let mut triangles = vec![[n, n + 1, n + 2]];
        for index in 0..n {
            insert_vertex(&points, &mut triangles, index);
        }

        triangles.retain(|triangle| triangle.iter().all(|&v| v < n));
        fill_hull_pockets(&scaled, &mut triangles);

        // ====== Step 4: Per-triangle data ======

        let mut kept = Vec::with_capacity(triangles.len());
        let mut transforms = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let [a, b, c] = triangle.map(|v| scaled[v]);
            if orientation(a, b, c) <= ORIENTATION_TOLERANCE {
                continue;
            }
            if let Some(inverse) = Matrix2::from_columns(&[a - c, b - c]).try_inverse() {
                kept.push(triangle);
                transforms.push(inverse);
            }
        }

        if kept.is_empty() {
            return Err(FieldError::insufficient_data("scatter points span no triangle"));
        }

        let neighbors = triangle_neighbors(&kept);
        let adjacency = vertex_adjacency(&kept, n);

        log::debug!(
            "Triangulated {} scatter points into {} triangles",
            n,
            kept.len()
        );

        Ok(Self {
            vertices,
            scaled,
            sources,
            sample_count: positions.len(),
            triangles: kept,
            neighbors,
            transforms,
            adjacency,
            center,
            extent,
        })
    }

    // ========================================== Queries ==========================================

    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of samples the triangulation was built from
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Counter-clockwise vertex triples
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Vertex position, original units
    pub fn vertex(&self, index: usize) -> Point2<f64> {
        self.vertices[index]
    }

    /// Neighbours of triangle `t`, opposite each of its vertices
    pub fn neighbors(&self, triangle: usize) -> [Option<usize>; 3] {
        self.neighbors[triangle]
    }

    /// Vertices sharing an edge with `vertex`
    pub fn adjacent(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Gather per-sample values into per-vertex values
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `values` does not hold one value per sample.
    pub fn vertex_values(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.sample_count {
            return Err(FieldError::shape_mismatch(
                "scatter values",
                &[self.sample_count],
                &[values.len()],
            ));
        }
        Ok(self.sources.iter().map(|&source| values[source]).collect())
    }

    // ===================================== Normalised geometry =====================================

    /// Vertex position in normalised units
    pub(crate) fn scaled_vertex(&self, index: usize) -> Point2<f64> {
        self.scaled[index]
    }

    /// Centroid of a triangle in normalised units
    pub(crate) fn scaled_centroid(&self, triangle: usize) -> Point2<f64> {
        let [a, b, c] = self.triangles[triangle].map(|v| self.scaled[v]);
        Point2::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Barycentric coordinates of a normalised point relative to `triangle`
    pub(crate) fn barycentric(&self, triangle: usize, point: Point2<f64>) -> [f64; 3] {
        let origin = self.scaled[self.triangles[triangle][2]];
        let b: Vector2<f64> = self.transforms[triangle] * (point - origin);
        [b.x, b.y, 1.0 - b.x - b.y]
    }

    // ====================================== Point location ======================================

    /// Find the triangle containing `point` (original units)
    ///
    /// Points on shared edges resolve to the triangle in which they are most
    /// interior. Returns `None` outside the convex hull.
    pub fn locate(&self, point: Point2<f64>) -> Option<Location> {
        let scaled = Point2::from((point - self.center) / self.extent);
        let limit = 0.5 + BARYCENTRIC_TOLERANCE;
        if scaled.x.abs() > limit || scaled.y.abs() > limit {
            return None;
        }

        let mut best: Option<Location> = None;
        let mut best_margin = f64::NEG_INFINITY;

        for triangle in 0..self.triangles.len() {
            let barycentric = self.barycentric(triangle, scaled);
            let margin = barycentric.iter().copied().fold(f64::INFINITY, f64::min);
            if margin > best_margin {
                best_margin = margin;
                best = Some(Location { triangle, barycentric });
            }
        }

        best.filter(|_| best_margin >= -BARYCENTRIC_TOLERANCE)
    }

    /// Locate every node of `grid`
    pub fn locate_grid(&self, grid: &QueryGrid) -> GridLocations {
        let nodes: Vec<Option<Location>> = grid.nodes().map(|node| self.locate(node)).collect();
        let locations = GridLocations { shape: grid.shape(), nodes };

        let outside = locations.outside_count();
        if outside > 0 {
            log::debug!(
                "{outside} of {} grid nodes lie outside the scatter convex hull",
                grid.len()
            );
        }
        locations
    }
}

// =================================================================================================
// Geometric predicates
// =================================================================================================

/// Twice the signed area of `(a, b, c)`, positive when counter-clockwise
fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Strictly inside the circumcircle of the counter-clockwise triangle `[a, b, c]`
fn in_circumcircle(points: &[Point2<f64>], triangle: [usize; 3], p: Point2<f64>) -> bool {
    let [a, b, c] = triangle.map(|v| points[v] - p);

    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let c2 = c.norm_squared();

    let det = a2 * (b.x * c.y - c.x * b.y) - b2 * (a.x * c.y - c.x * a.y) + c2 * (a.x * b.y - b.x * a.y);
    let permanent = a2 * ((b.x * c.y).abs() + (c.x * b.y).abs())
        + b2 * ((a.x * c.y).abs() + (c.x * a.y).abs())
        + c2 * ((a.x * b.y).abs() + (b.x * a.y).abs());

    det > INCIRCLE_TOLERANCE * permanent
}

/// Inside or on the boundary of the counter-clockwise triangle `[a, b, c]`
fn in_triangle(points: &[Point2<f64>], triangle: [usize; 3], p: Point2<f64>) -> bool {
    let [a, b, c] = triangle.map(|v| points[v]);
    orientation(a, b, p) >= -ORIENTATION_TOLERANCE
        && orientation(b, c, p) >= -ORIENTATION_TOLERANCE
        && orientation(c, a, p) >= -ORIENTATION_TOLERANCE
}

fn bounds(points: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
    points.iter().fold(
        (
            Point2::new(f64::INFINITY, f64::INFINITY),
            Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(lower, upper), p| (lower.inf(p), upper.sup(p)),
    )
}

fn is_collinear(points: &[Point2<f64>]) -> bool {
    let origin = points[0];
    let Some(far) = points
        .iter()
        .max_by(|a, b| (*a - origin).norm_squared().total_cmp(&(*b - origin).norm_squared()))
    else {
        return true;
    };

    let direction = far - origin;
    let length = direction.norm();
    if length == 0.0 {
        return true;
    }

    points.iter().all(|p| {
        let offset = p - origin;
        (direction.x * offset.y - direction.y * offset.x).abs() <= COLLINEAR_TOLERANCE * length
    })
}

fn edges(triangle: [usize; 3]) -> [(usize, usize); 3] {
    [
        (triangle[0], triangle[1]),
        (triangle[1], triangle[2]),
        (triangle[2], triangle[0]),
    ]
}

fn undirected((a, b): (usize, usize)) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

// =================================================================================================
// Construction steps
// =================================================================================================

fn insert_vertex(points: &[Point2<f64>], triangles: &mut Vec<[usize; 3]>, index: usize) {
    let p = points[index];

    let mut bad: Vec<usize> = (0..triangles.len())
        .filter(|&t| in_circumcircle(points, triangles[t], p))
        .collect();

    if bad.is_empty() {
        // only possible through rounding; fall back to the enclosing triangle
        match (0..triangles.len()).find(|&t| in_triangle(points, triangles[t], p)) {
            Some(t) => bad.push(t),
            None => {
                log::warn!("Scatter point {index} could not be inserted into the triangulation");
                return;
            }
        }
    }

    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for &t in &bad {
        for edge in edges(triangles[t]) {
            *edge_count.entry(undirected(edge)).or_default() += 1;
        }
    }

    let boundary: Vec<(usize, usize)> = bad
        .iter()
        .flat_map(|&t| edges(triangles[t]))
        .filter(|&edge| edge_count[&undirected(edge)] == 1)
        .collect();

    bad.sort_unstable_by(|a, b| b.cmp(a));
    for t in bad {
        triangles.swap_remove(t);
    }

    triangles.extend(boundary.into_iter().map(|(a, b)| [a, b, index]));
}

fn fill_hull_pockets(points: &[Point2<f64>], triangles: &mut Vec<[usize; 3]>) {
    let directed: HashSet<(usize, usize)> = triangles.iter().flat_map(|&t| edges(t)).collect();

    // boundary walked counter-clockwise: interior on the left of a -> b
    let mut next: BTreeMap<usize, usize> = BTreeMap::new();
    for &(a, b) in &directed {
        if !directed.contains(&(b, a)) && next.insert(a, b).is_some() {
            log::debug!("Hull passes twice through vertex {a}; pocket filling skipped");
            return;
        }
    }

    let mut filled = 0usize;
    loop {
        let pocket = next.iter().find_map(|(&a, &b)| {
            let c = *next.get(&b)?;
            if c == a || orientation(points[a], points[b], points[c]) >= -ORIENTATION_TOLERANCE {
                return None;
            }
            let candidate = [a, c, b];
            let blocked = next
                .keys()
                .filter(|&&v| v != a && v != b && v != c)
                .any(|&v| in_triangle(points, candidate, points[v]));
            (!blocked).then_some(candidate)
        });

        let Some(triangle) = pocket else { break };
        let [a, c, b] = triangle;

        triangles.push(triangle);
        next.remove(&b);
        next.insert(a, c);
        filled += 1;
    }

    if filled > 0 {
        log::debug!("Closed {filled} concave pocket(s) on the scatter hull");
    }
}

fn triangle_neighbors(triangles: &[[usize; 3]]) -> Vec<[Option<usize>; 3]> {
    let opposite = |triangle: [usize; 3], k: usize| (triangle[(k + 1) % 3], triangle[(k + 2) % 3]);

    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(3 * triangles.len());
    for (t, &triangle) in triangles.iter().enumerate() {
        for k in 0..3 {
            owner.insert(opposite(triangle, k), t);
        }
    }

    triangles
        .iter()
        .map(|&triangle| {
            [0, 1, 2].map(|k| {
                let (a, b) = opposite(triangle, k);
                owner.get(&(b, a)).copied()
            })
        })
        .collect()
}

fn vertex_adjacency(triangles: &[[usize; 3]], vertex_count: usize) -> Vec<Vec<usize>> {
    let mut adjacency = vec![BTreeSet::new(); vertex_count];
    for &triangle in triangles {
        for (a, b) in edges(triangle) {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
    }
    adjacency.into_iter().map(|set| set.into_iter().collect()).collect()
}

// =================================================================================================
// Tests
// =================================================================================================
