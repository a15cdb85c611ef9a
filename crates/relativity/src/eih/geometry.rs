use nalgebra::Vector3;
use orrery_core::vector::inverse_cube_distance;

use super::{Error, body::BodySample, index::BodyIndex};

/// Dense `n × n` table indexed by ordered body pairs.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PairTable<T> {
    size: usize,
    entries: Vec<T>,
}

impl<T: Copy + Default> PairTable<T> {
    pub(super) fn new(size: usize) -> Self {
        Self {
            size,
            entries: vec![T::default(); size * size],
        }
    }

    pub(super) fn get(&self, i: usize, j: usize) -> T {
        self.entries[i * self.size + j]
    }

    pub(super) fn set(&mut self, i: usize, j: usize, value: T) {
        self.entries[i * self.size + j] = value;
    }
}

/// Geometry of every evaluated ordered pair `(i, j)`, with `r_ij = r_j − r_i`.
///
/// A pair is evaluated when at least one of its bodies is accelerating.
/// Diagonal entries are never written.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PairwiseGeometry {
    pub(super) relative_position: PairTable<Vector3<f64>>,
    pub(super) relative_velocity: PairTable<Vector3<f64>>,
    pub(super) distance: PairTable<f64>,
    pub(super) inverse_square_distance: PairTable<f64>,
    /// `r_ij · v_j`
    pub(super) line_of_sight_speed: PairTable<f64>,
    /// `v_i · v_j`
    pub(super) velocity_inner_product: PairTable<f64>,
    /// `μ_j / r_ij`
    pub(super) single_source_potential: PairTable<f64>,
    /// `μ_j r_ij / r_ij³`
    pub(super) single_point_mass_acceleration: PairTable<Vector3<f64>>,
}

impl PairwiseGeometry {
    fn empty(size: usize) -> Self {
        Self {
            relative_position: PairTable::new(size),
            relative_velocity: PairTable::new(size),
            distance: PairTable::new(size),
            inverse_square_distance: PairTable::new(size),
            line_of_sight_speed: PairTable::new(size),
            velocity_inner_product: PairTable::new(size),
            single_source_potential: PairTable::new(size),
            single_point_mass_acceleration: PairTable::new(size),
        }
    }

    /// Computes each unordered pair once and mirrors it.
    ///
    /// Mirrored vectors are exact negations and mirrored distances are
    /// copies, so `r_ij == −r_ji` and `v_ij == −v_ji` hold bit for bit.
    pub(super) fn compute(index: &BodyIndex, bodies: &[BodySample]) -> Result<Self, Error> {
        let size = bodies.len();
        let mut geometry = Self::empty(size);

        for i in 0..size {
            for j in (i + 1)..size {
                if !index.is_accelerating(i) && !index.is_accelerating(j) {
                    continue;
                }
                geometry.fill_pair(index, bodies, i, j)?;
            }
        }

        Ok(geometry)
    }

    fn fill_pair(
        &mut self,
        index: &BodyIndex,
        bodies: &[BodySample],
        i: usize,
        j: usize,
    ) -> Result<(), Error> {
        let (first, second) = (&bodies[i], &bodies[j]);

        let r_ij = second.state.position - first.state.position;
        let distance_squared = r_ij.norm_squared();
        if distance_squared == 0.0 {
            return Err(Error::CoincidentBodies {
                first: index.name(i).to_owned(),
                second: index.name(j).to_owned(),
            });
        }
        let v_ij = second.state.velocity - first.state.velocity;
        let distance = distance_squared.sqrt();
        let inverse_square_distance = distance_squared.recip();
        let inverse_cube = inverse_cube_distance(&r_ij);

        self.relative_position.set(i, j, r_ij);
        self.relative_position.set(j, i, -r_ij);
        self.relative_velocity.set(i, j, v_ij);
        self.relative_velocity.set(j, i, -v_ij);

        self.distance.set(i, j, distance);
        self.distance.set(j, i, distance);
        self.inverse_square_distance.set(i, j, inverse_square_distance);
        self.inverse_square_distance.set(j, i, inverse_square_distance);

        self.line_of_sight_speed
            .set(i, j, r_ij.dot(&second.state.velocity));
        self.line_of_sight_speed
            .set(j, i, (-r_ij).dot(&first.state.velocity));

        let velocity_inner_product = first.state.velocity.dot(&second.state.velocity);
        self.velocity_inner_product.set(i, j, velocity_inner_product);
        self.velocity_inner_product.set(j, i, velocity_inner_product);

        self.single_source_potential
            .set(i, j, second.gravitational_parameter / distance);
        self.single_source_potential
            .set(j, i, first.gravitational_parameter / distance);

        self.single_point_mass_acceleration
            .set(i, j, r_ij * (second.gravitational_parameter * inverse_cube));
        self.single_point_mass_acceleration
            .set(j, i, -r_ij * (first.gravitational_parameter * inverse_cube));

        Ok(())
    }
}

/// Per-body sums over the accelerating bodies.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Aggregates {
    /// `U_i = Σ_j μ_j / r_ij`
    pub(super) local_potential: Vec<f64>,
    /// `a_i^N = Σ_j μ_j r_ij / r_ij³`
    pub(super) total_point_mass_acceleration: Vec<Vector3<f64>>,
    pub(super) squared_speed: Vec<f64>,
}

impl Aggregates {
    /// Sums the pairwise terms of every body. This is also the first of the
    /// two acceleration passes: `total_point_mass_acceleration` is the
    /// Newtonian acceleration of every body, accelerated or not.
    pub(super) fn compute(
        index: &BodyIndex,
        bodies: &[BodySample],
        geometry: &PairwiseGeometry,
    ) -> Self {
        let size = bodies.len();
        let mut local_potential = vec![0.0; size];
        let mut total_point_mass_acceleration = vec![Vector3::zeros(); size];

        for i in 0..size {
            for &j in index.accelerating() {
                if j == i {
                    continue;
                }
                local_potential[i] += geometry.single_source_potential.get(i, j);
                total_point_mass_acceleration[i] +=
                    geometry.single_point_mass_acceleration.get(i, j);
            }
        }

        let squared_speed = bodies
            .iter()
            .map(|body| body.state.velocity.norm_squared())
            .collect();

        Self {
            local_potential,
            total_point_mass_acceleration,
            squared_speed,
        }
    }
}
