use nalgebra::Vector3;

use super::{
    ExpansionMultipliers,
    body::BodySample,
    geometry::{Aggregates, PairTable, PairwiseGeometry},
    index::BodyIndex,
};

/// The individual terms of `S_ij`, the scalar correction to the Newtonian
/// pull of source `j` on subject `i`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScalarCorrections {
    /// `−2(β + γ)/c² · U_i`
    pub subject_potential: f64,
    /// `−(2β − 1)/c² · U_j`
    pub source_potential: f64,
    /// `γ/c² · v_i²`
    pub subject_speed: f64,
    /// `(1 + γ)/c² · v_j²`
    pub source_speed: f64,
    /// `−2(1 + γ)/c² · v_i · v_j`
    pub velocity_inner_product: f64,
    /// `−3/(2c²) · (r_ij · v_j)² / r_ij²`
    pub line_of_sight: f64,
    /// `1/(2c²) · r_ij · a_j^N`
    pub source_acceleration: f64,
}

impl ScalarCorrections {
    /// Returns `S_ij`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.subject_potential
            + self.source_potential
            + self.subject_speed
            + self.source_speed
            + self.velocity_inner_product
            + self.line_of_sight
            + self.source_acceleration
    }
}

/// The velocity-dependent vector terms of the pull of source `j` on
/// subject `i`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VectorCorrections {
    /// `μ_j/(c² r_ij³) · [r_ij · ((2 + 2γ) v_i − (1 + 2γ) v_j)] v_ij`
    pub velocity: Vector3<f64>,
    /// `(3 + 4γ)/(2c²) · μ_j a_j^N / r_ij`
    pub source_acceleration: Vector3<f64>,
}

impl VectorCorrections {
    /// Returns the sum of both terms.
    #[must_use]
    pub fn total(&self) -> Vector3<f64> {
        self.velocity + self.source_acceleration
    }
}

/// Output of the second pass: corrected accelerations and the per-pair terms
/// that produced them.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Assembly {
    pub(super) accelerations: Vec<Vector3<f64>>,
    pub(super) scalar_corrections: PairTable<ScalarCorrections>,
    pub(super) vector_corrections: PairTable<VectorCorrections>,
    /// `1 + S_ij`
    pub(super) scalar_term_multiplier: PairTable<f64>,
    /// Coefficient of `v_ij` in the velocity term.
    pub(super) vector_term_multiplier: PairTable<f64>,
}

/// Assembles the corrected acceleration of every accelerated body.
pub(super) fn assemble(
    index: &BodyIndex,
    bodies: &[BodySample],
    geometry: &PairwiseGeometry,
    aggregates: &Aggregates,
    m: &ExpansionMultipliers,
) -> Assembly {
    let size = bodies.len();
    let mut assembly = Assembly {
        accelerations: Vec::with_capacity(index.accelerated_count()),
        scalar_corrections: PairTable::new(size),
        vector_corrections: PairTable::new(size),
        scalar_term_multiplier: PairTable::new(size),
        vector_term_multiplier: PairTable::new(size),
    };

    let potential = &aggregates.local_potential;
    let newtonian = &aggregates.total_point_mass_acceleration;
    let squared_speed = &aggregates.squared_speed;

    for i in 0..index.accelerated_count() {
        let mut acceleration = Vector3::zeros();

        for &j in index.accelerating() {
            if j == i {
                continue;
            }

            let r_ij = geometry.relative_position.get(i, j);
            let source_line_of_sight = geometry.line_of_sight_speed.get(i, j);
            // r_ij · v_i
            let subject_line_of_sight = -geometry.line_of_sight_speed.get(j, i);

            let corrections = ScalarCorrections {
                subject_potential: m.subject_potential * potential[i],
                source_potential: m.source_potential * potential[j],
                subject_speed: m.subject_speed * squared_speed[i],
                source_speed: m.source_speed * squared_speed[j],
                velocity_inner_product: m.velocity_inner_product
                    * geometry.velocity_inner_product.get(i, j),
                line_of_sight: m.line_of_sight
                    * source_line_of_sight
                    * source_line_of_sight
                    * geometry.inverse_square_distance.get(i, j),
                source_acceleration: m.source_acceleration * r_ij.dot(&newtonian[j]),
            };
            let scalar_multiplier = 1.0 + corrections.total();

            let inverse_cube =
                geometry.inverse_square_distance.get(i, j) / geometry.distance.get(i, j);
            let vector_multiplier = bodies[j].gravitational_parameter
                * inverse_cube
                * (m.subject_velocity * subject_line_of_sight
                    + m.source_velocity * source_line_of_sight);

            let vector_corrections = VectorCorrections {
                velocity: geometry.relative_velocity.get(i, j) * vector_multiplier,
                source_acceleration: newtonian[j]
                    * (m.source_acceleration_vector * geometry.single_source_potential.get(i, j)),
            };

            acceleration += geometry.single_point_mass_acceleration.get(i, j) * scalar_multiplier
                + vector_corrections.velocity
                + vector_corrections.source_acceleration;

            assembly.scalar_corrections.set(i, j, corrections);
            assembly.vector_corrections.set(i, j, vector_corrections);
            assembly.scalar_term_multiplier.set(i, j, scalar_multiplier);
            assembly.vector_term_multiplier.set(i, j, vector_multiplier);
        }

        assembly.accelerations.push(acceleration);
    }

    assembly
}
