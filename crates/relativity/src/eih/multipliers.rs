/// Coefficients of the EIH expansion that depend only on γ, β, and `c`.
///
/// Each field is the factor in front of one term of the PPN N-body equations,
/// with `1/c²` already folded in. For an infinite speed of light every
/// coefficient is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionMultipliers {
    pub gamma: f64,
    pub beta: f64,
    pub inverse_square_speed_of_light: f64,
    /// `−2(β + γ)/c²`, applied to the subject's local potential.
    pub subject_potential: f64,
    /// `−(2β − 1)/c²`, applied to the source's local potential.
    pub source_potential: f64,
    /// `γ/c²`, applied to the subject's squared speed.
    pub subject_speed: f64,
    /// `(1 + γ)/c²`, applied to the source's squared speed.
    pub source_speed: f64,
    /// `−2(1 + γ)/c²`, applied to `v_i · v_j`.
    pub velocity_inner_product: f64,
    /// `−3/(2c²)`, applied to `(r_ij · v_j)² / r_ij²`.
    pub line_of_sight: f64,
    /// `1/(2c²)`, applied to `r_ij · a_j^N`.
    pub source_acceleration: f64,
    /// `(2 + 2γ)/c²`, applied to `r_ij · v_i` in the velocity term.
    pub subject_velocity: f64,
    /// `−(1 + 2γ)/c²`, applied to `r_ij · v_j` in the velocity term.
    pub source_velocity: f64,
    /// `(3 + 4γ)/(2c²)`, applied to `μ_j a_j^N / r_ij`.
    pub source_acceleration_vector: f64,
}

impl ExpansionMultipliers {
    #[must_use]
    pub fn new(gamma: f64, beta: f64, inverse_square_speed_of_light: f64) -> Self {
        let c2 = inverse_square_speed_of_light;
        Self {
            gamma,
            beta,
            inverse_square_speed_of_light,
            subject_potential: -2.0 * (beta + gamma) * c2,
            source_potential: -(2.0 * beta - 1.0) * c2,
            subject_speed: gamma * c2,
            source_speed: (1.0 + gamma) * c2,
            velocity_inner_product: -2.0 * (1.0 + gamma) * c2,
            line_of_sight: -1.5 * c2,
            source_acceleration: 0.5 * c2,
            subject_velocity: (2.0 + 2.0 * gamma) * c2,
            source_velocity: -(1.0 + 2.0 * gamma) * c2,
            source_acceleration_vector: 0.5 * (3.0 + 4.0 * gamma) * c2,
        }
    }

    /// Returns `true` if these multipliers were built for `gamma` and `beta`.
    #[must_use]
    pub fn matches(&self, gamma: f64, beta: f64) -> bool {
        self.gamma == gamma && self.beta == beta
    }
}
