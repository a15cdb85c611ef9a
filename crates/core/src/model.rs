use nalgebra::Vector3;

use crate::ModelError;

/// An acceleration model with an explicit update-then-read lifecycle.
///
/// Implementations evaluate their providers and cache the resulting
/// acceleration in [`update`](Self::update). [`acceleration`](Self::acceleration)
/// is a cheap read of that cache and never re-evaluates providers, so an
/// integrator calls `update` once per evaluation time and may then read as
/// often as it likes.
///
/// Reading before the first update returns [`ModelError::NotUpdated`].
/// Reading after the providers' underlying state has changed, without a new
/// update, returns the stale value; keeping the two in step is the caller's
/// responsibility.
pub trait AccelerationModel {
    /// Refreshes the cached acceleration for the given time (s).
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the model cannot be evaluated.
    fn update(&mut self, time: f64) -> Result<(), ModelError>;

    /// Returns the acceleration (m/s²) cached by the last update.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotUpdated`] if called before the first update.
    fn acceleration(&self) -> Result<Vector3<f64>, ModelError>;

    /// Model name for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Sums the contributions of several acceleration models.
///
/// # Example
///
/// ```ignore
/// let mut total = CompositeAcceleration::new();
/// total.add(Box::new(central_gravity));
/// total.add(Box::new(third_body));
///
/// total.update(t)?;
/// let acceleration = total.acceleration()?;
/// ```
#[derive(Default)]
pub struct CompositeAcceleration {
    models: Vec<Box<dyn AccelerationModel + Send>>,
    updated: bool,
}

impl CompositeAcceleration {
    /// Creates an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model to the composite.
    pub fn add(&mut self, model: Box<dyn AccelerationModel + Send>) {
        log::debug!("adding acceleration model: {}", model.name());
        self.models.push(model);
    }

    /// Returns the number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Lists the names of all models in insertion order.
    #[must_use]
    pub fn model_names(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    /// Returns each model's cached contribution, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a member model.
    pub fn breakdown(&self) -> Result<Vec<(&'static str, Vector3<f64>)>, ModelError> {
        self.models
            .iter()
            .map(|m| Ok((m.name(), m.acceleration()?)))
            .collect()
    }
}

impl AccelerationModel for CompositeAcceleration {
    fn update(&mut self, time: f64) -> Result<(), ModelError> {
        self.updated = false;
        for model in &mut self.models {
            model.update(time)?;
        }
        self.updated = true;
        Ok(())
    }

    fn acceleration(&self) -> Result<Vector3<f64>, ModelError> {
        if !self.updated {
            return Err(ModelError::NotUpdated { model: self.name() });
        }
        self.models
            .iter()
            .try_fold(Vector3::zeros(), |total, m| Ok(total + m.acceleration()?))
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Model returning `time * direction` after each update.
    struct Linear {
        direction: Vector3<f64>,
        cached: Option<Vector3<f64>>,
    }

    impl Linear {
        fn new(direction: Vector3<f64>) -> Self {
            Self {
                direction,
                cached: None,
            }
        }
    }

    impl AccelerationModel for Linear {
        fn update(&mut self, time: f64) -> Result<(), ModelError> {
            self.cached = Some(self.direction * time);
            Ok(())
        }

        fn acceleration(&self) -> Result<Vector3<f64>, ModelError> {
            self.cached.ok_or(ModelError::NotUpdated { model: self.name() })
        }

        fn name(&self) -> &'static str {
            "linear"
        }
    }

    #[test]
    fn empty_composite_is_zero() {
        let mut composite = CompositeAcceleration::new();
        assert!(composite.is_empty());

        composite.update(1.0).expect("should update");

        assert_eq!(composite.acceleration().unwrap(), Vector3::zeros());
    }

    #[test]
    fn sums_member_accelerations() {
        let mut composite = CompositeAcceleration::new();
        composite.add(Box::new(Linear::new(Vector3::new(1.0, 0.0, 0.0))));
        composite.add(Box::new(Linear::new(Vector3::new(0.0, 2.0, 0.0))));

        composite.update(3.0).expect("should update");

        assert_eq!(composite.len(), 2);
        assert_eq!(composite.model_names(), vec!["linear", "linear"]);
        assert_eq!(composite.acceleration().unwrap(), Vector3::new(3.0, 6.0, 0.0));

        let breakdown = composite.breakdown().unwrap();
        assert_eq!(breakdown[1].1, Vector3::new(0.0, 6.0, 0.0));
    }

    #[test]
    fn read_before_update_is_rejected() {
        let mut composite = CompositeAcceleration::new();
        composite.add(Box::new(Linear::new(Vector3::new(1.0, 0.0, 0.0))));

        let err = composite.acceleration().unwrap_err();
        assert!(matches!(err, ModelError::NotUpdated { model: "composite" }));
    }
}
