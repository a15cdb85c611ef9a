use std::sync::{Arc, Mutex, MutexGuard};

use nalgebra::Vector3;
use orrery_core::{AccelerationModel, ModelError};

use super::{EihEquations, Error};

const MODEL_NAME: &str = "EIH gravity";

/// Exposes one accelerated body of a shared [`EihEquations`] engine as an
/// [`AccelerationModel`].
///
/// Several adapters may share an engine. An adapter refreshes the engine
/// unless another adapter has refreshed it at the same time since this
/// adapter's last update, in which case it only reads. Updating one adapter
/// twice at the same time therefore always re-reads the providers, as an
/// integrator does for two stages at one time with different states.
#[derive(Debug, Clone)]
pub struct EihBodyAcceleration {
    engine: Arc<Mutex<EihEquations>>,
    index: usize,
    last_evaluation: Option<u64>,
}

impl EihBodyAcceleration {
    /// Creates an adapter for the named accelerated body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not an accelerated body of the engine,
    /// or if the engine's lock was poisoned.
    pub fn new(engine: Arc<Mutex<EihEquations>>, body: &str) -> Result<Self, Error> {
        let index = {
            let guard = engine.lock().map_err(|_| Error::EngineUnavailable)?;
            let index = guard
                .index_of(body)
                .ok_or_else(|| Error::UnknownBody(body.to_owned()))?;
            if !guard.index.is_accelerated(index) {
                return Err(Error::NotAccelerated(body.to_owned()));
            }
            index
        };

        Ok(Self {
            engine,
            index,
            last_evaluation: None,
        })
    }

    /// Index of the body within the engine.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    fn lock(&self) -> Result<MutexGuard<'_, EihEquations>, ModelError> {
        self.engine
            .lock()
            .map_err(|_| ModelError::update(MODEL_NAME, Error::EngineUnavailable))
    }
}

fn to_model_error(err: Error) -> ModelError {
    match err {
        Error::NotUpdated => ModelError::NotUpdated { model: MODEL_NAME },
        other => ModelError::update(MODEL_NAME, other),
    }
}

impl AccelerationModel for EihBodyAcceleration {
    fn update(&mut self, time: f64) -> Result<(), ModelError> {
        let evaluation = {
            let mut engine = self.lock()?;
            let refreshed_by_another = engine.current_time().ok() == Some(time)
                && self.last_evaluation != Some(engine.evaluations());
            if !refreshed_by_another {
                engine.update(time).map_err(to_model_error)?;
            }
            engine.evaluations()
        };
        self.last_evaluation = Some(evaluation);
        Ok(())
    }

    fn acceleration(&self) -> Result<Vector3<f64>, ModelError> {
        let engine = self.lock()?;
        engine.acceleration(self.index).map_err(to_model_error)
    }

    fn name(&self) -> &'static str {
        MODEL_NAME
    }
}
