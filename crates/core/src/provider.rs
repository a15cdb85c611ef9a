use std::sync::Arc;

/// A late-bound input evaluated at a given time.
///
/// Models hold providers instead of values so that positions, velocities,
/// and gravitational parameters supplied by an external environment can vary
/// between updates. Cloning a provider shares the underlying function, which
/// lets several models read the same body.
///
/// # Example
///
/// ```rust
/// use nalgebra::Vector3;
/// use orrery_core::{Provider, constant};
///
/// let fixed: Provider<Vector3<f64>> = constant(Vector3::new(1.0, 0.0, 0.0));
/// let moving: Provider<Vector3<f64>> =
///     std::sync::Arc::new(|t: f64| Vector3::new(t, 0.0, 0.0));
///
/// assert_eq!(fixed(10.0), Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(moving(2.0), Vector3::new(2.0, 0.0, 0.0));
/// ```
pub type Provider<T> = Arc<dyn Fn(f64) -> T + Send + Sync>;

/// A time-independent scalar input, such as a PPN parameter.
pub type ScalarFunction = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Returns a provider that always yields `value`.
pub fn constant<T>(value: T) -> Provider<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move |_time| value.clone())
}

/// Returns a time-independent function that always yields `value`.
pub fn constant_scalar(value: f64) -> ScalarFunction {
    Arc::new(move || value)
}
