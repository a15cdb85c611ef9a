//! The EIH engine with an infinite speed of light must agree with the
//! pairwise Newtonian models of `orrery-gravitation`.

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use nalgebra::Vector3;
use orrery_core::{AccelerationModel, CartesianState, CompositeAcceleration, Provider, constant};
use orrery_gravitation::{CentralGravity, ThirdBodyGravity};
use orrery_relativity::{
    BodyProviders, EihBodyAcceleration, EihEquations, EihSettings, PpnParameters,
};

struct Body {
    name: &'static str,
    state: Provider<CartesianState>,
    mu: f64,
}

/// Sun, Earth, and Moon on straight-line trajectories.
fn bodies() -> Vec<Body> {
    let moving = |position: Vector3<f64>, velocity: Vector3<f64>| -> Provider<CartesianState> {
        Arc::new(move |t: f64| CartesianState::new(position + velocity * t, velocity))
    };
    vec![
        Body {
            name: "Sun",
            state: moving(Vector3::new(1.0e8, -2.0e8, 3.0e7), Vector3::new(1.0, -12.0, 0.5)),
            mu: 1.327_124_400_18e20,
        },
        Body {
            name: "Earth",
            state: moving(
                Vector3::new(1.496e11, 2.0e9, -1.0e8),
                Vector3::new(-4.0e2, 2.978e4, 5.0),
            ),
            mu: 3.986_004_418e14,
        },
        Body {
            name: "Moon",
            state: moving(
                Vector3::new(1.4998e11, 2.1e9, 2.0e7),
                Vector3::new(-4.1e2, 3.080e4, 9.0e1),
            ),
            mu: 4.902_800_066e12,
        },
    ]
}

fn position_of(state: &Provider<CartesianState>) -> Provider<Vector3<f64>> {
    let state = Arc::clone(state);
    Arc::new(move |t: f64| state(t).position)
}

fn newtonian_engine(bodies: &[Body]) -> Arc<Mutex<EihEquations>> {
    let names: Vec<&str> = bodies.iter().map(|b| b.name).collect();
    let providers = bodies
        .iter()
        .map(|b| BodyProviders::new(b.name, Arc::clone(&b.state), constant(b.mu)))
        .collect();
    let engine = EihEquations::new(
        &names,
        &names,
        providers,
        PpnParameters::general_relativity(),
        EihSettings::newtonian(),
    )
    .expect("should build engine");
    Arc::new(Mutex::new(engine))
}

#[test]
fn eih_matches_summed_central_gravity() {
    let bodies = bodies();
    let engine = newtonian_engine(&bodies);

    for (i, subject) in bodies.iter().enumerate() {
        let mut newtonian = CompositeAcceleration::new();
        for (j, source) in bodies.iter().enumerate() {
            if i != j {
                newtonian.add(Box::new(CentralGravity::with_constant_parameter(
                    position_of(&subject.state),
                    source.mu,
                    position_of(&source.state),
                )));
            }
        }
        let mut eih = EihBodyAcceleration::new(Arc::clone(&engine), subject.name)
            .expect("should build adapter");

        for time in [0.0, 3600.0, 86_400.0] {
            newtonian.update(time).expect("should update");
            eih.update(time).expect("should update");

            assert_relative_eq!(
                eih.acceleration().unwrap(),
                newtonian.acceleration().unwrap(),
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn relative_eih_acceleration_matches_third_body_model() {
    let bodies = bodies();
    let engine = newtonian_engine(&bodies);
    let (sun, earth, moon) = (&bodies[0], &bodies[1], &bodies[2]);

    let mut guard = engine.lock().expect("engine lock");
    guard.update(0.0).expect("should update");
    let relative = guard.acceleration_of("Moon").unwrap() - guard.acceleration_of("Earth").unwrap();
    drop(guard);

    // Geocentric Moon: Earth's direct pull plus the Sun's third-body term.
    let mut geocentric = CompositeAcceleration::new();
    geocentric.add(Box::new(CentralGravity::with_constant_parameter(
        position_of(&moon.state),
        earth.mu + moon.mu,
        position_of(&earth.state),
    )));
    geocentric.add(Box::new(ThirdBodyGravity::new(
        position_of(&moon.state),
        position_of(&earth.state),
        position_of(&sun.state),
        constant(sun.mu),
    )));
    geocentric.update(0.0).expect("should update");

    assert_relative_eq!(
        geocentric.acceleration().unwrap(),
        relative,
        max_relative = 1e-8
    );
}
