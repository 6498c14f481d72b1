//! Concurrency test
//!
//! Verifies that independent worlds can run on parallel threads without
//! data races (each engine owns its state, nothing is shared).

use simulation::replay::capture_fingerprint;
use simulation::scenarios::baseline;
use simulation::world::{DrawSimConfig, SimWorld};
use std::thread;
use custody_draw::mocks::MockToken;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_concurrent_worlds() {
    init_tracing();
    let seeds = vec![1u64, 2, 3, 4];

    let handles: Vec<_> = seeds
        .into_iter()
        .map(|seed| {
            thread::spawn(move || {
                let mut world = SimWorld::new(seed).unwrap();
                let token = world.deploy_token(MockToken::new());
                let depositors: Vec<_> = (0..50).map(|_| world.address()).collect();

                for d in &depositors {
                    world.fund(token, *d, 1000);
                    world.pull(*d, token, 1000, 0).unwrap();
                }
                for request_id in world.pending() {
                    world.fulfill(request_id).unwrap();
                }

                assert_eq!(world.engine.active_count(), 0);
                assert_eq!(world.engine.outstanding_requests(), 0);
                world.engine.events().len()
            })
        })
        .collect();

    let mut total_events = 0;
    for handle in handles {
        total_events += handle.join().unwrap();
    }

    assert_eq!(total_events, 400); // (50 pulls + 50 resolutions) × 4 worlds
}

#[test]
fn test_concurrent_determinism() {
    init_tracing();
    let config = DrawSimConfig {
        depositors: 6,
        rounds: 25,
        ..DrawSimConfig::default()
    };

    let c1 = config.clone();
    let c2 = config.clone();
    let h1 = thread::spawn(move || capture_fingerprint(&baseline::run_with_world(&c1).unwrap().world));
    let h2 = thread::spawn(move || capture_fingerprint(&baseline::run_with_world(&c2).unwrap().world));

    let r1 = h1.join().unwrap();
    let r2 = h2.join().unwrap();

    assert_eq!(r1, r2, "Parallel runs must produce identical results");
}
