//! A shared encoder gives the same keys from many threads at once

use bmpm::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

const NAMES: [&str; 12] = [
    "Schwarzenegger",
    "Kowalski",
    "Müller",
    "Garcia",
    "Cohen",
    "Washington",
    "Smith",
    "O'Brien",
    "van Helsing",
    "Nguyen",
    "Rosenberg",
    "Da Silva",
];

#[test]
fn test_parallel_encoding_matches_sequential() {
    let encoder = Arc::new(
        BeiderMorse::builder()
            .match_mode(MatchMode::Exact)
            .build()
            .unwrap(),
    );
    let expected: Vec<Vec<String>> = NAMES
        .iter()
        .map(|name| encoder.encode(name).unwrap())
        .collect();
    let expected = Arc::new(expected);

    const NUM_THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let mut handles = vec![];
    for i in 0..NUM_THREADS {
        let encoder = Arc::clone(&encoder);
        let expected = Arc::clone(&expected);
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            barrier.wait();
            let start = Instant::now();

            for round in 0..20 {
                let idx = (i + round) % NAMES.len();
                let keys = encoder.encode(NAMES[idx]).unwrap();
                assert_eq!(keys, expected[idx], "thread {} name {}", i, NAMES[idx]);
            }

            start.elapsed()
        }));
    }

    let durations: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    println!("\n=== Parallel Encoding ===");
    for (i, duration) in durations.iter().enumerate() {
        println!("  Thread {}: {:?}", i, duration);
    }
}

#[test]
fn test_cloned_encoders_share_rules() {
    let encoder = BeiderMorse::new(EncoderConfig::default()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let encoder = encoder.clone();
            thread::spawn(move || {
                let keys = encoder.encode("Kowalski").unwrap();
                (Arc::clone(encoder.rules()), keys)
            })
        })
        .collect();

    let sequential = encoder.encode("Kowalski").unwrap();
    for handle in handles {
        let (rules, keys) = handle.join().unwrap();
        assert!(Arc::ptr_eq(&rules, encoder.rules()));
        assert_eq!(keys, sequential);
    }
}
