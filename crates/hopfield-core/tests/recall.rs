//! Storage and recall properties across network sizes and pattern sets.

use hopfield_core::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_pattern(rng: &mut ChaCha8Rng, n: usize) -> Vec<Activation> {
    (0..n)
        .map(|_| {
            if rng.gen_bool(0.5) {
                Activation::High
            } else {
                Activation::Low
            }
        })
        .collect()
}

fn network(n: usize, seed: u64) -> HopfieldNetwork {
    let mut net = HopfieldNetwork::with_seed(n, seed);
    net.initialise_nodes();
    net
}

#[test]
fn end_to_end_four_node_example() {
    let mut net = network(4, 0);
    let stored = pattern_from_ints(&[1, -1, 1, -1]).unwrap();
    net.add_pattern(&stored).unwrap();

    assert_eq!(
        net.weight_matrix(),
        vec![
            vec![0.0, -1.0, 1.0, -1.0],
            vec![-1.0, 0.0, -1.0, 1.0],
            vec![1.0, -1.0, 0.0, -1.0],
            vec![-1.0, 1.0, -1.0, 0.0],
        ]
    );

    net.set_activations(&pattern_from_ints(&[1, -1, 1, 1]).unwrap())
        .unwrap();
    assert_eq!(net.recover().unwrap(), stored);
}

#[test]
fn noisy_cue_recovers_under_every_ordering() {
    // The converged state must not depend on the random update order.
    let stored = pattern_from_ints(&[1, -1, 1, -1]).unwrap();
    let cue = pattern_from_ints(&[1, -1, 1, 1]).unwrap();
    for seed in 0..50 {
        let mut net = network(4, seed);
        net.add_pattern(&stored).unwrap();
        net.set_activations(&cue).unwrap();
        assert_eq!(net.recover().unwrap(), stored, "seed {seed}");
    }
}

#[test]
fn diagonal_stays_zero_and_matrix_symmetric() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for n in [2, 5, 9, 16] {
        let mut net = network(n, 1);
        for _ in 0..4 {
            net.add_pattern(&random_pattern(&mut rng, n)).unwrap();
            for (i, node) in net.nodes().iter().enumerate() {
                assert_eq!(node.self_weight(), 0.0);
                for j in 0..n {
                    assert_eq!(net.weight(i, j), net.weight(j, i));
                }
            }
            assert!(net.is_symmetric());
        }
    }
}

#[test]
fn single_pattern_is_a_fixed_point() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for n in 2..12 {
        let p = random_pattern(&mut rng, n);
        let mut net = network(n, n as u64);
        net.add_pattern(&p).unwrap();
        net.set_activations(&p).unwrap();

        let report = net.recover_report().unwrap();
        assert_eq!(report.activations, p);
        assert_eq!(report.updates, 0);
        assert_eq!(report.sweeps, 1);
    }
}

#[test]
fn recovery_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let n = 20;
    let mut net = network(n, 5);
    for _ in 0..3 {
        net.add_pattern(&random_pattern(&mut rng, n)).unwrap();
    }

    for _ in 0..10 {
        net.set_activations(&random_pattern(&mut rng, n)).unwrap();
        let first = net.recover().unwrap();
        net.set_activations(&first).unwrap();
        let second = net.recover().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn superposition_is_sum_of_outer_products() {
    let p1 = pattern_from_ints(&[1, 1, -1, -1, 1]).unwrap();
    let p2 = pattern_from_ints(&[-1, 1, 1, -1, -1]).unwrap();
    let mut net = network(5, 0);
    net.add_pattern(&p1).unwrap();
    net.add_pattern(&p2).unwrap();
    assert_eq!(net.pattern_count(), 2);

    for i in 0..5 {
        for j in 0..5 {
            let expected = if i == j {
                0.0
            } else {
                p1[i].as_f64() * p1[j].as_f64() + p2[i].as_f64() * p2[j].as_f64()
            };
            assert_eq!(net.weight(i, j), Some(expected), "w[{i}][{j}]");
        }
    }
}

#[test]
fn energy_never_rises_during_recovery() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let n = 24;
    let mut net = network(n, 2);
    for _ in 0..3 {
        net.add_pattern(&random_pattern(&mut rng, n)).unwrap();
    }
    for _ in 0..10 {
        let cue = random_pattern(&mut rng, n);
        net.set_activations(&cue).unwrap();
        let before = net.energy();
        net.recover().unwrap();
        assert!(net.energy() <= before, "{} > {}", net.energy(), before);
    }
}

#[test]
fn mismatched_lengths_are_rejected_without_mutation() {
    let mut net = network(4, 0);
    net.add_pattern(&pattern_from_ints(&[1, 1, -1, -1]).unwrap())
        .unwrap();
    let weights = net.weight_matrix();

    let short = pattern_from_ints(&[1, 1]).unwrap();
    assert!(matches!(
        net.add_pattern(&short),
        Err(HopfieldError::InvalidPattern { expected: 4, found: 2 })
    ));
    assert!(matches!(
        net.set_activations(&short),
        Err(HopfieldError::SizeMismatch { node: None, .. })
    ));
    assert!(matches!(
        net.add_pattern(&[]),
        Err(HopfieldError::InvalidPattern { found: 0, .. })
    ));
    assert_eq!(net.weight_matrix(), weights);
    assert_eq!(net.activations(), vec![Activation::Neutral; 4]);
}

#[test]
fn reinitialise_forgets_everything() {
    let mut net = network(3, 0);
    net.add_pattern(&pattern_from_ints(&[1, -1, 1]).unwrap())
        .unwrap();
    net.set_activations(&pattern_from_ints(&[1, 1, 1]).unwrap())
        .unwrap();

    net.initialise_nodes();
    assert_eq!(net.pattern_count(), 0);
    assert_eq!(net.activations(), vec![Activation::Neutral; 3]);
    assert!(net.weight_matrix().iter().flatten().all(|&w| w == 0.0));
}

#[test]
fn grid_pattern_round_trip_through_network() {
    let grid = GridLayout::new(3, 3).unwrap();
    let cross = grid.parse_pattern(".#. / ### / .#.").unwrap();
    // Photographic negative of the cross; also an attractor of the same weights
    let inverse = grid.parse_pattern("#.# / ... / #.#").unwrap();

    let mut net = network(grid.len(), 4);
    net.add_pattern(&cross).unwrap();
    net.add_pattern(&inverse).unwrap();

    // Cross with its bottom arm missing
    let cue = grid.parse_pattern(".#. / ### / ...").unwrap();
    net.set_activations(&cue).unwrap();
    let recovered = net.recover().unwrap();
    assert_eq!(
        grid.render(&recovered, Glyphs::default()),
        vec![".#.", "###", ".#."]
    );
}
