//! Property and scaling tests for the full recall pipeline.
//!
//! The scaling checks are statistical: individual chains vary a lot, only
//! the mean over many chains is compared against `sqrt(1.5 * pi * L)`.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recall_core::{
    expected_scaling, generate_similarity, memory_recall_process, recall, recall_trace,
    GeneratorKind, RecallParams, SimilarityMatrix,
};

/// Relative deviation allowed between a sample mean and the scaling law.
const SCALING_TOLERANCE: f64 = 0.25;

/// Symmetric matrix with values drawn from a wide range, so ties are
/// practically absent. This is the regime the scaling law describes.
fn continuous_matrix(rng: &mut StdRng, len: usize) -> SimilarityMatrix {
    let mut inner = Array2::<u32>::zeros((len, len));
    for i in 0..len {
        for j in (i + 1)..len {
            let v = rng.gen_range(1..=u32::MAX / 2);
            inner[[i, j]] = v;
            inner[[j, i]] = v;
        }
    }
    SimilarityMatrix::from_array(inner).unwrap()
}

fn mean(values: &[usize]) -> f64 {
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn assert_near_scaling(items: usize, samples: &[usize]) {
    let observed = mean(samples);
    let expected = expected_scaling(items);
    let relative = (observed - expected).abs() / expected;
    assert!(
        relative < SCALING_TOLERANCE,
        "L={}: mean {:.2} vs expected {:.2} ({:.0}% off)",
        items,
        observed,
        expected,
        relative * 100.0
    );
}

#[test]
fn test_generated_similarity_is_symmetric_with_zero_diagonal() {
    let mut rng = StdRng::seed_from_u64(21);
    for (items, neurons, activation) in [(2, 10, 0.5), (10, 3000, 0.1), (40, 1000, 0.01)] {
        for kind in [GeneratorKind::Bernoulli, GeneratorKind::SparseFill] {
            let params = RecallParams::new(items, neurons, activation).with_generator(kind);
            let sim = generate_similarity(&params, &mut rng).unwrap();
            let inner = sim.as_array();
            for i in 0..items {
                assert_eq!(inner[[i, i]], 0);
                for j in 0..items {
                    assert_eq!(inner[[i, j]], inner[[j, i]]);
                }
            }
        }
    }
}

#[test]
fn test_recall_terminates_within_bound() {
    let mut rng = StdRng::seed_from_u64(4);
    for items in [2, 3, 5, 10, 25] {
        let params = RecallParams::new(items, 500, 0.05);
        for _ in 0..20 {
            let sim = generate_similarity(&params, &mut rng).unwrap();
            let outcome = recall_trace(&sim);
            assert!(outcome.steps < items * items);
            assert!((2..=items).contains(&outcome.distinct));
        }
    }
}

#[test]
fn test_good_example_is_stable() {
    // L=5, N=3000, f=0.1, seed 5
    let params = RecallParams::new(5, 3000, 0.1);
    let pinned = memory_recall_process(&params, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(pinned, 3);

    for _ in 0..3 {
        let again = memory_recall_process(&params, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(again, pinned);
    }
}

#[test]
fn test_scaling_on_tie_free_matrices() {
    let mut rng = StdRng::seed_from_u64(2020);
    for items in [10, 20, 50, 80, 130] {
        let samples: Vec<usize> = (0..100)
            .map(|_| recall(&continuous_matrix(&mut rng, items)))
            .collect();
        assert_near_scaling(items, &samples);
    }
}

#[test]
fn test_scaling_on_sampled_ensembles() {
    let mut rng = StdRng::seed_from_u64(7);
    for items in [10, 20, 50] {
        let params = RecallParams::new(items, 20000, 0.1);
        let samples: Vec<usize> = (0..50)
            .map(|_| memory_recall_process(&params, &mut rng).unwrap())
            .collect();
        assert_near_scaling(items, &samples);
    }
}

#[test]
#[ignore] // Slow: the full parameter grid with N = 20000
fn test_scaling_full_grid() {
    let mut rng = StdRng::seed_from_u64(11);
    for items in [10, 20, 50, 80, 130, 280, 500] {
        let params = RecallParams::new(items, 20000, 0.1);
        let samples: Vec<usize> = (0..100)
            .map(|_| memory_recall_process(&params, &mut rng).unwrap())
            .collect();
        assert_near_scaling(items, &samples);
    }
}
