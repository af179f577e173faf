//! The CPU-bound scoring kernels. Each is a pure function of its arguments.

use core_types::next_gaussian;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Side length of the square matrices used by [`simulate_ml_inference`].
pub const MATRIX_SIZE: usize = 50;
/// Rounds of the anomaly random walk.
pub const ANOMALY_ROUNDS: usize = 1000;
/// Upper bound of both loops in [`complex_risk`].
pub const RISK_GRID: usize = 200;

/// Chains SHA-256 `iterations` times over `seed`.
///
/// After every round each digest byte is XOR-ed with the round index so no
/// two rounds hash the same input.
pub fn iterative_hash(seed: &[u8], iterations: usize) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(seed));
    perturb(&mut digest, 0);

    for round in 1..iterations {
        let next = Sha256::digest(digest);
        digest.copy_from_slice(&next);
        perturb(&mut digest, round);
    }
    digest
}

fn perturb(digest: &mut [u8; 32], round: usize) {
    let mask = (round % 256) as u8;
    for byte in digest.iter_mut() {
        *byte ^= mask;
    }
}

/// Folds a digest into a double by reading its first four bytes.
pub fn digest_value(digest: &[u8; 32]) -> f64 {
    f64::from(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Transcendental accumulation over an account-seeded Gaussian walk.
pub fn anomaly_score(account_id: u64, amount: f64) -> f64 {
    let mut rng = StdRng::seed_from_u64(account_id);
    let mut score = 0.0;

    for i in 1..=ANOMALY_ROUNDS {
        let i = i as f64;
        let x = next_gaussian(&mut rng) * amount;

        score += (x / i).sin() * (x * i).cos();
        score += x.abs().ln_1p() / i.sqrt();
        score += (-x.abs() / 1000.0).exp() * i.powf(0.3);
        score += (x / i).atan() * (x / 10_000.0).sinh();
    }

    score.abs()
}

/// O(n²) accumulation over a `RISK_GRID` x `RISK_GRID` grid, averaged over its cells.
pub fn complex_risk(amount: f64, anomaly_weight: f64) -> f64 {
    let mut risk = 0.0;

    for i in 1..=RISK_GRID {
        let i = i as f64;
        for j in 1..=RISK_GRID {
            let j = j as f64;
            risk += (amount / (i * j)).sqrt();
            risk += (anomaly_weight * i).ln_1p() / j;
            risk += i.powf(0.5) * j.powf(0.3);
        }
    }

    risk / (RISK_GRID * RISK_GRID) as f64
}

/// Multiplies two account-seeded matrices and sums the `tanh` activations.
pub fn simulate_ml_inference(account_id: u64, amount: f64) -> f64 {
    let mut rng = StdRng::seed_from_u64(account_id);
    let mut features = Array2::<f64>::zeros((MATRIX_SIZE, MATRIX_SIZE));
    let mut model = Array2::<f64>::zeros((MATRIX_SIZE, MATRIX_SIZE));

    // Draws interleave between the two matrices, cell by cell.
    for i in 0..MATRIX_SIZE {
        for j in 0..MATRIX_SIZE {
            features[[i, j]] = next_gaussian(&mut rng) * amount / 1000.0;
            model[[i, j]] = next_gaussian(&mut rng);
        }
    }

    let activations = features.dot(&model).mapv(f64::tanh);
    activations.sum().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_chain_is_deterministic_and_input_sensitive() {
        let a = iterative_hash(b"123450", 500);
        let b = iterative_hash(b"123450", 500);
        let c = iterative_hash(b"123451", 500);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn single_round_is_a_plain_digest() {
        let expected = Sha256::digest(b"abc");
        assert_eq!(iterative_hash(b"abc", 1).as_slice(), expected.as_slice());
    }

    #[test]
    fn digest_value_reads_big_endian_prefix() {
        let mut digest = [0u8; 32];
        digest[..4].copy_from_slice(&[0, 0, 1, 2]);
        assert_eq!(digest_value(&digest), 258.0);
    }

    #[test]
    fn anomaly_score_is_reproducible_per_account() {
        let a = anomaly_score(12_345, 5000.0);
        assert_eq!(a, anomaly_score(12_345, 5000.0));
        assert_ne!(a, anomaly_score(12_346, 5000.0));
        assert!(a >= 0.0);
    }

    #[test]
    fn complex_risk_grows_with_amount() {
        let low = complex_risk(100.0, 100.0);
        let high = complex_risk(10_000.0, 100.0);
        assert!(low > 0.0);
        assert!(high > low);
    }

    #[test]
    fn ml_inference_is_bounded_by_matrix_cells() {
        let score = simulate_ml_inference(12_345, 5000.0);
        assert_eq!(score, simulate_ml_inference(12_345, 5000.0));
        assert!(score >= 0.0);
        assert!(score <= (MATRIX_SIZE * MATRIX_SIZE) as f64);
    }
}
