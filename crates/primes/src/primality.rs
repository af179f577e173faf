/// Deterministic trial division over `6k ± 1` candidates.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: u64 = 5;
    // `i <= n / i` is `i * i <= n` without overflow.
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the `n`th prime, counting 2 as the first. `n == 0` yields `None`.
pub fn nth_prime(n: u64) -> Option<u64> {
    if n == 0 {
        return None;
    }
    (2u64..).filter(|&candidate| is_prime(candidate)).nth((n - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_small_numbers() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn handles_squares_of_primes_and_large_values() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_403)); // 101 * 103
        assert!(is_prime(1_000_000_007));
        assert!(is_prime(4_294_967_291)); // largest 32-bit prime
        assert!(!is_prime(u64::MAX));
    }

    #[test]
    fn finds_nth_prime() {
        assert_eq!(nth_prime(0), None);
        assert_eq!(nth_prime(1), Some(2));
        assert_eq!(nth_prime(10), Some(29));
        assert_eq!(nth_prime(1000), Some(7919));
    }
}
