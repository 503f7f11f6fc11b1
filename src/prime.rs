//! Prime sizing for the bucket arrays of both maps

/// Returns true if `n` is prime.
///
/// Trial division by odd factors while `factor^2 <= n`.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n.checked_rem(2) == Some(0) {
        return false;
    }

    let mut factor: usize = 3;
    while factor.checked_mul(factor).is_some_and(|square| square <= n) {
        if n.checked_rem(factor) == Some(0) {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Returns the first prime reached by walking odd numbers upward from `n`.
///
/// An even `n` is bumped to `n + 1` first, so `next_prime(2)` is 3 and the
/// smallest capacity any map ends up with is 3.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n.checked_rem(2) == Some(0) { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_squares_are_not_prime() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_201)); // 101^2
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(10), 11);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(53), 53);
        assert_eq!(next_prime(106), 107);
        assert_eq!(next_prime(100), 101);
    }

    #[test]
    fn test_next_prime_degenerate_inputs() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(3), 3);
    }
}
