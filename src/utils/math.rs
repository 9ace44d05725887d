//! Numeric helpers.

/// Checks whether `n` is a prime number.
///
/// Trial division up to `√n`. After ruling out 2 and 3, every remaining prime
/// has the form `6k ± 1`, so only `i` and `i + 2` are tested for
/// `i = 5, 11, 17, …`.
///
/// # Examples
///
/// ```
/// use cairn::utils::is_prime;
///
/// assert!(is_prime(97));
/// assert!(!is_prime(91));
/// ```
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 || n == 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: i64 = 5;
    // i <= n / i avoids overflowing i * i near i64::MAX
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime_reference(n: i64) -> bool {
        n >= 2 && (2..n).all(|d| n % d != 0)
    }

    #[test]
    fn test_non_positive_and_one_are_not_prime() {
        for n in [-100, -7, -1, 0, 1] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn test_small_primes() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(5));
        assert!(is_prime(7));
        assert!(!is_prime(4));
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
    }

    #[test]
    fn test_agrees_with_reference_up_to_ten_thousand() {
        for n in 0..=10_000 {
            assert_eq!(is_prime(n), is_prime_reference(n), "mismatch at {n}");
        }
    }

    #[test]
    fn test_large_values() {
        assert!(is_prime(1_000_000_007));
        assert!(!is_prime(1_000_000_007 * 3));
        assert!(!is_prime(i64::MAX));
    }
}
