//! Final-weight conventions.
//!
//! A state's final weight is a plain `f64`. NaN marks a non-final state,
//! which is different from a final weight of zero.

/// Final weight of a state that does not accept.
pub const NON_FINAL: f64 = f64::NAN;

/// Bit pattern every NaN hashes as, whatever its payload.
const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// Classification of a final weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finality {
    NonFinal,
    /// `+0.0` or `-0.0`.
    Zero,
    Weighted(f64),
}

impl Finality {
    pub fn of(weight: f64) -> Self {
        if is_non_final(weight) {
            Finality::NonFinal
        } else if weight == 0.0 {
            Finality::Zero
        } else {
            Finality::Weighted(weight)
        }
    }

    #[inline]
    pub fn is_final(self) -> bool {
        !matches!(self, Finality::NonFinal)
    }
}

#[inline]
pub fn is_non_final(weight: f64) -> bool {
    weight.is_nan()
}

/// Weight equality used by arc and state comparison.
///
/// Two NaNs are equal (both non-final), and `+0.0 == -0.0`.
#[inline]
pub fn weight_equals(a: f64, b: f64) -> bool {
    match (is_non_final(a), is_non_final(b)) {
        (true, true) => true,
        (false, false) => a == b,
        _ => false,
    }
}

/// Hash key consistent with [`weight_equals`].
#[inline]
pub fn weight_hash_key(weight: f64) -> u64 {
    match Finality::of(weight) {
        Finality::NonFinal => CANONICAL_NAN_BITS,
        Finality::Zero => 0,
        Finality::Weighted(w) => w.to_bits(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finality() {
        assert_eq!(Finality::of(NON_FINAL), Finality::NonFinal);
        assert_eq!(Finality::of(0.0), Finality::Zero);
        assert_eq!(Finality::of(-0.0), Finality::Zero);
        assert_eq!(Finality::of(2.5), Finality::Weighted(2.5));
        assert_eq!(Finality::of(f64::INFINITY), Finality::Weighted(f64::INFINITY));
        assert!(!Finality::of(NON_FINAL).is_final());
        assert!(Finality::of(0.0).is_final());
    }

    #[test]
    fn test_nan_payloads_are_non_final() {
        // A NaN with a non-default payload is still the sentinel.
        let odd_nan = f64::from_bits(0x7ff0_0000_0000_0001);
        assert!(is_non_final(odd_nan));
        assert_eq!(Finality::of(odd_nan), Finality::NonFinal);
        assert!(weight_equals(odd_nan, NON_FINAL));
        assert_eq!(weight_hash_key(odd_nan), weight_hash_key(NON_FINAL));
    }

    #[test]
    fn test_zero_is_not_non_final() {
        assert!(!is_non_final(0.0));
        assert!(!weight_equals(0.0, NON_FINAL));
        assert_ne!(weight_hash_key(0.0), weight_hash_key(NON_FINAL));
    }

    #[test]
    fn test_signed_zero_baseline() {
        assert!(weight_equals(0.0, -0.0));
        assert_eq!(weight_hash_key(0.0), 0);
        assert_eq!(weight_hash_key(-0.0), 0);
    }

    #[test]
    fn test_plain_weights() {
        assert!(weight_equals(1.5, 1.5));
        assert!(!weight_equals(1.5, 1.5000001));
        assert_eq!(weight_hash_key(1.5), 1.5f64.to_bits());
    }
}
