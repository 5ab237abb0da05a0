//! Pluggable string hash strategies.
//!
//! Every strategy maps `(key, bucket_count)` to a bucket number in
//! `[0, bucket_count)` and is pure: the same inputs produce the same output
//! across calls, instances, and runs.

use hashdex_common::{HashdexError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of hash strategies an index can be built with.
///
/// Selection by name fails closed: unknown names are rejected rather than
/// mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashStrategy {
    /// 31-multiplier polynomial over the key's characters with 32-bit
    /// two's-complement wraparound.
    SimpleModulo,
    /// DJB2: 33-multiplier polynomial seeded with 5381, 64-bit accumulator.
    Djb2,
    /// FNV-1a over the key's raw UTF-8 bytes, 64-bit accumulator.
    Fnv1a,
}

impl HashStrategy {
    /// All strategies, in display order.
    pub const ALL: [HashStrategy; 3] = [
        HashStrategy::SimpleModulo,
        HashStrategy::Djb2,
        HashStrategy::Fnv1a,
    ];

    /// Returns the human-readable strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            HashStrategy::SimpleModulo => "Simple Modulo Hash",
            HashStrategy::Djb2 => "DJB2 Hash",
            HashStrategy::Fnv1a => "FNV-1a Hash",
        }
    }

    /// Returns the identifier accepted by [`HashStrategy::from_str`].
    pub fn id(&self) -> &'static str {
        match self {
            HashStrategy::SimpleModulo => "simple-modulo",
            HashStrategy::Djb2 => "djb2",
            HashStrategy::Fnv1a => "fnv1a",
        }
    }

    /// Maps `key` to a bucket number in `[0, bucket_count)`.
    ///
    /// Returns 0 when `bucket_count` is zero; never panics.
    pub fn hash(&self, key: &str, bucket_count: usize) -> usize {
        if bucket_count == 0 {
            return 0;
        }
        match self {
            HashStrategy::SimpleModulo => simple_modulo(key, bucket_count),
            HashStrategy::Djb2 => djb2(key, bucket_count),
            HashStrategy::Fnv1a => fnv1a(key, bucket_count),
        }
    }
}

impl FromStr for HashStrategy {
    type Err = HashdexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple-modulo" => Ok(HashStrategy::SimpleModulo),
            "djb2" => Ok(HashStrategy::Djb2),
            "fnv1a" => Ok(HashStrategy::Fnv1a),
            other => Err(HashdexError::UnknownHashStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `h = h*31 + codepoint(c)` in a wrapping `i32` accumulator.
fn simple_modulo(key: &str, bucket_count: usize) -> usize {
    let mut h: i32 = 0;
    for c in key.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as i32);
    }
    h.unsigned_abs() as usize % bucket_count
}

/// `h = h*33 + codepoint(c)` in a wrapping `i64` accumulator seeded 5381.
fn djb2(key: &str, bucket_count: usize) -> usize {
    let mut h: i64 = 5381;
    for c in key.chars() {
        h = h.wrapping_mul(33).wrapping_add(c as i64);
    }
    (h.unsigned_abs() % bucket_count as u64) as usize
}

/// `h = (h ^ byte) * 16777619` in a wrapping `i64` accumulator seeded with
/// the FNV offset basis.
fn fnv1a(key: &str, bucket_count: usize) -> usize {
    const FNV_OFFSET_BASIS: i64 = 2_166_136_261;
    const FNV_PRIME: i64 = 16_777_619;

    let mut h: i64 = FNV_OFFSET_BASIS;
    for &b in key.as_bytes() {
        h ^= b as i64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    (h.unsigned_abs() % bucket_count as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_modulo_known_values() {
        // Single-character keys reduce to the character's code point.
        let s = HashStrategy::SimpleModulo;
        assert_eq!(s.hash("a", 4), 97 % 4);
        assert_eq!(s.hash("b", 4), 98 % 4);
        assert_eq!(s.hash("c", 4), 99 % 4);
        assert_eq!(s.hash("d", 4), 100 % 4);
        assert_eq!(s.hash("e", 4), 101 % 4);

        // "ab" = 97*31 + 98
        assert_eq!(s.hash("ab", 10_000), 3105);
    }

    #[test]
    fn test_simple_modulo_wraparound() {
        // This key's 31-polynomial accumulator lands exactly on i32::MIN,
        // whose magnitude must survive the absolute value.
        let s = HashStrategy::SimpleModulo;
        assert_eq!(s.hash("polygenelubricants", 1000), 2_147_483_648 % 1000);
    }

    #[test]
    fn test_djb2_known_values() {
        // "ab" = (5381*33 + 97)*33 + 98
        assert_eq!(HashStrategy::Djb2.hash("ab", 10_000_000), 5_863_208);
        assert_eq!(HashStrategy::Djb2.hash("", 100), 5381 % 100);
    }

    #[test]
    fn test_hash_is_in_range() {
        let keys = ["", "a", "hello", "zygote", "überlänge", "a longer key with spaces"];
        for strategy in HashStrategy::ALL {
            for key in keys {
                for bucket_count in [1, 2, 3, 7, 64, 1001] {
                    let h = strategy.hash(key, bucket_count);
                    assert!(
                        h < bucket_count,
                        "{} produced {} for {} buckets",
                        strategy.name(),
                        h,
                        bucket_count
                    );
                }
            }
        }
    }

    #[test]
    fn test_hash_is_deterministic() {
        for strategy in HashStrategy::ALL {
            let first = strategy.hash("determinism", 97);
            for _ in 0..100 {
                assert_eq!(strategy.hash("determinism", 97), first);
            }
        }
    }

    #[test]
    fn test_zero_bucket_count_returns_zero() {
        for strategy in HashStrategy::ALL {
            assert_eq!(strategy.hash("anything", 0), 0);
        }
    }

    #[test]
    fn test_single_bucket_always_zero() {
        for strategy in HashStrategy::ALL {
            for key in ["a", "b", "longer", ""] {
                assert_eq!(strategy.hash(key, 1), 0);
            }
        }
    }

    #[test]
    fn test_strategies_differ() {
        // Not a contract, but the three algorithms should not be aliases of
        // one another on an ordinary key and modulus.
        let n = 1_000_003;
        let simple = HashStrategy::SimpleModulo.hash("divergence", n);
        let djb2 = HashStrategy::Djb2.hash("divergence", n);
        let fnv = HashStrategy::Fnv1a.hash("divergence", n);
        assert!(simple != djb2 || djb2 != fnv);
    }

    #[test]
    fn test_long_keys_do_not_panic() {
        let long_key = "overflow".repeat(10_000);
        for strategy in HashStrategy::ALL {
            let h = strategy.hash(&long_key, 123);
            assert!(h < 123);
        }
    }

    #[test]
    fn test_from_str_accepts_known_ids() {
        assert_eq!(
            "simple-modulo".parse::<HashStrategy>().unwrap(),
            HashStrategy::SimpleModulo
        );
        assert_eq!("djb2".parse::<HashStrategy>().unwrap(), HashStrategy::Djb2);
        assert_eq!("fnv1a".parse::<HashStrategy>().unwrap(), HashStrategy::Fnv1a);

        // Case-insensitive.
        assert_eq!("DJB2".parse::<HashStrategy>().unwrap(), HashStrategy::Djb2);
    }

    #[test]
    fn test_from_str_fails_closed() {
        let result = "md5".parse::<HashStrategy>();
        assert!(matches!(
            result,
            Err(HashdexError::UnknownHashStrategy(name)) if name == "md5"
        ));
    }

    #[test]
    fn test_id_round_trips_through_from_str() {
        for strategy in HashStrategy::ALL {
            assert_eq!(strategy.id().parse::<HashStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(HashStrategy::SimpleModulo.name(), "Simple Modulo Hash");
        assert_eq!(HashStrategy::Djb2.name(), "DJB2 Hash");
        assert_eq!(HashStrategy::Fnv1a.name(), "FNV-1a Hash");
        assert_eq!(HashStrategy::Fnv1a.to_string(), "FNV-1a Hash");
    }
}
