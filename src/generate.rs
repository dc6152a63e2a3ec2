//! Synthetic document generation for stress-testing the pipeline.
//!
//! Produces arbitrarily nested objects bounded by a maximum property
//! count per level and a maximum nesting depth. Documents are built as
//! `serde_json::Value`s and serialized with `serde_json`, so every
//! generated sample is syntactically valid by construction. The pipeline
//! makes no assumption about this generator beyond that.

use serde_json::{Map, Number, Value as Json};
use std::time::{SystemTime, UNIX_EPOCH};

/// Property strings draw from this alphabet. The backslash is included
/// deliberately: serialization escapes it, so generated samples exercise
/// the lexer's escape handling.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789\\";

/// SplitMix64. Small, seedable and statistically fine for test data;
/// nothing in this crate needs a cryptographic generator.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// A bounded random document generator.
pub struct Generator {
    rng: SplitMix64,
    max_props: usize,
    max_depth: usize,
}

impl Generator {
    /// A generator with a fixed seed, for reproducible samples.
    pub fn new(seed: u64, max_props: usize, max_depth: usize) -> Self {
        Generator {
            rng: SplitMix64::new(seed),
            max_props,
            max_depth,
        }
    }

    /// A generator seeded from the system clock.
    pub fn from_entropy(max_props: usize, max_depth: usize) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(seed, max_props, max_depth)
    }

    /// One random nested document (always an object at the root).
    pub fn document(&mut self) -> Json {
        self.object(0)
    }

    /// An array of `count` random documents, the shape the sample files
    /// store on disk.
    pub fn sample(&mut self, count: usize) -> Json {
        Json::Array((0..count).map(|_| self.document()).collect())
    }

    fn object(&mut self, depth: usize) -> Json {
        if depth >= self.max_depth {
            return Json::Object(Map::new());
        }

        let mut object = Map::new();
        let prop_count = self.gen_range(1, self.max_props);

        for _ in 0..prop_count {
            let key_len = self.gen_range(3, 10);
            let key = self.gen_string(key_len);
            let value = match self.gen_range(0, 5) {
                0 => {
                    let len = self.gen_range(3, 50);
                    Json::String(self.gen_string(len))
                }
                1 => Json::Number(Number::from(self.gen_range(0, 10_000) as u64)),
                2 => Json::Bool(self.gen_range(0, 1) == 0),
                3 => Json::Null,
                4 => self.object(depth + 1),
                _ => {
                    let len = self.gen_range(1, self.max_props);
                    Json::Array((0..len).map(|_| self.object(depth + 1)).collect())
                }
            };
            object.insert(key, value);
        }

        Json::Object(object)
    }

    /// A uniform draw from `min..=max`. An inverted range (as with a
    /// zero property bound) collapses to `min`.
    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        let span = max.saturating_sub(min) as u64 + 1;
        min + (self.rng.next_u64() % span) as usize
    }

    fn gen_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[self.rng.next_u64() as usize % ALPHABET.len()] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn depth_of(value: &Json) -> usize {
        match value {
            Json::Object(o) => 1 + o.values().map(depth_of).max().unwrap_or(0),
            Json::Array(a) => 1 + a.iter().map(depth_of).max().unwrap_or(0),
            _ => 0,
        }
    }

    #[test]
    fn test_same_seed_same_document() {
        let a = Generator::new(7, 5, 3).document();
        let b = Generator::new(7, 5, 3).document();
        assert_eq!(a, b);
    }

    #[test]
    fn test_depth_and_property_bounds() {
        let mut generator = Generator::new(42, 4, 3);
        for _ in 0..20 {
            let document = generator.document();
            // Root at depth 1, cut off with an empty object at max_depth,
            // arrays add one level of their own.
            assert!(depth_of(&document) <= 2 * 3 + 1);

            let object = document.as_object().unwrap();
            assert!(!object.is_empty());
            assert!(object.len() <= 4);
        }
    }

    #[test]
    fn test_zero_property_bound_collapses_to_one() {
        // max_props below the per-level minimum must not panic; every
        // level gets exactly one property.
        let document = Generator::new(7, 0, 2).document();
        assert_eq!(document.as_object().unwrap().len(), 1);

        let mut generator = Generator::new(11, 0, 0);
        assert_eq!(generator.document(), Json::Object(Map::new()));
        let text = serde_json::to_string_pretty(&generator.sample(2)).unwrap();
        assert!(crate::parse_document(&text).is_ok());
    }

    #[test]
    fn test_generated_samples_survive_the_pipeline() {
        let mut generator = Generator::new(1815, 6, 4);
        let text = serde_json::to_string_pretty(&generator.sample(3)).unwrap();

        let tokens = Lexer::new(&text).lex().unwrap();
        let value = Parser::new(&tokens).parse().unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }
}
