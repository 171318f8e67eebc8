//! The public `Filter` type: dynamic overlay, query engine, and concurrency
//! façade assembled together.

mod core;
mod mutate;
mod query;

pub use core::Filter;

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::Error;

    use super::Filter;

    #[test]
    fn fresh_filter_add_then_contains() {
        let f = Filter::new(0);
        assert!(!f.contains("a"));
        assert!(f.add("a").unwrap());
        assert!(f.contains("a"));
    }

    #[test]
    fn add_then_remove_round_trip() {
        let f = Filter::new(0);
        assert!(f.add("a").unwrap());
        assert!(f.contains("a"));
        assert!(f.remove("a").unwrap());
        assert!(!f.contains("a"));
    }

    #[test]
    fn add_all_then_remove_all() {
        let f = Filter::new(0);
        let added = f.add_all(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(added, 4);
        for k in ["a", "b", "c", "d"] {
            assert!(f.contains(k));
        }
        let removed = f.remove_all(&["b", "d"]).unwrap();
        assert_eq!(removed, 2);
        assert!(f.contains("a"));
        assert!(!f.contains("b"));
        assert!(f.contains("c"));
        assert!(!f.contains("d"));
    }

    #[test]
    fn compact_folds_overlay_into_a_fresh_snapshot() {
        let cfg = Config::default().with_auto_rebuild(false);
        let f = Filter::with_config(0, cfg).unwrap();
        f.add_all(&["a", "b", "c"]).unwrap();
        for k in ["a", "b", "c"] {
            assert!(f.contains(k));
        }
        f.compact().unwrap();
        for k in ["a", "b", "c"] {
            assert!(f.contains(k));
        }
        assert_eq!(f.size(), 3);
    }

    #[test]
    fn compact_is_idempotent_on_the_effective_set() {
        let f = Filter::new(0);
        f.add_all(&["a", "b", "c"]).unwrap();
        f.compact().unwrap();
        let before: Vec<bool> = ["a", "b", "c", "z"].iter().map(|k| f.contains(k)).collect();
        f.compact().unwrap();
        let after: Vec<bool> = ["a", "b", "c", "z"].iter().map(|k| f.contains(k)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn repeated_add_of_same_key_returns_false_after_the_first() {
        let f = Filter::new(0);
        assert!(f.add("a").unwrap());
        assert!(!f.add("a").unwrap());
    }

    #[test]
    fn remove_of_absent_key_returns_false() {
        let f = Filter::new(0);
        assert!(!f.remove("nope").unwrap());
    }

    #[test]
    fn size_and_is_empty_track_the_effective_set() {
        let f = Filter::new(0);
        assert!(f.is_empty());
        f.add("a").unwrap();
        f.add("b").unwrap();
        assert_eq!(f.size(), 2);
        f.remove("a").unwrap();
        assert_eq!(f.size(), 1);
    }

    #[test]
    fn from_keys_builds_directly_without_an_add_all_pass() {
        let keys = ["a", "b", "c"];
        let f = Filter::from_keys(&keys, Config::default()).unwrap();
        for k in keys {
            assert!(f.contains(k));
        }
        assert_eq!(f.size(), 3);
        assert_eq!(f.config().fingerprint_bits, Config::default().fingerprint_bits);
    }

    #[test]
    fn with_config_rejects_invalid_fingerprint_bits() {
        let cfg = Config::default().with_fingerprint_bits(200);
        assert!(matches!(
            Filter::with_config(0, cfg),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
