use std::sync::Arc;
use std::thread;

use xorset::{Config, Filter};

#[test]
fn scenario_fresh_filter_add_then_contains() {
    let _ = env_logger::try_init();
    let f = Filter::new(0);
    assert!(!f.contains("a"));
    assert!(f.add("a").unwrap());
    assert!(f.contains("a"));
}

#[test]
fn scenario_add_then_remove() {
    let _ = env_logger::try_init();
    let f = Filter::new(0);
    assert!(f.add("a").unwrap());
    assert!(f.contains("a"));
    assert!(f.remove("a").unwrap());
    assert!(!f.contains("a"));
}

#[test]
fn scenario_add_all_then_remove_all() {
    let _ = env_logger::try_init();
    let f = Filter::new(0);
    f.add_all(&["a", "b", "c", "d"]).unwrap();
    for k in ["a", "b", "c", "d"] {
        assert!(f.contains(k));
    }
    f.remove_all(&["b", "d"]).unwrap();
    assert!(f.contains("a"));
    assert!(!f.contains("b"));
    assert!(f.contains("c"));
    assert!(!f.contains("d"));
}

#[test]
fn scenario_compact_with_auto_rebuild_disabled() {
    let _ = env_logger::try_init();
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
fn scenario_save_then_load() {
    let _ = env_logger::try_init();
    let dir = std::env::temp_dir();
    let path = dir.join(format!("xorset-e2e-{}.xorf", std::process::id()));

    let f = Filter::new(0);
    f.add_all(&["a", "b", "c"]).unwrap();
    f.save(&path).unwrap();

    let reloaded = Filter::load(&path).unwrap();
    for k in ["a", "b", "c"] {
        assert!(reloaded.contains(k));
    }
    assert!(!reloaded.contains("z"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn scenario_large_key_set_false_positive_bound() {
    let _ = env_logger::try_init();
    let cfg = Config::default().with_fingerprint_bits(8);
    let f = Filter::with_config(0, cfg).unwrap();

    let mut rng = oorandom::Rand64::new(0xF00D_F00D);
    let members: Vec<String> = (0..100_000).map(|_| format!("m-{}", rng.rand_u64())).collect();
    f.add_all(&members).unwrap();

    let mut false_positives = 0u32;
    for _ in 0..100_000 {
        let probe = format!("p-{}", rng.rand_u64());
        if f.contains(&probe) {
            false_positives += 1;
        }
    }
    // Bound: 2^-8 ~= 0.39%, plus generous statistical slack.
    assert!(
        false_positives < 1200,
        "false positive count too high: {}",
        false_positives
    );
}

#[test]
fn concurrent_readers_never_observe_a_false_negative_during_writes() {
    let _ = env_logger::try_init();
    let f = Arc::new(Filter::new(0));
    for i in 0..2_000u32 {
        f.add(&i.to_le_bytes()).unwrap();
    }

    let reader_filter = Arc::clone(&f);
    let reader = thread::spawn(move || {
        for _ in 0..5_000 {
            for i in [0u32, 500, 1000, 1500, 1999] {
                assert!(reader_filter.contains(&i.to_le_bytes()));
            }
        }
    });

    let writer_filter = Arc::clone(&f);
    let writer = thread::spawn(move || {
        for i in 2_000..3_000u32 {
            writer_filter.add(&i.to_le_bytes()).unwrap();
        }
    });

    reader.join().unwrap();
    writer.join().unwrap();
}
