use xorset::{Error, Filter};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("xorset-persist-{}-{}.xorf", std::process::id(), name))
}

#[test]
fn load_rejects_wrong_magic() {
    let _ = env_logger::try_init();
    let path = temp_path("bad-magic");
    std::fs::write(&path, b"NOPE1234567890").unwrap();

    let err = Filter::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { .. }));

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_rejects_unknown_version() {
    let _ = env_logger::try_init();
    let path = temp_path("bad-version");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"XORF");
    bytes.extend_from_slice(&99u32.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    let err = Filter::load(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion { version: 99 }));

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_rejects_truncated_file() {
    let _ = env_logger::try_init();
    let path = temp_path("truncated");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"XORF");
    bytes.extend_from_slice(&1u32.to_le_bytes());
    // seed, bits, m, table, blobs all missing.
    std::fs::write(&path, &bytes).unwrap();

    let err = Filter::load(&path).unwrap_err();
    assert!(matches!(err, Error::CorruptData { .. }));

    std::fs::remove_file(&path).ok();
}

#[test]
fn round_trip_preserves_pending_overlay_without_rebuilding() {
    use xorset::Config;

    let _ = env_logger::try_init();
    let path = temp_path("with-overlay");
    let cfg = Config::default().with_auto_rebuild(false);
    let f = Filter::with_config(0, cfg).unwrap();
    f.add_all(&["a", "b", "c"]).unwrap();
    f.save(&path).unwrap();

    let reloaded = Filter::load(&path).unwrap();
    assert!(reloaded.contains("a"));
    assert!(reloaded.contains("b"));
    assert!(reloaded.contains("c"));
    assert_eq!(reloaded.size(), 3);

    std::fs::remove_file(&path).ok();
}
