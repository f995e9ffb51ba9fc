//! Configuration loading: defaults and file overrides.

use chunkstream_core::EngineConfig;

#[test]
fn defaults_apply_without_any_source() {
    let config = EngineConfig::default();
    assert_eq!(config.page_size, 200);
    assert_eq!(config.batch_size, 500);
}

#[test]
fn load_without_a_file_matches_the_defaults() {
    let config = EngineConfig::load(None).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn a_config_file_overrides_the_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 16\nbatch_size = 8\n").unwrap();

    let config = EngineConfig::load(Some(&path)).unwrap();
    assert_eq!(config.page_size, 16);
    assert_eq!(config.batch_size, 8);
}
