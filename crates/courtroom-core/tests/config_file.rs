use courtroom_core::CourtroomConfig;
use std::io::Write;

// Single test in this binary: it mutates process environment.
#[test]
fn file_then_env_then_legacy_names() {
    let mut file = tempfile::Builder::new()
        .prefix("courtroom-")
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        r#"
bind_addr = "0.0.0.0:9000"
discovery_start_block = 100
pinata_api_key = "from-file"
"#
    )
    .unwrap();
    file.flush().unwrap();

    std::env::set_var("COURTROOM_CONFIG", file.path().with_extension(""));
    std::env::set_var("COURTROOM_DISCOVERY_START_BLOCK", "200");
    std::env::set_var("PINATA_API_KEY", "legacy-key");
    std::env::set_var("PINATA_SECRET_KEY", "legacy-secret");
    std::env::set_var("ALCHEMY_API_URL", "https://rpc.example");
    std::env::set_var("MY_API_BASE", "http://backend.example");

    let cfg = CourtroomConfig::load().unwrap();

    assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
    assert_eq!(cfg.discovery_start_block, 200);
    // File value wins over the legacy fallback; the legacy name only fills gaps.
    assert_eq!(cfg.pinata_api_key.as_deref(), Some("from-file"));
    assert_eq!(cfg.pinata_secret_key.as_deref(), Some("legacy-secret"));
    assert_eq!(cfg.rpc_url().unwrap(), "https://rpc.example");
    assert_eq!(cfg.backend_base, "http://backend.example");
    assert_eq!(cfg.gateway_base, "https://gateway.pinata.cloud");
}
