use std::fs;
use tracing::info;

#[test]
fn test_init_writes_json_log_file() {
    let dir = std::env::temp_dir().join(format!("parade_throws_logs_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let guard = parade_throws::logging::init_with_file(dir.join("engine.log")).unwrap();
    info!(colors = 3, "Logging initialised");
    drop(guard);

    let log_file = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("engine.log"))
        })
        .expect("rolling log file was not created");

    let content = fs::read_to_string(&log_file).unwrap();
    let line = content
        .lines()
        .find(|line| line.contains("Logging initialised"))
        .expect("event missing from log file");
    let record: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["fields"]["colors"], 3);

    fs::remove_dir_all(&dir).unwrap();
}
