#![allow(dead_code)]

use std::path::PathBuf;

use chrono::TimeZone;
use sensorchain_core::types::Timestamp;

/// Fixed ingest instant (2023-05-01T01:00:00Z).
pub fn ingest_time() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2023, 5, 1, 1, 0, 0).unwrap()
}

/// A small but well-formed TUV file with `rows` data rows.
///
/// Longitude of row `i` is `2.0 + i`, latitude `39.0 + i`; the remaining
/// columns hold the column index.
pub fn sample_tuv(rows: usize) -> String {
    let mut lines = vec![
        "%CTF: 1.00".to_string(),
        "%FileType: TOT totl \"Totals from Combined Sites\"".to_string(),
        "%TimeStamp: 2023 05 01 00 00 00".to_string(),
        "%SiteSource:  1 FORM  39.1000000   2.8000000".to_string(),
        "%ProcessedTimeStamp: 2023 05 01 00 30 12".to_string(),
        format!("%TableRows: {rows}"),
        "%TableStart:".to_string(),
        "%%   Longitude   Latitude  U comp  V comp ...".to_string(),
        "%%     (deg)       (deg)  (cm/s)  (cm/s) ...".to_string(),
    ];
    for i in 0..rows {
        let mut values = vec![format!("{:.4}", 2.0 + i as f64), format!("{:.4}", 39.0 + i as f64)];
        values.extend((2..20).map(|c| format!("{c}")));
        lines.push(values.join("   "));
    }
    lines.push("%TableEnd:".to_string());
    lines.push("%%".to_string());
    lines.push("%ProcessingTool: \"TotalArchiver\" 1.0.0".to_string());
    lines.push("%ProcessingTool: \"CheckForCombine\" 1.0.0".to_string());
    lines.push("%%".to_string());
    lines.push("%ProcessingEnd:".to_string());
    lines.push("%End:".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
