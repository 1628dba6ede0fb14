//! 比較結果の JSON 出力

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rcs_core::Comparison;

use super::io::open_writer;

/// `Comparison` を整形済み JSON として書き出す（N/A・NaN は `null`）。
pub fn write_summary_json<P: AsRef<Path>>(path: P, comparison: &Comparison) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        open_writer(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(&mut writer, comparison)
        .with_context(|| format!("failed to serialize summary to {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.finish().with_context(|| format!("failed to finish {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_summary_json_fields() {
        let reference = "1.0 0 0 10 0 10 0\n2.0 0 0 10 0 10 0\n";
        let candidate = "1.0 0 0 10 0 10 0\n2.0 5 0 10 0 10 0\n";
        let comparison = rcs_core::compare(reference.as_bytes(), candidate.as_bytes()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &comparison).unwrap();

        let v: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(v["verdict"], "FAIL_SWITCH");
        assert_eq!(v["reference"]["records"], 2);
        assert_eq!(v["thresholds"]["lego"], 0.01);
        let freqs = v["frequencies"].as_array().unwrap();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[0]["frequency"], 1.0);
        assert_eq!(freqs[0]["pp_rms_error"], 0.0);
        assert_eq!(freqs[0]["coverage_percent"], 100.0);
        assert!(freqs[1]["pp_rms_error"].is_null());
        assert_eq!(freqs[1]["num_not_compared"], 1);
    }
}
