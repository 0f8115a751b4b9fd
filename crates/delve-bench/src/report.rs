use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// A scene whose final state differs from the baseline after the same
/// number of ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMismatch {
    pub scene_name: String,
    pub expected: String,
    pub actual: String,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't exist.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Compare current timings against a baseline. Returns (scene name,
/// percent change) for every scene slower than the threshold.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<(String, f64)> {
    let mut regressions = Vec::new();

    for result in current {
        if let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        {
            if base.timings.mean_ms <= 0.0 {
                continue;
            }
            let pct_change =
                (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
            if pct_change > threshold_pct {
                regressions.push((result.scene_name.clone(), pct_change));
            }
        }
    }

    regressions
}

/// Scenes whose digest differs from a baseline run of equal length.
/// Runs with a different tick count are not comparable and are skipped.
pub fn compare_digests(current: &[BenchmarkResult], baseline: &Baseline) -> Vec<DigestMismatch> {
    current
        .iter()
        .filter_map(|result| {
            let base = baseline.results.iter().find(|b| {
                b.scene_name == result.scene_name && b.tick_count == result.tick_count
            })?;
            (base.digest != result.digest).then(|| DigestMismatch {
                scene_name: result.scene_name.clone(),
                expected: base.digest.clone(),
                actual: result.digest.clone(),
            })
        })
        .collect()
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Entities | Chunks | Broken | Placed | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Max (ms) | Digest |\n");
    out.push_str("|-------|----------|--------|--------|--------|-----------|-------------|----------|----------|----------|--------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | `{}` |\n",
            r.scene_name,
            r.entity_count,
            r.chunk_count,
            r.blocks_broken,
            r.blocks_placed,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.max_ms,
            r.digest,
        ));
    }

    out
}

/// Format a comparison report showing timing regressions.
pub fn format_comparison(regressions: &[(String, f64)], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for (scene, pct) in regressions {
        out.push_str(&format!("  - {}: +{:.1}%\n", scene, pct));
    }
    out
}

/// Format determinism failures.
pub fn format_digest_mismatches(mismatches: &[DigestMismatch]) -> String {
    if mismatches.is_empty() {
        return "All scene digests match the baseline.\n".to_string();
    }

    let mut out = String::from("DETERMINISM BROKEN:\n");
    for m in mismatches {
        out.push_str(&format!(
            "  - {}: expected {}, got {}\n",
            m.scene_name, m.expected, m.actual
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::compute_timings;

    fn result(name: &str, mean: f64, ticks: u32, digest: &str) -> BenchmarkResult {
        BenchmarkResult {
            scene_name: name.to_string(),
            entity_count: 1,
            chunk_count: 1,
            tick_count: ticks,
            blocks_broken: 0,
            blocks_placed: 0,
            digest: digest.to_string(),
            timings: compute_timings(&[mean]),
        }
    }

    fn baseline(results: Vec<BenchmarkResult>) -> Baseline {
        Baseline {
            timestamp: "test".to_string(),
            results,
        }
    }

    #[test]
    fn test_timing_regression_threshold() {
        let base = baseline(vec![result("a", 1.0, 100, "00"), result("b", 2.0, 100, "00")]);
        let current = vec![result("a", 1.05, 100, "00"), result("b", 3.0, 100, "00")];
        let regressions = compare(&current, &base, 10.0);
        assert_eq!(regressions.len(), 1);
        assert_eq!(regressions[0].0, "b");
        assert!(format_comparison(&regressions, 10.0).contains("b: +50.0%"));
    }

    #[test]
    fn test_digest_mismatch_detected() {
        let base = baseline(vec![
            result("a", 1.0, 100, "aaaa"),
            result("b", 1.0, 100, "bbbb"),
            result("c", 1.0, 50, "cccc"),
        ]);
        let current = vec![
            result("a", 1.0, 100, "aaaa"),
            result("b", 1.0, 100, "beef"),
            result("c", 1.0, 100, "dddd"),
        ];
        let mismatches = compare_digests(&current, &base);
        assert_eq!(
            mismatches,
            vec![DigestMismatch {
                scene_name: "b".to_string(),
                expected: "bbbb".to_string(),
                actual: "beef".to_string(),
            }]
        );
    }

    #[test]
    fn test_baseline_json_roundtrip() {
        let base = baseline(vec![result("a", 1.5, 10, "0123456789abcdef")]);
        let json = serde_json::to_string(&base).expect("serialize");
        let back: Baseline = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.results[0].digest, "0123456789abcdef");
        assert_eq!(back.results[0].timings.mean_ms, 1.5);
    }
}
