use std::path::PathBuf;
use std::process;

use delve_bench::report;
use delve_bench::runner::BenchmarkRunner;
use delve_bench::scenes;

fn usage() {
    eprintln!("Usage: replay-runner [OPTIONS]");
    eprintln!("  --baseline <path>              Load baseline JSON for comparison");
    eprintln!("  --output <path>                Save current results as JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --ticks <n>                    Ticks per scene (default: 600)");
    eprintln!("  --scene <name>                 Run only the named scene");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 600u32;
    let mut only_scene: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(value(&args, i, "--baseline")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value(&args, i, "--output")));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = value(&args, i, "--regression-threshold")
                    .parse()
                    .unwrap_or_else(|_| {
                        eprintln!("invalid --regression-threshold value");
                        process::exit(1);
                    });
            }
            "--ticks" => {
                i += 1;
                tick_count = value(&args, i, "--ticks").parse().unwrap_or_else(|_| {
                    eprintln!("invalid --ticks value");
                    process::exit(1);
                });
            }
            "--scene" => {
                i += 1;
                only_scene = Some(value(&args, i, "--scene").to_string());
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = BenchmarkRunner::new(tick_count);

    let scene_configs: Vec<_> = scenes::standard_scenes()
        .into_iter()
        .filter(|s| only_scene.as_deref().is_none_or(|name| s.name == name))
        .collect();
    if scene_configs.is_empty() {
        eprintln!("No scene matches {:?}", only_scene);
        process::exit(1);
    }

    let mut results = Vec::new();
    for config in &scene_configs {
        match runner.run_scene(config) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Scene '{}' failed: {e}", config.name);
                process::exit(1);
            }
        }
    }

    println!("\n## Replay Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("Failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let mismatches = report::compare_digests(&results, &baseline);
            println!("{}", report::format_digest_mismatches(&mismatches));

            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );

            if !mismatches.is_empty() || !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} digest mismatches, {} timing regressions, exiting with code 1",
                    mismatches.len(),
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Replay complete.");
}

/// Seconds since the Unix epoch, without a date-time dependency.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("replay-{secs}")
}
