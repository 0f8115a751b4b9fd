use std::time::Instant;

use delve_data::defaults::default_materials;
use delve_data::LoadError;
use delve_sim::error::SimError;
use thiserror::Error;

use crate::scenes::{self, SceneConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to load default data: {0}")]
    Data(#[from] LoadError),
    #[error("failed to build scene: {0}")]
    Sim(#[from] SimError),
}

/// Timing data for a single scene run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene replay.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub entity_count: u32,
    pub chunk_count: u32,
    pub tick_count: u32,
    pub blocks_broken: u32,
    pub blocks_placed: u32,
    /// Final state digest as 16 hex digits.
    pub digest: String,
    pub timings: TimingSeries,
}

/// Runs scenes headless for a fixed number of ticks.
pub struct BenchmarkRunner {
    tick_count: u32,
}

impl BenchmarkRunner {
    pub fn new(tick_count: u32) -> Self {
        Self { tick_count }
    }

    /// Replay a scene and return timings plus the final digest.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, RunError> {
        log::info!("Running scene '{}'...", config.name);

        let materials = default_materials()?;
        let mut sim = scenes::build_simulation(config, materials)?;

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut blocks_broken = 0u32;
        let mut blocks_placed = 0u32;

        for tick in 0..self.tick_count as u64 {
            let commands = scenes::scene_commands(config, &sim, tick);

            let frame_start = Instant::now();
            for command in commands {
                sim.submit(command);
            }
            let report = sim.tick();
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;

            blocks_broken += report.broken.len() as u32;
            blocks_placed += report.placed.len() as u32;
            frame_times.push(elapsed);
        }

        let timings = compute_timings(&frame_times);
        let digest = format!("{:016x}", sim.state_digest());
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, digest={}",
            timings.mean_ms,
            timings.p95_ms,
            digest
        );

        Ok(BenchmarkResult {
            scene_name: config.name.to_string(),
            entity_count: sim.entities().len() as u32,
            chunk_count: sim.world().chunk_map().loaded_count(),
            tick_count: self.tick_count,
            blocks_broken,
            blocks_placed,
            digest,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
