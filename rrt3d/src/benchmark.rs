//! Repeated seeded planning runs and their summary statistics.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::statistics::Statistics;

use crate::error::PlanError;
use crate::RRTResult;

#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub seed: u64,
    /// Length of the returned path, if one was found.
    pub path_length: Option<f64>,
    pub duration: Duration,
    pub tree_size: usize,
    pub iterations: usize,
}

impl TrialOutcome {
    pub fn succeeded(&self) -> bool {
        self.path_length.is_some()
    }
}

/// Runs `plan` once with a generator seeded from `seed` and times it.
pub fn run_trial<F>(seed: u64, plan: F) -> Result<TrialOutcome, PlanError>
where
    F: FnOnce(&mut StdRng) -> Result<RRTResult, PlanError>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Instant::now();
    let result = plan(&mut rng)?;
    let duration = start.elapsed();

    Ok(TrialOutcome {
        seed,
        path_length: result.result.as_ref().map(|path| path.length()),
        duration,
        tree_size: result.tree.len(),
        iterations: result.iterations,
    })
}

/// Runs one trial per seed, in order. A `PlanError` means the inputs are bad and aborts the batch.
pub fn run_trials<I, F>(seeds: I, mut plan: F) -> Result<Vec<TrialOutcome>, PlanError>
where
    I: IntoIterator<Item = u64>,
    F: FnMut(&mut StdRng) -> Result<RRTResult, PlanError>,
{
    seeds
        .into_iter()
        .map(|seed| run_trial(seed, &mut plan))
        .collect()
}

/// `run_trials` spread over `threads` scoped threads. Every trial owns its generator, so the
/// outcomes are the same as the sequential ones apart from timings, and come back in seed order.
#[cfg(feature = "multithreaded")]
pub fn run_trials_parallel<F>(
    seeds: &[u64],
    threads: usize,
    plan: F,
) -> Result<Vec<TrialOutcome>, PlanError>
where
    F: Fn(&mut StdRng) -> Result<RRTResult, PlanError> + Sync,
{
    if seeds.is_empty() {
        return Ok(Vec::new());
    }
    let chunk_size = (seeds.len() + threads.max(1) - 1) / threads.max(1);
    let plan = &plan;

    let chunks: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = seeds
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || run_trials(chunk.iter().copied(), plan)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcomes) => outcomes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut outcomes = Vec::with_capacity(seeds.len());
    for chunk in chunks {
        outcomes.extend(chunk?);
    }
    Ok(outcomes)
}

/// Path length statistics over the successful trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    pub mean: f64,
    /// Sample standard deviation, zero for a single success.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub trials: usize,
    pub successes: usize,
    /// `None` when no trial succeeded.
    pub length: Option<LengthStats>,
    /// Mean over all trials, failed ones included.
    pub mean_duration: Duration,
    pub mean_tree_size: f64,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Summary {
        let lengths: Vec<f64> = outcomes.iter().filter_map(|o| o.path_length).collect();

        let length = if lengths.is_empty() {
            None
        } else {
            let std_dev = if lengths.len() > 1 {
                lengths.iter().std_dev()
            } else {
                0.0
            };
            Some(LengthStats {
                mean: lengths.iter().mean(),
                std_dev,
                min: Statistics::min(lengths.iter()),
                max: Statistics::max(lengths.iter()),
            })
        };

        let (mean_duration, mean_tree_size) = if outcomes.is_empty() {
            (Duration::ZERO, 0.0)
        } else {
            let seconds = outcomes.iter().map(|o| o.duration.as_secs_f64()).mean();
            let tree_size = outcomes.iter().map(|o| o.tree_size as f64).mean();
            (Duration::from_secs_f64(seconds), tree_size)
        };

        Summary {
            trials: outcomes.len(),
            successes: lengths.len(),
            length,
            mean_duration,
            mean_tree_size,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.trials as f64
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} succeeded ({:.1}%), mean time {:?}, mean tree size {:.1}",
            self.successes,
            self.trials,
            self.success_rate() * 100.0,
            self.mean_duration,
            self.mean_tree_size,
        )?;
        if let Some(length) = &self.length {
            write!(
                f,
                ", length {:.3} ± {:.3} (min {:.3}, max {:.3})",
                length.mean, length.std_dev, length.min, length.max
            )?;
        }
        Ok(())
    }
}

/// Two summaries of the same seeds, e.g. RRT against RRT*.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub baseline: Summary,
    pub candidate: Summary,
}

impl Comparison {
    /// Relative change of the mean path length, negative when the candidate finds shorter paths.
    pub fn length_change(&self) -> Option<f64> {
        let baseline = self.baseline.length?.mean;
        let candidate = self.candidate.length?.mean;
        Some((candidate - baseline) / baseline)
    }
}

pub fn compare(baseline: &[TrialOutcome], candidate: &[TrialOutcome]) -> Comparison {
    Comparison {
        baseline: Summary::from_outcomes(baseline),
        candidate: Summary::from_outcomes(candidate),
    }
}
