use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Wall-clock time spent in each pipeline stage.
///
/// Stages that run once per row group (unpack, gamma, transform) are recorded
/// many times; `get_step` returns their accumulated total.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    order: Vec<String>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        match self.step_map.get_mut(&name) {
            Some(total) => *total += duration,
            None => {
                self.order.push(name.clone());
                self.step_map.insert(name, duration);
            }
        }
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.step_map.values().sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    /// Stages in first-seen order, each with its accumulated duration.
    pub fn steps(&self) -> Vec<StepTiming> {
        self.order
            .iter()
            .map(|name| StepTiming {
                name: name.clone(),
                duration: self.step_map.get(name).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for step in self.steps() {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            debug!(
                "{:<12} {:>12.3}ms ({:>5.1}%)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        debug!("{:<12} {:>12.3}ms", "total", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
