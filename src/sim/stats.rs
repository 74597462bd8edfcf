use std::fmt;

use average::Mean;

use super::CompletionRecord;
use crate::core::Ticks;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub jobs: usize,
    pub mean_turnaround: f64,
    /// Turnaround divided by job size.
    pub mean_slowdown: f64,
    pub max_turnaround: Ticks,
    pub makespan: Ticks,
}

impl Summary {
    pub fn from_records(records: &[CompletionRecord]) -> Self {
        let mean_turnaround = avg(records.iter().map(|r| r.turnaround() as f64));
        let mean_slowdown = avg(
            records
                .iter()
                .filter(|r| r.job_time > 0)
                .map(|r| r.turnaround() as f64 / r.job_time as f64),
        );

        Self {
            jobs: records.len(),
            mean_turnaround,
            mean_slowdown,
            max_turnaround: records
                .iter()
                .map(CompletionRecord::turnaround)
                .max()
                .unwrap_or(0),
            makespan: records.iter().map(|r| r.completion_time).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Jobs completed: {}", self.jobs)?;
        writeln!(f, "Average turnaround time: {:.2} ticks", self.mean_turnaround)?;
        writeln!(f, "Average slowdown: {:.2}", self.mean_slowdown)?;
        writeln!(f, "Longest turnaround: {} ticks", self.max_turnaround)?;
        write!(f, "Makespan: {} ticks", self.makespan)
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().mean()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: u64,
        arrival_time: Ticks,
        job_time: Ticks,
        completion_time: Ticks,
    ) -> CompletionRecord {
        CompletionRecord {
            id,
            arrival_time,
            job_time,
            completion_time,
        }
    }

    #[test]
    fn summarizes_fcfs_pair() {
        let records = [record(1, 0, 5, 5), record(2, 0, 3, 8)];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.jobs, 2);
        assert!((summary.mean_turnaround - 6.5).abs() < 1e-9);
        assert!((summary.mean_slowdown - (1.0 + 8.0 / 3.0) / 2.0).abs() < 1e-9);
        assert_eq!(summary.max_turnaround, 8);
        assert_eq!(summary.makespan, 8);
    }

    #[test]
    fn empty_run() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.jobs, 0);
        assert_eq!(summary.max_turnaround, 0);
        assert!(summary.to_string().contains("Jobs completed: 0"));
    }
}
