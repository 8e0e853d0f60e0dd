use colored::*;
use std::time::Duration;

/// Aggregated result of one harness run.
#[derive(Debug)]
pub struct Report {
    counts: Vec<(u32, u64)>,
    requested: u32,
}

impl Report {
    pub fn new(counts: Vec<(u32, u64)>, requested: u32) -> Self {
        Self { counts, requested }
    }

    /// (connection id, count) pairs, ascending by id
    pub fn counts(&self) -> &[(u32, u64)] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Number of connections that received at least one event
    pub fn active(&self) -> u32 {
        self.counts.iter().filter(|(_, count)| *count > 0).count() as u32
    }

    /// Number of connections the run was asked to open
    pub fn requested(&self) -> u32 {
        self.requested
    }

    /// Mean events per active connection; `None` when none were active
    pub fn mean_per_active(&self) -> Option<f64> {
        let active = self.active();
        (active > 0).then(|| self.total() as f64 / f64::from(active))
    }
}

/// Render the final totals block to the console.
pub fn print_report(report: &Report, duration: Duration) {
    println!(
        "\n{}",
        format!("Results after {duration:?}:").bright_white().bold()
    );
    println!("{}", "-".repeat(40));

    for (conn_id, count) in report.counts() {
        if *count > 0 {
            println!("Connection {conn_id}: {count} events");
        }
    }

    println!("{}", "-".repeat(40));
    println!("Total events across all connections: {}", report.total());
    println!(
        "Active connections: {}/{}",
        report.active(),
        report.requested()
    );

    if let Some(mean) = report.mean_per_active() {
        println!("Average events per active connection: {mean:.2}");
    }
}
