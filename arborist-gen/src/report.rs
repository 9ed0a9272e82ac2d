use std::time::{Duration, Instant};

use crate::decompose::Decomposed;

/// A structure that could not be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub tree: String,
    pub template: String,
    pub message: String,
}

/// Counters for one batch run. Passed around explicitly, one per run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub structures_written: usize,
    pub logs_resolved: usize,
    pub leaves_resolved: usize,
    pub palette_entries: usize,
    pub failures: Vec<Failure>,
    pub elapsed: Duration,

    start_time: Instant,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            structures_written: 0,
            logs_resolved: 0,
            leaves_resolved: 0,
            palette_entries: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    pub fn record_written(&mut self, decomposed: &Decomposed) {
        self.structures_written += 1;
        self.logs_resolved += decomposed.logs;
        self.leaves_resolved += decomposed.leaves;
        self.palette_entries += decomposed.structure.palette.len();
    }

    pub fn record_failure(&mut self, tree: &str, template: &str, message: String) {
        self.failures.push(Failure {
            tree: tree.to_string(),
            template: template.to_string(),
            message,
        });
    }

    pub fn finish(&mut self) {
        self.elapsed = self.start_time.elapsed();
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn generate_report(&self) -> String {
        let avg_palette = if self.structures_written > 0 {
            self.palette_entries as f64 / self.structures_written as f64
        } else {
            0.0
        };

        let mut report = format!(
            "Tree Structure Report\n\
             =====================\n\
             Duration: {:.2?}\n\n\
             [Written]\n\
             Structures: {}\n\
             Logs: {}\n\
             Leaves: {}\n\
             Avg Palette: {:.1} entries/structure\n\n\
             [Failed]\n\
             Structures: {}\n",
            self.elapsed,
            self.structures_written,
            self.logs_resolved,
            self.leaves_resolved,
            avg_palette,
            self.failures.len(),
        );
        for failure in &self.failures {
            report.push_str(&format!(
                "  - {} ({}): {}\n",
                failure.template, failure.tree, failure.message
            ));
        }
        report
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborist_nbt::{BlockState, StructureFile, DATA_VERSION};

    #[test]
    fn test_report_counts() {
        let mut structure = StructureFile::new([3, 3, 3], DATA_VERSION);
        structure.palette.push(BlockState::new("tfc:wood/log/oak"));
        structure.palette.push(BlockState::new("tfc:wood/leaves/oak"));
        let decomposed = Decomposed {
            structure,
            logs: 3,
            leaves: 5,
        };

        let mut report = BatchReport::new();
        report.record_written(&decomposed);
        report.record_written(&decomposed);
        assert!(report.is_success());
        let message = "Structure is not odd width (4, 5)".to_string();
        report.record_failure("oak", "tall_overlay", message);
        report.finish();

        assert_eq!(report.structures_written, 2);
        assert_eq!(report.logs_resolved, 6);
        assert_eq!(report.leaves_resolved, 10);
        assert!(!report.is_success());

        let text = report.generate_report();
        assert!(text.contains("Structures: 2"));
        assert!(text.contains("Avg Palette: 2.0 entries/structure"));
        assert!(text.contains("  - tall_overlay (oak): Structure is not odd width (4, 5)"));
    }
}
