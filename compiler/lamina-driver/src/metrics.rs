//! Reporting of the time that each stage of the pipeline took.
use std::time::Duration;

use lamina_pipeline::settings::CompilerStageKind;
use lamina_utils::{
    indexmap::IndexMap, stream::CompilerOutputStream, stream_writeln, timing::StageMetrics,
};

/// The metrics of one stage of the pipeline.
#[derive(Debug, Default)]
pub struct StageMetricEntry {
    /// The total time that the stage took.
    pub total: Duration,

    /// The time that each section of the stage took.
    pub children: StageMetrics,
}

pub type Metrics = IndexMap<CompilerStageKind, StageMetricEntry>;

/// Writes collected [Metrics] as an aligned table.
pub struct MetricReporter<'m> {
    metrics: &'m Metrics,
}

impl<'m> MetricReporter<'m> {
    pub fn new(metrics: &'m Metrics) -> Self {
        Self { metrics }
    }

    pub fn report(&self, out: &mut CompilerOutputStream) {
        let mut total = Duration::default();

        for (stage, entry) in self.metrics {
            total += entry.total;
            stream_writeln!(out, "{: <24}: {:?}", stage.to_string(), entry.total);

            for (section, duration) in entry.children.iter() {
                stream_writeln!(out, "  {: <22}: {:?}", section, duration);
            }
        }

        stream_writeln!(out, "{: <24}: {:?}", "total", total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_stages_and_sections() {
        let mut metrics = Metrics::new();
        let mut children = StageMetrics::default();
        children.timings.insert("check", Duration::from_millis(1));

        metrics.insert(
            CompilerStageKind::ScopeCheck,
            StageMetricEntry { total: Duration::from_millis(2), children },
        );

        let stream = CompilerOutputStream::owned();
        MetricReporter::new(&metrics).report(&mut stream.clone());

        let lines: Vec<_> = stream.collect().lines().map(str::trim_end).map(String::from).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("scope checking"));
        assert!(lines[1].starts_with("  check"));
        assert!(lines[2].starts_with("total"));
    }
}
