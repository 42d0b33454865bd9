use std::sync::Mutex;

/// Running counters across every scan a stage has filtered.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub scans: usize,
    pub kept_points: usize,
    pub discarded_points: usize,
    pub noise_groups: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_scan(&self, kept: usize, discarded: usize, noise_groups: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.scans += 1;
            metrics.kept_points += kept;
            metrics.discarded_points += discarded;
            metrics.noise_groups += noise_groups;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|metrics| *metrics).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_scans() {
        let recorder = MetricsRecorder::new();
        recorder.record_scan(10, 2, 1);
        recorder.record_scan(5, 0, 0);
        recorder.record_error();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.scans, 2);
        assert_eq!(snapshot.kept_points, 15);
        assert_eq!(snapshot.discarded_points, 2);
        assert_eq!(snapshot.noise_groups, 1);
        assert_eq!(snapshot.errors, 1);
    }
}
