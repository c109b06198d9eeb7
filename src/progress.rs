//! Progress reporting.
//!
//! Implement [`ProgressCallback`] and attach it with
//! [`ExtractOptions::with_progress`](crate::ExtractOptions::with_progress) to
//! observe an extraction. The expected total comes from the container
//! metadata and is only an estimate: `current` may end up below it, or run
//! past it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framedump::{ExtractOptions, FrameExtractor, FramedumpError, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         match info.percentage {
//!             Some(pct) => println!("{} frames ({pct:.1}%)", info.current),
//!             None => println!("{} frames", info.current),
//!         }
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! FrameExtractor::new(options).extract("clip.mp4", "frames", "png")?;
//! # Ok::<(), FramedumpError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of work being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding frames and writing them as images.
    FrameExtraction,
}

/// A snapshot of extraction progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// Frames written so far.
    pub current: u64,
    /// Expected total, if the container reports a non-zero frame count.
    pub total: Option<u64>,
    /// Completion percentage, clamped to 100 when `current` overruns `total`.
    pub percentage: Option<f32>,
    /// Wall-clock time since the operation started.
    pub elapsed: Duration,
    /// Estimated time remaining. `Some(ZERO)` once `total` is reached.
    pub estimated_remaining: Option<Duration>,
    /// Index of the frame that was just written.
    pub current_frame: Option<u64>,
}

/// Receives progress updates during extraction.
///
/// Callbacks observe but cannot halt the operation.
pub trait ProgressCallback: Send + Sync {
    /// Called every `batch_size` frames and once when the operation ends.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    /// A total of zero is treated as unknown.
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total: total.filter(|&t| t > 0),
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one written frame, reporting if the batch threshold is reached.
    pub(crate) fn advance(&mut self, frame_index: u64) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(Some(frame_index));
            self.items_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final report.
    pub(crate) fn finish(&mut self) {
        self.report(None);
    }

    pub(crate) fn snapshot(&self, frame_index: Option<u64>) -> ProgressInfo {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .map(|t| ((self.current as f32 / t as f32) * 100.0).min(100.0));

        let estimated_remaining = match self.total {
            Some(t) if self.current > 0 => {
                let remaining = t.saturating_sub(self.current);
                let per_item = elapsed.as_secs_f64() / self.current as f64;
                Some(Duration::from_secs_f64(per_item * remaining as f64))
            }
            _ => None,
        };

        ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            current_frame: frame_index,
        }
    }

    fn report(&self, frame_index: Option<u64>) {
        self.callback.on_progress(&self.snapshot(frame_index));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        reports: Mutex<Vec<ProgressInfo>>,
    }

    impl ProgressCallback for Recorder {
        fn on_progress(&self, info: &ProgressInfo) {
            self.reports.lock().unwrap().push(info.clone());
        }
    }

    fn tracker(recorder: &Arc<Recorder>, total: Option<u64>, batch: u64) -> ProgressTracker {
        ProgressTracker::new(
            recorder.clone(),
            OperationType::FrameExtraction,
            total,
            batch,
        )
    }

    #[test]
    fn reports_every_batch() {
        let recorder = Arc::new(Recorder::default());
        let mut progress = tracker(&recorder, Some(10), 3);
        for index in 0..7 {
            progress.advance(index);
        }
        progress.finish();

        let reports = recorder.reports.lock().unwrap();
        let currents: Vec<u64> = reports.iter().map(|r| r.current).collect();
        assert_eq!(currents, vec![3, 6, 7]);
        assert_eq!(reports[0].current_frame, Some(2));
        assert_eq!(reports[2].current_frame, None);
    }

    #[test]
    fn overrun_is_clamped() {
        let recorder = Arc::new(Recorder::default());
        let mut progress = tracker(&recorder, Some(2), 1);
        for index in 0..5 {
            progress.advance(index);
        }

        let last = recorder.reports.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.current, 5);
        assert_eq!(last.total, Some(2));
        assert_eq!(last.percentage, Some(100.0));
        assert_eq!(last.estimated_remaining, Some(Duration::ZERO));
    }

    #[test]
    fn zero_total_is_unknown() {
        let recorder = Arc::new(Recorder::default());
        let mut progress = tracker(&recorder, Some(0), 1);
        progress.advance(0);

        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports[0].total, None);
        assert_eq!(reports[0].percentage, None);
        assert_eq!(reports[0].estimated_remaining, None);
    }

    #[test]
    fn underrun_reports_partial_percentage() {
        let recorder = Arc::new(Recorder::default());
        let mut progress = tracker(&recorder, Some(4), 10);
        progress.advance(0);
        progress.finish();

        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].percentage, Some(25.0));
    }
}
