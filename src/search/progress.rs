// file: src/search/progress.rs
// description: progress tracking and statistics reporting for corpus indexing
// reference: uses indicatif for progress bars and tracks embedding metrics

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub documents_indexed: usize,
    pub documents_failed: usize,
    pub chars_processed: u64,
    pub duration_secs: u64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.documents_indexed as f64 / self.duration_secs as f64
    }

    pub fn chars_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.chars_processed as f64 / self.duration_secs as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.documents_indexed + self.documents_failed;
        if total == 0 {
            return 0.0;
        }
        (self.documents_indexed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    documents_indexed: Arc<AtomicUsize>,
    documents_failed: Arc<AtomicUsize>,
    chars_processed: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_documents: usize) -> Self {
        Self::with_color(total_documents, true)
    }

    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_documents as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            documents_indexed: Arc::new(AtomicUsize::new(0)),
            documents_failed: Arc::new(AtomicUsize::new(0)),
            chars_processed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn set_position(&self, indexed: usize) {
        let previous = self.documents_indexed.swap(indexed, Ordering::SeqCst);
        if indexed >= previous {
            self.main_bar.inc((indexed - previous) as u64);
        }
        self.update_detail_bar();
    }

    pub fn inc_documents_indexed(&self) {
        self.documents_indexed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_documents_failed(&self) {
        self.documents_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_chars_processed(&self, chars: u64) {
        self.chars_processed.fetch_add(chars, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Indexing complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> IndexStats {
        let duration = self.start_time.elapsed().as_secs();

        IndexStats {
            documents_indexed: self.documents_indexed.load(Ordering::SeqCst),
            documents_failed: self.documents_failed.load(Ordering::SeqCst),
            chars_processed: self.chars_processed.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let indexed = self.documents_indexed.load(Ordering::SeqCst);
        let failed = self.documents_failed.load(Ordering::SeqCst);

        let message = format!("Indexed: {} | Failed: {}", indexed, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_stats_calculations() {
        let mut stats = IndexStats::new();
        stats.documents_indexed = 100;
        stats.documents_failed = 10;
        stats.duration_secs = 10;
        stats.chars_processed = 1000;

        assert_eq!(stats.documents_per_second(), 10.0);
        assert_eq!(stats.chars_per_second(), 100.0);
        assert!((stats.success_rate() - 90.909).abs() < 0.01);
    }

    #[test]
    fn test_index_stats_zero_duration() {
        let stats = IndexStats::new();
        assert_eq!(stats.documents_per_second(), 0.0);
        assert_eq!(stats.chars_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_set_position() {
        let tracker = ProgressTracker::with_color(10, false);

        tracker.set_position(4);
        tracker.set_position(10);
        tracker.add_chars_processed(2048);

        let stats = tracker.get_stats();
        assert_eq!(stats.documents_indexed, 10);
        assert_eq!(stats.chars_processed, 2048);
    }

    #[test]
    fn test_progress_tracker_failures() {
        let tracker = ProgressTracker::with_color(10, false);

        tracker.inc_documents_failed();
        tracker.inc_documents_failed();

        let stats = tracker.get_stats();
        assert_eq!(stats.documents_failed, 2);
    }
}
