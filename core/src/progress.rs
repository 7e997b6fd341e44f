//! Fire-and-forget progress notifications for long reads and writes.

/// Receives step counters. Nothing in the codec depends on these calls.
pub trait ProgressListener {
    fn init(&mut self, total_steps: usize, title: &str);
    fn step(&mut self, index: usize, message: &str);
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn init(&mut self, _total_steps: usize, _title: &str) {}

    fn step(&mut self, _index: usize, _message: &str) {}
}

/// Forwards notifications to the `log` facade at debug level.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    title: String,
    total: usize,
}

impl ProgressListener for LogProgress {
    fn init(&mut self, total_steps: usize, title: &str) {
        title.clone_into(&mut self.title);
        self.total = total_steps;
        log::debug!("[progress] {title}: {total_steps} steps");
    }

    fn step(&mut self, index: usize, message: &str) {
        if message.is_empty() {
            log::trace!("[progress] {} {}/{}", self.title, index, self.total);
        } else {
            log::debug!(
                "[progress] {} {}/{}: {}",
                self.title,
                index,
                self.total,
                message
            );
        }
    }
}
