//! For tracking capture progress

/// A trait that is used to report progress to some consumer.
pub trait ProgressReporter {
    /// Called after each frame has been encoded.
    fn frame_written(&mut self);

    /// Called once, after the stream has been sealed.
    fn done(&mut self, _total_bytes: usize) {}
}

/// No-op progress reporter
pub struct NoProgress {}

impl ProgressReporter for NoProgress {
    fn frame_written(&mut self) {}
}
