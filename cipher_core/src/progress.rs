use std::cell::Cell;

/// Receives completion percentages (0 to 100) from long-running operations.
///
/// Purely observational: a sink cannot influence the operation. Anything
/// callable as `Fn(u8)` is a sink, so a closure forwarding into a channel
/// works from a worker thread.
pub trait ProgressSink {
    fn report(&self, percent: u8);
}

impl<F: Fn(u8)> ProgressSink for F {
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _percent: u8) {}
}

/// Wraps a sink and keeps the reported sequence well-formed:
/// starts at 0, never goes backwards, ends with a single 100.
pub struct ProgressReporter<'a> {
    sink: &'a dyn ProgressSink,
    last: Cell<Option<u8>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        let reporter = Self {
            sink,
            last: Cell::new(None),
        };
        reporter.emit(0);
        reporter
    }

    /// Reports `done / total` of the span `[from, to]` percent.
    pub fn span(&self, from: u8, to: u8, done: usize, total: usize) {
        let width = u64::from(to.saturating_sub(from));
        let offset = if total == 0 {
            0
        } else {
            (width * done as u64 / total as u64).min(width)
        };
        self.emit(from.saturating_add(offset as u8));
    }

    /// Reports `done / total` of the whole run.
    pub fn step(&self, done: usize, total: usize) {
        self.span(0, 100, done, total);
    }

    pub fn finish(&self) {
        self.emit(100);
    }

    fn emit(&self, percent: u8) {
        let percent = percent.min(100);
        match self.last.get() {
            Some(last) if percent <= last => {}
            _ => {
                self.last.set(Some(percent));
                self.sink.report(percent);
            }
        }
    }
}
