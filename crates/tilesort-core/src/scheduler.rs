//! Single-threaded "next frame" task queue.
//!
//! The engine never waits on animation. Work that must happen on the next
//! rendering opportunity is queued here and drained by the host: the browser
//! shell calls [`FrameQueue::run_frame`] from `requestAnimationFrame`, tests call
//! it directly.

use std::fmt;
use std::mem;

/// A deferred task receiving the frame target (usually the tile view).
pub type FrameTask<T> = Box<dyn FnOnce(&mut T)>;

/// Queue of tasks waiting for the next frame.
pub struct FrameQueue<T> {
    pending: Vec<FrameTask<T>>,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<T> fmt::Debug for FrameQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<T> FrameQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on the next frame. Fire-and-forget.
    pub fn defer_to_next_frame(&mut self, task: impl FnOnce(&mut T) + 'static) {
        self.pending.push(Box::new(task));
    }

    /// Check if a frame needs to be requested.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run every task queued before this call, in order.
    ///
    /// Tasks deferred while the frame runs wait for the following frame.
    /// Returns the number of tasks run.
    pub fn run_frame(&mut self, target: &mut T) -> usize {
        let tasks = mem::take(&mut self.pending);
        let count = tasks.len();
        for task in tasks {
            task(target);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_order() {
        let mut queue: FrameQueue<Vec<u32>> = FrameQueue::new();
        queue.defer_to_next_frame(|log| log.push(1));
        queue.defer_to_next_frame(|log| log.push(2));
        assert!(queue.has_pending());

        let mut log = Vec::new();
        assert_eq!(queue.run_frame(&mut log), 2);
        assert_eq!(log, vec![1, 2]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_empty_frame() {
        let mut queue: FrameQueue<Vec<u32>> = FrameQueue::new();
        let mut log = Vec::new();
        assert_eq!(queue.run_frame(&mut log), 0);
        assert!(log.is_empty());
    }
}
