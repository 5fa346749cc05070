//! Job system
use flume::Receiver;
use std::thread;

/// State of a background job as seen by [`Job::check`].
#[derive(Debug, PartialEq, Eq)]
pub enum JobStatus<O> {
    Pending,
    Ready(O),
    /// The result was already handed out by an earlier call.
    Collected,
    Panicked,
}

/// Handle to a closure running on its own thread.
pub struct Job<O> {
    rx: Receiver<O>,
    handle: Option<thread::JoinHandle<()>>,
}

pub fn start<O, F>(f: F) -> Job<O>
where
    O: Send + 'static,
    F: FnOnce() -> O + Send + 'static,
{
    let (tx, rx) = flume::bounded(1);
    let handle = thread::spawn(move || {
        let _ = tx.send(f());
    });
    Job {
        rx,
        handle: Some(handle),
    }
}

impl<O> Job<O> {
    /// Polls the job without blocking.
    pub fn check(&mut self) -> JobStatus<O> {
        let Some(handle) = self.handle.take() else {
            return JobStatus::Collected;
        };
        let result = match self.rx.try_recv() {
            Ok(result) => JobStatus::Ready(result),
            Err(flume::TryRecvError::Disconnected) => JobStatus::Panicked,
            Err(flume::TryRecvError::Empty) => {
                self.handle = Some(handle);
                return JobStatus::Pending;
            }
        };
        let _ = handle.join();
        result
    }

    /// Blocks until the job finishes. `None` if it panicked or was already collected.
    pub fn wait(mut self) -> Option<O> {
        let handle = self.handle.take()?;
        let result = self.rx.recv().ok();
        let _ = handle.join();
        result
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }
}
