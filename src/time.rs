use crate::jobs::{self, Job};
use std::{
    thread,
    time::{Duration, Instant},
};

/// Runs `action` and returns how long it took.
pub fn stopwatch<F: FnOnce()>(action: F) -> Duration {
    let start = Instant::now();
    action();
    start.elapsed()
}

/// Runs `action` and returns its duration formatted as milliseconds, e.g. `"12.5ms"`.
/// With `show_in_log` the label is also logged at info level.
pub fn stopwatch_label<F: FnOnce()>(action: F, show_in_log: bool) -> String {
    let label = format!("{}ms", stopwatch(action).as_secs_f64() * 1000.0);
    if show_in_log {
        log::info!("{label}");
    }
    label
}

/// Runs `action` on a background thread once `delay` has passed.
pub fn start_later<O, F>(delay: Duration, action: F) -> Job<O>
where
    O: Send + 'static,
    F: FnOnce() -> O + Send + 'static,
{
    log::debug!("starting action in {}ms", delay.as_millis());
    jobs::start(move || {
        thread::sleep(delay);
        action()
    })
}
