//! Fixed-period scheduler thread.
//!
//! Calls a tick function on a dedicated thread at a fixed period. Calls never
//! overlap. When a tick runs late the schedule is re-armed from "now" instead
//! of bursting to catch up; missed periods are counted on the handle.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to a running ticker
///
/// Dropping the handle asks the thread to stop without waiting for it.
#[must_use = "dropping the handle stops the ticker"]
pub struct TickHandle {
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    overruns: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Periods missed because a tick (or the scheduler) ran late
    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }

    /// Stop the thread and wait for the tick in progress to finish
    pub fn stop(mut self) -> thread::Result<()> {
        self.stop.store(true, Ordering::Release);
        match self.thread.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// Spawn a thread named `name` that calls `on_tick` every `period`
pub fn spawn_ticker<F>(name: &str, period: Duration, mut on_tick: F) -> io::Result<TickHandle>
where
    F: FnMut() + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let ticks = Arc::new(AtomicU64::new(0));
    let overruns = Arc::new(AtomicU64::new(0));
    let period = period.max(Duration::from_micros(100));

    let thread = {
        let stop = Arc::clone(&stop);
        let ticks = Arc::clone(&ticks);
        let overruns = Arc::clone(&overruns);
        thread::Builder::new().name(name.to_string()).spawn(move || {
            log::info!("ticker started, period {:?}", period);
            let mut deadline = Instant::now();

            while !stop.load(Ordering::Acquire) {
                on_tick();
                ticks.fetch_add(1, Ordering::Relaxed);

                deadline += period;
                let now = Instant::now();
                match deadline.checked_duration_since(now) {
                    Some(wait) => thread::sleep(wait),
                    None => {
                        let late = now - deadline;
                        let missed = (late.as_nanos() / period.as_nanos()) as u64 + 1;
                        overruns.fetch_add(missed, Ordering::Relaxed);
                        log::debug!("tick overrun by {:?}, re-arming", late);
                        deadline = now;
                    }
                }
            }
            log::info!("ticker stopped");
        })?
    };

    Ok(TickHandle {
        stop,
        ticks,
        overruns,
        thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let handle = spawn_ticker("test-tick", Duration::from_millis(1), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        while handle.ticks() < 5 {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_running());
        handle.stop().unwrap();

        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
        assert!(after_stop >= 5);
    }

    #[test]
    fn slow_ticks_count_overruns() {
        let handle = spawn_ticker("slow-tick", Duration::from_millis(1), || {
            thread::sleep(Duration::from_millis(5));
        })
        .unwrap();

        while handle.ticks() < 3 {
            thread::sleep(Duration::from_millis(2));
        }
        assert!(handle.overruns() >= 2);
        handle.stop().unwrap();
    }
}
