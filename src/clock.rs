//! Ticking local clock for the temperature widget

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Wall-clock time at a location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockReading {
    /// "hh:mm:ss AM"
    pub time: String,
    /// Full weekday name
    pub weekday: String,
}

/// Render `now` at `utc_offset` seconds. Offsets outside ±24h are treated as UTC.
#[must_use]
pub fn clock_reading(now: DateTime<Utc>, utc_offset: i64) -> ClockReading {
    let offset = i32::try_from(utc_offset)
        .ok()
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    let local = now.with_timezone(&offset);
    ClockReading {
        time: local.format("%I:%M:%S %p").to_string(),
        weekday: local.format("%A").to_string(),
    }
}

/// Once-per-second clock. The ticking task stops when this is dropped.
pub struct LocalClock {
    offset: Arc<AtomicI64>,
    readings: watch::Receiver<ClockReading>,
    task: JoinHandle<()>,
}

impl LocalClock {
    /// Start ticking at `utc_offset` seconds. Must be called inside a tokio runtime.
    pub fn start(utc_offset: i64) -> Self {
        let offset = Arc::new(AtomicI64::new(utc_offset));
        let (tx, readings) = watch::channel(clock_reading(Utc::now(), utc_offset));

        let task_offset = offset.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let reading = clock_reading(Utc::now(), task_offset.load(Ordering::Relaxed));
                if tx.send(reading).is_err() {
                    break;
                }
            }
        });

        Self {
            offset,
            readings,
            task,
        }
    }

    /// Follow a different location's offset from the next tick on
    pub fn set_offset(&self, utc_offset: i64) {
        self.offset.store(utc_offset, Ordering::Relaxed);
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.readings.clone()
    }

    pub fn current(&self) -> ClockReading {
        self.readings.borrow().clone()
    }
}

impl Drop for LocalClock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
