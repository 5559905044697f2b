//! Voting window countdown.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::session::messages::VOTING_ENDED;

/// Current unix time in seconds.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Remaining time until `end`, as shown in the view.
///
/// Whole days are not shown: the hour field wraps every 24 hours.
pub fn format_time_left(end: u64, now: u64) -> String {
    let difference = end as i128 - now as i128;
    if difference <= 0 {
        return VOTING_ENDED.to_string();
    }

    let hours = (difference / (60 * 60)) % 24;
    let minutes = (difference / 60) % 60;
    let seconds = difference % 60;

    format!("{}h {}m {}s remaining", hours, minutes, seconds)
}

/// Periodic ticker that yields the formatted time left until the window closes.
pub struct Countdown {
    end: u64,
    ticker: Interval,
    finished: bool,
}

impl Countdown {
    /// Tick every `period` until `end`.
    pub fn new(end: u64, period: Duration) -> Self {
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            end,
            ticker,
            finished: false,
        }
    }

    /// Wait for the next tick.
    ///
    /// Yields `"Voting ended"` once, then `None` forever.
    pub async fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.ticker.tick().await;

        let text = format_time_left(self.end, now_unix());
        if text == VOTING_ENDED {
            self.finished = true;
        }
        Some(text)
    }

    /// Whether the window has been reported as closed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
