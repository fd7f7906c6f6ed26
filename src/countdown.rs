//! Countdown to the candidate filing deadline.
//!
//! [`remaining`] is the pure computation; [`render`] turns its result into
//! markup. [`spawn_ticker`] runs the periodic recomputation as a background
//! task that publishes each new value on a `watch` channel. The task ends on
//! its own once the deadline has passed (after publishing that state once),
//! or when its [`TickerHandle`] is cancelled or dropped.

use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DAY_MS: i64 = 86_400_000;
pub const HOUR_MS: i64 = 3_600_000;
pub const MINUTE_MS: i64 = 60_000;

/// How often the display is recomputed.
pub const TICK: Duration = Duration::from_secs(60);

pub const PASSED_MESSAGE: &str = "The candidate filing deadline has passed.";

/// Time left until the deadline, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Passed,
    Left { days: i64, hours: i64, minutes: i64 },
}

/// Compute what is left between `now` and `deadline`.
pub fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Remaining {
    let ms = (deadline - now).num_milliseconds();
    if ms <= 0 {
        return Remaining::Passed;
    }
    Remaining::Left {
        days: ms / DAY_MS,
        hours: (ms % DAY_MS) / HOUR_MS,
        minutes: (ms % HOUR_MS) / MINUTE_MS,
    }
}

/// Parse a deadline as RFC 3339, or as a bare date taken at midday UTC.
pub fn parse_deadline(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Markup for the countdown container's contents.
pub fn render(state: Remaining) -> String {
    match state {
        Remaining::Passed => format!("<div class=\"countdown-expired\">{PASSED_MESSAGE}</div>"),
        Remaining::Left {
            days,
            hours,
            minutes,
        } => {
            let unit = |value: i64, label: &str| {
                format!(
                    "<div class=\"countdown-unit\"><span class=\"countdown-value\">{value}</span>\
                     <span class=\"countdown-label\">{label}</span></div>"
                )
            };
            format!(
                "<div class=\"countdown-title\">Filing deadline</div><div class=\"countdown-units\">{}{}{}</div>",
                unit(days, "days"),
                unit(hours, "hours"),
                unit(minutes, "minutes")
            )
        }
    }
}

/// Owner of a running countdown task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stop the ticker. Idempotent.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start recomputing the countdown every `period`.
///
/// The receiver starts out holding the state as of the call. The sender is
/// dropped when the task ends, so `changed()` on the receiver returns an
/// error once no further updates will arrive.
pub fn spawn_ticker(
    deadline: DateTime<Utc>,
    period: Duration,
) -> (TickerHandle, watch::Receiver<Remaining>) {
    let (tx, rx) = watch::channel(remaining(deadline, Utc::now()));

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let state = remaining(deadline, Utc::now());
            debug!(?state, "Countdown tick");
            if tx.send(state).is_err() {
                debug!("Countdown receiver dropped; stopping");
                break;
            }
            if state == Remaining::Passed {
                info!("Deadline passed; countdown finished");
                break;
            }
        }
    });

    (TickerHandle { task }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_remaining_one_of_each_unit() {
        let now = Utc::now();
        let deadline = now + TimeDelta::seconds(90_061);
        assert_eq!(
            remaining(deadline, now),
            Remaining::Left {
                days: 1,
                hours: 1,
                minutes: 1
            }
        );
    }

    #[test]
    fn test_remaining_past_and_exact() {
        let now = Utc::now();
        assert_eq!(remaining(now - TimeDelta::seconds(5), now), Remaining::Passed);
        assert_eq!(remaining(now, now), Remaining::Passed);
    }

    #[test]
    fn test_render_passed_and_left() {
        assert!(render(Remaining::Passed).contains(PASSED_MESSAGE));
        let html = render(Remaining::Left {
            days: 12,
            hours: 0,
            minutes: 59,
        });
        assert!(html.contains("<span class=\"countdown-value\">12</span>"));
        assert!(html.contains("<span class=\"countdown-value\">59</span>"));
        assert!(!html.contains(PASSED_MESSAGE));
    }

    #[test]
    fn test_parse_deadline() {
        let dt = parse_deadline("2026-04-02T12:00:00-05:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-04-02T17:00:00+00:00");
        let dt = parse_deadline("2026-04-02").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-04-02T12:00:00+00:00");
        assert!(parse_deadline("next spring").is_none());
    }

    #[tokio::test]
    async fn test_ticker_stops_after_passed() {
        let (handle, mut rx) = spawn_ticker(Utc::now() - TimeDelta::hours(1), Duration::from_millis(10));
        assert_eq!(*rx.borrow(), Remaining::Passed);
        // One publish of the passed state, then the channel closes.
        assert!(rx.changed().await.is_ok());
        assert!(rx.changed().await.is_err());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_ticker_keeps_running_until_cancelled() {
        let (handle, mut rx) = spawn_ticker(Utc::now() + TimeDelta::days(3), Duration::from_millis(10));
        for _ in 0..3 {
            rx.changed().await.unwrap();
            assert!(matches!(*rx.borrow_and_update(), Remaining::Left { days: 2, .. }));
        }
        assert!(!handle.is_finished());

        handle.cancel();
        // The sender lives in the aborted task, so the channel closes.
        assert!(rx.changed().await.is_err());
        assert!(handle.is_finished());
    }
}
