use super::*;
use crate::Nanos;
use crate::Progress;
use crate::context::ongoing;
use crate::table::PublicTable;
use std::sync::Arc;
use tokio::sync::watch;

/// Fraction of a turn of `duration` seconds elapsed at `now`.
/// A start in the future (clock skew) counts as zero elapsed.
pub fn fraction(started: Nanos, duration: u16, now: Nanos) -> Option<Progress> {
    match duration {
        0 => None,
        seconds => {
            let elapsed = now.saturating_sub(started) as f64;
            let total = seconds as f64 * 1e9;
            Some((elapsed / total).clamp(0.0, 1.0))
        }
    }
}

/// What the countdown needs from a table snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerInputs {
    pub started: Option<Nanos>,
    pub ongoing: bool,
    pub decided: bool,
    pub duration: u16,
}

impl TimerInputs {
    /// Start timestamp and duration, if a countdown should be running.
    fn armed(&self) -> Option<(Nanos, u16)> {
        match (self.started, self.ongoing, self.decided, self.duration) {
            (Some(started), true, false, duration) if duration > 0 => Some((started, duration)),
            _ => None,
        }
    }
}

impl From<Option<&PublicTable>> for TimerInputs {
    fn from(table: Option<&PublicTable>) -> Self {
        table
            .map(|t| Self {
                started: t.last_timer_started_timestamp,
                ongoing: ongoing(t),
                decided: t.has_winner(),
                duration: t.timer_duration(),
            })
            .unwrap_or_default()
    }
}

/// Local visualization of the acting player's turn clock.
///
/// The canister alone decides when a turn expires; this only animates it.
/// Progress never moves backwards for the same start timestamp, and is
/// `None` whenever there is nothing to count down.
#[derive(Debug, Default, Clone)]
pub struct TurnTimer {
    armed: Option<(Nanos, u16)>,
    progress: Option<Progress>,
}

impl TurnTimer {
    pub fn arm(&mut self, inputs: TimerInputs) {
        let armed = inputs.armed();
        if armed != self.armed {
            self.armed = armed;
            self.progress = None;
        }
    }
    pub fn tick(&mut self, now: Nanos) -> Option<Progress> {
        self.progress = self
            .armed
            .and_then(|(started, duration)| fraction(started, duration, now))
            .map(|p| self.progress.map_or(p, |q| q.max(p)));
        self.progress
    }
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }
    pub fn remaining(&self, now: Nanos) -> Option<std::time::Duration> {
        self.armed.map(|(started, duration)| {
            let end = started.saturating_add(duration as u64 * 1_000_000_000);
            std::time::Duration::from_nanos(end.saturating_sub(now))
        })
    }

    /// Runs the countdown against a live table feed until dropped.
    pub fn drive(
        table: watch::Receiver<Option<PublicTable>>,
        clock: Arc<dyn Clock>,
    ) -> Ticker<Option<Progress>> {
        let mut timer = Self::default();
        Ticker::spawn(crate::TURN_TICK, move || {
            timer.arm(TimerInputs::from(table.borrow().as_ref()));
            timer.tick(clock.now())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::TableBuilder;
    use crate::table::*;
    use std::time::Duration;

    const SECOND: Nanos = 1_000_000_000;

    fn inputs(started: Nanos) -> TimerInputs {
        TimerInputs {
            started: Some(started),
            ongoing: true,
            decided: false,
            duration: 10,
        }
    }

    #[test]
    fn fraction_clamps() {
        assert_eq!(fraction(0, 10, 5 * SECOND), Some(0.5));
        assert_eq!(fraction(0, 10, 50 * SECOND), Some(1.0));
        assert_eq!(fraction(10 * SECOND, 10, 0), Some(0.0));
        assert_eq!(fraction(0, 0, SECOND), None);
    }

    #[test]
    fn monotonic_while_armed() {
        let mut timer = TurnTimer::default();
        timer.arm(inputs(0));
        let mut last = 0.0;
        for now in [1, 3, 2, 7, 5, 9, 12].map(|s| s * SECOND) {
            let p = timer.tick(now).unwrap();
            assert!(p >= last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn new_turn_restarts() {
        let mut timer = TurnTimer::default();
        timer.arm(inputs(0));
        assert_eq!(timer.tick(8 * SECOND), Some(0.8));
        timer.arm(inputs(8 * SECOND));
        assert_eq!(timer.tick(9 * SECOND), Some(0.1));
    }

    #[test]
    fn winner_clears_progress() {
        let mut timer = TurnTimer::default();
        timer.arm(inputs(0));
        assert!(timer.tick(SECOND).is_some());
        timer.arm(TimerInputs {
            decided: true,
            ..inputs(0)
        });
        assert_eq!(timer.tick(2 * SECOND), None);
        assert_eq!(timer.remaining(2 * SECOND), None);
    }

    #[test]
    fn invalid_inputs_disarm() {
        let mut timer = TurnTimer::default();
        timer.arm(TimerInputs {
            started: None,
            ..inputs(0)
        });
        assert_eq!(timer.tick(SECOND), None);
        timer.arm(TimerInputs {
            ongoing: false,
            ..inputs(0)
        });
        assert_eq!(timer.tick(SECOND), None);
        timer.arm(TimerInputs::from(None));
        assert_eq!(timer.tick(SECOND), None);
    }

    #[test]
    fn remaining_counts_down() {
        let mut timer = TurnTimer::default();
        timer.arm(inputs(0));
        assert_eq!(timer.remaining(4 * SECOND), Some(Duration::from_secs(6)));
        assert_eq!(timer.remaining(40 * SECOND), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn drives_from_table_feed() {
        let clock = ManualClock::at(0);
        let table = TableBuilder::new(GameType::NoLimit(1))
            .seat("alice", 0, 100)
            .seat("bob", 0, 100)
            .timer(0)
            .duration(10)
            .build();
        let (tx, rx) = watch::channel(Some(table.clone()));
        let countdown = TurnTimer::drive(rx, Arc::new(clock.clone()));
        assert_eq!(countdown.latest(), Some(0.0));
        clock.advance(Duration::from_secs(5));
        tokio::time::sleep(crate::TURN_TICK * 2).await;
        assert_eq!(countdown.latest(), Some(0.5));
        tx.send_replace(Some(PublicTable {
            winners: Some(vec!["alice".into()]),
            ..table
        }));
        tokio::time::sleep(crate::TURN_TICK * 2).await;
        assert_eq!(countdown.latest(), None);
    }
}
