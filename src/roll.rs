use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLL_DURATION_MS: u64 = 2000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Durations offered by the roll length picker, indexed by choice.
pub const ROLL_LENGTH_CHOICES_MS: [u64; 3] = [1000, 2000, 3000];

pub fn roll_length_for_choice(which: usize) -> Option<u64> {
    ROLL_LENGTH_CHOICES_MS.get(which).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollTarget {
    All,
    Single(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
    Finish,
}

/// Countdown that ticks every `interval` until `duration` has elapsed.
///
/// Ticks fire at `0, interval, 2 * interval, ...` strictly before `duration`,
/// then a single `Finish` fires at `duration`.
#[derive(Debug, Clone)]
pub struct RollTimer {
    target: RollTarget,
    started_at: Instant,
    interval: Duration,
    duration: Duration,
    ticks: u32,
    fired: u32,
}

impl RollTimer {
    pub fn start(target: RollTarget, duration_ms: u64, interval_ms: u64, now: Instant) -> Self {
        let interval_ms = interval_ms.max(1);
        let ticks = u32::try_from(duration_ms.div_ceil(interval_ms)).unwrap_or(u32::MAX);
        Self {
            target,
            started_at: now,
            interval: Duration::from_millis(interval_ms),
            duration: Duration::from_millis(duration_ms),
            ticks,
            fired: 0,
        }
    }

    pub fn target(&self) -> RollTarget {
        self.target
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn next_deadline(&self) -> Instant {
        if self.fired < self.ticks {
            self.started_at + self.interval * self.fired
        } else {
            self.started_at + self.duration
        }
    }

    /// Returns the next event due at `now`, if any. Call repeatedly to drain.
    pub fn poll(&mut self, now: Instant) -> Option<TimerEvent> {
        if now < self.next_deadline() {
            return None;
        }
        if self.fired < self.ticks {
            self.fired += 1;
            Some(TimerEvent::Tick)
        } else {
            Some(TimerEvent::Finish)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timer: &mut RollTimer, now: Instant) -> Vec<TimerEvent> {
        let mut events = vec![];
        while let Some(event) = timer.poll(now) {
            events.push(event);
            if event == TimerEvent::Finish {
                break;
            }
        }
        events
    }

    #[test]
    fn first_tick_is_due_immediately() {
        let now = Instant::now();
        let mut timer = RollTimer::start(RollTarget::All, 2000, 100, now);
        assert_eq!(timer.ticks(), 20);
        assert_eq!(timer.poll(now), Some(TimerEvent::Tick));
        assert_eq!(timer.poll(now), None);
        assert_eq!(timer.next_deadline(), now + Duration::from_millis(100));
    }

    #[test]
    fn fires_every_tick_then_finishes() {
        let now = Instant::now();
        let mut timer = RollTimer::start(RollTarget::Single(1), 1000, 100, now);

        let early = drain(&mut timer, now + Duration::from_millis(950));
        assert_eq!(early.len(), 10);
        assert!(early.iter().all(|e| *e == TimerEvent::Tick));

        assert_eq!(timer.next_deadline(), now + Duration::from_millis(1000));
        assert_eq!(
            drain(&mut timer, now + Duration::from_millis(1000)),
            vec![TimerEvent::Finish]
        );
    }

    #[test]
    fn uneven_duration_rounds_ticks_up() {
        let now = Instant::now();
        let timer = RollTimer::start(RollTarget::All, 250, 100, now);
        assert_eq!(timer.ticks(), 3);
    }

    #[test]
    fn picker_choices() {
        assert_eq!(roll_length_for_choice(0), Some(1000));
        assert_eq!(roll_length_for_choice(2), Some(3000));
        assert_eq!(roll_length_for_choice(3), None);
    }
}
