//! Emission schedules.
//!
//! A schedule describes when a node's instances come into being: the
//! k-th emission event is due at `delay + k * interval` on the parent
//! instance's age axis, each event spawns one generation of `burst`
//! instances, and `max_events` bounds the event count. The schedule is
//! pure arithmetic over ages — the engine tracks how many events it has
//! already fired per instance and asks how many are due, which keeps
//! emission deterministic and immune to timestep accumulation drift.

/// When and how many instances a node spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionSchedule {
    /// Parent age at which the first event is due.
    pub delay: f32,
    /// Spacing between consecutive events.
    ///
    /// A non-positive interval collapses the schedule to a single event
    /// at `delay`, regardless of `max_events`.
    pub interval: f32,
    /// Instances spawned per event (one generation).
    pub burst: u32,
    /// Upper bound on events fired per parent instance. `None` means
    /// the schedule repeats for the parent's whole life.
    pub max_events: Option<u32>,
    /// Cap on simultaneously live instances of this node within one
    /// container. Spawns that would exceed it are trimmed.
    pub max_alive: Option<u32>,
}

impl EmissionSchedule {
    /// A single burst of `count` instances at parent age 0.
    pub fn burst(count: u32) -> Self {
        Self {
            delay: 0.0,
            interval: 0.0,
            burst: count,
            max_events: Some(1),
            max_alive: None,
        }
    }

    /// An unbounded repeating schedule: `count` instances every
    /// `interval` seconds, starting at age 0.
    pub fn repeating(count: u32, interval: f32) -> Self {
        Self {
            delay: 0.0,
            interval,
            burst: count,
            max_events: None,
            max_alive: None,
        }
    }

    /// Total events due once the parent reaches `age`.
    ///
    /// Counts every event with a due time `<= age`, capped by
    /// `max_events`. The engine fires the difference between this and
    /// its per-instance fired counter.
    pub fn events_due_by(&self, age: f32) -> u32 {
        if age < self.delay || self.burst == 0 {
            return 0;
        }
        let due = if self.interval > 0.0 {
            let k = ((age - self.delay) / self.interval).floor();
            if k >= u32::MAX as f32 {
                u32::MAX
            } else {
                k as u32 + 1
            }
        } else {
            1
        };
        match self.max_events {
            Some(max) => due.min(max),
            None => due,
        }
    }

    /// Events due in the half-open age window `[prev_age, new_age)`.
    pub fn events_in(&self, prev_age: f32, new_age: f32) -> u32 {
        self.events_due_by(new_age)
            .saturating_sub(self.events_due_by(prev_age))
    }
}

impl Default for EmissionSchedule {
    fn default() -> Self {
        Self::burst(1)
    }
}
