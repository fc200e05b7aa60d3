use crate::core::{BallHandle, WallHandle};
use std::cmp::Ordering;

/// A candidate contact inside the current step.
///
/// Events are created fresh by every detection pass and consumed before the
/// tick ends; they never persist across ticks. `time` is the fraction of the
/// step at which the contact occurs, in `(prev_time, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// Two balls first touch
    BallBall {
        /// The first ball
        a: BallHandle,

        /// The second ball
        b: BallHandle,

        /// Fraction of the step at which the balls touch
        time: f32,
    },

    /// A ball first touches a wall
    BallWall {
        /// The ball involved
        ball: BallHandle,

        /// The wall involved
        wall: WallHandle,

        /// Fraction of the step at which the ball touches the wall
        time: f32,
    },
}

impl ContactEvent {
    /// Returns the fraction of the step at which this contact occurs
    pub fn time(&self) -> f32 {
        match *self {
            ContactEvent::BallBall { time, .. } => time,
            ContactEvent::BallWall { time, .. } => time,
        }
    }

    /// Returns the ball participants of this event
    fn balls(&self) -> (BallHandle, Option<BallHandle>) {
        match *self {
            ContactEvent::BallBall { a, b, .. } => (a, Some(b)),
            ContactEvent::BallWall { ball, .. } => (ball, None),
        }
    }

    /// Returns whether the given ball participates in this event
    pub fn involves_ball(&self, handle: BallHandle) -> bool {
        let (first, second) = self.balls();
        first == handle || second == Some(handle)
    }

    /// Two events are duplicates when they share at least one ball
    /// participant; the wall side of a ball-wall event is not compared.
    pub fn shares_ball(&self, other: &ContactEvent) -> bool {
        let (first, second) = other.balls();
        self.involves_ball(first) || second.map_or(false, |b| self.involves_ball(b))
    }
}

/// The unordered set of candidate contacts accumulated during one step,
/// consumed destructively by the step driver.
#[derive(Debug, Default)]
pub struct EventSet {
    events: Vec<ContactEvent>,
}

impl EventSet {
    /// Creates a new empty event set
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds a candidate contact to the set
    pub fn push(&mut self, event: ContactEvent) {
        self.events.push(event);
    }

    /// Sorts events by time ascending and collapses duplicates.
    ///
    /// Any event sharing a ball with an earlier kept event is dropped: at
    /// most one first contact per ball survives a sweep, and follow-on
    /// contacts are re-derived after that one is resolved.
    pub fn sort_and_dedup(&mut self) {
        self.events
            .sort_by(|a, b| a.time().partial_cmp(&b.time()).unwrap_or(Ordering::Equal));

        let mut kept: Vec<ContactEvent> = Vec::with_capacity(self.events.len());
        for event in self.events.drain(..) {
            if !kept.iter().any(|k| k.shares_ball(&event)) {
                kept.push(event);
            }
        }
        self.events = kept;
    }

    /// Removes and returns the front event
    pub fn pop_front(&mut self) -> Option<ContactEvent> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events.remove(0))
        }
    }

    /// Returns the number of events in the set
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears the set
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(a: u32, b: u32, time: f32) -> ContactEvent {
        ContactEvent::BallBall {
            a: BallHandle(a),
            b: BallHandle(b),
            time,
        }
    }

    fn bw(ball: u32, wall: u32, time: f32) -> ContactEvent {
        ContactEvent::BallWall {
            ball: BallHandle(ball),
            wall: WallHandle(wall),
            time,
        }
    }

    #[test]
    fn sorts_by_time_ascending() {
        let mut set = EventSet::new();
        set.push(bb(0, 1, 0.7));
        set.push(bb(2, 3, 0.3));
        set.sort_and_dedup();

        assert_eq!(set.pop_front().map(|e| e.time()), Some(0.3));
        assert_eq!(set.pop_front().map(|e| e.time()), Some(0.7));
    }

    #[test]
    fn drops_later_event_sharing_a_ball() {
        let mut set = EventSet::new();
        set.push(bb(0, 1, 0.5));
        set.push(bw(1, 0, 0.8));
        set.sort_and_dedup();

        assert_eq!(set.len(), 1);
        assert!(set.pop_front().unwrap().involves_ball(BallHandle(0)));
    }

    #[test]
    fn keeps_disjoint_events() {
        let mut set = EventSet::new();
        set.push(bb(0, 1, 0.5));
        set.push(bb(2, 3, 0.5));
        set.push(bw(4, 0, 0.2));
        set.sort_and_dedup();

        assert_eq!(set.len(), 3);
    }

    #[test]
    fn wall_side_is_not_compared() {
        let mut set = EventSet::new();
        set.push(bw(0, 0, 0.4));
        set.push(bw(1, 0, 0.6));
        set.sort_and_dedup();

        // Same wall, different balls: both survive.
        assert_eq!(set.len(), 2);
    }
}
