use std::sync::Arc;

use crate::bodies::{Ball, Wall};
use crate::collision::{detect, response, ContactEvent, EventSet};
use crate::core::{
    BallHandle, BallStorage, SimulationConfig, StepReport, Storage, WallHandle, WallStorage,
};
use crate::math::Vector3;
use crate::surface::SurfaceOracle;
use crate::Result;

/// The simulation context: owns every ball and wall, shares the surface
/// oracle read-only, and drives the event-driven stepping loop.
///
/// Explicitly constructed and passed by reference; there is no global
/// state. `step_once` is the only mutating entry point for the host.
pub struct SimulationWorld {
    /// All balls in the simulation
    balls: BallStorage<Ball>,

    /// All walls in the simulation
    walls: WallStorage<Wall>,

    /// The surface the balls are constrained to; shared, never mutated here
    surface: Arc<dyn SurfaceOracle>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Per-tick scratch set of candidate contacts
    events: EventSet,

    /// The total elapsed simulation time
    time: f32,
}

impl SimulationWorld {
    /// Creates a new world constrained to the given surface.
    ///
    /// The shared oracle outlives every ball registered here; the `Arc`
    /// makes that explicit rather than an implicit pointer contract.
    pub fn new(surface: Arc<dyn SurfaceOracle>) -> Self {
        Self::with_config(surface, SimulationConfig::default())
    }

    /// Creates a new world with the given configuration
    pub fn with_config(surface: Arc<dyn SurfaceOracle>, config: SimulationConfig) -> Self {
        Self {
            balls: BallStorage::new(),
            walls: WallStorage::new(),
            surface,
            config,
            events: EventSet::new(),
            time: 0.0,
        }
    }

    /// Adds a ball to the simulation and returns its handle
    pub fn register_ball(&mut self, ball: Ball) -> BallHandle {
        self.balls.add(ball)
    }

    /// Adds a wall to the simulation and returns its handle
    pub fn register_wall(&mut self, wall: Wall) -> WallHandle {
        self.walls.add(wall)
    }

    /// Gets a reference to a ball by its handle
    pub fn get_ball(&self, handle: BallHandle) -> Result<&Ball> {
        self.balls.get_ball(handle)
    }

    /// Gets a mutable reference to a ball by its handle
    pub fn get_ball_mut(&mut self, handle: BallHandle) -> Result<&mut Ball> {
        self.balls.get_ball_mut(handle)
    }

    /// Gets a reference to a wall by its handle
    pub fn get_wall(&self, handle: WallHandle) -> Result<&Wall> {
        self.walls.get_wall(handle)
    }

    /// Returns an iterator over all balls in registration order
    pub fn iter_balls(&self) -> impl Iterator<Item = (BallHandle, &Ball)> {
        self.balls.iter()
    }

    /// Returns an iterator over all walls in registration order
    pub fn iter_walls(&self) -> impl Iterator<Item = (WallHandle, &Wall)> {
        self.walls.iter()
    }

    /// Returns the number of balls in the simulation
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Returns the number of walls in the simulation
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns a mutable reference to the simulation configuration
    pub fn get_config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> Vector3 {
        self.config.gravity
    }

    /// Removes every ball and wall and resets the clock; outstanding
    /// handles become invalid
    pub fn clear(&mut self) {
        self.balls.clear();
        self.walls.clear();
        self.events.clear();
        self.time = 0.0;
    }

    /// Runs one simulation tick of length `dt`.
    ///
    /// Integrates every ball, collects all candidate contacts, then
    /// repeatedly resolves the earliest event and re-detects follow-on
    /// contacts in the remaining fraction of the step until the event set
    /// drains. Every ball's position advances by its final displacement
    /// exactly once at the end of the tick, so the committed state is
    /// penetration-free up to the detection tolerances.
    ///
    /// The resolving loop is bounded by `max_contact_events`; a tick that
    /// exceeds it is committed as-is and reported as truncated.
    pub fn step_once(&mut self, dt: f32) -> StepReport {
        self.events.clear();
        self.time += dt;

        if self.balls.is_empty() {
            return StepReport::default();
        }

        let surface = Arc::clone(&self.surface);
        let gravity = self.config.gravity;

        for (_, ball) in self.balls.iter_mut() {
            ball.begin_tick();
            ball.integrate(dt, surface.as_ref(), gravity);
        }

        let ball_handles = self.balls.handles();
        let wall_handles = self.walls.handles();

        for i in 0..ball_handles.len() {
            for j in (i + 1)..ball_handles.len() {
                self.detect_ball_pair(ball_handles[i], ball_handles[j], 0.0);
            }
        }
        for &ball in &ball_handles {
            for &wall in &wall_handles {
                self.detect_ball_wall(ball, wall, 0.0);
            }
        }

        let mut events_resolved = 0u32;
        let mut truncated = false;

        loop {
            self.events.sort_and_dedup();
            let Some(event) = self.events.pop_front() else {
                break;
            };

            if events_resolved >= self.config.max_contact_events {
                truncated = true;
                break;
            }
            events_resolved += 1;

            let time = event.time();
            let dt_remaining = (1.0 - time) * dt;

            match event {
                ContactEvent::BallWall { ball, wall, .. } => {
                    if let (Ok(b), Ok(w)) =
                        (self.balls.get_ball_mut(ball), self.walls.get_wall(wall))
                    {
                        b.set_time_fraction(time);
                        response::resolve_ball_wall(
                            b,
                            w,
                            dt_remaining,
                            surface.as_ref(),
                            &self.config,
                        );
                    }

                    for &other in &ball_handles {
                        if other != ball {
                            self.detect_ball_pair(other, ball, time);
                        }
                    }
                    for &other_wall in &wall_handles {
                        if other_wall != wall {
                            self.detect_ball_wall(ball, other_wall, time);
                        }
                    }
                }
                ContactEvent::BallBall { a, b, .. } => {
                    if let Ok((first, second)) = self.balls.get_pair_mut(a, b) {
                        first.set_time_fraction(time);
                        second.set_time_fraction(time);
                        response::resolve_ball_ball(
                            first,
                            second,
                            dt_remaining,
                            surface.as_ref(),
                            &self.config,
                        );
                    }

                    for &other in &ball_handles {
                        if other != a && other != b {
                            self.detect_ball_pair(other, a, time);
                            self.detect_ball_pair(other, b, time);
                        }
                    }
                    for &wall in &wall_handles {
                        self.detect_ball_wall(a, wall, time);
                        self.detect_ball_wall(b, wall, time);
                    }
                }
            }
        }

        if truncated {
            log::warn!(
                "tick exceeded {} contact events; committing the state reached so far",
                self.config.max_contact_events
            );
        }

        for (_, ball) in self.balls.iter_mut() {
            ball.commit_displacement();
        }

        StepReport {
            events_resolved,
            truncated,
        }
    }

    /// Runs swept detection for one ball pair and records any contact
    fn detect_ball_pair(&mut self, a: BallHandle, b: BallHandle, prev_time: f32) {
        let toi = match self.balls.get_pair_mut(a, b) {
            Ok((first, second)) => detect::ball_ball_toi(first, second, prev_time),
            Err(_) => None,
        };
        if let Some(time) = toi {
            self.events.push(ContactEvent::BallBall { a, b, time });
        }
    }

    /// Runs swept detection for one ball against one wall and records any
    /// contact
    fn detect_ball_wall(&mut self, ball: BallHandle, wall: WallHandle, prev_time: f32) {
        let toi = match (self.balls.get_ball_mut(ball), self.walls.get_wall(wall)) {
            (Ok(b), Ok(w)) => detect::ball_wall_toi(b, w, prev_time),
            _ => None,
        };
        if let Some(time) = toi {
            self.events.push(ContactEvent::BallWall { ball, wall, time });
        }
    }
}
