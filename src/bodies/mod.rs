mod ball;
mod wall;

pub use self::ball::Ball;
pub use self::wall::Wall;

use bitflags::bitflags;

bitflags! {
    /// Flags for controlling the behavior of balls
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BallFlags: u32 {
        /// Ball rolls on the reference surface; when clear the ball is in
        /// free ballistic flight
        const SURFACE_CONSTRAINED = 0x01;

        /// Ball has been brought to rest by a low-speed wall contact
        const AT_REST = 0x02;
    }
}

impl Default for BallFlags {
    fn default() -> Self {
        Self::SURFACE_CONSTRAINED
    }
}
