//! Decorative particle vocabulary shared by the particle system and renderers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Unique identifier of a particle, derived from its spawn timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Creates a new particle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Icon drawn for a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Long, thin pencil with a sharpened tip.
    Pencil,
    /// Short, thick crayon.
    Crayon,
}

/// Direction in which a particle spins while falling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinDirection {
    /// Rotation with increasing angles on screen.
    Clockwise,
    /// Rotation with decreasing angles on screen.
    Counterclockwise,
}

impl SpinDirection {
    /// Sign applied to rotation angles.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Clockwise => 1.0,
            Self::Counterclockwise => -1.0,
        }
    }
}

/// Hue-based color expressed in HSL components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleColor {
    /// Hue in degrees within `0.0..360.0`.
    pub hue: f32,
    /// Saturation within `0.0..=1.0`.
    pub saturation: f32,
    /// Lightness within `0.0..=1.0`.
    pub lightness: f32,
}

impl ParticleColor {
    /// Saturation applied to every spawned particle.
    pub const SATURATION: f32 = 0.7;
    /// Lightness applied to every spawned particle.
    pub const LIGHTNESS: f32 = 0.6;

    /// Creates a color with the given hue and the shared saturation and lightness.
    #[must_use]
    pub const fn from_hue(hue: f32) -> Self {
        Self {
            hue,
            saturation: Self::SATURATION,
            lightness: Self::LIGHTNESS,
        }
    }
}

/// Single decorative falling icon.
///
/// Items never move once spawned; [`ParticleItem::pose_at`] derives where a
/// renderer should draw them from their age.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleItem {
    /// Identity of the item.
    pub id: ParticleId,
    /// Horizontal spawn position in viewport units.
    pub horizontal_position: f32,
    /// Fill color of the icon.
    pub color: ParticleColor,
    /// Icon drawn for the item.
    pub kind: ParticleKind,
    /// Direction of the spin animation.
    pub spin_direction: SpinDirection,
    /// Degrees rotated during one spin cycle.
    pub spin_amount: f32,
    /// Time taken to fall across the viewport.
    pub fall_duration: Duration,
    /// Length of one spin cycle.
    pub spin_duration: Duration,
    /// Simulated time at which the item spawned.
    pub spawned_at: Duration,
}

/// Presentation offsets for a particle at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePose {
    /// Horizontal position in viewport units.
    pub x: f32,
    /// Vertical position in viewport units; negative values lie above the top edge.
    pub y: f32,
    /// Rotation in degrees.
    pub rotation_degrees: f32,
}

impl ParticleItem {
    /// Distance above and below the viewport where an icon is fully hidden.
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Derives the pose of the item after `age` has elapsed since spawning.
    ///
    /// The fall wraps around once `fall_duration` elapses, matching an
    /// infinitely repeating animation.
    #[must_use]
    pub fn pose_at(&self, age: Duration, viewport_height: f32) -> ParticlePose {
        let fall_progress = cycle_fraction(age, self.fall_duration);
        let travel = viewport_height.max(0.0) + 2.0 * Self::OFFSCREEN_MARGIN;
        let spin_progress = cycle_fraction(age, self.spin_duration);

        ParticlePose {
            x: self.horizontal_position,
            y: -Self::OFFSCREEN_MARGIN + fall_progress * travel,
            rotation_degrees: self.spin_direction.sign() * self.spin_amount * spin_progress,
        }
    }
}

fn cycle_fraction(elapsed: Duration, period: Duration) -> f32 {
    if period.is_zero() {
        return 0.0;
    }

    let period = period.as_secs_f64();
    ((elapsed.as_secs_f64() % period) / period) as f32
}

/// Notifications emitted by the particle background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleEvent {
    /// A new particle joined the collection.
    Spawned {
        /// Identity of the spawned particle.
        id: ParticleId,
    },
    /// A particle was removed by the cull task.
    Culled {
        /// Identity of the removed particle.
        id: ParticleId,
    },
}
