#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decorative particle background that spawns and culls falling icons.
//!
//! The background owns its particle collection and two [`PeriodicTask`]s
//! driven by simulated time. It never observes the wizard.

use std::time::Duration;

use drawing_buddy_core::{
    ParticleColor, ParticleEvent, ParticleId, ParticleItem, ParticleKind, SpinDirection,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Horizontal position beyond which the cull task removes a particle.
///
/// Positions are fixed at spawn and drawn from the viewport width, so the
/// bound is only exceeded by items spawned into an enormous viewport.
pub const CULL_BOUND: f32 = 10_000.0;

const SPIN_AMOUNT_DEGREES: std::ops::Range<f32> = 180.0..720.0;
const FALL_SECONDS: std::ops::Range<f32> = 5.0..10.0;
const SPIN_SECONDS: std::ops::Range<f32> = 2.0..6.0;

/// Configuration parameters required to mount the particle background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: Duration,
    cull_interval: Duration,
    viewport_width: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadences, viewport width and seed.
    ///
    /// A zero interval disables the corresponding task.
    #[must_use]
    pub const fn new(
        spawn_interval: Duration,
        cull_interval: Duration,
        viewport_width: f32,
        rng_seed: u64,
    ) -> Self {
        Self {
            spawn_interval,
            cull_interval,
            viewport_width,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(1),
            Duration::from_secs(5),
            1_280.0,
            0x5eed_d00d_1e5_c0de,
        )
    }
}

/// Fixed-period timer advanced by simulated time.
#[derive(Clone, Debug)]
pub struct PeriodicTask {
    period: Duration,
    accumulator: Duration,
    elapsed: Duration,
    running: bool,
}

impl PeriodicTask {
    /// Creates a stopped task firing every `period`.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Starts the task from a clean slate.
    pub fn start(&mut self) {
        self.accumulator = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    /// Stops the task; later calls to [`PeriodicTask::advance`] never fire.
    pub fn cancel(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Reports whether the task is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the task by `dt`, returning the instant of every firing
    /// measured from [`PeriodicTask::start`].
    pub fn advance(&mut self, dt: Duration) -> Vec<Duration> {
        if !self.running || self.period.is_zero() {
            return Vec::new();
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        self.accumulator = self.accumulator.saturating_add(dt);

        let mut firings = Vec::new();
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            firings.push(self.elapsed.saturating_sub(self.accumulator));
        }
        firings
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Job {
    Spawn,
    Cull,
}

/// Particle background mounted for the lifetime of the experience.
#[derive(Debug)]
pub struct ParticleBackground {
    spawn: PeriodicTask,
    cull: PeriodicTask,
    viewport_width: f32,
    rng: ChaCha8Rng,
    items: Vec<ParticleItem>,
    last_id: Option<ParticleId>,
}

impl ParticleBackground {
    /// Mounts the background and starts both periodic tasks.
    #[must_use]
    pub fn mount(config: Config) -> Self {
        let mut spawn = PeriodicTask::new(config.spawn_interval);
        let mut cull = PeriodicTask::new(config.cull_interval);
        spawn.start();
        cull.start();

        Self {
            spawn,
            cull,
            viewport_width: config.viewport_width,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            items: Vec::new(),
            last_id: None,
        }
    }

    /// Cancels both tasks and drops every particle.
    pub fn unmount(&mut self) {
        self.spawn.cancel();
        self.cull.cancel();
        self.items.clear();
    }

    /// Reports whether the periodic tasks are still running.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.spawn.is_running() || self.cull.is_running()
    }

    /// Live particles in spawn order.
    #[must_use]
    pub fn items(&self) -> &[ParticleItem] {
        &self.items
    }

    /// Updates the width used for new spawn positions.
    pub fn resize(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
    }

    /// Advances both tasks by `dt`, reporting spawned and culled particles.
    ///
    /// Firings are processed in time order; a spawn due at the same instant
    /// as a cull runs first.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<ParticleEvent>) {
        let mut jobs: Vec<(Duration, Job)> = self
            .spawn
            .advance(dt)
            .into_iter()
            .map(|at| (at, Job::Spawn))
            .chain(self.cull.advance(dt).into_iter().map(|at| (at, Job::Cull)))
            .collect();
        jobs.sort();

        for (at, job) in jobs {
            match job {
                Job::Spawn => {
                    let item = self.spawn_item(at);
                    out.push(ParticleEvent::Spawned { id: item.id });
                    self.items.push(item);
                }
                Job::Cull => self.cull_items(out),
            }
        }
    }

    fn spawn_item(&mut self, at: Duration) -> ParticleItem {
        let id = self.next_id(at);
        let horizontal_position = if self.viewport_width > 0.0 {
            self.rng.gen_range(0.0..self.viewport_width)
        } else {
            0.0
        };
        let hue = self.rng.gen_range(0.0..360.0);
        let kind = if self.rng.gen_bool(0.5) {
            ParticleKind::Pencil
        } else {
            ParticleKind::Crayon
        };
        let spin_direction = if self.rng.gen_bool(0.5) {
            SpinDirection::Clockwise
        } else {
            SpinDirection::Counterclockwise
        };
        let spin_amount = self.rng.gen_range(SPIN_AMOUNT_DEGREES);
        let fall_duration = Duration::from_secs_f32(self.rng.gen_range(FALL_SECONDS));
        let spin_duration = Duration::from_secs_f32(self.rng.gen_range(SPIN_SECONDS));

        ParticleItem {
            id,
            horizontal_position,
            color: ParticleColor::from_hue(hue),
            kind,
            spin_direction,
            spin_amount,
            fall_duration,
            spin_duration,
            spawned_at: at,
        }
    }

    fn next_id(&mut self, at: Duration) -> ParticleId {
        let timestamp = u64::try_from(at.as_millis()).unwrap_or(u64::MAX);
        let value = match self.last_id {
            Some(last) if last.get() >= timestamp => last.get().saturating_add(1),
            _ => timestamp,
        };
        let id = ParticleId::new(value);
        self.last_id = Some(id);
        id
    }

    fn cull_items(&mut self, out: &mut Vec<ParticleEvent>) {
        self.items.retain(|item| {
            let keep = item.horizontal_position <= CULL_BOUND;
            if !keep {
                out.push(ParticleEvent::Culled { id: item.id });
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_task_never_fires() {
        let mut task = PeriodicTask::new(Duration::from_secs(1));
        assert!(task.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn task_reports_firing_instants() {
        let mut task = PeriodicTask::new(Duration::from_millis(400));
        task.start();
        assert!(task.advance(Duration::from_millis(300)).is_empty());
        assert_eq!(
            task.advance(Duration::from_millis(600)),
            vec![Duration::from_millis(400), Duration::from_millis(800)]
        );
    }

    #[test]
    fn zero_period_disables_task() {
        let mut task = PeriodicTask::new(Duration::ZERO);
        task.start();
        assert!(task.advance(Duration::from_secs(3)).is_empty());
    }

    #[test]
    fn ids_stay_unique_when_timestamps_collide() {
        let mut background = ParticleBackground::mount(Config::default());
        let first = background.next_id(Duration::from_micros(10));
        let second = background.next_id(Duration::from_micros(20));
        assert_eq!(first, ParticleId::new(0));
        assert_eq!(second, ParticleId::new(1));
    }
}
