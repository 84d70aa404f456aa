use std::time::Duration;

use drawing_buddy_core::{Event, ParticleEvent};
use drawing_buddy_rendering::{FrameInput, Scene};
use drawing_buddy_system_particles::{Config as ParticleConfig, ParticleBackground};
use drawing_buddy_system_stage_view::{StageView, StageViews};
use drawing_buddy_world::{self as world, Wizard};
use tracing::{debug, info};

/// Drives the wizard and the particle background from frame input.
#[derive(Debug)]
pub(crate) struct Session {
    wizard: Wizard,
    views: StageViews,
    background: ParticleBackground,
    clock: Duration,
    events: Vec<Event>,
    particle_events: Vec<ParticleEvent>,
}

impl Session {
    /// Creates a session on the welcome stage with a freshly mounted background.
    pub(crate) fn new(particles: ParticleConfig) -> Self {
        Self {
            wizard: Wizard::new(),
            views: StageViews,
            background: ParticleBackground::mount(particles),
            clock: Duration::ZERO,
            events: Vec::new(),
            particle_events: Vec::new(),
        }
    }

    /// View of the active stage.
    pub(crate) fn view(&self) -> StageView {
        self.views.derive(&self.wizard)
    }

    /// Applies one frame of input and refreshes `scene`.
    ///
    /// Commands are applied in input order before the background advances.
    /// The background spawns across the reported viewport width. A quit
    /// request unmounts the background.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.events.clear();
        for command in input.commands() {
            world::apply(&mut self.wizard, command, &mut self.events);
        }

        for event in &self.events {
            match event {
                Event::PrintRequested => {
                    info!("print requested");
                    scene.print_requested = true;
                }
                Event::DrawingGenerated { image } => info!(%image, "drawing generated"),
                Event::StageChanged { .. }
                | Event::AgeGroupSelected { .. }
                | Event::ArtistNameEdited { .. }
                | Event::ThemeEdited { .. }
                | Event::ExtraFeaturesEdited { .. }
                | Event::DrawingCleared => {}
            }
        }

        if input.quit_requested {
            self.background.unmount();
            info!("particle background unmounted");
        } else if self.background.is_mounted() {
            if let Some(viewport) = input.viewport {
                self.background.resize(viewport.x);
            }
            self.clock = self.clock.saturating_add(dt);
            self.particle_events.clear();
            self.background.advance(dt, &mut self.particle_events);
            if !self.particle_events.is_empty() {
                debug!(
                    count = self.particle_events.len(),
                    live = self.background.items().len(),
                    "particle background updated"
                );
            }
        }

        if !self.events.is_empty() {
            scene.view = self.view();
        }
        scene.particles.clear();
        scene.particles.extend_from_slice(self.background.items());
        scene.clock = self.clock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawing_buddy_core::{AgeGroup, Stage, ThemeOption};
    use drawing_buddy_rendering::{CardLayout, Color};
    use drawing_buddy_system_stage_view::{Action, InputField};
    use glam::Vec2;

    fn session_and_scene() -> (Session, Scene) {
        let session = Session::new(ParticleConfig::new(
            Duration::from_secs(1),
            Duration::from_secs(5),
            800.0,
            21,
        ));
        let card = CardLayout::new(
            CardLayout::DEFAULT_MAX_WIDTH,
            24.0,
            Color::from_rgb_u8(168, 85, 247),
            Color::from_rgb_u8(255, 255, 255),
        )
        .expect("valid card");
        let scene = Scene::new(session.view(), card);
        (session, scene)
    }

    fn actions(actions: Vec<Action>) -> FrameInput {
        FrameInput {
            actions,
            ..FrameInput::default()
        }
    }

    #[test]
    fn frame_applies_actions_and_refreshes_view() {
        let (mut session, mut scene) = session_and_scene();
        session.frame(
            Duration::from_millis(16),
            actions(vec![
                Action::Begin,
                Action::SelectAgeGroup(AgeGroup::TenPlus),
            ]),
            &mut scene,
        );
        assert_eq!(scene.view.stage, Stage::Name);

        session.frame(
            Duration::from_millis(16),
            FrameInput {
                edits: vec![(InputField::ArtistName, "Ivy".to_owned())],
                actions: vec![Action::ConfirmArtistName],
                ..FrameInput::default()
            },
            &mut scene,
        );
        assert_eq!(scene.view.stage, Stage::DrawingPrompt);
        assert!(scene.view.title.contains("Ivy"));
    }

    #[test]
    fn print_action_flags_scene_on_coloring_stage_only() {
        let (mut session, mut scene) = session_and_scene();
        session.frame(Duration::ZERO, actions(vec![Action::Print]), &mut scene);
        assert!(!scene.print_requested);

        let frames = [
            actions(vec![
                Action::Begin,
                Action::SelectAgeGroup(AgeGroup::ThreeToFour),
            ]),
            FrameInput {
                edits: vec![(InputField::ArtistName, "Ivy".to_owned())],
                actions: vec![Action::ConfirmArtistName],
                ..FrameInput::default()
            },
            actions(vec![
                Action::SelectTheme(ThemeOption::SpaceExploration),
                Action::ConfirmExtraFeatures,
                Action::RevealDrawing,
                Action::Print,
            ]),
        ];
        for input in frames {
            session.frame(Duration::ZERO, input, &mut scene);
        }
        assert_eq!(scene.view.stage, Stage::Coloring);
        assert!(scene.print_requested);
    }

    #[test]
    fn particles_follow_simulated_time() {
        let (mut session, mut scene) = session_and_scene();
        for _ in 0..3 {
            session.frame(Duration::from_secs(1), FrameInput::default(), &mut scene);
        }
        assert_eq!(scene.particles.len(), 3);
        assert_eq!(scene.clock, Duration::from_secs(3));
    }

    #[test]
    fn particles_spawn_across_the_reported_viewport() {
        let (mut session, mut scene) = session_and_scene();
        let window = Vec2::new(1_920.0, 1_080.0);
        for _ in 0..200 {
            session.frame(
                Duration::from_secs(1),
                FrameInput {
                    viewport: Some(window),
                    ..FrameInput::default()
                },
                &mut scene,
            );
        }

        assert_eq!(scene.particles.len(), 200);
        assert!(scene
            .particles
            .iter()
            .all(|item| (0.0..window.x).contains(&item.horizontal_position)));
        assert!(
            scene
                .particles
                .iter()
                .any(|item| item.horizontal_position > 2.0 * window.x / 3.0),
            "spawns must reach the right third of the window"
        );
    }

    #[test]
    fn quit_unmounts_background() {
        let (mut session, mut scene) = session_and_scene();
        session.frame(Duration::from_secs(2), FrameInput::default(), &mut scene);
        assert_eq!(scene.particles.len(), 2);

        session.frame(
            Duration::from_secs(2),
            FrameInput {
                quit_requested: true,
                ..FrameInput::default()
            },
            &mut scene,
        );
        assert!(scene.particles.is_empty());

        session.frame(Duration::from_secs(2), FrameInput::default(), &mut scene);
        assert!(scene.particles.is_empty());
        assert_eq!(scene.clock, Duration::from_secs(2));
    }
}
