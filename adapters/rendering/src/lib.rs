#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Drawing Buddy adapters.

use anyhow::Result as AnyResult;
use drawing_buddy_core::{Command, ParticleColor, ParticleItem, ParticleKind};
use drawing_buddy_system_stage_view::{Action, InputField, StageView};
use glam::Vec2;
use std::{error::Error, fmt, path::PathBuf, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts a hue-based particle color into an opaque RGB color.
    #[must_use]
    pub fn from_hsl(color: ParticleColor) -> Self {
        let hue = color.hue.rem_euclid(360.0);
        let saturation = color.saturation.clamp(0.0, 1.0);
        let lightness = color.lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (red, green, blue) = match sector as u32 {
            0 => (chroma, secondary, 0.0),
            1 => (secondary, chroma, 0.0),
            2 => (0.0, chroma, secondary),
            3 => (0.0, secondary, chroma),
            4 => (secondary, 0.0, chroma),
            _ => (chroma, 0.0, secondary),
        };
        let offset = lightness - chroma / 2.0;

        Self::new(red + offset, green + offset, blue + offset, 1.0)
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Text inputs whose contents changed this frame, with their new contents.
    pub edits: Vec<(InputField, String)>,
    /// Buttons and options pressed this frame, in press order.
    pub actions: Vec<Action>,
    /// Whether the adapter detected a quit request on this frame.
    pub quit_requested: bool,
    /// Size of the drawable area in screen units, when the adapter knows it.
    pub viewport: Option<Vec2>,
}

impl FrameInput {
    /// Commands to submit to the wizard, edits first so confirmations see the new text.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.edits
            .iter()
            .map(|(field, text)| field.edit_command(text.clone()))
            .chain(self.actions.iter().map(|action| action.command()))
            .collect()
    }
}

/// Layout of the card that hosts the stage content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    /// Maximum card width in screen units.
    pub max_width: f32,
    /// Inner padding in screen units.
    pub padding: f32,
    /// Header background.
    pub header_color: Color,
    /// Body background.
    pub body_color: Color,
}

impl CardLayout {
    /// Default maximum card width.
    pub const DEFAULT_MAX_WIDTH: f32 = 672.0;

    /// Creates a new card layout descriptor.
    ///
    /// Returns an error when the width is not positive or the padding leaves
    /// no room for content.
    pub fn new(
        max_width: f32,
        padding: f32,
        header_color: Color,
        body_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if max_width <= 0.0 {
            return Err(RenderingError::InvalidCardWidth { max_width });
        }
        if padding < 0.0 || 2.0 * padding >= max_width {
            return Err(RenderingError::InvalidPadding { padding, max_width });
        }

        Ok(Self {
            max_width,
            padding,
            header_color,
            body_color,
        })
    }

    /// Card width for the provided screen width.
    #[must_use]
    pub fn width_for(&self, screen_width: f32) -> f32 {
        self.max_width.min(screen_width.max(0.0))
    }

    /// Width available to content inside the padding.
    #[must_use]
    pub fn content_width_for(&self, screen_width: f32) -> f32 {
        (self.width_for(screen_width) - 2.0 * self.padding).max(0.0)
    }
}

/// Screen-space particle ready to be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParticle {
    /// Icon to draw.
    pub kind: ParticleKind,
    /// Center of the icon in screen units.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Fill color.
    pub color: Color,
}

/// Scene description combining the active stage view and the particle background.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Content of the active stage.
    pub view: StageView,
    /// Live particles in spawn order.
    pub particles: Vec<ParticleItem>,
    /// Simulated time elapsed since the particle background mounted.
    pub clock: Duration,
    /// Layout of the stage card.
    pub card: CardLayout,
    /// Set when the host should capture the next presented frame for printing.
    pub print_requested: bool,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(view: StageView, card: CardLayout) -> Self {
        Self {
            view,
            particles: Vec::new(),
            clock: Duration::ZERO,
            card,
            print_requested: false,
        }
    }

    /// Projects every particle into screen space for the provided viewport.
    ///
    /// Positions derive from each particle's age; the particles themselves
    /// are never mutated.
    #[must_use]
    pub fn particle_poses(&self, viewport: Vec2) -> Vec<SceneParticle> {
        self.particles
            .iter()
            .map(|item| {
                let age = self.clock.saturating_sub(item.spawned_at);
                let pose = item.pose_at(age, viewport.y);
                SceneParticle {
                    kind: item.kind,
                    position: Vec2::new(pose.x, pose.y),
                    rotation: pose.rotation_degrees.to_radians(),
                    color: Color::from_hsl(item.color),
                }
            })
            .collect()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Drawing Buddy scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Host-side sink for print requests raised by the wizard.
pub trait Printer {
    /// Captures the currently presented frame, returning where it was written.
    fn print(&mut self, scene: &Scene) -> AnyResult<PathBuf>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Card width must be positive.
    InvalidCardWidth {
        /// Provided width that failed validation.
        max_width: f32,
    },
    /// Padding must be non-negative and leave room for content.
    InvalidPadding {
        /// Provided padding that failed validation.
        padding: f32,
        /// Card width the padding was checked against.
        max_width: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCardWidth { max_width } => {
                write!(f, "card width must be positive (received {max_width})")
            }
            Self::InvalidPadding { padding, max_width } => write!(
                f,
                "card padding {padding} leaves no room for content in a card {max_width} wide"
            ),
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use drawing_buddy_core::{ParticleId, SpinDirection, Stage};
    use drawing_buddy_system_stage_view::StageViews;
    use drawing_buddy_world::Wizard;

    fn card() -> CardLayout {
        CardLayout::new(
            CardLayout::DEFAULT_MAX_WIDTH,
            24.0,
            Color::from_rgb_u8(168, 85, 247),
            Color::from_rgb_u8(255, 255, 255),
        )
        .expect("valid card")
    }

    fn assert_color_close(actual: Color, expected: Color) {
        for (a, e) in [
            (actual.red, expected.red),
            (actual.green, expected.green),
            (actual.blue, expected.blue),
        ] {
            assert!((a - e).abs() < 1e-4, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn card_creation_rejects_degenerate_layouts() {
        let white = Color::from_rgb_u8(255, 255, 255);
        assert!(matches!(
            CardLayout::new(0.0, 8.0, white, white),
            Err(RenderingError::InvalidCardWidth { .. })
        ));
        assert!(matches!(
            CardLayout::new(100.0, 50.0, white, white),
            Err(RenderingError::InvalidPadding { .. })
        ));
    }

    #[test]
    fn card_width_shrinks_with_screen() {
        let card = card();
        assert_eq!(card.width_for(2_000.0), CardLayout::DEFAULT_MAX_WIDTH);
        assert_eq!(card.width_for(400.0), 400.0);
        assert_eq!(card.content_width_for(400.0), 352.0);
    }

    #[test]
    fn hsl_primaries_convert_to_rgb() {
        let pure = |hue| ParticleColor {
            hue,
            saturation: 1.0,
            lightness: 0.5,
        };
        assert_color_close(Color::from_hsl(pure(0.0)), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_color_close(Color::from_hsl(pure(120.0)), Color::new(0.0, 1.0, 0.0, 1.0));
        assert_color_close(Color::from_hsl(pure(240.0)), Color::new(0.0, 0.0, 1.0, 1.0));
        assert_color_close(
            Color::from_hsl(ParticleColor::from_hue(60.0)),
            Color::new(0.88, 0.88, 0.32, 1.0),
        );
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let accent = Color::new(0.5, 0.0, 1.0, 0.8);
        assert_color_close(accent.lighten(0.5), Color::new(0.75, 0.5, 1.0, 1.0));
        assert_eq!(accent.lighten(0.5).alpha, 0.8);
        assert_eq!(accent.lighten(-1.0), accent);
        assert_color_close(accent.lighten(2.0), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn frame_input_applies_edits_before_actions() {
        let input = FrameInput {
            edits: vec![(InputField::ArtistName, "Ivy".to_owned())],
            actions: vec![Action::ConfirmArtistName],
            ..FrameInput::default()
        };
        assert_eq!(
            input.commands(),
            vec![
                Command::EditArtistName {
                    text: "Ivy".to_owned()
                },
                Command::ConfirmArtistName,
            ]
        );
    }

    #[test]
    fn particle_poses_follow_scene_clock() {
        let mut scene = Scene::new(StageViews.derive(&Wizard::new()), card());
        assert_eq!(scene.view.stage, Stage::Welcome);
        scene.particles.push(ParticleItem {
            id: ParticleId::new(1_000),
            horizontal_position: 300.0,
            color: ParticleColor::from_hue(0.0),
            kind: ParticleKind::Crayon,
            spin_direction: SpinDirection::Clockwise,
            spin_amount: 180.0,
            fall_duration: Duration::from_secs(10),
            spin_duration: Duration::from_secs(2),
            spawned_at: Duration::from_secs(1),
        });
        scene.clock = Duration::from_secs(6);

        let poses = scene.particle_poses(Vec2::new(800.0, 900.0));
        assert_eq!(poses.len(), 1);
        let pose = poses[0];
        assert_eq!(pose.kind, ParticleKind::Crayon);
        assert!((pose.position.x - 300.0).abs() < 1e-4);
        assert!((pose.position.y - 450.0).abs() < 1e-3);
        assert!((pose.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(scene.particles[0].horizontal_position, 300.0);
    }
}
