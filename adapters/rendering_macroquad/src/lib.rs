#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Drawing Buddy.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The stage card body is drawn with Macroquad's immediate-mode UI module. All
//! UI-specific calls live inside the local `ui` module to avoid leaking
//! Macroquad UI types throughout the renderer.

mod print;
mod ui;

use self::ui::{draw_stage_panel_ui, StagePanelUiContext, StagePanelUiResult};
use anyhow::Result;
use drawing_buddy_core::ParticleKind;
use drawing_buddy_rendering::{
    CardLayout, FrameInput, Presentation, Printer, RenderingBackend, Scene, SceneParticle,
};
use drawing_buddy_system_stage_view::{Action, InputField};
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use std::{fmt, time::Duration};
use tracing::{info, warn};

pub use self::print::PngPrinter;

const CARD_MARGIN: f32 = 32.0;
const HEADER_HEIGHT: f32 = 72.0;
const TITLE_FONT_SIZE: f32 = 30.0;

/// Tracks UI-sourced interactions so they can be delivered with the next frame's input.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct StagePanelInputState {
    actions: Vec<Action>,
    edits: Vec<(InputField, String)>,
}

impl StagePanelInputState {
    /// Records a button or option press observed while rendering the panel.
    pub fn register_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Records the new contents of a text input observed while rendering the panel.
    ///
    /// Only the latest contents of each field are kept.
    pub fn register_edit(&mut self, field: InputField, text: String) {
        self.edits.retain(|(existing, _)| *existing != field);
        self.edits.push((field, text));
    }

    /// Returns the latched interactions as frame input, clearing the latch so
    /// every interaction is delivered once.
    pub fn take_frame_input(&mut self, quit_requested: bool, viewport: Vec2) -> FrameInput {
        FrameInput {
            edits: std::mem::take(&mut self.edits),
            actions: std::mem::take(&mut self.actions),
            quit_requested,
            viewport: Some(viewport),
        }
    }

    fn absorb(&mut self, result: StagePanelUiResult) {
        for (field, text) in result.edits {
            self.register_edit(field, text);
        }
        for action in result.actions {
            self.register_action(action);
        }
    }
}

/// Print request carried over to the next frame.
///
/// Macroquad draws the immediate-mode UI when the frame ends, so a capture
/// taken while the frame is being built would miss the stage panel. Requests
/// are therefore deferred until the following frame starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PendingCapture {
    pending: bool,
}

impl PendingCapture {
    /// Moves a print request raised by the scene into the pending slot.
    fn schedule(&mut self, scene: &mut Scene) {
        if scene.print_requested {
            scene.print_requested = false;
            self.pending = true;
        }
    }

    /// Returns whether a capture is due, clearing the request.
    fn take_due(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Rendering backend implemented on top of macroquad.
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    window_size: (i32, i32),
    printer: Option<Box<dyn Printer>>,
}

impl fmt::Debug for MacroquadBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroquadBackend")
            .field("swap_interval", &self.swap_interval)
            .field("window_size", &self.window_size)
            .field("printer", &self.printer.is_some())
            .finish()
    }
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            window_size: (1_280, 800),
            printer: None,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        self
    }

    /// Installs the printer invoked when a scene requests a print.
    #[must_use]
    pub fn with_printer<P>(mut self, printer: P) -> Self
    where
        P: Printer + 'static,
    {
        self.printer = Some(Box::new(printer));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            window_size: (window_width, window_height),
            printer,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        info!(window_width, window_height, "opening macroquad window");

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut printer = printer;
            let mut panel_input = StagePanelInputState::default();
            let mut capture = PendingCapture::default();
            let background = to_macroquad_color(clear_color);

            loop {
                if capture.take_due() {
                    print_scene(printer.as_deref_mut(), &scene);
                }

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let quit_requested = is_key_pressed(KeyCode::Escape);
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = panel_input
                    .take_frame_input(quit_requested, Vec2::new(screen_width, screen_height));

                update_scene(frame_dt, frame_input, &mut scene);
                if quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                for particle in scene.particle_poses(Vec2::new(screen_width, screen_height)) {
                    draw_particle(&particle);
                }

                let frame = CardFrame::new(&scene.card, screen_width, screen_height);
                draw_card(&scene, &frame);

                let mut stage_panel_ui = macroquad::ui::root_ui();
                let result = draw_stage_panel_ui(
                    &mut stage_panel_ui,
                    StagePanelUiContext {
                        origin: to_macroquad_vec2(frame.body_origin()),
                        size: to_macroquad_vec2(frame.body_size()),
                        background: to_macroquad_color(scene.card.body_color),
                        accent: to_macroquad_color(scene.card.header_color),
                        accent_hovered: to_macroquad_color(scene.card.header_color.lighten(0.15)),
                        accent_inactive: to_macroquad_color(scene.card.header_color.lighten(0.5)),
                    },
                    &scene.view,
                );
                drop(stage_panel_ui);
                panel_input.absorb(result);

                capture.schedule(&mut scene);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn print_scene(printer: Option<&mut (dyn Printer + 'static)>, scene: &Scene) {
    let Some(printer) = printer else {
        warn!(stage = %scene.view.stage, "print requested without a configured printer");
        return;
    };

    match printer.print(scene) {
        Ok(path) => info!(
            path = %path.display(),
            stage = %scene.view.stage,
            "captured drawing for printing"
        ),
        Err(error) => warn!("print capture failed: {error:#}"),
    }
}

/// Screen-space placement of the stage card.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CardFrame {
    origin: Vec2,
    size: Vec2,
    padding: f32,
}

impl CardFrame {
    fn new(card: &CardLayout, screen_width: f32, screen_height: f32) -> Self {
        let width = card.width_for((screen_width - 2.0 * CARD_MARGIN).max(0.0));
        let height = (screen_height - 2.0 * CARD_MARGIN).max(HEADER_HEIGHT);
        Self {
            origin: Vec2::new(((screen_width - width) / 2.0).max(0.0), CARD_MARGIN),
            size: Vec2::new(width, height),
            padding: card.padding,
        }
    }

    fn header_size(&self) -> Vec2 {
        Vec2::new(self.size.x, HEADER_HEIGHT)
    }

    fn body_origin(&self) -> Vec2 {
        self.origin + Vec2::new(0.0, HEADER_HEIGHT)
    }

    fn body_size(&self) -> Vec2 {
        Vec2::new(self.size.x, (self.size.y - HEADER_HEIGHT).max(0.0))
    }

    fn title_baseline(&self) -> Vec2 {
        self.origin + Vec2::new(self.padding, HEADER_HEIGHT / 2.0 + TITLE_FONT_SIZE / 3.0)
    }
}

fn draw_card(scene: &Scene, frame: &CardFrame) {
    let header = frame.header_size();
    macroquad::shapes::draw_rectangle(
        frame.origin.x,
        frame.origin.y,
        header.x,
        header.y,
        to_macroquad_color(scene.card.header_color),
    );

    let baseline = frame.title_baseline();
    let _ = macroquad::text::draw_text(
        &scene.view.title,
        baseline.x,
        baseline.y,
        TITLE_FONT_SIZE,
        macroquad::color::WHITE,
    );
}

fn draw_particle(particle: &SceneParticle) {
    let color = to_macroquad_color(particle.color);
    for [a, b, c] in particle_triangles(particle) {
        macroquad::shapes::draw_triangle(
            to_macroquad_vec2(a),
            to_macroquad_vec2(b),
            to_macroquad_vec2(c),
            color,
        );
    }
}

/// Outline of a particle icon as screen-space triangles.
///
/// Icons are modelled pointing up around their centre and rotated by the
/// particle's rotation.
fn particle_triangles(particle: &SceneParticle) -> Vec<[Vec2; 3]> {
    let (half_width, body_top, body_bottom, tip) = match particle.kind {
        ParticleKind::Pencil => (4.0, -12.0, 20.0, -20.0),
        ParticleKind::Crayon => (7.0, -8.0, 14.0, -14.0),
    };

    let model = [
        [
            Vec2::new(-half_width, body_top),
            Vec2::new(half_width, body_top),
            Vec2::new(half_width, body_bottom),
        ],
        [
            Vec2::new(-half_width, body_top),
            Vec2::new(half_width, body_bottom),
            Vec2::new(-half_width, body_bottom),
        ],
        [
            Vec2::new(-half_width, body_top),
            Vec2::new(0.0, tip),
            Vec2::new(half_width, body_top),
        ],
    ];

    let rotation = Vec2::from_angle(particle.rotation);
    model
        .into_iter()
        .map(|triangle| triangle.map(|corner| particle.position + rotation.rotate(corner)))
        .collect()
}

fn to_macroquad_vec2(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: drawing_buddy_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawing_buddy_rendering::Color;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec2_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn particle(kind: ParticleKind, rotation: f32) -> SceneParticle {
        SceneParticle {
            kind,
            position: Vec2::new(100.0, 200.0),
            rotation,
            color: Color::from_rgb_u8(255, 0, 0),
        }
    }

    fn card() -> CardLayout {
        CardLayout::new(
            CardLayout::DEFAULT_MAX_WIDTH,
            24.0,
            Color::from_rgb_u8(168, 85, 247),
            Color::from_rgb_u8(255, 255, 255),
        )
        .expect("valid card")
    }

    #[test]
    fn unrotated_pencil_tip_points_up() {
        let triangles = particle_triangles(&particle(ParticleKind::Pencil, 0.0));
        assert_eq!(triangles.len(), 3);
        assert_vec2_close(triangles[2][1], Vec2::new(100.0, 180.0));
    }

    #[test]
    fn quarter_turn_rotates_tip_sideways() {
        let triangles = particle_triangles(&particle(ParticleKind::Crayon, FRAC_PI_2));
        assert_vec2_close(triangles[2][1], Vec2::new(114.0, 200.0));
    }

    #[test]
    fn card_frame_is_centred_and_capped() {
        let frame = CardFrame::new(&card(), 1_280.0, 800.0);
        assert_eq!(frame.size.x, CardLayout::DEFAULT_MAX_WIDTH);
        assert_eq!(frame.origin.x, (1_280.0 - CardLayout::DEFAULT_MAX_WIDTH) / 2.0);
        assert_eq!(frame.body_origin().y, CARD_MARGIN + HEADER_HEIGHT);
        assert_eq!(frame.body_size().y, 800.0 - 2.0 * CARD_MARGIN - HEADER_HEIGHT);
    }

    #[test]
    fn card_frame_shrinks_on_narrow_screens() {
        let frame = CardFrame::new(&card(), 400.0, 300.0);
        assert_eq!(frame.size.x, 400.0 - 2.0 * CARD_MARGIN);
        assert_eq!(frame.origin.x, CARD_MARGIN);
    }

    #[test]
    fn panel_input_keeps_latest_edit_per_field() {
        let mut state = StagePanelInputState::default();
        state.absorb(StagePanelUiResult {
            actions: vec![],
            edits: vec![(InputField::Theme, "Sp".to_owned())],
        });
        state.absorb(StagePanelUiResult {
            actions: vec![Action::ConfirmTheme],
            edits: vec![(InputField::Theme, "Space".to_owned())],
        });

        let viewport = Vec2::new(1_920.0, 1_080.0);
        let input = state.take_frame_input(false, viewport);
        assert_eq!(input.edits, vec![(InputField::Theme, "Space".to_owned())]);
        assert_eq!(input.actions, vec![Action::ConfirmTheme]);
        assert_eq!(input.viewport, Some(viewport));
        assert_eq!(
            state.take_frame_input(false, viewport),
            FrameInput {
                viewport: Some(viewport),
                ..FrameInput::default()
            }
        );
    }

    #[test]
    fn print_capture_waits_for_the_next_frame() {
        let mut scene = Scene::new(
            drawing_buddy_system_stage_view::StageViews.derive(&drawing_buddy_world::Wizard::new()),
            card(),
        );
        let mut capture = PendingCapture::default();

        capture.schedule(&mut scene);
        assert!(!capture.take_due(), "nothing requested yet");

        scene.print_requested = true;
        capture.schedule(&mut scene);
        assert!(!scene.print_requested, "request moves out of the scene");
        assert!(capture.take_due());
        assert!(!capture.take_due(), "each request captures once");
    }
}
