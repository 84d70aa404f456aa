#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives the content shown for the active wizard stage.
//!
//! Each stage maps to a title and an ordered list of [`Element`] values. Every
//! interactive element carries an [`Action`] or [`InputField`] that converts
//! into exactly one [`Command`], so renderers never construct commands by hand.

use drawing_buddy_core::{AgeGroup, Command, Stage, ThemeOption, GENERATING_PREVIEW};
use drawing_buddy_world::{query, Wizard};

/// Fallback shown on the generating stage when no extra features were entered.
pub const NO_EXTRA_FEATURES: &str = "No additional features";

/// Button or option press that a renderer can report back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Start the adventure.
    Begin,
    /// Pick an age band.
    SelectAgeGroup(AgeGroup),
    /// Confirm the artist name.
    ConfirmArtistName,
    /// Pick a catalog theme.
    SelectTheme(ThemeOption),
    /// Confirm a typed theme.
    ConfirmTheme,
    /// Confirm the extra features.
    ConfirmExtraFeatures,
    /// Reveal the generated drawing.
    RevealDrawing,
    /// Print the current view.
    Print,
    /// Save the drawing to the gallery.
    SaveDrawing,
    /// Delete control of a gallery slot.
    DeleteGalleryItem(usize),
    /// Start another drawing.
    CreateAnother,
}

impl Action {
    /// Command submitted to the wizard when the action fires.
    #[must_use]
    pub fn command(self) -> Command {
        match self {
            Self::Begin => Command::Begin,
            Self::SelectAgeGroup(age_group) => Command::SelectAgeGroup { age_group },
            Self::ConfirmArtistName => Command::ConfirmArtistName,
            Self::SelectTheme(option) => Command::SelectTheme { option },
            Self::ConfirmTheme => Command::ConfirmTheme,
            Self::ConfirmExtraFeatures => Command::ConfirmExtraFeatures,
            Self::RevealDrawing => Command::RevealDrawing,
            Self::Print => Command::Print,
            Self::SaveDrawing => Command::SaveDrawing,
            Self::DeleteGalleryItem(slot) => Command::DeleteGalleryItem { slot },
            Self::CreateAnother => Command::CreateAnother,
        }
    }
}

/// Free-text inputs bound to wizard fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Bound to the artist name.
    ArtistName,
    /// Bound to the theme.
    Theme,
    /// Bound to the extra features.
    ExtraFeatures,
}

impl InputField {
    /// Command submitted when the input's text changes.
    #[must_use]
    pub fn edit_command(self, text: String) -> Command {
        match self {
            Self::ArtistName => Command::EditArtistName { text },
            Self::Theme => Command::EditTheme { text },
            Self::ExtraFeatures => Command::EditExtraFeatures { text },
        }
    }
}

/// Single piece of content displayed on a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// Static paragraph.
    Text(String),
    /// Single-line text input.
    TextInput {
        /// Field the input edits.
        field: InputField,
        /// Hint shown while the input is empty.
        placeholder: &'static str,
        /// Current field value.
        value: String,
    },
    /// Push button.
    Button {
        /// Caption of the button.
        label: &'static str,
        /// Action fired on press.
        action: Action,
        /// Whether the button accepts presses.
        enabled: bool,
    },
    /// Entry of a selectable catalog.
    Choice {
        /// Caption of the option.
        label: String,
        /// Secondary description, if any.
        detail: Option<&'static str>,
        /// Action fired on press.
        action: Action,
    },
    /// Image served by the placeholder collaborator.
    Image {
        /// Path of the image.
        source: String,
        /// Alternative text.
        caption: &'static str,
    },
    /// Gallery entry with a delete control.
    GallerySlot {
        /// Zero-based slot index.
        index: usize,
        /// Path of the displayed image.
        source: String,
        /// Action bound to the delete control.
        delete: Action,
    },
}

/// Derived content for the active stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageView {
    /// Stage the view was derived from.
    pub stage: Stage,
    /// Heading of the card.
    pub title: String,
    /// Body content in display order.
    pub elements: Vec<Element>,
}

impl StageView {
    /// Iterator over every action the view offers, enabled or not.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.elements.iter().filter_map(|element| match element {
            Element::Button { action, .. }
            | Element::Choice { action, .. }
            | Element::GallerySlot { delete: action, .. } => Some(*action),
            _ => None,
        })
    }
}

/// Produces the stage view for a wizard snapshot.
#[derive(Debug, Default)]
pub struct StageViews;

impl StageViews {
    /// Derives the title and elements of the wizard's active stage.
    #[must_use]
    pub fn derive(&self, wizard: &Wizard) -> StageView {
        let stage = query::stage(wizard);
        let artist_name = query::artist_name(wizard);
        let theme = query::theme(wizard);

        let (title, elements) = match stage {
            Stage::Welcome => (
                "Welcome to Drawing Buddy Adventure! 🌈".to_owned(),
                vec![
                    Element::Text("Are you ready to go on a magical drawing quest?".to_owned()),
                    button("Start Adventure! ✨", Action::Begin, true),
                ],
            ),
            Stage::Age => {
                let mut elements = vec![Element::Text(
                    "Pick your age group so we can make the perfect drawing for you!".to_owned(),
                )];
                elements.extend(AgeGroup::ALL.into_iter().map(|age_group| {
                    let complexity = age_group.complexity();
                    Element::Choice {
                        label: format!("{} years · {}", age_group.key(), complexity.complexity),
                        detail: Some(complexity.detail),
                        action: Action::SelectAgeGroup(age_group),
                    }
                }));
                ("How old is our amazing artist? 🎂".to_owned(), elements)
            }
            Stage::Name => (
                "Choose Your Artist Name! 🎨".to_owned(),
                vec![
                    Element::TextInput {
                        field: InputField::ArtistName,
                        placeholder: "What shall we call you, brave artist?",
                        value: artist_name.to_owned(),
                    },
                    button(
                        "Continue Adventure! 🚀",
                        Action::ConfirmArtistName,
                        query::can_confirm_artist_name(wizard),
                    ),
                ],
            ),
            Stage::DrawingPrompt => {
                let mut elements: Vec<Element> = ThemeOption::ALL
                    .into_iter()
                    .map(|option| Element::Choice {
                        label: option.label().to_owned(),
                        detail: None,
                        action: Action::SelectTheme(option),
                    })
                    .collect();
                elements.extend([
                    Element::Text("Or type your own magical world!".to_owned()),
                    Element::TextInput {
                        field: InputField::Theme,
                        placeholder: "My magical world is...",
                        value: theme.to_owned(),
                    },
                    button(
                        "Create My World! 🌈",
                        Action::ConfirmTheme,
                        query::can_confirm_theme(wizard),
                    ),
                ]);
                (
                    format!("Hello, {artist_name}! What magical world shall we create? 🌟"),
                    elements,
                )
            }
            Stage::ExpandPrompt => (
                format!("Make your {theme} world extra magical! ✨"),
                vec![
                    Element::Text("Want to add anything special to your drawing?".to_owned()),
                    Element::TextInput {
                        field: InputField::ExtraFeatures,
                        placeholder: "Rainbows, friendly dragons, sparkly stars...",
                        value: query::extra_features(wizard).to_owned(),
                    },
                    button("Let's Draw! 🎨", Action::ConfirmExtraFeatures, true),
                ],
            ),
            Stage::Generating => {
                let extra_features = query::extra_features(wizard);
                let extras = if extra_features.is_empty() {
                    NO_EXTRA_FEATURES.to_owned()
                } else {
                    format!("With {extra_features}")
                };
                (
                    format!("Magical Drawing Time for {artist_name}! ✨"),
                    vec![
                        Element::Text(format!("Creating your {theme} adventure...")),
                        Element::Text(extras),
                        Element::Image {
                            source: GENERATING_PREVIEW.to_owned(),
                            caption: "Generating",
                        },
                        button("Reveal My Drawing! 🎉", Action::RevealDrawing, true),
                    ],
                )
            }
            Stage::Coloring => {
                let complexity = query::age_complexity(wizard);
                let mut elements = Vec::with_capacity(5);
                if let Some(image) = query::generated_image(wizard) {
                    elements.push(Element::Image {
                        source: image.as_str().to_owned(),
                        caption: "Your drawing",
                    });
                }
                elements.extend([
                    Element::Text(query::coloring_guidance(wizard).to_owned()),
                    Element::Text(format!(
                        "{}: use up to {} colours.",
                        complexity.complexity, complexity.max_colors
                    )),
                    button("Save My Masterpiece! 💾", Action::SaveDrawing, true),
                    button("Print to Color! 🖨️", Action::Print, true),
                ]);
                (format!("Color Your {theme} Adventure! 🖍️"), elements)
            }
            Stage::Save => {
                let mut elements = vec![Element::Text("Your drawing is saved!".to_owned())];
                elements.extend(query::gallery(wizard).into_iter().enumerate().map(
                    |(index, image)| Element::GallerySlot {
                        index,
                        source: image.as_str().to_owned(),
                        delete: Action::DeleteGalleryItem(index),
                    },
                ));
                elements.push(button(
                    "Create Another Adventure! 🚀",
                    Action::CreateAnother,
                    true,
                ));
                (format!("{artist_name}'s Art Gallery 🖼️"), elements)
            }
        };

        StageView {
            stage,
            title,
            elements,
        }
    }
}

fn button(label: &'static str, action: Action, enabled: bool) -> Element {
    Element::Button {
        label,
        action,
        enabled,
    }
}
