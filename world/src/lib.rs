#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative wizard state for Drawing Buddy.
//!
//! The [`Wizard`] owns the active stage and every field the child fills in.
//! Its fields are private: [`apply`] is the only mutation path and the
//! [`query`] module is the only read path.

use drawing_buddy_core::{AgeGroup, Command, Event, ImageRef, Stage};
use tracing::debug;

/// Represents the authoritative wizard state for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wizard {
    stage: Stage,
    age_group: AgeGroup,
    artist_name: String,
    theme: String,
    extra_features: String,
    generated_image: Option<ImageRef>,
}

impl Wizard {
    /// Creates a wizard on the welcome stage with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn transition(&mut self, to: Stage, out_events: &mut Vec<Event>) {
        let from = self.stage;
        self.stage = to;
        debug!(%from, %to, "wizard stage changed");
        out_events.push(Event::StageChanged { from, to });
    }

    fn set_theme(&mut self, theme: String, out_events: &mut Vec<Event>) {
        self.theme = theme.clone();
        out_events.push(Event::ThemeEdited { theme });
    }
}

/// Applies the provided command to the wizard.
///
/// Commands that do not belong to the active stage, and confirmations whose
/// required field is still empty, leave the wizard untouched and emit nothing.
pub fn apply(wizard: &mut Wizard, command: Command, out_events: &mut Vec<Event>) {
    match (wizard.stage, command) {
        (Stage::Welcome, Command::Begin) => wizard.transition(Stage::Age, out_events),
        (Stage::Age, Command::SelectAgeGroup { age_group }) => {
            wizard.age_group = age_group;
            out_events.push(Event::AgeGroupSelected { age_group });
            wizard.transition(Stage::Name, out_events);
        }
        (Stage::Name, Command::EditArtistName { text }) => {
            wizard.artist_name = text.clone();
            out_events.push(Event::ArtistNameEdited { name: text });
        }
        (Stage::Name, Command::ConfirmArtistName) => {
            if query::can_confirm_artist_name(wizard) {
                wizard.transition(Stage::DrawingPrompt, out_events);
            }
        }
        (Stage::DrawingPrompt, Command::SelectTheme { option }) => {
            wizard.set_theme(option.short_form().to_owned(), out_events);
            wizard.transition(Stage::ExpandPrompt, out_events);
        }
        (Stage::DrawingPrompt, Command::EditTheme { text }) => {
            wizard.set_theme(text, out_events);
        }
        (Stage::DrawingPrompt, Command::ConfirmTheme) => {
            if query::can_confirm_theme(wizard) {
                wizard.transition(Stage::ExpandPrompt, out_events);
            }
        }
        (Stage::ExpandPrompt, Command::EditExtraFeatures { text }) => {
            wizard.extra_features = text.clone();
            out_events.push(Event::ExtraFeaturesEdited {
                extra_features: text,
            });
        }
        (Stage::ExpandPrompt, Command::ConfirmExtraFeatures) => {
            wizard.transition(Stage::Generating, out_events);
        }
        (Stage::Generating, Command::RevealDrawing) => {
            let image = ImageRef::placeholder(&wizard.theme, &wizard.extra_features);
            wizard.generated_image = Some(image.clone());
            out_events.push(Event::DrawingGenerated { image });
            wizard.transition(Stage::Coloring, out_events);
        }
        (Stage::Coloring, Command::Print) => out_events.push(Event::PrintRequested),
        (Stage::Coloring, Command::SaveDrawing) => wizard.transition(Stage::Save, out_events),
        (Stage::Save, Command::DeleteGalleryItem { slot }) => {
            debug!(slot, "gallery delete control has no effect");
        }
        (Stage::Save, Command::CreateAnother) => {
            wizard.theme.clear();
            wizard.extra_features.clear();
            wizard.generated_image = None;
            out_events.push(Event::DrawingCleared);
            wizard.transition(Stage::DrawingPrompt, out_events);
        }
        (stage, command) => {
            debug!(%stage, ?command, "command ignored outside its stage");
        }
    }
}

/// Query functions that provide read-only access to the wizard state.
pub mod query {
    use drawing_buddy_core::{AgeComplexity, AgeGroup, ImageRef, Stage, GALLERY_SLOTS};

    use super::Wizard;

    /// Stage currently shown to the child.
    #[must_use]
    pub fn stage(wizard: &Wizard) -> Stage {
        wizard.stage
    }

    /// Selected age band, or the display default before selection.
    #[must_use]
    pub fn age_group(wizard: &Wizard) -> AgeGroup {
        wizard.age_group
    }

    /// Complexity metadata of the selected age band.
    #[must_use]
    pub fn age_complexity(wizard: &Wizard) -> AgeComplexity {
        wizard.age_group.complexity()
    }

    /// Artist name; empty while unset.
    #[must_use]
    pub fn artist_name(wizard: &Wizard) -> &str {
        &wizard.artist_name
    }

    /// Theme; empty while unset.
    #[must_use]
    pub fn theme(wizard: &Wizard) -> &str {
        &wizard.theme
    }

    /// Optional extra features; empty while unset.
    #[must_use]
    pub fn extra_features(wizard: &Wizard) -> &str {
        &wizard.extra_features
    }

    /// Reference to the generated drawing once revealed.
    #[must_use]
    pub fn generated_image(wizard: &Wizard) -> Option<&ImageRef> {
        wizard.generated_image.as_ref()
    }

    /// Guidance text for the coloring stage, chosen by the selected age band.
    #[must_use]
    pub fn coloring_guidance(wizard: &Wizard) -> &'static str {
        wizard.age_group.coloring_guidance()
    }

    /// Gallery slots shown on the save stage.
    ///
    /// Every slot repeats the one generated drawing; the gallery does not
    /// track distinct artworks.
    #[must_use]
    pub fn gallery(wizard: &Wizard) -> Vec<&ImageRef> {
        wizard
            .generated_image
            .as_ref()
            .map(|image| vec![image; GALLERY_SLOTS])
            .unwrap_or_default()
    }

    /// Reports whether confirming the artist name would advance the wizard.
    #[must_use]
    pub fn can_confirm_artist_name(wizard: &Wizard) -> bool {
        wizard.stage == Stage::Name && !wizard.artist_name.is_empty()
    }

    /// Reports whether confirming a typed theme would advance the wizard.
    #[must_use]
    pub fn can_confirm_theme(wizard: &Wizard) -> bool {
        wizard.stage == Stage::DrawingPrompt && !wizard.theme.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wizard_starts_on_welcome_with_defaults() {
        let wizard = Wizard::new();
        assert_eq!(query::stage(&wizard), Stage::Welcome);
        assert_eq!(query::age_group(&wizard), AgeGroup::FiveToSix);
        assert!(query::artist_name(&wizard).is_empty());
        assert!(query::theme(&wizard).is_empty());
        assert!(query::extra_features(&wizard).is_empty());
        assert!(query::generated_image(&wizard).is_none());
        assert!(query::gallery(&wizard).is_empty());
    }

    #[test]
    fn reveal_builds_placeholder_from_theme_and_extras() {
        let mut wizard = Wizard {
            stage: Stage::Generating,
            theme: "Space".to_owned(),
            extra_features: "rainbow trail".to_owned(),
            ..Wizard::default()
        };
        let mut events = Vec::new();
        apply(&mut wizard, Command::RevealDrawing, &mut events);

        let expected = ImageRef::placeholder("Space", "rainbow trail");
        assert_eq!(
            expected.as_str(),
            "/api/placeholder/400/400?text=Space+rainbow%20trail"
        );
        assert_eq!(query::generated_image(&wizard), Some(&expected));
        assert_eq!(
            events,
            vec![
                Event::DrawingGenerated { image: expected },
                Event::StageChanged {
                    from: Stage::Generating,
                    to: Stage::Coloring,
                },
            ]
        );
    }

    #[test]
    fn gallery_repeats_generated_drawing() {
        let image = ImageRef::placeholder("Fairy", "");
        let wizard = Wizard {
            stage: Stage::Save,
            generated_image: Some(image.clone()),
            ..Wizard::default()
        };
        assert_eq!(query::gallery(&wizard), vec![&image, &image, &image]);
    }
}
