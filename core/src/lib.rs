#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Drawing Buddy experience.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative wizard, and pure systems. Adapters submit [`Command`] values
//! describing the action a child performed, the wizard executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what changed. Systems derive presentation data from immutable
//! queries and never mutate the wizard directly.

mod particle;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use particle::{
    ParticleColor, ParticleEvent, ParticleId, ParticleItem, ParticleKind, ParticlePose,
    SpinDirection,
};

/// Path prefix of the external placeholder image service.
pub const PLACEHOLDER_PREFIX: &str = "/api/placeholder/400/400";

/// Placeholder shown while the drawing is being "generated".
pub const GENERATING_PREVIEW: &str = "/api/placeholder/400/400?text=Generating+Magic";

/// Number of gallery slots presented on the save stage.
pub const GALLERY_SLOTS: usize = 3;

/// Screens of the wizard in forward-progression order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Stage {
    /// Greeting screen that starts the adventure.
    #[default]
    Welcome,
    /// Age band selection.
    Age,
    /// Artist name entry.
    Name,
    /// Theme selection or free-text theme entry.
    DrawingPrompt,
    /// Optional extra features for the chosen theme.
    ExpandPrompt,
    /// Display-only screen summarising the request before the reveal.
    Generating,
    /// Generated drawing with coloring guidance.
    Coloring,
    /// Gallery of saved drawings.
    Save,
}

impl Stage {
    /// Every stage in forward-progression order.
    pub const ALL: [Stage; 8] = [
        Stage::Welcome,
        Stage::Age,
        Stage::Name,
        Stage::DrawingPrompt,
        Stage::ExpandPrompt,
        Stage::Generating,
        Stage::Coloring,
        Stage::Save,
    ];

    /// Stages reachable from this stage through a single command.
    ///
    /// `Save` is the only stage whose successor precedes it.
    #[must_use]
    pub const fn successors(self) -> &'static [Stage] {
        match self {
            Self::Welcome => &[Stage::Age],
            Self::Age => &[Stage::Name],
            Self::Name => &[Stage::DrawingPrompt],
            Self::DrawingPrompt => &[Stage::ExpandPrompt],
            Self::ExpandPrompt => &[Stage::Generating],
            Self::Generating => &[Stage::Coloring],
            Self::Coloring => &[Stage::Save],
            Self::Save => &[Stage::DrawingPrompt],
        }
    }

    /// Stable identifier used in logs.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Age => "age",
            Self::Name => "name",
            Self::DrawingPrompt => "drawingPrompt",
            Self::ExpandPrompt => "expandPrompt",
            Self::Generating => "generating",
            Self::Coloring => "coloring",
            Self::Save => "save",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Age bands offered on the age stage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AgeGroup {
    /// Ages three and four.
    ThreeToFour,
    /// Ages five and six.
    #[default]
    FiveToSix,
    /// Ages seven to nine.
    SevenToNine,
    /// Ages ten and older.
    TenPlus,
}

impl AgeGroup {
    /// Every age band in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::ThreeToFour,
        AgeGroup::FiveToSix,
        AgeGroup::SevenToNine,
        AgeGroup::TenPlus,
    ];

    /// Catalog key shown to the child.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ThreeToFour => "3-4",
            Self::FiveToSix => "5-6",
            Self::SevenToNine => "7-9",
            Self::TenPlus => "10+",
        }
    }

    /// Looks up the age band with the provided catalog key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.key() == key)
    }

    /// Immutable complexity metadata attached to the band.
    #[must_use]
    pub const fn complexity(self) -> AgeComplexity {
        match self {
            Self::ThreeToFour => AgeComplexity {
                complexity: "Very Simple",
                detail: "Big, bold shapes with thick outlines",
                max_colors: 4,
            },
            Self::FiveToSix => AgeComplexity {
                complexity: "Simple",
                detail: "Easy shapes with a few fun details",
                max_colors: 6,
            },
            Self::SevenToNine => AgeComplexity {
                complexity: "Medium",
                detail: "More details and patterns to explore",
                max_colors: 8,
            },
            Self::TenPlus => AgeComplexity {
                complexity: "Detailed",
                detail: "Intricate scenes with fine details",
                max_colors: 12,
            },
        }
    }

    /// Guidance text displayed next to the drawing on the coloring stage.
    #[must_use]
    pub const fn coloring_guidance(self) -> &'static str {
        match self {
            Self::ThreeToFour => {
                "Use big crayons and fill in the large shapes with your favourite colours!"
            }
            Self::FiveToSix => "Try to stay inside the lines and give every part its own colour!",
            Self::SevenToNine => "Add patterns and stripes to make your world extra special!",
            Self::TenPlus => "Try shading and blending colours to add depth to your drawing!",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display metadata describing how detailed drawings are for an age band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgeComplexity {
    /// Short complexity descriptor.
    pub complexity: &'static str,
    /// Longer description of the drawing style.
    pub detail: &'static str,
    /// Maximum number of colors suggested for the band.
    pub max_colors: u8,
}

/// Catalog of ready-made drawing themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeOption {
    /// Underwater Kingdom.
    UnderwaterKingdom,
    /// Space Exploration.
    SpaceExploration,
    /// Magical Forest.
    MagicalForest,
    /// Dinosaur Land.
    DinosaurLand,
    /// Superhero World.
    SuperheroWorld,
    /// Fairy Tale Castle.
    FairyTaleCastle,
}

impl ThemeOption {
    /// Every catalog entry in display order.
    pub const ALL: [ThemeOption; 6] = [
        ThemeOption::UnderwaterKingdom,
        ThemeOption::SpaceExploration,
        ThemeOption::MagicalForest,
        ThemeOption::DinosaurLand,
        ThemeOption::SuperheroWorld,
        ThemeOption::FairyTaleCastle,
    ];

    /// Decorated label shown on the option button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderwaterKingdom => "Underwater Kingdom 🐠",
            Self::SpaceExploration => "Space Exploration 🚀",
            Self::MagicalForest => "Magical Forest 🌳",
            Self::DinosaurLand => "Dinosaur Land 🦖",
            Self::SuperheroWorld => "Superhero World 🦸",
            Self::FairyTaleCastle => "Fairy Tale Castle 🏰",
        }
    }

    /// Theme text stored when the option is picked: the first whitespace-delimited token.
    #[must_use]
    pub fn short_form(self) -> &'static str {
        let label = self.label();
        label.split_whitespace().next().unwrap_or(label)
    }
}

/// Reference to a placeholder drawing served by the external image service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    /// Builds the placeholder path for a theme and its optional extra features.
    ///
    /// The theme is inserted verbatim. Extra features are percent-encoded and
    /// appended after a literal `+`; the separator is omitted when they are empty.
    #[must_use]
    pub fn placeholder(theme: &str, extra_features: &str) -> Self {
        let mut path = format!("{PLACEHOLDER_PREFIX}?text={theme}");
        if !extra_features.is_empty() {
            path.push('+');
            path.push_str(&urlencoding::encode(extra_features));
        }
        Self(path)
    }

    /// Path of the referenced image.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commands that express every permissible wizard mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Leaves the welcome screen.
    Begin,
    /// Picks an age band and moves on to name entry.
    SelectAgeGroup {
        /// Band chosen by the child.
        age_group: AgeGroup,
    },
    /// Replaces the artist name with the current contents of the input.
    EditArtistName {
        /// Full text of the input field.
        text: String,
    },
    /// Confirms the artist name. Ignored while the name is empty.
    ConfirmArtistName,
    /// Picks a catalog theme and moves on to the extra features prompt.
    SelectTheme {
        /// Option chosen from the catalog.
        option: ThemeOption,
    },
    /// Replaces the theme with the current contents of the free-text input.
    EditTheme {
        /// Full text of the input field.
        text: String,
    },
    /// Confirms a typed theme. Ignored while the theme is empty.
    ConfirmTheme,
    /// Replaces the extra features with the current contents of the input.
    EditExtraFeatures {
        /// Full text of the input field.
        text: String,
    },
    /// Confirms the extra features, empty or not.
    ConfirmExtraFeatures,
    /// Produces the placeholder drawing and reveals it.
    RevealDrawing,
    /// Asks the host to print the current view.
    Print,
    /// Moves the drawing into the gallery.
    SaveDrawing,
    /// Delete control of a gallery slot. Has no effect.
    DeleteGalleryItem {
        /// Zero-based slot index.
        slot: usize,
    },
    /// Starts a new drawing while keeping the artist's age band and name.
    CreateAnother,
}

/// Events broadcast by the wizard after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The active stage changed.
    StageChanged {
        /// Stage that was active before the command.
        from: Stage,
        /// Stage that is active after the command.
        to: Stage,
    },
    /// An age band was chosen.
    AgeGroupSelected {
        /// Chosen band.
        age_group: AgeGroup,
    },
    /// The artist name input changed.
    ArtistNameEdited {
        /// New artist name.
        name: String,
    },
    /// The theme changed, either typed or picked from the catalog.
    ThemeEdited {
        /// New theme text.
        theme: String,
    },
    /// The extra features input changed.
    ExtraFeaturesEdited {
        /// New extra features text.
        extra_features: String,
    },
    /// The placeholder drawing was produced.
    DrawingGenerated {
        /// Reference to the placeholder drawing.
        image: ImageRef,
    },
    /// The host should print the current view.
    PrintRequested,
    /// Theme, extra features and drawing were reset for a new adventure.
    DrawingCleared,
}
