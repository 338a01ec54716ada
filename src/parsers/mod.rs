//! Document generators.
//!
//! Each generator reads the tables it needs through a [`TableProvider`],
//! renders one wiki page per source row, and returns the pages together with
//! the file name and chunk size they should be saved with. Generators never
//! write files or talk to the console themselves.

mod ge_achievement;

use crate::progress::Progress;
use crate::tables::{TableError, TableProvider};
use strum::{Display, EnumIter, EnumString};

pub use ge_achievement::DEFAULT_PATCH;

/// The available document generators, named as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Generator {
    /// Gamer Escape achievement infobox pages
    #[strum(serialize = "GE:Achievement")]
    GeAchievement,
}

impl Generator {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GeAchievement => "Gamer Escape achievement infobox pages",
        }
    }

    /// Run the generator over the tables from `tables`.
    pub async fn generate<P: TableProvider>(
        self,
        tables: &mut P,
        options: &GeneratorOptions,
        progress: &dyn Progress,
    ) -> Result<GeneratedDocument, TableError> {
        match self {
            Self::GeAchievement => ge_achievement::generate(tables, options, progress).await,
        }
    }
}

/// Knobs shared by all generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Game patch the pages are generated for
    pub patch: String,

    /// Wrap pages in pywikibot `{{-start-}}`/`{{-stop-}}` markers instead of edit links
    pub bot: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            patch: DEFAULT_PATCH.to_string(),
            bot: true,
        }
    }
}

/// The pages produced by one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub filename: String,
    pub records: Vec<String>,
    pub chunk_size: usize,
}
