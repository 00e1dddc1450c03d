/// Defines where a comma ends a candidate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommaSplitting {
    /// Every comma ends a candidate, including commas inside parentheses
    #[default]
    Everywhere,
    /// Only commas outside any parentheses end a candidate
    TopLevelOnly,
}

/// SizesConfig holds the configuration for tokenizing and selecting
#[derive(Clone, Debug, Default)]
pub struct SizesConfig {
    /// How commas split the attribute into candidates
    pub comma_splitting: CommaSplitting,
    /// Optional origin of the attribute (element, file or url), used in log output
    pub source: Option<String>,
}

impl SizesConfig {
    /// Configuration that only splits candidates on commas outside parentheses
    #[must_use]
    pub fn strict() -> Self {
        Self {
            comma_splitting: CommaSplitting::TopLevelOnly,
            ..Default::default()
        }
    }
}
