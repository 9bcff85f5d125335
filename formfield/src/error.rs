use formdom::SelectorError;
use thiserror::Error;

/// Errors raised while setting up field registries.
///
/// Runtime event handling never fails; these only cover parsing caller input.
#[derive(Debug, Error)]
pub enum FormError {
    /// The field selector could not be parsed.
    #[error("Invalid field selector: {0}")]
    Selector(#[from] SelectorError),

    /// The JSON configuration could not be parsed.
    #[error("Invalid field configuration: {0}")]
    Config(#[from] serde_json::Error),
}
