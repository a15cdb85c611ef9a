use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur when refreshing or reading an acceleration model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model was read before its first update.
    #[error("acceleration of `{model}` was read before the model was updated")]
    NotUpdated { model: &'static str },

    /// An underlying computation failed.
    #[error("`{model}` failed to update")]
    Update {
        model: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ModelError {
    /// Wraps an error raised while updating the named model.
    pub fn update<E: StdError + Send + Sync + 'static>(model: &'static str, err: E) -> Self {
        Self::Update {
            model,
            source: Box::new(err),
        }
    }
}
