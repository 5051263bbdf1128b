use pharmaguard_core::InputError;
use thiserror::Error;

/// Error type for variant extraction. Individual lines never fail; this only
/// covers input that cannot be loaded or decoded at all.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Input(#[from] InputError),
}
