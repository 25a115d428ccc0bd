use safegate_classifier::ClassifyError;
use safegate_description::DescriptionError;
use safegate_primitives::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Description(#[from] DescriptionError),
}
