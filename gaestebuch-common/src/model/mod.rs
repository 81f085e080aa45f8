pub mod forum;
pub mod identity;
pub mod post;

use crate::model::{forum::InvalidPartitionKeyError, post::EmptyPostContentError};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    PartitionKey(#[from] InvalidPartitionKeyError),
    #[error(transparent)]
    PostContent(#[from] EmptyPostContentError),
}
