//! Linking errors
//!
//! Only structural mistakes surface here. A link that can't be resolved is a
//! [`crate::ResolveOutcome`], not an error.

use navigator::NavigatorError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkingError {
    #[error(
        "couldn't find a navigation context, is the navigator mounted inside a NavigationContainer?"
    )]
    MissingContext(#[source] NavigatorError),
}

impl From<NavigatorError> for LinkingError {
    fn from(err: NavigatorError) -> Self {
        LinkingError::MissingContext(err)
    }
}
