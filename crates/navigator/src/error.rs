//! Navigator errors

use crate::NavigatorId;
use nav_core::StateError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("navigator {0} is not mounted in this container")]
    NotFound(NavigatorId),

    #[error("a root navigator is already mounted")]
    RootAlreadyMounted,

    #[error("navigator {navigator} has no route named '{route}'")]
    RouteNotFound { navigator: NavigatorId, route: String },

    #[error("route '{route}' of navigator {navigator} already hosts a navigator")]
    ChildAlreadyMounted { navigator: NavigatorId, route: String },

    #[error(transparent)]
    InvalidState(#[from] StateError),
}
