use std::borrow::Cow;

use crate::api::error::{Error, SystemError};

#[derive(thiserror::Error, Debug)]
pub enum BuddyError {
    #[error("You cannot add yourself as a buddy")]
    InvalidTarget,
    #[error("You are already buddies with this user")]
    AlreadyBuddies,
    #[error("You already sent a buddy request to this user")]
    DuplicateRequest,
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error(transparent)]
    System(SystemError),
}

impl From<SystemError> for BuddyError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::Conflict(_) => BuddyError::DuplicateRequest,
            SystemError::NotFound(msg) => BuddyError::NotFound(msg),
            other => BuddyError::System(other),
        }
    }
}

impl From<BuddyError> for Error {
    fn from(err: BuddyError) -> Self {
        match err {
            BuddyError::InvalidTarget => Error::bad_request(err.to_string()),
            BuddyError::AlreadyBuddies | BuddyError::DuplicateRequest => {
                Error::conflict(err.to_string())
            }
            BuddyError::NotFound(msg) => Error::NotFound(msg),
            BuddyError::Forbidden(msg) => Error::Forbidden(msg),
            BuddyError::System(inner) => inner.into(),
        }
    }
}
