//! Error types for QuickDOM operations
//!
//! Every variant is a precondition failure reported straight to the caller.
//! [`Error::kind`] gives the discriminator without matching on messages.

use qd_dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Discriminator for [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingTag,
    MissingAttribute,
    MissingElement,
    MissingSelector,
    EmptySelector,
    /// The host document refused the operation
    Host,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    MissingTag(&'static str),

    #[error("{0}")]
    MissingAttribute(&'static str),

    #[error("{0}")]
    MissingElement(&'static str),

    #[error("{0}")]
    MissingSelector(&'static str),

    #[error("{0}")]
    EmptySelector(&'static str),

    #[error("Host DOM error: {0}")]
    Host(#[from] DomError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingTag(_) => ErrorKind::MissingTag,
            Error::MissingAttribute(_) => ErrorKind::MissingAttribute,
            Error::MissingElement(_) => ErrorKind::MissingElement,
            Error::MissingSelector(_) => ErrorKind::MissingSelector,
            Error::EmptySelector(_) => ErrorKind::EmptySelector,
            Error::Host(_) => ErrorKind::Host,
        }
    }
}
