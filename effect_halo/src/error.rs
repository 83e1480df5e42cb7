// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::token::TokenId;

/// Error type for layout, configuration and host integration.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the token or host operation the
/// failure concerns, when there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The token whose layout failed.
    token: Option<TokenId>,

    /// The host operation or setting name involved.
    subject: Option<&'static str>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The token this error concerns, if any.
    pub fn token(&self) -> Option<TokenId> {
        self.token
    }

    /// The host operation or setting this error concerns, if any.
    pub fn subject(&self) -> Option<&'static str> {
        self.subject
    }

    pub(crate) fn invalid_footprint(token: TokenId) -> Self {
        Self {
            kind: ErrorKind::InvalidFootprint,
            token: Some(token),
            subject: None,
        }
    }

    pub(crate) fn invalid_grid(token: TokenId) -> Self {
        Self {
            kind: ErrorKind::InvalidGrid,
            token: Some(token),
            subject: None,
        }
    }

    pub(crate) fn missing_host_operation(operation: &'static str) -> Self {
        Self {
            kind: ErrorKind::MissingHostOperation,
            token: None,
            subject: Some(operation),
        }
    }

    pub(crate) fn invalid_configuration(setting: &'static str) -> Self {
        Self {
            kind: ErrorKind::InvalidConfiguration,
            token: None,
            subject: Some(setting),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.kind, self.token, self.subject) {
            (ErrorKind::InvalidFootprint, Some(token), _) => {
                write!(f, "{token} has an empty or non-finite footprint")
            }
            (ErrorKind::InvalidFootprint, None, _) => {
                write!(f, "empty or non-finite footprint")
            }
            (ErrorKind::InvalidGrid, Some(token), _) => {
                write!(f, "cannot lay out {token}: grid cell size is not positive")
            }
            (ErrorKind::InvalidGrid, None, _) => write!(f, "grid cell size is not positive"),
            (ErrorKind::MissingHostOperation, _, Some(operation)) => {
                write!(f, "host operation `{operation}` is not available")
            }
            (ErrorKind::MissingHostOperation, _, None) => {
                write!(f, "host operation is not available")
            }
            (ErrorKind::InvalidConfiguration, _, Some(setting)) => {
                write!(f, "`{setting}` must be finite and positive")
            }
            (ErrorKind::InvalidConfiguration, _, None) => write!(f, "invalid configuration"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The token's footprint is zero, negative or not finite.
    InvalidFootprint,

    /// The scene's grid cell size is zero, negative or not finite.
    InvalidGrid,

    /// A host drawing operation could not be intercepted.
    MissingHostOperation,

    /// A configuration value was rejected.
    InvalidConfiguration,
}
