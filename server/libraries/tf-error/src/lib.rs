//
// Copyright 2025 Tabs Data Inc.
//

pub use tm_error::tf_error;

use derive_builder::UninitializedFieldError;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use strum::AsRefStr;

/// Error class enum, used to tell callers (and exit codes) what kind of failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum ErrorClass {
    /// Discriminants from 0 to 999 are reserved for input errors
    InputError = 0,
    /// Discriminants from 1000 to 1999 are reserved for not found errors
    NotFound = 1000,
    /// Discriminants from 2000 to 2999 are reserved for errors reported by a remote endpoint
    RemoteError = 2000,
    /// Discriminants from 3000 to 3999 are reserved for transport (network) errors
    TransportError = 3000,
    /// Discriminants from 4000 to 4999 are reserved for configuration errors
    ConfigError = 4000,
    /// Discriminants from 5000 to 5999 are reserved for internal errors
    InternalError = 5000,
    /// Discriminants from 6000 to u16::MAX are unexpected
    Unexpected = u16::MAX as isize,
}

impl From<u16> for ErrorClass {
    fn from(discriminant: u16) -> Self {
        match discriminant {
            i if i < Self::InputError as u16 + 1000 => Self::InputError,
            i if i < Self::NotFound as u16 + 1000 => Self::NotFound,
            i if i < Self::RemoteError as u16 + 1000 => Self::RemoteError,
            i if i < Self::TransportError as u16 + 1000 => Self::TransportError,
            i if i < Self::ConfigError as u16 + 1000 => Self::ConfigError,
            i if i < Self::InternalError as u16 + 1000 => Self::InternalError,
            _i => Self::Unexpected,
        }
    }
}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Trait implemented by tabfetch errors. This trait is automatically implemented by
/// error enums annotated with the [`#tf_error`] macro.
pub trait TfDomainError: Error + Send + Sync {
    /// Returns the domain of the error. The name of the enum type is the domain error.
    fn domain(&self) -> &str;

    /// Returns the error code, the [`Self::domain()`] concatenated with the variant discriminant.
    fn code(&self) -> String;

    /// Returns the class of the error.
    fn class(&self) -> ErrorClass;
}

/// Generic tabfetch error type, for call stacks mixing several domain errors.
///
/// [`TfDomainError`] errors are automatically converted to [`TfError`] using the '?' operator.
#[derive(Debug)]
pub struct TfError {
    domain: String,
    code: String,
    class: ErrorClass,
    tf_error: anyhow::Error,
}

impl TfError {
    /// Creates a new [`TfError`] from an error implementing [`TfDomainError`].
    pub fn new<E>(error: E) -> Self
    where
        E: TfDomainError + 'static,
    {
        Self {
            domain: error.domain().to_string(),
            code: error.code(),
            class: error.class(),
            tf_error: anyhow::Error::new(error),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// Downcasts to the source [`TfDomainError`], if it is of type `E`.
    pub fn domain_err<E: TfDomainError + 'static>(&self) -> Option<&E> {
        self.tf_error.downcast_ref::<E>()
    }
}

impl Display for TfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tf::error {}[{}] - {}",
            self.class(),
            self.code(),
            self.tf_error
        )
    }
}

impl Error for TfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.tf_error.as_ref())
    }
}

// useful for types using derive_builder
impl From<UninitializedFieldError> for TfError {
    fn from(ufe: UninitializedFieldError) -> TfError {
        TfError {
            domain: "UninitializedFieldError".to_string(),
            code: "UninitializedFieldError::0000".to_string(),
            class: ErrorClass::InternalError,
            tf_error: anyhow::Error::new(ufe),
        }
    }
}
