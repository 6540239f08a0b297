//! Startup errors that abort the whole process.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pconfig::ConfigError;
use pprovider::ProviderError;

/// Any failure before the first session can begin. The process logs the
/// message and exits non-zero; there is no partial startup.
#[derive(Debug)]
pub enum FatalError {
    Config(ConfigError),
    Provider(ProviderError),
    Io(std::io::Error),
}

impl Display for FatalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FatalError::Config(err) => write!(f, "configuration error: {err}"),
            FatalError::Provider(err) => write!(f, "provider error: {err}"),
            FatalError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl Error for FatalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FatalError::Config(err) => Some(err),
            FatalError::Provider(err) => Some(err),
            FatalError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for FatalError {
    fn from(value: ConfigError) -> Self {
        FatalError::Config(value)
    }
}

impl From<ProviderError> for FatalError {
    fn from(value: ProviderError) -> Self {
        FatalError::Provider(value)
    }
}

impl From<std::io::Error> for FatalError {
    fn from(value: std::io::Error) -> Self {
        FatalError::Io(value)
    }
}
