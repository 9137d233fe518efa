use thiserror::Error;

use crate::layer::Layer;

#[derive(Error, Debug)]
pub enum HealerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(#[source] anyhow::Error),

    #[error("Error {op}: {source}")]
    Driver {
        op: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{layer} '{name}' already exists")]
    AlreadyExists { layer: Layer, name: String },

    #[error("{layer} '{name}' does not exist")]
    NotFound { layer: Layer, name: String },

    #[error("Invalid {layer} name '{name}': {reason}")]
    InvalidName {
        layer: Layer,
        name: String,
        reason: String,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid document id '{0}'")]
    InvalidId(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HealerError {
    /// Wrap a driver error with the operation that produced it.
    pub fn driver<E>(op: impl Into<String>, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Driver {
            op: op.into(),
            source: source.into(),
        }
    }

    pub fn already_exists(layer: Layer, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            layer,
            name: name.into(),
        }
    }

    pub fn not_found(layer: Layer, name: impl Into<String>) -> Self {
        Self::NotFound {
            layer,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

pub type HealerResult<T> = Result<T, HealerError>;
