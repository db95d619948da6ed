//! Error types for freezeframe.

use thiserror::Error;

/// The main error type for freezeframe operations.
#[derive(Error, Debug)]
pub enum FreezeError {
    /// The operator's focus is not over a display surface bound to a camera.
    #[error("no camera viewport focused: {0}")]
    Focus(String),

    /// The source camera does not expose the expected attribute set.
    #[error("cannot resolve camera '{node}': {reason}")]
    Resolution { node: String, reason: String },

    /// One image reference could not be duplicated or detached.
    #[error("image reference '{name}' could not be frozen: {reason}")]
    ImageReference { name: String, reason: String },

    /// A node handle no longer refers to a live node.
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    /// The node has no attribute with the given name.
    #[error("attribute '{node}.{attribute}' not found")]
    AttributeNotFound { node: String, attribute: String },

    /// The attribute is locked against edits.
    #[error("attribute '{node}.{attribute}' is locked")]
    AttributeLocked { node: String, attribute: String },

    /// The attribute is driven by an incoming connection.
    #[error("attribute '{node}.{attribute}' is driven by '{source_plug}'")]
    AttributeConnected {
        node: String,
        attribute: String,
        source_plug: String,
    },

    /// A value of the wrong type was written to an attribute.
    #[error("attribute '{node}.{attribute}' expects {expected}, got {actual}")]
    TypeMismatch {
        node: String,
        attribute: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The destination plug already has an incoming connection.
    #[error("'{destination}' is already driven by '{source_plug}'")]
    ConnectionExists {
        source_plug: String,
        destination: String,
    },

    /// No connection exists between the two plugs.
    #[error("'{source_plug}' is not connected to '{destination}'")]
    ConnectionNotFound {
        source_plug: String,
        destination: String,
    },

    /// A display surface with the given name or id was not found.
    #[error("display surface '{0}' not found")]
    SurfaceNotFound(String),

    /// freezeframe has not been initialized.
    #[error("freezeframe not initialized - call freezeframe::init() first")]
    NotInitialized,

    /// freezeframe has already been initialized.
    #[error("freezeframe already initialized")]
    AlreadyInitialized,

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse classification of a [`FreezeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invocation happened without a focused camera viewport.
    Focus,
    /// The source camera is malformed.
    Resolution,
    /// A single image reference failed.
    ImageReference,
    /// Any other failure reported by the host or configuration layer.
    Host,
}

impl FreezeError {
    /// Returns the coarse category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Focus(_) => ErrorKind::Focus,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::ImageReference { .. } => ErrorKind::ImageReference,
            _ => ErrorKind::Host,
        }
    }

    /// Builds a [`FreezeError::Resolution`] for `node`.
    #[must_use]
    pub fn resolution(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// Wraps any error as an image-reference failure for `name`.
    ///
    /// Errors that already are image-reference failures are returned unchanged.
    #[must_use]
    pub fn into_image_reference(self, name: &str) -> Self {
        match self {
            Self::ImageReference { .. } => self,
            other => Self::ImageReference {
                name: name.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// A specialized Result type for freezeframe operations.
pub type Result<T> = std::result::Result<T, FreezeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(FreezeError::Focus("x".into()).kind(), ErrorKind::Focus);
        assert_eq!(
            FreezeError::resolution("cam", "not a camera").kind(),
            ErrorKind::Resolution
        );
        assert_eq!(
            FreezeError::NodeNotFound("n".into()).kind(),
            ErrorKind::Host
        );
    }

    #[test]
    fn test_into_image_reference() {
        let err = FreezeError::NodeNotFound("ip1".into()).into_image_reference("ip1");
        assert_eq!(err.kind(), ErrorKind::ImageReference);
        assert_eq!(
            err.to_string(),
            "image reference 'ip1' could not be frozen: node 'ip1' not found"
        );
    }
}
