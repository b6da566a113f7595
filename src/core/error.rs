//! Defines the custom error types for the `core` module.

use thiserror::Error;

/// The primary error type for browser queries.
///
/// Handlers never surface these to the transport directly; each variant
/// collapses into the sentinel reply of the handler that produced it.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// A required parameter was missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A pack, root or path segment could not be resolved.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resolved node exists but cannot be activated.
    #[error("Item is not loadable: {0}")]
    NotLoadable(String),

    /// The host refused to activate the item.
    #[error("Activation failed: {0}")]
    Activation(#[from] ActivationError),
}

/// Raised by the catalog while enumerating the children of a node.
///
/// Always contained by the caller: it truncates the affected subtree and is
/// logged at debug level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to enumerate children of '{node}': {reason}")]
pub struct TraversalFault {
    pub node: String,
    pub reason: String,
}

/// Raised by the host when activating an item fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivationError {
    #[error("Host rejected '{item}': {reason}")]
    Rejected { item: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_error_converts_into_browser_error() {
        let err: BrowserError = ActivationError::Rejected {
            item: "Operator".to_string(),
            reason: "no track selected".to_string(),
        }
        .into();
        assert!(matches!(err, BrowserError::Activation(_)));
        assert_eq!(
            err.to_string(),
            "Activation failed: Host rejected 'Operator': no track selected"
        );
    }

    #[test]
    fn test_traversal_fault_message_names_the_node() {
        let fault = TraversalFault {
            node: "Kicks".to_string(),
            reason: "device offline".to_string(),
        };
        assert_eq!(
            fault.to_string(),
            "Failed to enumerate children of 'Kicks': device offline"
        );
    }
}
