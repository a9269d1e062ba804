//! Error types shared between the core and the delivery engine.
//!
//! Provider unavailability is deliberately not represented: the accuracy
//! policy always has a fallback, so that condition is absorbed before it
//! could become an error.

use crate::permission::PermissionKind;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors from the permission-request protocol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PermissionError {
    /// The user or OS denied the requested permission outright
    #[error("Permission '{0}' denied")]
    Denied(PermissionKind),

    /// A lesser permission was granted than the one requested
    #[error("Permission partially granted: {granted:?}")]
    PartiallyGranted { granted: BTreeSet<PermissionKind> },

    /// The permission controller failed for another reason
    #[error("Permission request failed: {0}")]
    RequestFailed(String),
}

/// Errors from a platform location source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The platform refused the update registration
    #[error("Listener registration failed: {0}")]
    RegistrationFailed(String),
}

/// Errors surfaced by the tracker's public API.
///
/// Both variants leave the tracker in the Idle state; restarting after a
/// failure is a fresh `start_tracking` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("{0}")]
    Permission(#[from] PermissionError),

    #[error("{0}")]
    Registration(#[from] SourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_display() {
        let err = PermissionError::Denied(PermissionKind::PreciseLocation);
        assert_eq!(format!("{}", err), "Permission 'precise-location' denied");
    }

    #[test]
    fn test_tracker_error_from_permission() {
        let err: TrackerError = PermissionError::RequestFailed("cancelled".into()).into();
        assert!(matches!(err, TrackerError::Permission(_)));
    }

    #[test]
    fn test_tracker_error_from_source() {
        let err: TrackerError = SourceError::RegistrationFailed("no service".into()).into();
        assert_eq!(format!("{}", err), "Listener registration failed: no service");
    }
}
