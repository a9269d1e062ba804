//! Permission gate: request precise, accept coarse if permitted.
//!
//! The external permission controller owns the actual UI prompt flow; it
//! is injected as a capability trait and shared with the rest of the
//! application. This module only implements the request protocol around
//! it.

use async_trait::async_trait;
use geotrack_core::{resolve_partial_grant, PermissionError, PermissionKind};
use log::debug;
use std::sync::Arc;

/// External permission controller.
///
/// `request_grant` suspends until the user responds (or the platform
/// denies immediately). With `allow_partial` set, a controller reports a
/// lesser grant as [`PermissionError::PartiallyGranted`] carrying the set
/// of permissions actually granted instead of a flat denial.
#[async_trait]
pub trait PermissionsController: Send + Sync {
    async fn request_grant(
        &self,
        kind: PermissionKind,
        allow_partial: bool,
    ) -> Result<(), PermissionError>;
}

/// Wraps the external controller with the partial-grant protocol.
pub struct PermissionGate {
    controller: Arc<dyn PermissionsController>,
}

impl PermissionGate {
    pub fn new(controller: Arc<dyn PermissionsController>) -> Self {
        PermissionGate { controller }
    }

    /// Run the permission-request protocol.
    ///
    /// Requests precise location when `request_precise` is set, coarse
    /// otherwise, always allowing partial grants. A partial grant is
    /// recovered as success exactly when precise was not strictly
    /// required and coarse is among the granted set; any other outcome
    /// propagates unchanged.
    pub async fn ensure_permission(
        &self,
        request_precise: bool,
        require_precise: bool,
    ) -> Result<(), PermissionError> {
        let kind = if request_precise {
            PermissionKind::PreciseLocation
        } else {
            PermissionKind::CoarseLocation
        };

        match self.controller.request_grant(kind, true).await {
            Ok(()) => Ok(()),
            Err(PermissionError::PartiallyGranted { granted }) => {
                if resolve_partial_grant(require_precise, &granted) {
                    debug!(
                        "partial grant {:?} accepted, tracking with degraded precision",
                        granted
                    );
                    Ok(())
                } else {
                    Err(PermissionError::PartiallyGranted { granted })
                }
            }
            Err(err) => Err(err),
        }
    }
}
