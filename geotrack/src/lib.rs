//! # Geotrack
//!
//! Permission-aware location tracking with dual-policy sample streams.
//!
//! This crate is the async delivery engine on top of [`geotrack_core`]:
//! it mediates the permission-request protocol, registers with a
//! platform location source at the accuracy the policy selects, and
//! republishes normalized samples on two independent streams.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       geotrack                               │
//! │  ┌──────────────┐   ┌──────────────────────────────────────┐ │
//! │  │ Permission   │   │ LocationTracker                      │ │
//! │  │ Gate         │──▶│  - Idle/Tracking lifecycle           │ │
//! │  └──────┬───────┘   │  - normalize RawSample               │ │
//! │         │           │  - broadcast: extended locations     │ │
//! │         ▼           │  - watch: latest coordinate          │ │
//! │  PermissionsController └──────────────┬─────────────────────┘ │
//! │  (injected)                           │                      │
//! │                          ┌────────────┴───────────┐          │
//! │                          ▼                        ▼          │
//! │                   LocationSource            per-subscriber   │
//! │                   (injected, fed            lazy streams     │
//! │                    via SampleSink)                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery semantics
//!
//! - [`LocationTracker::extended_locations`] buffers: each subscriber has
//!   its own bounded backlog and receives every sample in order while it
//!   keeps pace. Under sustained overflow the oldest samples are skipped
//!   per subscriber, never unbounded growth.
//! - [`LocationTracker::coordinates`] conflates: a subscriber sees only
//!   the most recent unconsumed coordinate.
//!
//! Both streams are projections of the same underlying sample sequence;
//! the extended sample is always published first.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use geotrack::simulate::SimulatedSource;
//! use geotrack::{LocationTracker, PermissionsController, ProviderPolicy};
//! # use async_trait::async_trait;
//! # use geotrack::{PermissionError, PermissionKind};
//! # struct AlwaysGranted;
//! # #[async_trait]
//! # impl PermissionsController for AlwaysGranted {
//! #     async fn request_grant(
//! #         &self,
//! #         _kind: PermissionKind,
//! #         _allow_partial: bool,
//! #     ) -> Result<(), PermissionError> {
//! #         Ok(())
//! #     }
//! # }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), geotrack::TrackerError> {
//! let tracker = LocationTracker::new(
//!     Arc::new(AlwaysGranted),
//!     Arc::new(SimulatedSource::new()),
//!     Box::new(ProviderPolicy { fused_supported: true }),
//! );
//!
//! let mut coordinates = Box::pin(tracker.coordinates());
//! tracker.start_tracking(true, false).await?;
//!
//! while let Some(position) = coordinates.next().await {
//!     println!("now at {}", position);
//! }
//! # Ok(())
//! # }
//! ```

pub mod permissions;
pub mod simulate;
pub mod source;
pub mod tracker;

// Re-export commonly used types
pub use geotrack_core::{
    AccuracyPolicy, AccuracyTier, Altitude, Azimuth, DesiredAccuracy, ExtendedLocation, LatLng,
    PermissionError, PermissionKind, PositionFix, PrecisionPolicy, ProviderId, ProviderPolicy,
    ProviderSelection, RawSample, SourceError, Speed, TrackerError, TrackerState,
};
pub use permissions::{PermissionGate, PermissionsController};
pub use source::{LocationSource, SampleSink, UpdateRequest};
pub use tracker::{LocationTracker, TeardownGuard, TrackerConfig};
