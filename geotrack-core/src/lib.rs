//! # Geotrack Core
//!
//! Platform-independent location tracking logic.
//!
//! This crate contains the pure domain model and decision logic with **zero
//! I/O dependencies** and no async runtime, making it usable from any
//! platform layer.
//!
//! ## Architecture
//!
//! `geotrack-core` is the shared foundation underneath the async delivery
//! engine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  geotrack-core (platform-independent, no tokio/async deps)  │
//! │  ├── position/    (coordinates, measurements, samples)      │
//! │  ├── accuracy/    (tier -> provider/precision selection)    │
//! │  ├── permission/  (partial-grant recovery rules)            │
//! │  ├── state/       (Idle/Tracking lifecycle machine)         │
//! │  └── error/       (permission/source/tracker taxonomy)      │
//! └─────────────────────────────────────────────────────────────┘
//!                             ▲
//!                 ┌───────────┴───────────┐
//!                 │  geotrack             │
//!                 │  (tokio engine)       │
//!                 └───────────────────────┘
//! ```
//!
//! ## Key Modules
//!
//! - [`position`] - Coordinate and measurement value types, raw sample
//!   normalization
//! - [`accuracy`] - Accuracy tier to provider/precision mapping with
//!   guaranteed fallback
//! - [`permission`] - Location permission kinds and the partial-grant
//!   acceptance rule
//! - [`state`] - Pure Idle/Tracking state machine
//! - [`error`] - Error types shared with the delivery engine
//!
//! ## Example: Provider Selection
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use geotrack_core::{AccuracyPolicy, AccuracyTier, ProviderId, ProviderPolicy};
//!
//! let policy = ProviderPolicy { fused_supported: true };
//! let available: BTreeSet<ProviderId> =
//!     [ProviderId::Gps, ProviderId::Network].into_iter().collect();
//!
//! // Fused is supported but not available, so Best degrades to GPS.
//! use geotrack_core::ProviderSelection;
//! assert_eq!(
//!     policy.select(AccuracyTier::Best, &available),
//!     ProviderSelection::Provider(ProviderId::Gps),
//! );
//! ```
//!
//! ## Example: Normalizing a Raw Sample
//!
//! ```rust
//! use geotrack_core::{ExtendedLocation, RawSample};
//!
//! let raw = RawSample {
//!     latitude: 59.9311,
//!     longitude: 30.3609,
//!     horizontal_accuracy_meters: 12.0,
//!     speed_meters_per_second: 1.4,
//!     speed_accuracy_meters_per_second: None, // platform cannot report it
//!     azimuth_degrees: 90.0,
//!     azimuth_accuracy_degrees: None,
//!     altitude_meters: 4.0,
//!     altitude_accuracy_meters: Some(2.5),
//!     timestamp_ms: 1_700_000_000_000,
//! };
//!
//! let extended = ExtendedLocation::from(raw);
//! assert!(extended.speed.accuracy_meters_per_second.is_none());
//! assert_eq!(extended.lat_lng().latitude, 59.9311);
//! ```

pub mod accuracy;
pub mod error;
pub mod permission;
pub mod position;
pub mod state;

// Re-export commonly used types
pub use accuracy::{
    AccuracyPolicy, AccuracyTier, DesiredAccuracy, PrecisionPolicy, ProviderId, ProviderPolicy,
    ProviderSelection,
};
pub use error::{PermissionError, SourceError, TrackerError};
pub use permission::{resolve_partial_grant, PermissionKind};
pub use position::{
    Altitude, Azimuth, ExtendedLocation, LatLng, PositionFix, RawSample, Speed,
};
pub use state::{TrackerLifecycle, TrackerState};
