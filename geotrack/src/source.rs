//! Platform location source abstraction.
//!
//! This module defines the seam between the tracker and a platform's
//! native location service, allowing the same tracker logic to run against
//! Android-style provider registration, CoreLocation-style precision
//! configuration, or a simulator.
//!
//! # Design
//!
//! [`LocationSource`] is a **non-blocking** interface: `start_updates`
//! registers and returns, and the platform then feeds raw samples into the
//! [`SampleSink`] at its own cadence (the OS enforces the interval and
//! distance threshold, not this engine). `SampleSink::deliver` is safe to
//! call from whatever thread the OS invokes its callback on and never
//! blocks, so a platform callback is never held up by slow consumers.
//!
//! Adapters extract raw fields only. Capability-gated accuracies that the
//! running OS version cannot supply must be `None` in the [`RawSample`];
//! all domain transformation happens in the tracker's publish path.

use geotrack_core::{ExtendedLocation, LatLng, ProviderId, ProviderSelection, RawSample, SourceError};
use log::trace;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Registration parameters for a platform location source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    /// Provider or precision chosen by the accuracy policy
    pub selection: ProviderSelection,
    /// Requested update interval in milliseconds
    pub interval_ms: u64,
    /// Minimum movement in meters before a new sample is reported
    pub min_distance_meters: f64,
}

/// Platform-independent location service.
///
/// Implementations wrap a native location API (or a simulator) and are
/// injected into the tracker at construction. All operations are
/// non-blocking; `stop_updates` must be idempotent.
pub trait LocationSource: Send + Sync {
    /// The providers the platform currently has enabled.
    ///
    /// May be empty; the accuracy policy still produces a selection (the
    /// passive baseline, or a precision constant).
    fn providers(&self) -> BTreeSet<ProviderId>;

    /// Register for location updates.
    ///
    /// The source keeps the sink and feeds it raw samples until
    /// `stop_updates` is called.
    fn start_updates(&self, request: &UpdateRequest, sink: SampleSink) -> Result<(), SourceError>;

    /// Unregister from location updates. Idempotent, never fails.
    fn stop_updates(&self);
}

/// The tracker's two output channels.
///
/// The extended channel is a bounded broadcast: every subscriber has its
/// own cursor and a backlog up to the channel capacity. The coordinate
/// channel is a watch: each subscriber sees only the latest unconsumed
/// value.
pub(crate) struct OutputChannels {
    pub(crate) extended: broadcast::Sender<ExtendedLocation>,
    pub(crate) coordinate: watch::Sender<Option<LatLng>>,
}

impl OutputChannels {
    pub(crate) fn new(extended_buffer: usize) -> Self {
        let (extended, _) = broadcast::channel(extended_buffer);
        let (coordinate, _) = watch::channel(None);
        OutputChannels {
            extended,
            coordinate,
        }
    }
}

/// Handle through which a platform adapter hands raw samples to the
/// tracker.
///
/// Cheap to clone; all clones feed the same tracker instance.
#[derive(Clone)]
pub struct SampleSink {
    channels: Arc<OutputChannels>,
}

impl SampleSink {
    pub(crate) fn new(channels: Arc<OutputChannels>) -> Self {
        SampleSink { channels }
    }

    /// Normalize a raw sample and publish it on both output channels.
    ///
    /// Non-blocking: the extended publish goes first, then the coordinate
    /// projection. Publishing with no subscribers is fine; the sample is
    /// simply not retained.
    pub fn deliver(&self, raw: RawSample) {
        let extended = ExtendedLocation::from(raw);
        trace!("sample at {}: {}", extended.timestamp_ms, extended.lat_lng());

        // Extended first so correlated consumers see the full sample no
        // later than its projection. Send errors only mean "no subscribers".
        let _ = self.channels.extended.send(extended);
        self.channels.coordinate.send_replace(Some(extended.lat_lng()));
    }
}
