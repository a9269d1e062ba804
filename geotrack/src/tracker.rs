//! The location tracker: lifecycle, normalization, and dual-policy
//! delivery.
//!
//! One tracker owns one platform listener registration and two output
//! channels. The extended-location channel is a bounded broadcast so a
//! consumer that wants full-fidelity history does not lose samples under
//! light backpressure; the coordinate channel is a watch, conflating to
//! the latest value, because a coordinate consumer only ever needs "where
//! am I now". Streams are lazy and per-subscription independent: a slow
//! subscriber never blocks the platform callback, publication to the
//! other channel, or another subscriber.

use crate::permissions::{PermissionGate, PermissionsController};
use crate::source::{LocationSource, OutputChannels, SampleSink, UpdateRequest};
use futures::stream::{self, Stream};
use geotrack_core::{
    AccuracyPolicy, AccuracyTier, ExtendedLocation, LatLng, TrackerError, TrackerLifecycle,
    TrackerState,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

/// Default update interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;
/// Default minimum movement before a new sample is reported, in meters.
pub const DEFAULT_MIN_DISTANCE_METERS: f64 = 500.0;
/// Default bounded backlog of the extended-location channel.
pub const DEFAULT_EXTENDED_BUFFER: usize = 32;

/// Construction-time tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Requested update interval in milliseconds
    pub interval_ms: u64,
    /// Minimum movement in meters before a new sample is reported
    pub min_distance_meters: f64,
    /// Abstract accuracy request, resolved by the accuracy policy
    pub accuracy: AccuracyTier,
    /// Per-subscriber backlog bound of the extended-location stream.
    /// A subscriber that falls further behind than this skips the oldest
    /// overflowed samples; the backlog never grows unbounded.
    pub extended_buffer: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            interval_ms: DEFAULT_INTERVAL_MS,
            min_distance_meters: DEFAULT_MIN_DISTANCE_METERS,
            accuracy: AccuracyTier::Best,
            extended_buffer: DEFAULT_EXTENDED_BUFFER,
        }
    }
}

struct TrackerInner {
    gate: PermissionGate,
    source: Arc<dyn LocationSource>,
    policy: Box<dyn AccuracyPolicy>,
    config: TrackerConfig,
    channels: Arc<OutputChannels>,
    lifecycle: Mutex<TrackerLifecycle>,
}

/// Permission-aware location tracker.
///
/// Cheap to clone; all clones drive the same tracker instance. The
/// permission controller, location source, and accuracy policy are
/// injected collaborators; the tracker never reaches into platform
/// internals directly.
#[derive(Clone)]
pub struct LocationTracker {
    inner: Arc<TrackerInner>,
}

impl LocationTracker {
    /// Create a tracker with the default configuration.
    pub fn new(
        permissions: Arc<dyn PermissionsController>,
        source: Arc<dyn LocationSource>,
        policy: Box<dyn AccuracyPolicy>,
    ) -> Self {
        Self::with_config(permissions, source, policy, TrackerConfig::default())
    }

    pub fn with_config(
        permissions: Arc<dyn PermissionsController>,
        source: Arc<dyn LocationSource>,
        policy: Box<dyn AccuracyPolicy>,
        config: TrackerConfig,
    ) -> Self {
        LocationTracker {
            inner: Arc::new(TrackerInner {
                gate: PermissionGate::new(permissions),
                source,
                policy,
                config,
                channels: Arc::new(OutputChannels::new(config.extended_buffer.max(1))),
                lifecycle: Mutex::new(TrackerLifecycle::new()),
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackerState {
        self.lock_lifecycle().state()
    }

    /// Start tracking.
    ///
    /// Suspends while the permission protocol runs; on a permission or
    /// registration failure the tracker stays Idle and the error
    /// propagates. Calling this while already Tracking is a no-op; the
    /// existing registration is kept.
    pub async fn start_tracking(
        &self,
        request_precise: bool,
        require_precise: bool,
    ) -> Result<(), TrackerError> {
        // Run the gate without holding the state lock; it may suspend for
        // as long as the user takes to answer the prompt.
        self.inner
            .gate
            .ensure_permission(request_precise, require_precise)
            .await?;

        let mut lifecycle = self.lock_lifecycle();
        if lifecycle.is_tracking() {
            debug!("start_tracking while already tracking, keeping registration");
            return Ok(());
        }

        let selection = self
            .inner
            .policy
            .select(self.inner.config.accuracy, &self.inner.source.providers());
        let request = UpdateRequest {
            selection,
            interval_ms: self.inner.config.interval_ms,
            min_distance_meters: self.inner.config.min_distance_meters,
        };
        info!(
            "starting location updates via {} (interval {} ms, min distance {} m)",
            selection, request.interval_ms, request.min_distance_meters
        );

        self.inner
            .source
            .start_updates(&request, SampleSink::new(Arc::clone(&self.inner.channels)))?;
        lifecycle.started();
        Ok(())
    }

    /// Stop tracking. Idempotent, never fails.
    ///
    /// The listener is unregistered at most once per tracking period;
    /// subscribed streams stay open and simply receive nothing until the
    /// next tracking period.
    pub fn stop_tracking(&self) {
        let mut lifecycle = self.lock_lifecycle();
        if lifecycle.stopped() {
            self.inner.source.stop_updates();
            info!("stopped location updates");
        }
    }

    /// Lazy conflating coordinate stream.
    ///
    /// Each call yields an independent subscription that sees only the
    /// most recent unconsumed coordinate. A subscriber attaching while
    /// Idle receives nothing until the next sample is published.
    pub fn coordinates(&self) -> impl Stream<Item = LatLng> + Send + 'static {
        let rx = self.inner.channels.coordinate.subscribe();
        stream::unfold(rx, |mut rx| async move {
            loop {
                rx.changed().await.ok()?;
                let latest = *rx.borrow_and_update();
                if let Some(position) = latest {
                    return Some((position, rx));
                }
            }
        })
    }

    /// Lazy buffering extended-location stream.
    ///
    /// Each call yields an independent subscription with its own bounded
    /// backlog (`extended_buffer` samples). A subscriber that keeps pace
    /// receives every sample in publish order; one that falls behind the
    /// bound skips the oldest overflowed samples (logged at warn) and
    /// continues from there. Other subscribers are unaffected.
    pub fn extended_locations(&self) -> impl Stream<Item = ExtendedLocation> + Send + 'static {
        let rx = self.inner.channels.extended.subscribe();
        stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(sample) => return Some((sample, rx)),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("extended location subscriber lagged, skipped {} samples", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }

    /// Bind the tracker to a host lifecycle.
    ///
    /// Dropping the returned guard stops tracking and unregisters the
    /// platform listener regardless of state, so a destroyed host view
    /// cannot leak the registration. Stream subscriptions are not
    /// affected.
    pub fn teardown_guard(&self) -> TeardownGuard {
        TeardownGuard {
            tracker: self.clone(),
        }
    }

    fn lock_lifecycle(&self) -> std::sync::MutexGuard<'_, TrackerLifecycle> {
        self.inner
            .lifecycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII lifecycle binding: stops tracking on drop.
pub struct TeardownGuard {
    tracker: LocationTracker,
}

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        self.tracker.stop_tracking();
    }
}
