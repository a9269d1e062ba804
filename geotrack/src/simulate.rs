//! Simulated location source.
//!
//! A scripted [`LocationSource`] for development and tests: no hardware,
//! no permissions prompt, samples come from a script replayed on
//! registration or from manual pushes. Integration tests drive the whole
//! tracker through this source.

use crate::source::{LocationSource, SampleSink, UpdateRequest};
use geotrack_core::{ProviderId, RawSample, SourceError};
use log::debug;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A location source that replays scripted samples.
///
/// On registration the script (if any) is replayed on a spawned task at
/// the configured pace; [`push`](SimulatedSource::push) injects further
/// samples at any time while registered. `stop_updates` cancels an
/// in-flight replay.
pub struct SimulatedSource {
    providers: BTreeSet<ProviderId>,
    script: Vec<RawSample>,
    pace: Duration,
    fail_registration: bool,
    /// Sink of the current registration plus its cancellation flag
    registration: Mutex<Option<Registration>>,
    starts: AtomicU32,
    stops: AtomicU32,
}

struct Registration {
    sink: SampleSink,
    active: Arc<AtomicBool>,
}

impl SimulatedSource {
    /// A source with GPS and network providers and no script; feed it
    /// with [`push`](SimulatedSource::push).
    pub fn new() -> Self {
        SimulatedSource {
            providers: [ProviderId::Gps, ProviderId::Network, ProviderId::Passive]
                .into_iter()
                .collect(),
            script: Vec::new(),
            pace: Duration::ZERO,
            fail_registration: false,
            registration: Mutex::new(None),
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
        }
    }

    /// A source that replays `script` on registration, one sample per
    /// `pace`.
    pub fn with_script(script: Vec<RawSample>, pace: Duration) -> Self {
        SimulatedSource {
            script,
            pace,
            ..Self::new()
        }
    }

    /// A source whose registration always fails, for error-path tests.
    pub fn failing() -> Self {
        SimulatedSource {
            fail_registration: true,
            ..Self::new()
        }
    }

    /// Replace the advertised provider set.
    pub fn set_providers(mut self, providers: BTreeSet<ProviderId>) -> Self {
        self.providers = providers;
        self
    }

    /// Inject one sample into the current registration.
    ///
    /// Returns `false` if the source is not registered (the sample is
    /// dropped, as a real OS would).
    pub fn push(&self, raw: RawSample) -> bool {
        match self.lock_registration().as_ref() {
            Some(registration) => {
                registration.sink.deliver(raw);
                true
            }
            None => false,
        }
    }

    /// Whether a registration is currently held.
    pub fn is_registered(&self) -> bool {
        self.lock_registration().is_some()
    }

    /// How often `start_updates` succeeded.
    pub fn start_count(&self) -> u32 {
        self.starts.load(Ordering::SeqCst)
    }

    /// How often `stop_updates` actually unregistered.
    pub fn stop_count(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }

    fn lock_registration(&self) -> std::sync::MutexGuard<'_, Option<Registration>> {
        self.registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSource for SimulatedSource {
    fn providers(&self) -> BTreeSet<ProviderId> {
        self.providers.clone()
    }

    fn start_updates(&self, request: &UpdateRequest, sink: SampleSink) -> Result<(), SourceError> {
        if self.fail_registration {
            return Err(SourceError::RegistrationFailed(
                "simulated registration failure".into(),
            ));
        }
        debug!("simulated source registered for {}", request.selection);

        let active = Arc::new(AtomicBool::new(true));
        *self.lock_registration() = Some(Registration {
            sink: sink.clone(),
            active: Arc::clone(&active),
        });
        self.starts.fetch_add(1, Ordering::SeqCst);

        if !self.script.is_empty() {
            let script = self.script.clone();
            let pace = self.pace;
            tokio::spawn(async move {
                for raw in script {
                    if !active.load(Ordering::SeqCst) {
                        break;
                    }
                    sink.deliver(raw);
                    if !pace.is_zero() {
                        tokio::time::sleep(pace).await;
                    }
                }
            });
        }
        Ok(())
    }

    fn stop_updates(&self) {
        if let Some(registration) = self.lock_registration().take() {
            registration.active.store(false, Ordering::SeqCst);
            self.stops.fetch_add(1, Ordering::SeqCst);
            debug!("simulated source unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::OutputChannels;

    fn sample(timestamp_ms: u64) -> RawSample {
        RawSample {
            latitude: 0.0,
            longitude: 0.0,
            horizontal_accuracy_meters: 1.0,
            speed_meters_per_second: 0.0,
            speed_accuracy_meters_per_second: None,
            azimuth_degrees: 0.0,
            azimuth_accuracy_degrees: None,
            altitude_meters: 0.0,
            altitude_accuracy_meters: None,
            timestamp_ms,
        }
    }

    fn request() -> UpdateRequest {
        UpdateRequest {
            selection: geotrack_core::ProviderSelection::Provider(ProviderId::Gps),
            interval_ms: 1_000,
            min_distance_meters: 500.0,
        }
    }

    #[tokio::test]
    async fn test_script_replays_on_registration() {
        let source = SimulatedSource::with_script(
            vec![sample(1), sample(2), sample(3)],
            Duration::ZERO,
        );
        let channels = Arc::new(OutputChannels::new(8));
        let mut rx = channels.extended.subscribe();

        source
            .start_updates(&request(), SampleSink::new(channels))
            .unwrap();

        for expected in 1..=3 {
            let sample = rx.recv().await.unwrap();
            assert_eq!(sample.timestamp_ms, expected);
        }
    }

    #[tokio::test]
    async fn test_push_requires_registration() {
        let source = SimulatedSource::new();
        assert!(!source.push(sample(1)));

        let channels = Arc::new(OutputChannels::new(8));
        source
            .start_updates(&request(), SampleSink::new(channels))
            .unwrap();
        assert!(source.push(sample(1)));
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let source = SimulatedSource::new();
        let channels = Arc::new(OutputChannels::new(8));
        source
            .start_updates(&request(), SampleSink::new(channels))
            .unwrap();

        source.stop_updates();
        source.stop_updates();
        assert_eq!(source.stop_count(), 1);
        assert!(!source.is_registered());
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = SimulatedSource::failing();
        let channels = Arc::new(OutputChannels::new(8));
        let err = source
            .start_updates(&request(), SampleSink::new(channels))
            .unwrap_err();
        assert!(matches!(err, SourceError::RegistrationFailed(_)));
        assert!(!source.is_registered());
    }
}
