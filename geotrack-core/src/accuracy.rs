//! Accuracy tier to provider/precision mapping.
//!
//! An [`AccuracyTier`] is an abstract precision/power request; what it
//! means concretely depends on the platform. Provider-oriented platforms
//! (Android `LocationManager`) pick a provider id from the set the OS
//! currently offers; precision-oriented platforms (iOS `CLLocationManager`)
//! pick a desired-accuracy constant.
//!
//! Each platform layer supplies one [`AccuracyPolicy`] implementation at
//! construction, so the tracker itself contains no platform branching.
//! Selection is a pure function of its inputs and never fails: the passive
//! provider (or the reduced precision constant) is the guaranteed baseline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Abstract precision/power request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyTier {
    /// Highest available precision, highest power draw
    #[default]
    Best,
    /// Coarse position, moderate power draw
    Medium,
    /// Opportunistic updates only, minimal power draw
    LowPower,
}

impl fmt::Display for AccuracyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccuracyTier::Best => write!(f, "best"),
            AccuracyTier::Medium => write!(f, "medium"),
            AccuracyTier::LowPower => write!(f, "low-power"),
        }
    }
}

/// Platform location data source, in decreasing order of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Hybrid GNSS/network/sensor provider (Android 12+)
    Fused,
    /// Satellite positioning
    Gps,
    /// Cell tower / WiFi positioning
    Network,
    /// Opportunistic updates produced for other consumers
    Passive,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::Fused => write!(f, "fused"),
            ProviderId::Gps => write!(f, "gps"),
            ProviderId::Network => write!(f, "network"),
            ProviderId::Passive => write!(f, "passive"),
        }
    }
}

/// Desired-accuracy constant for precision-oriented platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DesiredAccuracy {
    /// Best precision the hardware can deliver
    Best,
    /// Accurate to roughly a hundred meters
    HundredMeters,
    /// Coarse, privacy-preserving precision
    Reduced,
}

/// The concrete outcome of accuracy selection.
///
/// Providers and precision constants are different output domains for the
/// same three-tier request; the [`LocationSource`] for a platform consumes
/// whichever variant its policy produces.
///
/// [`LocationSource`]: https://docs.rs/geotrack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderSelection {
    Provider(ProviderId),
    Precision(DesiredAccuracy),
}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSelection::Provider(p) => write!(f, "provider {}", p),
            ProviderSelection::Precision(DesiredAccuracy::Best) => write!(f, "precision best"),
            ProviderSelection::Precision(DesiredAccuracy::HundredMeters) => {
                write!(f, "precision hundred-meters")
            }
            ProviderSelection::Precision(DesiredAccuracy::Reduced) => {
                write!(f, "precision reduced")
            }
        }
    }
}

/// Maps an accuracy tier to a platform-appropriate selection.
///
/// Implementations must be pure and deterministic: same tier and same
/// available set, same selection. They must also be total - there is no
/// error case, the fallback ordering always bottoms out.
pub trait AccuracyPolicy: Send + Sync {
    fn select(&self, tier: AccuracyTier, available: &BTreeSet<ProviderId>) -> ProviderSelection;
}

/// Provider-table policy for provider-oriented platforms.
///
/// Fallback ordering:
/// - Best: fused (when the platform version supports it and the provider
///   is enabled), else gps, else network, else passive
/// - Medium: network, else passive
/// - LowPower: always passive
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderPolicy {
    /// Whether the platform version offers the fused provider at all
    pub fused_supported: bool,
}

impl AccuracyPolicy for ProviderPolicy {
    fn select(&self, tier: AccuracyTier, available: &BTreeSet<ProviderId>) -> ProviderSelection {
        let provider = match tier {
            AccuracyTier::Best => {
                if self.fused_supported && available.contains(&ProviderId::Fused) {
                    ProviderId::Fused
                } else if available.contains(&ProviderId::Gps) {
                    ProviderId::Gps
                } else if available.contains(&ProviderId::Network) {
                    ProviderId::Network
                } else {
                    ProviderId::Passive
                }
            }
            AccuracyTier::Medium => {
                if available.contains(&ProviderId::Network) {
                    ProviderId::Network
                } else {
                    ProviderId::Passive
                }
            }
            AccuracyTier::LowPower => ProviderId::Passive,
        };
        ProviderSelection::Provider(provider)
    }
}

/// Precision-constant policy for precision-oriented platforms.
///
/// The available-provider set is irrelevant here; the OS owns source
/// selection and only the desired accuracy is configurable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecisionPolicy;

impl AccuracyPolicy for PrecisionPolicy {
    fn select(&self, tier: AccuracyTier, _available: &BTreeSet<ProviderId>) -> ProviderSelection {
        let precision = match tier {
            AccuracyTier::Best => DesiredAccuracy::Best,
            AccuracyTier::Medium => DesiredAccuracy::HundredMeters,
            AccuracyTier::LowPower => DesiredAccuracy::Reduced,
        };
        ProviderSelection::Precision(precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PROVIDERS: [ProviderId; 4] = [
        ProviderId::Fused,
        ProviderId::Gps,
        ProviderId::Network,
        ProviderId::Passive,
    ];

    const ALL_TIERS: [AccuracyTier; 3] = [
        AccuracyTier::Best,
        AccuracyTier::Medium,
        AccuracyTier::LowPower,
    ];

    fn providers(list: &[ProviderId]) -> BTreeSet<ProviderId> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_best_prefers_fused_when_supported() {
        let policy = ProviderPolicy {
            fused_supported: true,
        };
        let selection = policy.select(AccuracyTier::Best, &providers(&ALL_PROVIDERS));
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Fused));
    }

    #[test]
    fn test_best_skips_fused_on_older_platform() {
        let policy = ProviderPolicy {
            fused_supported: false,
        };
        let selection = policy.select(AccuracyTier::Best, &providers(&ALL_PROVIDERS));
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Gps));
    }

    #[test]
    fn test_best_fallback_chain() {
        let policy = ProviderPolicy {
            fused_supported: true,
        };
        let selection = policy.select(
            AccuracyTier::Best,
            &providers(&[ProviderId::Network, ProviderId::Passive]),
        );
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Network));
    }

    #[test]
    fn test_medium_prefers_network() {
        let policy = ProviderPolicy::default();
        let selection = policy.select(AccuracyTier::Medium, &providers(&ALL_PROVIDERS));
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Network));

        let selection = policy.select(
            AccuracyTier::Medium,
            &providers(&[ProviderId::Gps, ProviderId::Passive]),
        );
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Passive));
    }

    #[test]
    fn test_low_power_is_always_passive() {
        let policy = ProviderPolicy {
            fused_supported: true,
        };
        let selection = policy.select(AccuracyTier::LowPower, &providers(&ALL_PROVIDERS));
        assert_eq!(selection, ProviderSelection::Provider(ProviderId::Passive));
    }

    #[test]
    fn test_selection_total_over_all_subsets() {
        // Every tier x every subset of providers must yield a provider from
        // the set or the passive baseline.
        for fused_supported in [false, true] {
            let policy = ProviderPolicy { fused_supported };
            for mask in 0u8..16 {
                let available: BTreeSet<ProviderId> = ALL_PROVIDERS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, p)| *p)
                    .collect();
                for tier in ALL_TIERS {
                    match policy.select(tier, &available) {
                        ProviderSelection::Provider(p) => {
                            assert!(
                                available.contains(&p) || p == ProviderId::Passive,
                                "tier {} mask {:04b} picked unavailable {}",
                                tier,
                                mask,
                                p
                            );
                        }
                        ProviderSelection::Precision(_) => {
                            panic!("provider policy produced a precision selection")
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        let policy = ProviderPolicy {
            fused_supported: true,
        };
        let available = providers(&[ProviderId::Gps, ProviderId::Network]);
        let first = policy.select(AccuracyTier::Best, &available);
        for _ in 0..10 {
            assert_eq!(policy.select(AccuracyTier::Best, &available), first);
        }
    }

    #[test]
    fn test_precision_policy_mapping() {
        let policy = PrecisionPolicy;
        let empty = BTreeSet::new();
        assert_eq!(
            policy.select(AccuracyTier::Best, &empty),
            ProviderSelection::Precision(DesiredAccuracy::Best)
        );
        assert_eq!(
            policy.select(AccuracyTier::Medium, &empty),
            ProviderSelection::Precision(DesiredAccuracy::HundredMeters)
        );
        assert_eq!(
            policy.select(AccuracyTier::LowPower, &empty),
            ProviderSelection::Precision(DesiredAccuracy::Reduced)
        );
    }
}
