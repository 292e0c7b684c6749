//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Indicator, Pulse, PulseIndicator, SearchPulse, Timestamp, UserDetail};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// A user profile with every count filled in.
    pub fn user(user_id: i64, username: &str) -> UserDetail {
        UserDetail {
            user_id: Some(user_id),
            username: Some(username.to_string()),
            member_since: Some("2017-03-14".to_string()),
            award_count: Some(3),
            follower_count: Some(12),
            subscriber_count: Some(40),
            indicator_count: Some(1530),
            pulse_count: Some(27),
        }
    }

    // =========================================================================
    // Pulse Fixtures
    // =========================================================================

    /// Create a pulse with only an ID and a name.
    pub fn minimal_pulse(id: &str, name: &str) -> Pulse {
        Pulse {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            author: None,
            description: None,
            created_at: None,
            modified_at: None,
            references: vec![],
            tags: vec![],
            indicators: vec![],
            revision: None,
            tlp: None,
            public: None,
            adversary: None,
            targeted_countries: vec![],
            industries: vec![],
        }
    }

    /// Create a published pulse carrying the given indicators.
    pub fn pulse_with_indicators(id: &str, name: &str, indicators: Vec<PulseIndicator>) -> Pulse {
        let mut pulse = Self::minimal_pulse(id, name);
        pulse.author = Some("AlienVault".to_string());
        pulse.created_at = Some(Self::timestamp());
        pulse.modified_at = Some(Self::timestamp());
        pulse.revision = Some(1.0);
        pulse.tlp = Some("white".to_string());
        pulse.public = Some(true);
        pulse.indicators = indicators;
        pulse
    }

    /// Create an active indicator.
    pub fn indicator(id: i64, indicator_type: &str, value: &str) -> PulseIndicator {
        PulseIndicator {
            id: Some(id),
            indicator: Some(value.to_string()),
            indicator_type: Some(indicator_type.to_string()),
            title: None,
            description: None,
            content: None,
            created: Some(Self::timestamp()),
            expiration: None,
            active: Some(1),
            access_reason: None,
            access_type: Some("public".to_string()),
            access_groups: vec![],
            observations: Some(1),
        }
    }

    // =========================================================================
    // Search Fixtures
    // =========================================================================

    /// Create a search hit with one domain indicator.
    pub fn search_pulse(id: &str, name: &str, indicator: &str) -> SearchPulse {
        SearchPulse {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            indicators: vec![Indicator {
                id: Some(format!("{id}-1")),
                indicator: Some(indicator.to_string()),
                indicator_type: Some("domain".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn timestamp() -> Timestamp {
        // 2021-05-20T05:31:16Z
        Timestamp::from(chrono::DateTime::from_timestamp(1_621_488_676, 0).unwrap_or_default())
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Create a complete test scenario: one user, five subscribed pulses
    /// and ten search hits about the same campaign.
    pub fn default_scenario() -> DefaultScenario {
        let pulses = (1..=5)
            .map(|n| {
                Self::pulse_with_indicators(
                    &format!("pulse-{n}"),
                    &format!("Campaign report {n}"),
                    vec![
                        Self::indicator(n * 10, "domain", &format!("c2-{n}.example")),
                        Self::indicator(n * 10 + 1, "IPv4", &format!("198.51.100.{n}")),
                    ],
                )
            })
            .collect();

        let search_pulses = (1..=10)
            .map(|n| {
                Self::search_pulse(
                    &format!("search-{n}"),
                    &format!("Emotet wave {n}"),
                    &format!("emotet-{n}.example"),
                )
            })
            .collect();

        DefaultScenario {
            user: Self::user(4242, "analyst"),
            pulses,
            search_pulses,
        }
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub user: UserDetail,
    pub pulses: Vec<Pulse>,
    pub search_pulses: Vec<SearchPulse>,
}
