//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Pulse, PulseIndicator, SearchPulse, UserDetail};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

impl PrettyPrint for UserDetail {
    fn pretty_print(&self) -> String {
        let header = format!("User: {}", or_dash(self.username.as_deref()));
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(id) = self.user_id {
            lines.push(format!("User ID:        {}", id));
        }
        if let Some(ref since) = self.member_since {
            lines.push(format!("Member Since:   {}", since));
        }

        let counts = [
            ("Pulses:         ", self.pulse_count),
            ("Indicators:     ", self.indicator_count),
            ("Followers:      ", self.follower_count),
            ("Subscribers:    ", self.subscriber_count),
            ("Awards:         ", self.award_count),
        ];
        for (label, count) in counts {
            if let Some(count) = count {
                lines.push(format!("{label}{count}"));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PulseIndicator {
    fn pretty_print(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            self.created
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            or_dash(self.title.as_deref()),
            or_dash(self.indicator_type.as_deref()),
            or_dash(self.indicator.as_deref()),
        )
    }
}

impl PrettyPrint for Pulse {
    fn pretty_print(&self) -> String {
        let mut out = format!(
            "{}\t{}\t{}",
            or_dash(self.id.as_deref()),
            or_dash(self.name.as_deref()),
            self.created_at
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
        if let Some(revision) = self.revision {
            out.push_str(&format!("\t(rev {revision})"));
        }
        for indicator in &self.indicators {
            out.push_str("\n\t");
            out.push_str(&indicator.pretty_print());
        }
        out
    }
}

impl PrettyPrint for SearchPulse {
    fn pretty_print(&self) -> String {
        let mut out = format!(
            "{} - {}",
            or_dash(self.id.as_deref()),
            or_dash(self.name.as_deref())
        );
        for indicator in &self.indicators {
            out.push_str(&format!(
                "\n    {} = {}",
                or_dash(indicator.indicator_type.as_deref()),
                or_dash(indicator.indicator.as_deref())
            ));
        }
        out
    }
}
