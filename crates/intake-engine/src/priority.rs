// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integer priority to tracker-native label translation.

use intake_core::PriorityScale;

const THREE_TIER_LABELS: [&str; 3] = ["Low", "Medium", "High"];
const FIVE_TIER_LABELS: [&str; 5] = ["Highest", "High", "Medium", "Low", "Lowest"];

/// Maps priorities `1..=N` on a fixed scale to labels, and back.
///
/// Pure: the same priority always yields the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityMapper {
    scale: PriorityScale,
    labels: Vec<String>,
}

impl PriorityMapper {
    /// A mapper using the preset labels for `scale`.
    pub fn new(scale: PriorityScale) -> Self {
        let preset: &[&str] = match scale {
            PriorityScale::ThreeTier => &THREE_TIER_LABELS,
            PriorityScale::FiveTier => &FIVE_TIER_LABELS,
        };
        Self {
            scale,
            labels: preset.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// A mapper with custom labels for tiers `1..=N`.
    ///
    /// Falls back to the presets when the label count does not match the scale;
    /// configuration validation rejects that case before it gets here.
    pub fn with_labels(scale: PriorityScale, labels: Vec<String>) -> Self {
        if labels.len() as i64 != scale.tiers() {
            tracing::warn!(
                %scale,
                given = labels.len(),
                "priority label override has the wrong length, using presets"
            );
            return Self::new(scale);
        }
        Self { scale, labels }
    }

    /// Builds the mapper from configuration: the effective scale plus any label overrides.
    pub fn from_config(config: &intake_config::IntakeConfig) -> Self {
        let scale = config.priority_scale();
        match &config.priority.labels {
            Some(labels) => Self::with_labels(scale, labels.clone()),
            None => Self::new(scale),
        }
    }

    pub fn scale(&self) -> PriorityScale {
        self.scale
    }

    /// The default priority (midpoint of the scale).
    pub fn default_priority(&self) -> i64 {
        self.scale.midpoint()
    }

    /// Label for `priority`; out-of-range values get the default label.
    pub fn label(&self, priority: i64) -> &str {
        let tier = if self.scale.range().contains(&priority) {
            priority
        } else {
            self.default_priority()
        };
        &self.labels[(tier - 1) as usize]
    }

    /// Tier for `label`, compared case-insensitively.
    pub fn tier_of(&self, label: &str) -> Option<i64> {
        let wanted = label.trim();
        self.labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(wanted))
            .map(|idx| idx as i64 + 1)
    }

    /// All labels in tier order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_tier_presets() {
        let m = PriorityMapper::new(PriorityScale::ThreeTier);
        assert_eq!(m.label(1), "Low");
        assert_eq!(m.label(2), "Medium");
        assert_eq!(m.label(3), "High");
        assert_eq!(m.default_priority(), 2);
    }

    #[test]
    fn five_tier_presets() {
        let m = PriorityMapper::new(PriorityScale::FiveTier);
        assert_eq!(m.label(1), "Highest");
        assert_eq!(m.label(3), "Medium");
        assert_eq!(m.label(5), "Lowest");
        assert_eq!(m.default_priority(), 3);
    }

    #[test]
    fn out_of_range_maps_to_default_label() {
        let m = PriorityMapper::new(PriorityScale::ThreeTier);
        assert_eq!(m.label(0), "Medium");
        assert_eq!(m.label(7), "Medium");
        assert_eq!(m.label(-1), "Medium");
    }

    #[test]
    fn tier_of_ignores_case() {
        let m = PriorityMapper::new(PriorityScale::FiveTier);
        assert_eq!(m.tier_of("highest"), Some(1));
        assert_eq!(m.tier_of(" LOW "), Some(4));
        assert_eq!(m.tier_of("urgent"), None);
    }

    #[test]
    fn custom_labels_replace_presets() {
        let m = PriorityMapper::with_labels(
            PriorityScale::ThreeTier,
            vec!["P3".into(), "P2".into(), "P1".into()],
        );
        assert_eq!(m.label(3), "P1");
        assert_eq!(m.tier_of("p2"), Some(2));
    }

    #[test]
    fn mismatched_labels_fall_back_to_presets() {
        let m = PriorityMapper::with_labels(PriorityScale::FiveTier, vec!["only".into()]);
        assert_eq!(m, PriorityMapper::new(PriorityScale::FiveTier));
    }

    #[test]
    fn from_config_follows_tracker_kind() {
        let mut config = intake_config::IntakeConfig::default();
        config.tracker.kind = intake_config::TrackerKind::Jira;
        let m = PriorityMapper::from_config(&config);
        assert_eq!(m.scale(), PriorityScale::FiveTier);
        assert_eq!(m.label(2), "High");
    }

    proptest! {
        #[test]
        fn label_round_trips_in_range(five in any::<bool>(), seed in 0i64..100) {
            let scale = if five { PriorityScale::FiveTier } else { PriorityScale::ThreeTier };
            let m = PriorityMapper::new(scale);
            let p = 1 + seed % scale.tiers();
            prop_assert_eq!(m.tier_of(m.label(p)), Some(p));
        }

        #[test]
        fn label_is_pure(p in any::<i64>()) {
            let m = PriorityMapper::new(PriorityScale::FiveTier);
            prop_assert_eq!(m.label(p), m.label(p));
        }
    }
}
