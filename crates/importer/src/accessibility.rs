//! Accessibility flags and their rider-facing labels.

use serde::Serialize;

/// One accessibility feature a route or a stop can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessibilityFeature {
    NextStopVocal,
    NextStopVisual,
    NextBusVocal,
    NextBusVisual,
    DisruptionVisual,
    DisruptionVocal,
    Wheelchair,
}

/// Flags checked on a route row, in label order.
pub const ROUTE_FEATURES: [AccessibilityFeature; 3] = [
    AccessibilityFeature::Wheelchair,
    AccessibilityFeature::NextStopVisual,
    AccessibilityFeature::NextStopVocal,
];

/// Flags checked on a stop row, in label order.
pub const STOP_FEATURES: [AccessibilityFeature; 5] = [
    AccessibilityFeature::Wheelchair,
    AccessibilityFeature::NextBusVisual,
    AccessibilityFeature::NextBusVocal,
    AccessibilityFeature::DisruptionVocal,
    AccessibilityFeature::DisruptionVisual,
];

impl AccessibilityFeature {
    pub fn description(&self) -> &'static str {
        match self {
            AccessibilityFeature::NextStopVocal => "Annonce sonore prochain arrêt",
            AccessibilityFeature::NextStopVisual => "Annonce visuelle prochain arrêt",
            AccessibilityFeature::NextBusVocal => "Annonce sonore prochain passage",
            AccessibilityFeature::NextBusVisual => "Annonce visuelle prochain passage",
            AccessibilityFeature::DisruptionVisual => "Annonce visuelle situations pertubées",
            AccessibilityFeature::DisruptionVocal => "Annonce sonore situations pertubées",
            AccessibilityFeature::Wheelchair => "Accessible en fauteuil roulant",
        }
    }
}

/// Labels for every flag exactly equal to `1`, in the order given.
///
/// Values such as `2` or `-1` are not treated as set.
pub fn labels_for(flags: &[(AccessibilityFeature, i64)]) -> Vec<String> {
    flags
        .iter()
        .filter(|(_, value)| *value == 1)
        .map(|(feature, _)| feature.description().to_string())
        .collect()
}
