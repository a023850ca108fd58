//! One-shot perturbations
//!
//! A perturbation mutates a game's style configuration (palette or
//! geometry) exactly once during the environment's lifetime, when the
//! global step counter equals the configured trigger step. The comparison
//! is exact equality: if a game resets its counter past the trigger, the
//! perturbation simply never fires.
//!
//! Rendering additionally swaps the primitive used for certain entities
//! (rectangle/ellipse/triangle) once a shape perturbation has fired; that
//! cosmetic swap is keyed by `counter >= trigger`, distinct from the
//! one-shot mutation itself.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Kind of perturbation to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerturbKind {
    /// Swap every entry in the palette for a fixed high-contrast scheme
    Color,

    /// Scale entity sizes and switch drawing primitives
    ///
    /// Where sizes feed collision bounds, the new sizes are used by the
    /// resolver from the next step onward, so this changes difficulty and
    /// not merely appearance.
    Shape,
}

impl PerturbKind {
    /// Parse a perturbation request from its string form
    ///
    /// Accepts `None`, `"None"`, `"color"`, and `"shape"`; anything else
    /// fails fast. This is the only validated construction input.
    pub fn parse(value: Option<&str>) -> Result<Option<Self>> {
        match value {
            None | Some("None") => Ok(None),
            Some("color") => Ok(Some(PerturbKind::Color)),
            Some("shape") => Ok(Some(PerturbKind::Shape)),
            Some(other) => {
                Err(anyhow!("perturb must be None, 'color', or 'shape', got {other:?}"))
            }
        }
    }
}

/// When (and whether) a perturbation fires
#[derive(Debug, Clone, Copy)]
pub struct PerturbSchedule {
    kind: Option<PerturbKind>,
    trigger_step: u64,
}

impl PerturbSchedule {
    /// Create a schedule firing `kind` when the step counter equals
    /// `trigger_step`
    pub fn new(kind: Option<PerturbKind>, trigger_step: u64) -> Self {
        Self { kind, trigger_step }
    }

    /// The perturbation due at this exact counter value, if any
    pub fn due(&self, num_steps: u64) -> Option<PerturbKind> {
        self.kind.filter(|_| num_steps == self.trigger_step)
    }

    /// Whether rendering should use the post-perturbation primitives
    pub fn shapes_swapped(&self, num_steps: u64) -> bool {
        self.kind == Some(PerturbKind::Shape) && num_steps >= self.trigger_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_known_values() {
        assert_eq!(PerturbKind::parse(None).unwrap(), None);
        assert_eq!(PerturbKind::parse(Some("None")).unwrap(), None);
        assert_eq!(PerturbKind::parse(Some("color")).unwrap(), Some(PerturbKind::Color));
        assert_eq!(PerturbKind::parse(Some("shape")).unwrap(), Some(PerturbKind::Shape));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let err = PerturbKind::parse(Some("resize")).unwrap_err();
        assert!(err.to_string().contains("resize"), "error names the offending value");
        assert!(PerturbKind::parse(Some("Color")).is_err(), "kinds are case-sensitive");
    }

    #[test]
    fn test_due_requires_exact_equality() {
        let schedule = PerturbSchedule::new(Some(PerturbKind::Color), 3);
        assert_eq!(schedule.due(2), None);
        assert_eq!(schedule.due(3), Some(PerturbKind::Color));
        assert_eq!(schedule.due(4), None, "a counter advanced past the trigger never fires");
    }

    #[test]
    fn test_due_without_kind_never_fires() {
        let schedule = PerturbSchedule::new(None, 3);
        assert_eq!(schedule.due(3), None);
    }

    #[test]
    fn test_shapes_swapped_is_threshold_based() {
        let schedule = PerturbSchedule::new(Some(PerturbKind::Shape), 5);
        assert!(!schedule.shapes_swapped(4));
        assert!(schedule.shapes_swapped(5));
        assert!(schedule.shapes_swapped(6));

        let color = PerturbSchedule::new(Some(PerturbKind::Color), 5);
        assert!(!color.shapes_swapped(10), "color perturbations never swap primitives");
    }
}
