//! Accessibility attributes derived from a [`ValueModel`].

use glide_ui::{
    AccessibilityNode,
    accesskit::{Action, Role},
};

use crate::value_model::{ValueModel, percentage};

/// Numeric and textual value exposed to assistive technologies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessibilityReport {
    /// Effective value as a percentage, `0` while muted.
    pub numeric_value: u8,
    /// `numeric_value` with a percent suffix.
    pub text_value: String,
}

impl AccessibilityReport {
    /// Report for an effective value in `[0, 1]`.
    pub fn from_effective(effective: f32) -> Self {
        let numeric_value = percentage(effective);
        Self {
            numeric_value,
            text_value: format!("{numeric_value}%"),
        }
    }

    /// Slider node carrying this report.
    pub fn to_node(&self, label: Option<&str>) -> AccessibilityNode {
        let mut node = AccessibilityNode::new()
            .with_role(Role::Slider)
            .with_numeric_value(f64::from(self.numeric_value))
            .with_numeric_range(0.0, 100.0)
            .with_numeric_step(10.0)
            .with_value(self.text_value.clone())
            .with_action(Action::Increment)
            .with_action(Action::Decrement)
            .focusable();
        if let Some(label) = label {
            node = node.with_label(label);
        }
        node
    }
}

/// Projects the model into its accessibility report.
///
/// ```
/// use glide_controls::{accessibility_report::report, value_model::ValueModel};
///
/// let mut model = ValueModel::new(0.42);
/// assert_eq!(report(&model).text_value, "42%");
/// model.set_muted(true);
/// assert_eq!(report(&model).numeric_value, 0);
/// ```
pub fn report(model: &ValueModel) -> AccessibilityReport {
    AccessibilityReport::from_effective(model.get())
}

/// Emits a report only when it differs from the previous one, so rapid input
/// that does not move the rounded percentage produces no updates.
#[derive(Debug, Default, Clone)]
pub struct AccessibilityReporter {
    last: Option<AccessibilityReport>,
}

impl AccessibilityReporter {
    /// Creates a reporter that has not emitted anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reporter that treats `model`'s current report as already
    /// emitted.
    pub fn primed(model: &ValueModel) -> Self {
        Self {
            last: Some(report(model)),
        }
    }

    /// Observes the model after a change.
    pub fn observe(&mut self, model: &ValueModel) -> Option<AccessibilityReport> {
        self.observe_effective(model.get())
    }

    /// Observes an effective value after a change.
    pub fn observe_effective(&mut self, effective: f32) -> Option<AccessibilityReport> {
        let next = AccessibilityReport::from_effective(effective);
        if self.last.as_ref() == Some(&next) {
            return None;
        }
        self.last = Some(next.clone());
        Some(next)
    }

    /// The most recent report emitted.
    pub fn last(&self) -> Option<&AccessibilityReport> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muting_overrides_numeric_value_but_not_stored_value() {
        let mut model = ValueModel::new(0.42);
        assert_eq!(
            report(&model),
            AccessibilityReport {
                numeric_value: 42,
                text_value: "42%".to_string(),
            }
        );

        model.set_muted(true);
        assert_eq!(
            report(&model),
            AccessibilityReport {
                numeric_value: 0,
                text_value: "0%".to_string(),
            }
        );
        assert_eq!(model.value(), 0.42);
    }

    #[test]
    fn reporter_suppresses_duplicates() {
        let mut model = ValueModel::new(0.5);
        let mut reporter = AccessibilityReporter::primed(&model);

        model.set(0.501);
        assert_eq!(reporter.observe(&model), None);

        model.set(0.51);
        assert_eq!(reporter.observe(&model).map(|r| r.numeric_value), Some(51));
        assert_eq!(reporter.observe(&model), None);
        assert_eq!(reporter.last().map(|r| r.text_value.as_str()), Some("51%"));
    }

    #[test]
    fn node_carries_report_values() {
        let node = AccessibilityReport::from_effective(1.0).to_node(Some("Volume Level"));
        assert_eq!(node.role, Some(Role::Slider));
        assert_eq!(node.numeric_value, Some(100.0));
        assert_eq!(node.value.as_deref(), Some("100%"));
        assert_eq!(node.label.as_deref(), Some("Volume Level"));
        assert!(node.actions.contains(&Action::Decrement));
    }
}
