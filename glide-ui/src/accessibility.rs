//! # Accessibility Support
//!
//! Semantic descriptions of controls for assistive technologies, built on
//! AccessKit. Controls describe themselves with an [`AccessibilityNode`]
//! and the host converts it into an AccessKit node when it publishes its
//! tree update.
//!
//! ```
//! use glide_ui::accesskit::{Action, Role};
//! use glide_ui::accessibility::AccessibilityNode;
//!
//! let node = AccessibilityNode::new()
//!     .with_role(Role::Slider)
//!     .with_numeric_value(42.0)
//!     .with_numeric_range(0.0, 100.0)
//!     .with_value("42%")
//!     .with_action(Action::Increment)
//!     .focusable();
//!
//! let built = node.to_accesskit();
//! assert_eq!(built.role(), Role::Slider);
//! assert_eq!(built.numeric_value(), Some(42.0));
//! ```

use accesskit::{Action, Node, Role};

/// Semantic information for an accessibility node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessibilityNode {
    /// The role of this node (slider, button, ...)
    pub role: Option<Role>,
    /// A human-readable label for this node
    pub label: Option<String>,
    /// The current value as text
    pub value: Option<String>,
    /// Numeric value (for sliders, progress bars, etc.)
    pub numeric_value: Option<f64>,
    /// Minimum numeric value
    pub min_numeric_value: Option<f64>,
    /// Maximum numeric value
    pub max_numeric_value: Option<f64>,
    /// Numeric step for increment/decrement
    pub numeric_value_step: Option<f64>,
    /// Whether this node can receive focus
    pub focusable: bool,
    /// Whether this node is hidden from accessibility
    pub hidden: bool,
    /// Supported actions
    pub actions: Vec<Action>,
}

impl AccessibilityNode {
    /// Creates a new empty accessibility node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the role of this node.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the label of this node.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the textual value of this node.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the numeric value of this node.
    pub fn with_numeric_value(mut self, value: f64) -> Self {
        self.numeric_value = Some(value);
        self
    }

    /// Sets the numeric range of this node.
    pub fn with_numeric_range(mut self, min: f64, max: f64) -> Self {
        self.min_numeric_value = Some(min);
        self.max_numeric_value = Some(max);
        self
    }

    /// Sets the increment/decrement step.
    pub fn with_numeric_step(mut self, step: f64) -> Self {
        self.numeric_value_step = Some(step);
        self
    }

    /// Marks this node as focusable.
    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    /// Marks this node as hidden from accessibility.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Adds an action that this node supports.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Builds the AccessKit node.
    pub fn to_accesskit(&self) -> Node {
        let mut node = Node::new(self.role.unwrap_or(Role::Unknown));

        if let Some(label) = self.label.as_ref() {
            node.set_label(label.clone());
        }
        if let Some(value) = self.value.as_ref() {
            node.set_value(value.clone());
        }
        if let Some(numeric_value) = self.numeric_value {
            node.set_numeric_value(numeric_value);
        }
        if let Some(min) = self.min_numeric_value {
            node.set_min_numeric_value(min);
        }
        if let Some(max) = self.max_numeric_value {
            node.set_max_numeric_value(max);
        }
        if let Some(step) = self.numeric_value_step {
            node.set_numeric_value_step(step);
        }
        if self.focusable {
            node.add_action(Action::Focus);
        }
        if self.hidden {
            node.set_hidden();
        }
        for action in &self.actions {
            node.add_action(*action);
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_slider_node() {
        let node = AccessibilityNode::new()
            .with_role(Role::Slider)
            .with_label("Volume")
            .with_numeric_value(30.0)
            .with_numeric_range(0.0, 100.0)
            .with_numeric_step(10.0)
            .with_value("30%")
            .with_action(Action::Increment)
            .with_action(Action::Decrement)
            .focusable()
            .to_accesskit();

        assert_eq!(node.role(), Role::Slider);
        assert_eq!(node.label(), Some("Volume"));
        assert_eq!(node.value(), Some("30%"));
        assert_eq!(node.numeric_value(), Some(30.0));
        assert_eq!(node.min_numeric_value(), Some(0.0));
        assert_eq!(node.max_numeric_value(), Some(100.0));
        assert!(node.supports_action(Action::Increment));
        assert!(node.supports_action(Action::Focus));
        assert!(!node.is_hidden());
    }

    #[test]
    fn hidden_flag_carries_over() {
        let node = AccessibilityNode::new().hidden().to_accesskit();
        assert_eq!(node.role(), Role::Unknown);
        assert!(node.is_hidden());
        assert!(!node.supports_action(Action::Focus));
    }
}
