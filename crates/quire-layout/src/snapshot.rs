//! Serializable snapshots of a laid-out tree.
//!
//! Used by tests and debugging tools to compare layouts as JSON. Laid-out
//! placeholders appear as their box; pending ones are flagged.

use serde::Serialize;

use crate::error::Result;
use crate::style::PositionType;
use crate::tree::{BoxNode, LayoutBox};

/// Geometry of one box and its descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSnapshot {
    /// Kind of the box, in kebab-case.
    pub kind: &'static str,
    /// Positioning scheme.
    pub position: PositionType,
    /// Left edge of the margin box.
    pub x: f32,
    /// Top edge of the margin box.
    pub y: f32,
    /// Content width.
    pub width: f32,
    /// Content height.
    pub height: f32,
    /// Baseline from the top of the margin box.
    pub baseline: f32,
    /// Text of a text box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Whether this is an out-of-flow box still waiting for layout.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
    /// Children, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxSnapshot>,
}

impl BoxSnapshot {
    /// Snapshot `node` and its subtree.
    #[must_use]
    pub fn of(node: &LayoutBox) -> Self {
        Self::with_state(node, false)
    }

    fn with_state(node: &LayoutBox, pending: bool) -> Self {
        let children = node
            .children
            .iter()
            .map(|child| match child {
                BoxNode::Box(child) => Self::of(child),
                BoxNode::Placeholder(placeholder) => {
                    Self::with_state(&placeholder.borrow_box(), !placeholder.is_laid_out())
                }
            })
            .collect();
        Self {
            kind: node.kind.name(),
            position: node.style.position,
            x: node.position_x,
            y: node.position_y,
            width: node.width,
            height: node.height,
            baseline: node.baseline,
            text: node.text_content().map(str::to_owned),
            pending,
            children,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Fails only if serialization itself fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
