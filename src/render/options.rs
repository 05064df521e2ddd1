//! Rendering options and configuration.

use std::fmt;

use super::JsonFormat;

/// Layout direction declared on the diagram block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    /// Top to bottom (`TD`)
    #[default]
    TopDown,
    /// Bottom to top (`BT`)
    BottomUp,
    /// Left to right (`LR`)
    LeftRight,
    /// Right to left (`RL`)
    RightLeft,
}

impl FlowDirection {
    /// Keyword used in the diagram declaration line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::TopDown => "TD",
            FlowDirection::BottomUp => "BT",
            FlowDirection::LeftRight => "LR",
            FlowDirection::RightLeft => "RL",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for rendering a document record.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Direction of the per-page diagram
    pub direction: FlowDirection,

    /// Layout of the structured record
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagram direction.
    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}
