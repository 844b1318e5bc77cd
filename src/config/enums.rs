//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface that receives device events when the application starts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StartSurface {
    /// Practice game first, then the drawing board
    #[default]
    Tutorial,
    /// Straight to the drawing board
    Main,
}
