//! Query options.

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// How many left-hand matches a combinator is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AnchorMode {
    /// Only the first left-hand match in document order is the anchor.
    #[default]
    First,
    /// Every left-hand match is an anchor; a candidate qualifies when the
    /// relation holds for any of them.
    Every,
}

/// Which operand the subsequent-sibling combinator (`~`) emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SiblingResult {
    /// The left-hand anchor, once, when any later sibling matches.
    #[default]
    Anchor,
    /// Each matching later sibling, as CSS does.
    Candidate,
}

/// Knobs for combinator evaluation. The defaults give the documented
/// single-anchor behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QueryOptions {
    /// Anchor selection for every combinator.
    pub anchor_mode: AnchorMode,
    /// Result side of `~`.
    pub sibling_result: SiblingResult,
}

impl QueryOptions {
    /// Set the anchor mode.
    #[must_use]
    pub const fn with_anchor_mode(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }

    /// Set the result side of `~`.
    #[must_use]
    pub const fn with_sibling_result(mut self, sibling_result: SiblingResult) -> Self {
        self.sibling_result = sibling_result;
        self
    }
}
