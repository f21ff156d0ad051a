//! Editor configuration.
//!
//! # Example
//!
//! ```
//! use zencollage::{EditorConfig, GridDims, PageSize, ShrinkPolicy};
//!
//! let config = EditorConfig::new()
//!     .initial_grid(GridDims::new(4, 5).unwrap())
//!     .page(PageSize::new(200.0, 200.0))
//!     .shrink_policy(ShrinkPolicy::Reject)
//!     .auto_layout(false);
//!
//! assert_eq!(config.shrink_policy, ShrinkPolicy::Reject);
//! ```

use crate::export::PageSize;
use crate::grid::GridDims;

/// What a resize does with placements that no longer fit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShrinkPolicy {
    /// Drop them. They are not restored if the grid grows again.
    #[default]
    Drop,
    /// Refuse the resize with [`EditorError::ShrinkRejected`](crate::EditorError::ShrinkRejected).
    Reject,
}

/// Editor settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Grid the editor starts with.
    pub initial_grid: GridDims,
    /// Output page size. Its aspect ratio is the auto-layout target.
    pub page: PageSize,
    /// Resize behaviour for placements that would fall off the grid.
    pub shrink_policy: ShrinkPolicy,
    /// Re-pick grid dimensions after every upload batch.
    pub auto_layout: bool,
}

impl EditorConfig {
    /// Default configuration: 3×3 grid, A4 page, drop on shrink, auto-layout on.
    pub fn new() -> Self {
        Self {
            initial_grid: GridDims::DEFAULT,
            page: PageSize::A4,
            shrink_policy: ShrinkPolicy::Drop,
            auto_layout: true,
        }
    }

    /// Set the starting grid.
    pub fn initial_grid(mut self, dims: GridDims) -> Self {
        self.initial_grid = dims;
        self
    }

    /// Set the output page size.
    pub fn page(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    /// Set the shrink policy.
    pub fn shrink_policy(mut self, policy: ShrinkPolicy) -> Self {
        self.shrink_policy = policy;
        self
    }

    /// Enable or disable auto-layout after uploads.
    pub fn auto_layout(mut self, enabled: bool) -> Self {
        self.auto_layout = enabled;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
