//! Shader variants.
//!
//! Responsibilities:
//! - describe each variant through a static capability table ([`ShaderKind`])
//! - create one pipeline per variant from compiled stages
//! - build and own the variant's renderable objects (foliage sets, passes)
//! - record each variant's draws through a [`crate::render::RenderPass`]

mod billboard;
mod context;
mod geometry;
mod kind;
mod post;
mod variant;

pub use billboard::{BillboardPreset, BillboardSet};
pub use context::BuildContext;
pub use geometry::{scattered_position, BillboardVertex, GeometryBillboardSet};
pub use kind::{
    billboard_point_layout, colored_layout, terrain_layout, textured_layout, ShaderCapabilities,
    ShaderKind, StageEntry, TargetSet,
};
pub use post::PostProcessPass;
pub use variant::{ShaderObjects, ShaderVariant};

/// Where a variant is in its build/release lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VariantState {
    Unbuilt,
    /// Pipeline created.
    Configured,
    /// Objects built; upload buffers may still be live.
    Populated,
    /// Upload buffers released.
    Renderable,
    Released,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("{variant}: `{operation}` is not allowed while {state:?}")]
    InvalidTransition {
        variant: &'static str,
        operation: &'static str,
        state: VariantState,
    },
    #[error("{variant}: build context has no {what}")]
    MissingContext {
        variant: &'static str,
        what: &'static str,
    },
}

impl VariantError {
    pub(crate) fn require<T>(
        value: Option<T>,
        variant: &'static str,
        what: &'static str,
    ) -> Result<T, VariantError> {
        value.ok_or(VariantError::MissingContext { variant, what })
    }
}
