//! Render dispatch.
//!
//! Variants record through a [`RenderPass`], which rejects commands issued
//! out of order instead of producing a broken command stream.

mod pass;

pub use pass::RenderPass;

use crate::device::DeviceError;
use crate::variants::VariantState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("`{command}` recorded before a pipeline was set")]
    NoPipeline { command: &'static str },
    #[error("root table {root_parameter} set before a descriptor heap")]
    NoDescriptorHeap { root_parameter: u32 },
    #[error("root table {root_parameter} set after input assembly of a pending draw")]
    TableAfterInputAssembly { root_parameter: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("variant `{variant}` cannot render while {state:?}")]
    NotReady {
        variant: &'static str,
        state: VariantState,
    },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("writing object constants")]
    Constants(#[from] DeviceError),
}
