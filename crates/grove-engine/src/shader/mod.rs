//! Shader program sources and compiled bytecode.

mod profile;
mod source;

use std::path::PathBuf;

use thiserror::Error;

pub use profile::{ShaderProfile, ShaderStage};
pub use source::{CompileFlags, EntryPoint, ShaderBytecode, ShaderCompiler, ShaderProgramSource};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("invalid shader profile `{0}`")]
    InvalidProfile(String),

    #[error("entry point `{entry}` has profile `{profile}`, expected a {expected} profile")]
    StageMismatch {
        entry: String,
        expected: &'static str,
        profile: String,
    },

    #[error("failed to compile `{entry}` from {}: {message}", path.display())]
    Compile {
        entry: String,
        path: PathBuf,
        message: String,
    },

    #[error("{stage} shader bytecode is empty")]
    EmptyBytecode { stage: &'static str },
}
