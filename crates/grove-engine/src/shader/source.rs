use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::profile::{ShaderProfile, ShaderStage};
use super::ShaderError;

/// Compiled shader blob. May be empty (no stage bound).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderBytecode {
    blob: Option<Arc<[u8]>>,
}

impl ShaderBytecode {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::empty();
        }
        Self {
            blob: Some(bytes.into()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blob.as_ref().map_or(0, |b| b.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.blob.as_deref().unwrap_or(&[])
    }
}

/// Named entry point inside a shader source file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct EntryPoint {
    /// Source file, relative to the program source directory.
    pub source: &'static str,
    pub name: &'static str,
    pub profile: &'static str,
}

impl EntryPoint {
    pub const fn new(source: &'static str, name: &'static str, profile: &'static str) -> Self {
        Self { source, name, profile }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CompileFlags {
    pub debug: bool,
    pub skip_optimization: bool,
}

impl CompileFlags {
    /// Debug info and no optimization in debug builds, nothing otherwise.
    pub fn for_build() -> Self {
        let debug = cfg!(debug_assertions);
        Self {
            debug,
            skip_optimization: debug,
        }
    }
}

/// External shader compiler.
///
/// Returns the bytecode, or the compiler's diagnostic text on failure.
pub trait ShaderCompiler {
    fn compile(
        &self,
        path: &Path,
        entry: &str,
        profile: &ShaderProfile,
        flags: CompileFlags,
    ) -> Result<Vec<u8>, String>;
}

/// Resolves entry points against a source directory and compiles them.
///
/// Nothing is cached; each call compiles again.
#[derive(Debug)]
pub struct ShaderProgramSource<C> {
    compiler: C,
    directory: PathBuf,
    flags: CompileFlags,
}

impl<C: ShaderCompiler> ShaderProgramSource<C> {
    pub fn new(compiler: C, directory: impl Into<PathBuf>, flags: CompileFlags) -> Self {
        Self {
            compiler,
            directory: directory.into(),
            flags,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn path_of(&self, entry: &EntryPoint) -> PathBuf {
        self.directory.join(entry.source)
    }

    /// Compiles `entry` for `stage`.
    ///
    /// The profile must name the same stage. Compiler diagnostics are logged and
    /// returned; an empty result from the compiler is an error too.
    pub fn compile(&self, entry: &EntryPoint, stage: ShaderStage) -> Result<ShaderBytecode, ShaderError> {
        let profile: ShaderProfile = entry.profile.parse()?;
        if profile.stage != stage {
            return Err(ShaderError::StageMismatch {
                entry: entry.name.to_owned(),
                expected: stage.name(),
                profile: entry.profile.to_owned(),
            });
        }

        let path = self.path_of(entry);
        let bytes = self
            .compiler
            .compile(&path, entry.name, &profile, self.flags)
            .map_err(|message| {
                log::error!("{}:{} ({profile}): {message}", path.display(), entry.name);
                ShaderError::Compile {
                    entry: entry.name.to_owned(),
                    path: path.clone(),
                    message,
                }
            })?;

        if bytes.is_empty() {
            return Err(ShaderError::EmptyBytecode { stage: stage.name() });
        }
        log::debug!("compiled {} ({profile}), {} bytes", entry.name, bytes.len());
        Ok(ShaderBytecode::new(bytes))
    }

    /// Compiles `entry` if present, otherwise returns empty bytecode.
    pub fn compile_optional(
        &self,
        entry: Option<&EntryPoint>,
        stage: ShaderStage,
    ) -> Result<ShaderBytecode, ShaderError> {
        match entry {
            Some(entry) => self.compile(entry, stage),
            None => Ok(ShaderBytecode::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingCompiler;

    const VS: EntryPoint = EntryPoint::new("Shaders.hlsl", "VSTextured", "vs_5_1");

    fn source() -> ShaderProgramSource<RecordingCompiler> {
        ShaderProgramSource::new(RecordingCompiler::new(), "shaders", CompileFlags::default())
    }

    #[test]
    fn empty_bytecode_has_no_blob() {
        let b = ShaderBytecode::empty();
        assert!(b.is_empty());
        assert_eq!(b.as_bytes(), &[] as &[u8]);
        assert!(ShaderBytecode::new(Vec::new()).is_empty());
    }

    #[test]
    fn compiles_every_call() {
        let src = source();
        let a = src.compile(&VS, ShaderStage::Vertex).unwrap();
        let b = src.compile(&VS, ShaderStage::Vertex).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
        assert_eq!(src.compiler().compile_count(), 2);
    }

    #[test]
    fn resolves_path_against_directory() {
        let src = source();
        src.compile(&VS, ShaderStage::Vertex).unwrap();
        let calls = src.compiler().calls();
        assert_eq!(calls[0].path, Path::new("shaders").join("Shaders.hlsl"));
        assert_eq!(calls[0].entry, "VSTextured");
    }

    #[test]
    fn stage_must_match_profile() {
        let err = source().compile(&VS, ShaderStage::Pixel).unwrap_err();
        assert!(matches!(err, ShaderError::StageMismatch { expected: "pixel", .. }));
    }

    #[test]
    fn compiler_errors_are_surfaced() {
        let src = source();
        src.compiler().fail_entry("VSTextured", "error X3000: syntax error");
        let err = src.compile(&VS, ShaderStage::Vertex).unwrap_err();
        match err {
            ShaderError::Compile { entry, message, .. } => {
                assert_eq!(entry, "VSTextured");
                assert!(message.contains("X3000"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_optional_stage_is_empty() {
        let gs = source().compile_optional(None, ShaderStage::Geometry).unwrap();
        assert!(gs.is_empty());
    }
}
