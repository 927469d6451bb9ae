use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shader::{CompileFlags, ShaderCompiler, ShaderProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct CompileCall {
    pub path: PathBuf,
    pub entry: String,
    pub profile: ShaderProfile,
    pub flags: CompileFlags,
}

/// Compiler stand-in: emits `entry:profile` as the blob and records each call.
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    calls: RefCell<Vec<CompileCall>>,
    failures: RefCell<HashMap<String, String>>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every compilation of `entry` fail with `message`.
    pub fn fail_entry(&self, entry: &str, message: &str) {
        self.failures
            .borrow_mut()
            .insert(entry.to_owned(), message.to_owned());
    }

    pub fn calls(&self) -> Vec<CompileCall> {
        self.calls.borrow().clone()
    }

    pub fn compile_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ShaderCompiler for RecordingCompiler {
    fn compile(
        &self,
        path: &Path,
        entry: &str,
        profile: &ShaderProfile,
        flags: CompileFlags,
    ) -> Result<Vec<u8>, String> {
        self.calls.borrow_mut().push(CompileCall {
            path: path.to_path_buf(),
            entry: entry.to_owned(),
            profile: *profile,
            flags,
        });

        if let Some(message) = self.failures.borrow().get(entry) {
            return Err(message.clone());
        }
        Ok(format!("{entry}:{profile}").into_bytes())
    }
}
