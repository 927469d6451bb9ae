//! In-memory backend.
//!
//! Records device calls, command lists, shader compilations and texture loads
//! without a GPU. Tests use it to check descriptor layouts and command order;
//! `grove-inspect` uses it for dry runs.

mod command_list;
mod compiler;
mod device;
mod textures;

pub use command_list::{Command, RecordingCommandList};
pub use compiler::{CompileCall, RecordingCompiler};
pub use device::{DeviceCall, FailPoint, ObjectKind, RecordingDevice, DEFAULT_INCREMENT_SIZE};
pub use textures::RecordingTextureLoader;
