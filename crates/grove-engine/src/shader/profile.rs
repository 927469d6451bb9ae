use std::fmt;
use std::str::FromStr;

use super::ShaderError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Geometry,
}

impl ShaderStage {
    /// Two-letter profile prefix (`vs`, `ps`, `gs`).
    pub const fn prefix(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Geometry => "gs",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Pixel => "pixel",
            ShaderStage::Geometry => "geometry",
        }
    }
}

/// Target profile such as `vs_5_1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderProfile {
    pub stage: ShaderStage,
    pub major: u8,
    pub minor: u8,
}

impl FromStr for ShaderProfile {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShaderError::InvalidProfile(s.to_owned());

        let mut parts = s.split('_');
        let stage = match parts.next() {
            Some("vs") => ShaderStage::Vertex,
            Some("ps") => ShaderStage::Pixel,
            Some("gs") => ShaderStage::Geometry,
            _ => return Err(invalid()),
        };
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { stage, major, minor })
    }
}

impl fmt::Display for ShaderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.stage.prefix(), self.major, self.minor)
    }
}
