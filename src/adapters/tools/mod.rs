//! External tool discovery

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ReencodeError, ReencodeResult};

/// Location of one external tool, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    name: &'static str,
    path: Option<PathBuf>,
}

impl ToolPath {
    /// Use `configured` if it exists, otherwise search `PATH`.
    ///
    /// A tool that is not found is recorded as missing; the error is raised
    /// by [`ToolPath::require`] when the tool is actually needed.
    pub fn discover(name: &'static str, configured: Option<&Path>) -> Self {
        let path = match configured {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                warn!("Configured {} path {} does not exist, searching PATH", name, p.display());
                which::which(name).ok()
            }
            None => which::which(name).ok(),
        };

        match &path {
            Some(p) => debug!("Found {} at {}", name, p.display()),
            None => debug!("{} not found", name),
        }

        Self { name, path }
    }

    /// A tool at a known location, without discovery
    pub fn at(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: Some(path.into()),
        }
    }

    /// Resolved path, or [`ReencodeError::ToolNotFound`]
    pub fn require(&self) -> ReencodeResult<&Path> {
        self.path.as_deref().ok_or_else(|| ReencodeError::ToolNotFound {
            tool: self.name.to_string(),
        })
    }

    /// Path to show in command lines; the bare name when unresolved
    pub fn program(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_reported_on_require() {
        let tool = ToolPath::discover("nonexistent_tool_xyz_12345", None);
        assert_eq!(tool.program(), PathBuf::from("nonexistent_tool_xyz_12345"));
        match tool.require() {
            Err(ReencodeError::ToolNotFound { tool }) => {
                assert_eq!(tool, "nonexistent_tool_xyz_12345")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn existing_configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("mkvmerge");
        std::fs::write(&fake, b"").unwrap();

        let tool = ToolPath::discover("mkvmerge", Some(&fake));
        assert_eq!(tool.require().unwrap(), fake.as_path());
    }
}
