//! Output naming and artifact paths

use crate::{Error, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Base name of the two output artifacts, without extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName(PathBuf);

impl OutputName {
    /// Builds an output name, stripping a trailing extension if present
    ///
    /// `clips/intro.mp4` becomes `clips/intro`; a name without extension is
    /// kept as is.
    pub fn new(name: impl AsRef<Path>) -> Result<Self> {
        let name = name.as_ref();
        if name.file_name().is_none() {
            return Err(Error::invalid_parameter(format!(
                "the output name {:?} has no file name",
                name.display().to_string()
            )));
        }
        Ok(Self(name.with_extension("")))
    }

    /// Default output: the source's file name, extension stripped, in `dir`
    pub fn from_source(source: &Path, dir: &Path) -> Result<Self> {
        let file_name = source.file_name().ok_or_else(|| {
            Error::invalid_parameter(format!("{} has no file name", source.display()))
        })?;
        Self::new(dir.join(file_name))
    }

    pub fn base(&self) -> &Path {
        &self.0
    }

    /// `<name>.png`
    pub fn image_path(&self) -> PathBuf {
        self.with_suffix(".png")
    }

    /// `<name>.png.mcmeta`
    pub fn metadata_path(&self) -> PathBuf {
        self.with_suffix(".png.mcmeta")
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = OsString::from(self.0.as_os_str());
        path.push(suffix);
        PathBuf::from(path)
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Paths of a written image/metadata pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub image: PathBuf,
    pub metadata: PathBuf,
}
