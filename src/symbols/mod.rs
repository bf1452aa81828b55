//! Symbol providers supply already-resolved interface definitions.

pub mod manifest;

pub use manifest::{parse_manifest, ContractManifest, ManifestFormat};

use crate::core::{Error, Result, ServiceInterfaceDefinition};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of service interface definitions
pub trait SymbolProvider {
    /// Definitions in discovery order
    fn definitions(&self) -> Result<Vec<ServiceInterfaceDefinition>>;
}

/// Provider backed by definitions already in memory
impl SymbolProvider for Vec<ServiceInterfaceDefinition> {
    fn definitions(&self) -> Result<Vec<ServiceInterfaceDefinition>> {
        Ok(self.clone())
    }
}

/// Reads contract manifests from a file, or from every manifest file below a
/// directory in file-name order
#[derive(Debug, Clone)]
pub struct ManifestSymbolProvider {
    input: PathBuf,
    conditional_symbols: Vec<String>,
}

impl ManifestSymbolProvider {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            conditional_symbols: Vec::new(),
        }
    }

    pub fn with_conditional_symbols(mut self, symbols: Vec<String>) -> Self {
        self.conditional_symbols = symbols;
        self
    }

    /// Manifest files the provider will read, in order
    pub fn manifest_files(&self) -> Result<Vec<PathBuf>> {
        if !self.input.exists() {
            return Err(Error::file_system(
                "Input path does not exist",
                self.input.clone(),
            ));
        }

        if self.input.is_file() {
            if ManifestFormat::from_path(&self.input).is_none() {
                return Err(Error::UnsupportedManifest(self.input.clone()));
            }
            return Ok(vec![self.input.clone()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.input).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::file_system(format!("Failed to walk input: {e}"), self.input.clone())
            })?;
            if entry.file_type().is_file() && ManifestFormat::from_path(entry.path()).is_some() {
                files.push(entry.into_path());
            } else if entry.file_type().is_file() {
                log::debug!("Ignoring non-manifest file {}", entry.path().display());
            }
        }
        Ok(files)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<ServiceInterfaceDefinition>> {
        let format =
            ManifestFormat::from_path(path).ok_or_else(|| Error::UnsupportedManifest(path.into()))?;
        let contents = crate::io::read_file(path)?;
        let definitions =
            parse_manifest(&contents, format, path)?.into_definitions(&self.conditional_symbols, path)?;
        tracing::debug!(
            file = %path.display(),
            interfaces = definitions.len(),
            "Loaded contract manifest"
        );
        Ok(definitions)
    }
}

impl SymbolProvider for ManifestSymbolProvider {
    fn definitions(&self) -> Result<Vec<ServiceInterfaceDefinition>> {
        let mut definitions = Vec::new();
        for file in self.manifest_files()? {
            definitions.extend(self.load_file(&file)?);
        }
        Ok(definitions)
    }
}
