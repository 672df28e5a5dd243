//! Reconstruction by invoking an external command-line tool.

use crate::error::{BenchError, Result};
use crate::reconstruct::{ReconstructionRequest, Reconstructor};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn default_program() -> String {
    "carve".to_string()
}

/// How the reconstruction tool is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionSettings {
    #[serde(default = "default_program")]
    pub program: String,
    /// Appended after the generated arguments.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ReconstructionSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            extra_args: Vec::new(),
        }
    }
}

/// Runs `<program> <genome> -o <model> [-g <media> --mediadb <db>] <extra>`.
#[derive(Debug, Clone, Default)]
pub struct CommandReconstructor {
    settings: ReconstructionSettings,
}

impl CommandReconstructor {
    pub fn new(settings: ReconstructionSettings) -> Self {
        Self { settings }
    }

    /// Arguments passed to the program for a request.
    pub fn arguments(&self, request: &ReconstructionRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            request.genome.clone().into(),
            "-o".into(),
            request.output.clone().into(),
        ];
        if !request.gapfill_media.is_empty() {
            args.push("-g".into());
            args.push(request.gapfill_media.join(",").into());
            args.push("--mediadb".into());
            args.push(request.media_db.clone().into());
        }
        args.extend(self.settings.extra_args.iter().map(OsString::from));
        args
    }
}

impl Reconstructor for CommandReconstructor {
    fn reconstruct(&self, request: &ReconstructionRequest) -> Result<PathBuf> {
        if !request.genome.exists() {
            return Err(BenchError::MissingTable(request.genome.clone()));
        }

        let output = Command::new(&self.settings.program)
            .args(self.arguments(request))
            .output()
            .map_err(|e| {
                BenchError::Reconstruction(format!(
                    "Failed to run {}: {}",
                    self.settings.program, e
                ))
            })?;

        if !output.status.success() {
            return Err(BenchError::Reconstruction(format!(
                "{} exited with {}: {}",
                self.settings.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let meta = fs::metadata(&request.output).map_err(|_| {
            BenchError::Reconstruction(format!(
                "{} did not write {}",
                self.settings.program,
                request.output.display()
            ))
        })?;
        if meta.len() == 0 {
            return Err(BenchError::Reconstruction("Reconstructed model is empty".into()));
        }

        Ok(request.output.clone())
    }
}
