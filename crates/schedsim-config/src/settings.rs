// crates/schedsim-config/src/settings.rs
// ============================================================================
// Module: Settings File Loader
// Description: Best-effort YAML settings record with a defined fallback.
// Purpose: Read the optional config.yml into a flat, zero-defaulted record.
// Dependencies: serde, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The settings file is optional by policy: a missing or malformed file must
//! never abort startup. The read itself is an explicit [`Result`] so the
//! fallback decision stays visible at the call site, where the resolver
//! collapses it to [`SettingsFile::default`].
//! Invariants:
//! - Absent keys take zero values; unknown keys are ignored.
//! - The record is constructed once and threaded by value; there is no
//!   process-wide settings state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed path of the optional settings file.
pub const SETTINGS_PATH: &str = "./config.yml";

// ============================================================================
// SECTION: Settings Errors
// ============================================================================

/// Errors produced while reading the settings file.
///
/// These are non-fatal by policy: callers collapse them to the zero-valued
/// record.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("read settings file: {0}")]
    Read(#[source] std::io::Error),
    /// The file did not parse as the settings schema.
    #[error("parse settings file: {0}")]
    Parse(#[source] serde_yaml::Error),
}

// ============================================================================
// SECTION: Settings Record
// ============================================================================

/// Flat settings record mirroring the YAML settings file.
///
/// # Invariants
/// - All fields are optional in the file; the zero value stands in for any
///   absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsFile {
    /// Port the simulator server listens on.
    #[serde(default, rename = "Port")]
    pub port: i32,
    /// URL of the etcd instance backing the simulated control plane.
    #[serde(default, rename = "EtcdURL")]
    pub etcd_url: String,
    /// CORS origin allow-list applied to the simulator server.
    #[serde(default, rename = "CorsAllowedOriginList")]
    pub cors_allowed_origin_list: Vec<String>,
    /// Kubeconfig path; read for wire compatibility, unused by resolution.
    #[serde(default, rename = "KubeConfig")]
    pub kube_config: String,
    /// Host of the simulated kube-apiserver.
    #[serde(default, rename = "KubeApiHost")]
    pub kube_api_host: String,
    /// Port of the simulated kube-apiserver.
    #[serde(default, rename = "KubeApiPort")]
    pub kube_api_port: i32,
    /// Path to the initial scheduler policy document; empty means default.
    #[serde(default, rename = "KubeSchedulerConfigPath")]
    pub kube_scheduler_config_path: String,
    /// Whether resources are imported from an existing cluster.
    #[serde(default, rename = "ExternalImportEnabled")]
    pub external_import_enabled: bool,
    /// Whether an external scheduler drives the simulation.
    #[serde(default, rename = "ExternalSchedulerEnabled")]
    pub external_scheduler_enabled: bool,
}

impl SettingsFile {
    /// Reads the settings record from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read or does not
    /// parse as the settings schema. The settings file is optional, so
    /// callers are expected to collapse the error to
    /// [`SettingsFile::default`].
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let bytes = fs::read(path).map_err(SettingsError::Read)?;
        serde_yaml::from_slice(&bytes).map_err(SettingsError::Parse)
    }
}
