// crates/schedsim-config/src/resolve.rs
// ============================================================================
// Module: Configuration Resolver
// Description: Sequential composition of settings, policy, and credential.
// Purpose: Build the one immutable ResolvedConfig consumed at startup.
// Dependencies: schedsim-core, thiserror, crate::{credential, origins, settings}
// ============================================================================

//! ## Overview
//! Resolution is plain sequential composition with early return: each step
//! wraps its underlying error with the resolution step that failed, and any
//! failure aborts the whole resolution. The settings read is the deliberate
//! exception; its failure collapses to the zero-valued record here, at the
//! call site, so the fallback stays visible.
//! Invariants:
//! - `cluster_credential` is `Some` if and only if external import is
//!   enabled; the loader is not invoked otherwise.
//! - The port and etcd endpoint are taken as-is from the settings record,
//!   with no independent validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use schedsim_core::DecodeError;
use schedsim_core::SchedulerPolicy;
use thiserror::Error;

use crate::credential::ClusterCredential;
use crate::credential::ClusterCredentialLoader;
use crate::credential::CredentialError;
use crate::origins::validate_origins;
use crate::origins::InvalidOriginError;
use crate::settings::SettingsFile;
use crate::settings::SETTINGS_PATH;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host substituted when the settings record leaves the API host unset.
const LOOPBACK_HOST: &str = "127.0.0.1";

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Errors produced by configuration resolution, named by failing step.
///
/// # Invariants
/// - Variants are stable for programmatic handling and message matching.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The CORS origin allow-list failed validation.
    #[error("validate origins in CorsAllowedOriginList: {0}")]
    CorsAllowedOrigins(#[from] InvalidOriginError),
    /// The ambient cluster credential could not be loaded.
    #[error("load cluster credential: {0}")]
    ClusterCredential(#[from] CredentialError),
    /// The scheduler policy file could not be read.
    #[error("read scheduler config file: {0}")]
    ReadSchedulerConfig(#[source] std::io::Error),
    /// The scheduler policy file could not be decoded.
    #[error("decode scheduler config file: {0}")]
    DecodeSchedulerConfig(#[from] DecodeError),
}

// ============================================================================
// SECTION: Resolved Configuration
// ============================================================================

/// Immutable runtime configuration produced once at startup.
///
/// # Invariants
/// - `cluster_credential` is `Some` if and only if
///   `external_import_enabled` is true.
/// - Values are never mutated after construction; reconfiguration means a
///   fresh resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Port the simulator server listens on, taken as-is.
    pub port: i32,
    /// Simulated kube-apiserver address as `host:port`.
    pub api_server_address: String,
    /// URL of the backing etcd instance, taken as-is.
    pub etcd_endpoint: String,
    /// Validated CORS origin allow-list, in settings order.
    pub cors_allowed_origins: Vec<String>,
    /// Whether resources are imported from an existing cluster.
    pub external_import_enabled: bool,
    /// Ambient cluster credential, present only when import is enabled.
    pub cluster_credential: Option<ClusterCredential>,
    /// Initial scheduler policy, decoded or built-in default.
    pub initial_policy: SchedulerPolicy,
    /// Whether an external scheduler drives the simulation.
    pub external_scheduler_enabled: bool,
}

impl ResolvedConfig {
    /// Resolves the runtime configuration from the fixed settings path.
    ///
    /// A missing or malformed settings file collapses to the zero-valued
    /// record; every later step is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first resolution step that failed.
    pub fn resolve(loader: &dyn ClusterCredentialLoader) -> Result<Self, ConfigError> {
        let settings = SettingsFile::read(Path::new(SETTINGS_PATH)).unwrap_or_default();
        Self::from_settings(settings, loader)
    }

    /// Resolves the runtime configuration from an explicit settings record.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first resolution step that failed.
    pub fn from_settings(
        settings: SettingsFile,
        loader: &dyn ClusterCredentialLoader,
    ) -> Result<Self, ConfigError> {
        validate_origins(&settings.cors_allowed_origin_list)?;

        let api_server_address =
            compose_api_server_address(&settings.kube_api_host, settings.kube_api_port);

        let external_import_enabled = settings.external_import_enabled;
        let cluster_credential = if external_import_enabled {
            Some(loader.load_ambient()?)
        } else {
            None
        };

        let initial_policy = load_initial_policy(&settings.kube_scheduler_config_path)?;

        Ok(Self {
            port: settings.port,
            api_server_address,
            etcd_endpoint: settings.etcd_url,
            cors_allowed_origins: settings.cors_allowed_origin_list,
            external_import_enabled,
            cluster_credential,
            initial_policy,
            external_scheduler_enabled: settings.external_scheduler_enabled,
        })
    }
}

// ============================================================================
// SECTION: Step Helpers
// ============================================================================

/// Composes the `host:port` API server address, defaulting to loopback.
fn compose_api_server_address(host: &str, port: i32) -> String {
    let host = if host.is_empty() { LOOPBACK_HOST } else { host };
    format!("{host}:{port}")
}

/// Loads the initial policy from the given path, or the built-in default.
fn load_initial_policy(path: &str) -> Result<SchedulerPolicy, ConfigError> {
    if path.is_empty() {
        return Ok(SchedulerPolicy::default_policy());
    }
    let bytes = fs::read(path).map_err(ConfigError::ReadSchedulerConfig)?;
    Ok(SchedulerPolicy::decode(&bytes)?)
}
