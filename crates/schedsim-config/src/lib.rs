// crates/schedsim-config/src/lib.rs
// ============================================================================
// Module: Schedsim Config
// Description: Layered configuration resolution for the simulator server.
// Purpose: Produce one immutable ResolvedConfig at process startup.
// Dependencies: schedsim-core, serde, serde_yaml, thiserror, url
// ============================================================================

//! ## Overview
//! This crate resolves the simulator's runtime configuration: it reads the
//! optional YAML settings file, validates the CORS origin allow-list,
//! composes the API server address, conditionally loads an ambient cluster
//! credential, and decodes (or defaults) the initial scheduler policy. The
//! result is a single immutable [`ResolvedConfig`] consumed read-only for
//! the process lifetime.
//! Invariants:
//! - Resolution is all-or-nothing; no partial configuration is ever
//!   returned.
//! - `cluster_credential` is present if and only if external import is
//!   enabled.
//! - The settings file read is the only non-fatal step; a missing or
//!   malformed file collapses to the zero-valued settings record.
//!
//! Security posture: the settings file and policy document are untrusted
//! local input; every resolution step past the settings read fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod credential;
pub mod origins;
pub mod resolve;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credential::ClusterCredential;
pub use credential::ClusterCredentialLoader;
pub use credential::CredentialError;
pub use credential::KubeconfigLoader;
pub use origins::validate_origins;
pub use origins::InvalidOriginError;
pub use resolve::ConfigError;
pub use resolve::ResolvedConfig;
pub use settings::SettingsError;
pub use settings::SettingsFile;
pub use settings::SETTINGS_PATH;
