// crates/schedsim-config/src/credential.rs
// ============================================================================
// Module: Cluster Credential Loader
// Description: Ambient cluster credential resolution behind a trait seam.
// Purpose: Supply an opaque credential when external import is enabled.
// Dependencies: thiserror, std
// ============================================================================

//! ## Overview
//! The resolver only needs the success/failure contract of credential
//! loading, so the collaborator is a trait. The shipped [`KubeconfigLoader`]
//! resolves the ambient kube-style chain: an explicit override path wins
//! outright, otherwise the `KUBECONFIG` environment variable, otherwise
//! `$HOME/.kube/config`.
//! Invariants:
//! - A [`ClusterCredential`] is only constructed from a readable kubeconfig
//!   source; it is opaque to the resolver.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Credential Errors
// ============================================================================

/// Errors produced while resolving an ambient cluster credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No candidate in the ambient chain yielded a credential.
    #[error("no resolvable cluster credential in the ambient environment")]
    NoAmbientCredential,
    /// A selected kubeconfig source could not be read.
    #[error("read kubeconfig {}: {source}", path.display())]
    Unreadable {
        /// Path of the unreadable kubeconfig source.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SECTION: Credential
// ============================================================================

/// Opaque handle enabling connection to an external cluster.
///
/// # Invariants
/// - Only credential loaders construct values of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCredential {
    /// Kubeconfig source path the credential was resolved from.
    source: PathBuf,
    /// Raw kubeconfig bytes.
    kubeconfig: Vec<u8>,
}

impl ClusterCredential {
    /// Returns the kubeconfig source path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the raw kubeconfig bytes.
    #[must_use]
    pub fn kubeconfig(&self) -> &[u8] {
        &self.kubeconfig
    }
}

// ============================================================================
// SECTION: Loader Trait
// ============================================================================

/// Resolves a cluster credential from the ambient environment.
pub trait ClusterCredentialLoader {
    /// Resolves the ambient cluster credential.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when no reachable credential source can
    /// be resolved.
    fn load_ambient(&self) -> Result<ClusterCredential, CredentialError>;
}

// ============================================================================
// SECTION: Kubeconfig Loader
// ============================================================================

/// Credential loader following the kube-style ambient chain.
#[derive(Debug, Clone, Default)]
pub struct KubeconfigLoader {
    /// Explicit kubeconfig path; when set it wins outright.
    override_path: Option<PathBuf>,
}

impl KubeconfigLoader {
    /// Creates a loader using only the ambient chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            override_path: None,
        }
    }

    /// Creates a loader pinned to an explicit kubeconfig path.
    #[must_use]
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    /// Ambient candidate paths, in precedence order.
    fn ambient_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = env::var_os("KUBECONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".kube").join("config"));
        }
        candidates
    }

    /// Reads one kubeconfig source into a credential.
    fn read_source(path: PathBuf) -> Result<ClusterCredential, CredentialError> {
        match fs::read(&path) {
            Ok(kubeconfig) => Ok(ClusterCredential {
                source: path,
                kubeconfig,
            }),
            Err(source) => Err(CredentialError::Unreadable { path, source }),
        }
    }
}

impl ClusterCredentialLoader for KubeconfigLoader {
    fn load_ambient(&self) -> Result<ClusterCredential, CredentialError> {
        if let Some(path) = &self.override_path {
            return Self::read_source(path.clone());
        }
        for path in Self::ambient_candidates() {
            if path.is_file() {
                return Self::read_source(path);
            }
        }
        Err(CredentialError::NoAmbientCredential)
    }
}
