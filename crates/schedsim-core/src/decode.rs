// crates/schedsim-core/src/decode.rs
// ============================================================================
// Module: Policy Document Decoder
// Description: Versioned document decoding with nested plugin argument typing.
// Purpose: Turn untrusted policy bytes into a fully typed SchedulerPolicy.
// Dependencies: serde, serde_yaml, thiserror, crate::args, crate::policy
// ============================================================================

//! ## Overview
//! The decoder parses a schema-tagged YAML document through a kind registry,
//! then types every nested plugin argument payload via the argument-schema
//! registry. Argument schemas are registered as standalone document kinds as
//! well, so a document that parses cleanly as a *different* registered kind
//! is still rejected with a type mismatch rather than misread as a policy.
//! Invariants:
//! - A returned [`SchedulerPolicy`] contains no raw payloads; decoding is
//!   all-or-nothing.
//! - The first failing plugin aborts the decode and is named in the error.
//!
//! Security posture: policy bytes are untrusted; every branch fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

use crate::args::ArgsRegistry;
use crate::args::PluginArgs;
use crate::policy::PluginConfigEntry;
use crate::policy::Plugins;
use crate::policy::SchedulerPolicy;
use crate::policy::SchedulingProfile;
use crate::policy::POLICY_API_VERSION;
use crate::policy::POLICY_KIND;

// ============================================================================
// SECTION: Decode Errors
// ============================================================================

/// Errors produced while decoding a scheduler policy document.
///
/// # Invariants
/// - Variants are stable for programmatic handling and message matching.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes were not parseable as the tagged document structure.
    #[error("parse policy document: {0}")]
    Parse(#[source] serde_yaml::Error),
    /// The top-level tags name no registered document kind.
    #[error("unrecognized document: no registered schema for {api_version}/{kind}")]
    UnrecognizedDocument {
        /// API version tag found on the document.
        api_version: String,
        /// Kind tag found on the document.
        kind: String,
    },
    /// The document decoded as a registered kind other than the policy.
    #[error("expected a scheduler policy document, got {kind}")]
    TypeMismatch {
        /// Kind tag of the decoded non-policy object.
        kind: String,
    },
    /// A plugin reference carries arguments but has no registered schema.
    #[error("decode nested plugin args: unknown plugin {plugin} carries arguments")]
    UnknownPlugin {
        /// Name of the offending plugin.
        plugin: String,
    },
    /// A plugin argument payload failed its schema decode.
    #[error("decode nested plugin args for plugin {plugin}: {source}")]
    PluginArgs {
        /// Name of the offending plugin.
        plugin: String,
        /// Underlying schema decode failure.
        source: serde_yaml::Error,
    },
}

// ============================================================================
// SECTION: Raw Document Shapes
// ============================================================================

/// Raw plugin configuration entry, arguments still untyped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPluginConfigEntry {
    /// Name of the configured plugin.
    name: String,
    /// Untyped argument payload, absent when the plugin carried none.
    #[serde(default)]
    args: Option<serde_yaml::Value>,
}

/// Raw scheduling profile prior to argument typing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    /// Scheduler name the profile answers to.
    #[serde(default = "default_scheduler_name")]
    scheduler_name: String,
    /// Extension point plugin sets.
    #[serde(default)]
    plugins: Option<Plugins>,
    /// Raw plugin configuration entries, in document order.
    #[serde(default)]
    plugin_config: Vec<RawPluginConfigEntry>,
}

/// Default scheduler name applied to profiles that omit one.
fn default_scheduler_name() -> String {
    crate::policy::DEFAULT_SCHEDULER_NAME.to_string()
}

/// Raw policy document prior to argument typing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPolicyDocument {
    /// Scheduling profiles, in document order.
    #[serde(default)]
    profiles: Vec<RawProfile>,
}

/// Registered object decoded from a schema-tagged document.
#[derive(Debug)]
enum DecodedObject {
    /// The scheduler policy document itself.
    Policy(RawPolicyDocument),
    /// A standalone plugin argument document.
    Args(PluginArgs),
}

// ============================================================================
// SECTION: Kind Registry
// ============================================================================

/// Decodes a schema-tagged document into whichever kind it declares.
///
/// Mirrors a universal deserializer over registered kinds: the policy kind
/// and every argument-schema kind are accepted here, and the caller asserts
/// the kind it actually wants.
fn decode_any(bytes: &[u8], registry: &ArgsRegistry) -> Result<DecodedObject, DecodeError> {
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(DecodeError::Parse)?;
    let api_version = tag(&value, "apiVersion");
    let kind = tag(&value, "kind");

    if api_version != POLICY_API_VERSION {
        return Err(DecodeError::UnrecognizedDocument { api_version, kind });
    }
    if kind == POLICY_KIND {
        let raw: RawPolicyDocument = serde_yaml::from_value(value).map_err(DecodeError::Parse)?;
        return Ok(DecodedObject::Policy(raw));
    }
    match registry.decode_kind(&kind, value) {
        Some(result) => result.map(DecodedObject::Args).map_err(DecodeError::Parse),
        None => Err(DecodeError::UnrecognizedDocument { api_version, kind }),
    }
}

/// Reads a top-level string tag off the parsed document.
fn tag(value: &serde_yaml::Value, key: &str) -> String {
    value
        .get(key)
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// SECTION: Policy Decoding
// ============================================================================

impl SchedulerPolicy {
    /// Decodes a scheduler policy document from raw bytes.
    ///
    /// Every plugin configuration entry carrying an argument payload is
    /// decoded through the built-in [`ArgsRegistry`]; the returned policy is
    /// fully typed or the decode fails.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document is unparseable, when its
    /// kind tags name no registered schema, when it decodes as a registered
    /// non-policy kind, or when any nested plugin payload fails its schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let registry = ArgsRegistry::builtin();
        let raw = match decode_any(bytes, &registry)? {
            DecodedObject::Policy(raw) => raw,
            DecodedObject::Args(args) => {
                return Err(DecodeError::TypeMismatch {
                    kind: args.kind().to_string(),
                });
            }
        };

        let mut profiles = Vec::with_capacity(raw.profiles.len());
        for profile in raw.profiles {
            profiles.push(decode_profile(profile, &registry)?);
        }
        Ok(Self {
            api_version: POLICY_API_VERSION.to_string(),
            kind: POLICY_KIND.to_string(),
            profiles,
        })
    }
}

/// Types every raw argument payload inside one profile.
fn decode_profile(
    raw: RawProfile,
    registry: &ArgsRegistry,
) -> Result<SchedulingProfile, DecodeError> {
    let mut plugin_config = Vec::with_capacity(raw.plugin_config.len());
    for entry in raw.plugin_config {
        let args = match entry.args {
            Some(payload) => Some(registry.decode_args(&entry.name, payload)?),
            None => None,
        };
        plugin_config.push(PluginConfigEntry {
            name: entry.name,
            args,
        });
    }
    Ok(SchedulingProfile {
        scheduler_name: raw.scheduler_name,
        plugins: raw.plugins,
        plugin_config,
    })
}
