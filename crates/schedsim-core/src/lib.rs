// crates/schedsim-core/src/lib.rs
// ============================================================================
// Module: Schedsim Core
// Description: Scheduler policy model, plugin argument schemas, and decoding.
// Purpose: Provide the typed scheduler policy consumed by the simulator.
// Dependencies: serde, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! This crate ships the typed scheduler policy document, the registry of
//! per-plugin argument schemas, and the decoder that turns an externally
//! supplied, versioned policy document into a fully typed
//! [`SchedulerPolicy`]. Decoding is all-or-nothing: a returned policy never
//! contains raw, untyped plugin argument payloads.
//! Invariants:
//! - Every plugin reference that carries arguments resolves to a registered
//!   argument schema during decode; unknown plugins fail the decode.
//! - [`SchedulerPolicy::default_policy`] is pure and deterministic.
//!
//! Security posture: policy documents are untrusted input; the decoder fails
//! closed on any unrecognized or malformed payload.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod decode;
pub mod policy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::ArgsRegistry;
pub use args::DefaultPreemptionArgs;
pub use args::InterPodAffinityArgs;
pub use args::NodeAffinityArgs;
pub use args::NodeResourcesBalancedAllocationArgs;
pub use args::NodeResourcesFitArgs;
pub use args::NodeSelector;
pub use args::NodeSelectorRequirement;
pub use args::NodeSelectorTerm;
pub use args::PluginArgs;
pub use args::PodTopologySpreadArgs;
pub use args::ResourceSpec;
pub use args::ScoringStrategy;
pub use args::ScoringStrategyType;
pub use args::TopologyDefaultingType;
pub use args::TopologySpreadConstraint;
pub use args::UnsatisfiableConstraintAction;
pub use args::UtilizationShapePoint;
pub use args::VolumeBindingArgs;
pub use decode::DecodeError;
pub use policy::PluginConfigEntry;
pub use policy::PluginRef;
pub use policy::PluginSet;
pub use policy::Plugins;
pub use policy::SchedulerPolicy;
pub use policy::SchedulingProfile;
pub use policy::DEFAULT_SCHEDULER_NAME;
pub use policy::POLICY_API_VERSION;
pub use policy::POLICY_KIND;
