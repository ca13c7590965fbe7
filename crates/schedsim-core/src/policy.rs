// crates/schedsim-core/src/policy.rs
// ============================================================================
// Module: Scheduler Policy Model
// Description: Typed scheduler policy document, profiles, and plugin sets.
// Purpose: Represent the initial scheduling policy consumed by the simulator.
// Dependencies: serde, crate::args
// ============================================================================

//! ## Overview
//! The scheduler policy is a versioned document of ordered scheduling
//! profiles. Each profile names the plugins enabled at every extension point
//! and pairs configured plugins with fully typed argument objects. Values of
//! [`SchedulerPolicy`] are only produced by the decoder in [`crate::decode`]
//! or by [`SchedulerPolicy::default_policy`], so they never carry raw
//! payloads.
//! Invariants:
//! - `profiles` and each profile's `plugin_config` preserve document order.
//! - `default_policy` returns the same value on every call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::args::DefaultPreemptionArgs;
use crate::args::InterPodAffinityArgs;
use crate::args::NodeAffinityArgs;
use crate::args::NodeResourcesBalancedAllocationArgs;
use crate::args::NodeResourcesFitArgs;
use crate::args::PluginArgs;
use crate::args::PodTopologySpreadArgs;
use crate::args::VolumeBindingArgs;

// ============================================================================
// SECTION: Document Identity
// ============================================================================

/// API version tag expected on scheduler policy documents.
pub const POLICY_API_VERSION: &str = "kubescheduler.config.k8s.io/v1beta2";

/// Kind tag expected on scheduler policy documents.
pub const POLICY_KIND: &str = "KubeSchedulerConfiguration";

/// Scheduler name used by the built-in default profile.
pub const DEFAULT_SCHEDULER_NAME: &str = "default-scheduler";

// ============================================================================
// SECTION: Plugin References
// ============================================================================

/// Reference to a plugin at one extension point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRef {
    /// Plugin name.
    pub name: String,
    /// Score weight, meaningful only at scoring extension points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl PluginRef {
    /// Creates an unweighted plugin reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: None,
        }
    }

    /// Creates a weighted plugin reference.
    #[must_use]
    pub fn weighted(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight: Some(weight),
        }
    }
}

/// Enable and disable lists for one extension point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSet {
    /// Plugins enabled at the extension point, in order.
    #[serde(default)]
    pub enabled: Vec<PluginRef>,
    /// Plugins disabled at the extension point.
    #[serde(default)]
    pub disabled: Vec<PluginRef>,
}

impl PluginSet {
    /// Creates a plugin set enabling the named plugins in order.
    #[must_use]
    pub fn enabled(refs: Vec<PluginRef>) -> Self {
        Self {
            enabled: refs,
            disabled: Vec::new(),
        }
    }
}

/// Plugin sets for every scheduling extension point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugins {
    /// Queue sorting extension point.
    #[serde(default)]
    pub queue_sort: PluginSet,
    /// Pre-filter extension point.
    #[serde(default)]
    pub pre_filter: PluginSet,
    /// Filter extension point.
    #[serde(default)]
    pub filter: PluginSet,
    /// Post-filter extension point, runs when no node fits.
    #[serde(default)]
    pub post_filter: PluginSet,
    /// Pre-score extension point.
    #[serde(default)]
    pub pre_score: PluginSet,
    /// Score extension point.
    #[serde(default)]
    pub score: PluginSet,
    /// Reserve extension point.
    #[serde(default)]
    pub reserve: PluginSet,
    /// Permit extension point.
    #[serde(default)]
    pub permit: PluginSet,
    /// Pre-bind extension point.
    #[serde(default)]
    pub pre_bind: PluginSet,
    /// Bind extension point.
    #[serde(default)]
    pub bind: PluginSet,
    /// Post-bind extension point.
    #[serde(default)]
    pub post_bind: PluginSet,
}

// ============================================================================
// SECTION: Policy Document
// ============================================================================

/// One plugin's configuration inside a profile, with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfigEntry {
    /// Name of the configured plugin.
    pub name: String,
    /// Typed arguments, `None` when the plugin carried no payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<PluginArgs>,
}

impl PluginConfigEntry {
    /// Creates an entry pairing a plugin name with typed arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: PluginArgs) -> Self {
        Self {
            name: name.into(),
            args: Some(args),
        }
    }
}

/// One scheduling profile: a scheduler name plus its plugin wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingProfile {
    /// Scheduler name the profile answers to.
    pub scheduler_name: String,
    /// Extension point plugin sets, absent when the profile uses defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    /// Per-plugin configuration entries, in document order.
    pub plugin_config: Vec<PluginConfigEntry>,
}

/// Decoded scheduler policy document.
///
/// # Invariants
/// - Every `plugin_config` entry carries either `None` or a fully typed
///   [`PluginArgs`] value; raw payloads are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerPolicy {
    /// Document API version tag.
    pub api_version: String,
    /// Document kind tag.
    pub kind: String,
    /// Scheduling profiles, in document order.
    pub profiles: Vec<SchedulingProfile>,
}

impl SchedulerPolicy {
    /// Returns the built-in baseline scheduler policy.
    ///
    /// One `default-scheduler` profile with the standard plugin roster and
    /// default-valued typed arguments for every registered schema.
    #[must_use]
    pub fn default_policy() -> Self {
        Self {
            api_version: POLICY_API_VERSION.to_string(),
            kind: POLICY_KIND.to_string(),
            profiles: vec![SchedulingProfile {
                scheduler_name: DEFAULT_SCHEDULER_NAME.to_string(),
                plugins: Some(default_plugins()),
                plugin_config: default_plugin_config(),
            }],
        }
    }
}

// ============================================================================
// SECTION: Built-in Defaults
// ============================================================================

/// Standard extension point wiring for the default profile.
fn default_plugins() -> Plugins {
    Plugins {
        queue_sort: PluginSet::enabled(vec![PluginRef::new("PrioritySort")]),
        pre_filter: PluginSet::enabled(vec![
            PluginRef::new("NodeResourcesFit"),
            PluginRef::new("NodePorts"),
            PluginRef::new("PodTopologySpread"),
            PluginRef::new("InterPodAffinity"),
            PluginRef::new("VolumeBinding"),
            PluginRef::new("NodeAffinity"),
        ]),
        filter: PluginSet::enabled(vec![
            PluginRef::new("NodeUnschedulable"),
            PluginRef::new("NodeName"),
            PluginRef::new("TaintToleration"),
            PluginRef::new("NodeAffinity"),
            PluginRef::new("NodePorts"),
            PluginRef::new("NodeResourcesFit"),
            PluginRef::new("VolumeRestrictions"),
            PluginRef::new("NodeVolumeLimits"),
            PluginRef::new("VolumeBinding"),
            PluginRef::new("VolumeZone"),
            PluginRef::new("PodTopologySpread"),
            PluginRef::new("InterPodAffinity"),
        ]),
        post_filter: PluginSet::enabled(vec![PluginRef::new("DefaultPreemption")]),
        pre_score: PluginSet::enabled(vec![
            PluginRef::new("InterPodAffinity"),
            PluginRef::new("PodTopologySpread"),
            PluginRef::new("TaintToleration"),
            PluginRef::new("NodeAffinity"),
        ]),
        score: PluginSet::enabled(vec![
            PluginRef::weighted("NodeResourcesBalancedAllocation", 1),
            PluginRef::weighted("ImageLocality", 1),
            PluginRef::weighted("InterPodAffinity", 1),
            PluginRef::weighted("NodeResourcesFit", 1),
            PluginRef::weighted("NodeAffinity", 1),
            PluginRef::weighted("PodTopologySpread", 2),
            PluginRef::weighted("TaintToleration", 1),
        ]),
        reserve: PluginSet::enabled(vec![PluginRef::new("VolumeBinding")]),
        permit: PluginSet::default(),
        pre_bind: PluginSet::enabled(vec![PluginRef::new("VolumeBinding")]),
        bind: PluginSet::enabled(vec![PluginRef::new("DefaultBinder")]),
        post_bind: PluginSet::default(),
    }
}

/// Default-valued typed arguments for every registered schema.
fn default_plugin_config() -> Vec<PluginConfigEntry> {
    vec![
        PluginConfigEntry::new(
            "DefaultPreemption",
            PluginArgs::DefaultPreemption(DefaultPreemptionArgs::default()),
        ),
        PluginConfigEntry::new(
            "InterPodAffinity",
            PluginArgs::InterPodAffinity(InterPodAffinityArgs::default()),
        ),
        PluginConfigEntry::new(
            "NodeAffinity",
            PluginArgs::NodeAffinity(NodeAffinityArgs::default()),
        ),
        PluginConfigEntry::new(
            "NodeResourcesBalancedAllocation",
            PluginArgs::NodeResourcesBalancedAllocation(
                NodeResourcesBalancedAllocationArgs::default(),
            ),
        ),
        PluginConfigEntry::new(
            "NodeResourcesFit",
            PluginArgs::NodeResourcesFit(NodeResourcesFitArgs::default()),
        ),
        PluginConfigEntry::new(
            "PodTopologySpread",
            PluginArgs::PodTopologySpread(PodTopologySpreadArgs::default()),
        ),
        PluginConfigEntry::new(
            "VolumeBinding",
            PluginArgs::VolumeBinding(VolumeBindingArgs::default()),
        ),
    ]
}
