// crates/schedsim-core/src/args.rs
// ============================================================================
// Module: Plugin Argument Schemas
// Description: Typed argument schemas for scheduler plugins and their registry.
// Purpose: Decode per-plugin argument payloads into one tagged union.
// Dependencies: serde, serde_yaml, crate::decode
// ============================================================================

//! ## Overview
//! Each scheduler plugin that accepts configuration declares a typed argument
//! schema. The [`ArgsRegistry`] maps plugin names to decode functions so the
//! policy decoder can turn raw YAML payloads into [`PluginArgs`] variants.
//! Argument schemas are themselves registered document kinds, mirroring the
//! upstream scheduler configuration scheme.
//! Invariants:
//! - Registered plugin names and kinds are unique within the registry.
//! - Decoding an unregistered plugin name is an error, never a silent skip.
//!
//! Security posture: argument payloads arrive inside untrusted policy
//! documents; schemas tolerate unknown keys but reject type mismatches.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::decode::DecodeError;

// ============================================================================
// SECTION: Shared Schema Types
// ============================================================================

/// Weighted resource entry used by scoring-oriented argument schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Resource name, for example `cpu` or `memory`.
    pub name: String,
    /// Relative weight of the resource during scoring.
    #[serde(default = "default_resource_weight")]
    pub weight: i32,
}

/// Default weight applied to a resource entry.
fn default_resource_weight() -> i32 {
    1
}

impl ResourceSpec {
    /// Creates a resource spec with the given name and weight.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Scoring strategy selection for resource-fit scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStrategyType {
    /// Prefer nodes with the least allocated resources.
    LeastAllocated,
    /// Prefer nodes with the most allocated resources.
    MostAllocated,
    /// Score nodes by a requested-to-capacity ratio shape.
    RequestedToCapacityRatio,
}

/// Scoring strategy applied by the resource-fit plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringStrategy {
    /// Strategy variant to apply.
    #[serde(rename = "type")]
    pub strategy: ScoringStrategyType,
    /// Resources considered by the strategy.
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

/// Point on a utilization-to-score shape curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationShapePoint {
    /// Utilization percentage (x axis).
    pub utilization: i32,
    /// Score assigned at that utilization (y axis).
    pub score: i32,
}

/// Action taken when a topology spread constraint cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsatisfiableConstraintAction {
    /// Refuse to schedule the pod.
    DoNotSchedule,
    /// Schedule anyway and accept the skew.
    ScheduleAnyway,
}

/// Topology spread constraint applied as a profile-wide default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySpreadConstraint {
    /// Maximum allowed skew between topology domains.
    pub max_skew: i32,
    /// Node label key defining the topology domain.
    pub topology_key: String,
    /// Behavior when the constraint cannot be met.
    pub when_unsatisfiable: UnsatisfiableConstraintAction,
}

/// Node selector requirement inside an added-affinity selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelectorRequirement {
    /// Node label key the requirement applies to.
    pub key: String,
    /// Comparison operator, for example `In` or `Exists`.
    pub operator: String,
    /// Values compared against the label, when the operator takes values.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Single term of a node selector; requirements are ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelectorTerm {
    /// Label match expressions for the term.
    #[serde(default)]
    pub match_expressions: Vec<NodeSelectorRequirement>,
}

/// Node selector with ORed terms, used by added affinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelector {
    /// Selector terms; a node matching any term matches the selector.
    #[serde(default)]
    pub node_selector_terms: Vec<NodeSelectorTerm>,
}

// ============================================================================
// SECTION: Argument Schemas
// ============================================================================

/// Arguments for the `DefaultPreemption` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultPreemptionArgs {
    /// Percentage of nodes considered as preemption candidates.
    #[serde(default = "default_min_candidate_nodes_percentage")]
    pub min_candidate_nodes_percentage: i32,
    /// Absolute floor on the number of candidate nodes.
    #[serde(default = "default_min_candidate_nodes_absolute")]
    pub min_candidate_nodes_absolute: i32,
}

/// Default candidate percentage for preemption.
fn default_min_candidate_nodes_percentage() -> i32 {
    10
}

/// Default candidate floor for preemption.
fn default_min_candidate_nodes_absolute() -> i32 {
    100
}

impl Default for DefaultPreemptionArgs {
    fn default() -> Self {
        Self {
            min_candidate_nodes_percentage: default_min_candidate_nodes_percentage(),
            min_candidate_nodes_absolute: default_min_candidate_nodes_absolute(),
        }
    }
}

/// Arguments for the `InterPodAffinity` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterPodAffinityArgs {
    /// Score weight granted to pods with required affinity terms.
    #[serde(default = "default_hard_pod_affinity_weight")]
    pub hard_pod_affinity_weight: i32,
}

/// Default hard pod affinity weight.
fn default_hard_pod_affinity_weight() -> i32 {
    1
}

impl Default for InterPodAffinityArgs {
    fn default() -> Self {
        Self {
            hard_pod_affinity_weight: default_hard_pod_affinity_weight(),
        }
    }
}

/// Arguments for the `NodeAffinity` plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAffinityArgs {
    /// Affinity applied to every pod in addition to its own affinity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_affinity: Option<NodeSelector>,
}

/// Arguments for the `NodeResourcesBalancedAllocation` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResourcesBalancedAllocationArgs {
    /// Resources whose utilization spread is balanced.
    #[serde(default = "default_balanced_allocation_resources")]
    pub resources: Vec<ResourceSpec>,
}

/// Default resource set for balanced allocation.
fn default_balanced_allocation_resources() -> Vec<ResourceSpec> {
    vec![ResourceSpec::new("cpu", 1), ResourceSpec::new("memory", 1)]
}

impl Default for NodeResourcesBalancedAllocationArgs {
    fn default() -> Self {
        Self {
            resources: default_balanced_allocation_resources(),
        }
    }
}

/// Arguments for the `NodeResourcesFit` plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResourcesFitArgs {
    /// Resources ignored when checking fit.
    #[serde(default)]
    pub ignored_resources: Vec<String>,
    /// Resource group prefixes ignored when checking fit.
    #[serde(default)]
    pub ignored_resource_groups: Vec<String>,
    /// Scoring strategy for the fit score extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_strategy: Option<ScoringStrategy>,
}

/// Defaulting behavior for topology spread constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyDefaultingType {
    /// Use the cluster-operator supplied default constraints.
    List,
    /// Use the built-in system default constraints.
    System,
}

/// Arguments for the `PodTopologySpread` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTopologySpreadArgs {
    /// Default constraints applied to pods without their own constraints.
    #[serde(default)]
    pub default_constraints: Vec<TopologySpreadConstraint>,
    /// Which defaulting source is in effect.
    #[serde(default = "default_topology_defaulting_type")]
    pub defaulting_type: TopologyDefaultingType,
}

/// Default defaulting source for topology spread.
const fn default_topology_defaulting_type() -> TopologyDefaultingType {
    TopologyDefaultingType::System
}

impl Default for PodTopologySpreadArgs {
    fn default() -> Self {
        Self {
            default_constraints: Vec::new(),
            defaulting_type: default_topology_defaulting_type(),
        }
    }
}

/// Arguments for the `VolumeBinding` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeBindingArgs {
    /// Seconds to wait for volume binding before failing the pod.
    #[serde(default = "default_bind_timeout_seconds")]
    pub bind_timeout_seconds: i64,
    /// Utilization shape for volume capacity scoring.
    #[serde(default)]
    pub shape: Vec<UtilizationShapePoint>,
}

/// Default bind timeout in seconds.
fn default_bind_timeout_seconds() -> i64 {
    600
}

impl Default for VolumeBindingArgs {
    fn default() -> Self {
        Self {
            bind_timeout_seconds: default_bind_timeout_seconds(),
            shape: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Tagged Union
// ============================================================================

/// Fully typed plugin arguments, tagged by the owning plugin's schema.
///
/// # Invariants
/// - A value of this type is always the product of a successful schema
///   decode; no variant wraps raw YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PluginArgs {
    /// Arguments for `DefaultPreemption`.
    DefaultPreemption(DefaultPreemptionArgs),
    /// Arguments for `InterPodAffinity`.
    InterPodAffinity(InterPodAffinityArgs),
    /// Arguments for `NodeAffinity`.
    NodeAffinity(NodeAffinityArgs),
    /// Arguments for `NodeResourcesBalancedAllocation`.
    NodeResourcesBalancedAllocation(NodeResourcesBalancedAllocationArgs),
    /// Arguments for `NodeResourcesFit`.
    NodeResourcesFit(NodeResourcesFitArgs),
    /// Arguments for `PodTopologySpread`.
    PodTopologySpread(PodTopologySpreadArgs),
    /// Arguments for `VolumeBinding`.
    VolumeBinding(VolumeBindingArgs),
}

impl PluginArgs {
    /// Returns the registered kind tag for the wrapped schema.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DefaultPreemption(_) => "DefaultPreemptionArgs",
            Self::InterPodAffinity(_) => "InterPodAffinityArgs",
            Self::NodeAffinity(_) => "NodeAffinityArgs",
            Self::NodeResourcesBalancedAllocation(_) => "NodeResourcesBalancedAllocationArgs",
            Self::NodeResourcesFit(_) => "NodeResourcesFitArgs",
            Self::PodTopologySpread(_) => "PodTopologySpreadArgs",
            Self::VolumeBinding(_) => "VolumeBindingArgs",
        }
    }
}

// ============================================================================
// SECTION: Schema Registry
// ============================================================================

/// Decode function turning a raw YAML payload into typed arguments.
type ArgsDecodeFn = fn(serde_yaml::Value) -> Result<PluginArgs, serde_yaml::Error>;

/// Registered schema entry for one plugin.
struct ArgsSchema {
    /// Kind tag under which the schema is registered as a document kind.
    kind: &'static str,
    /// Decode function for the schema.
    decode: ArgsDecodeFn,
}

/// Registry mapping plugin names to their argument schemas.
///
/// # Invariants
/// - Plugin names and kind tags are unique within the registry.
pub struct ArgsRegistry {
    /// Schema entries keyed by plugin name.
    schemas: BTreeMap<&'static str, ArgsSchema>,
}

/// Builds a decode function for one schema struct and enum variant.
macro_rules! schema_decoder {
    ($args:ty, $variant:ident) => {
        |raw: serde_yaml::Value| -> Result<PluginArgs, serde_yaml::Error> {
            serde_yaml::from_value::<$args>(raw).map(PluginArgs::$variant)
        }
    };
}

impl ArgsRegistry {
    /// Creates the registry of built-in argument schemas.
    #[must_use]
    pub fn builtin() -> Self {
        let mut schemas: BTreeMap<&'static str, ArgsSchema> = BTreeMap::new();
        schemas.insert(
            "DefaultPreemption",
            ArgsSchema {
                kind: "DefaultPreemptionArgs",
                decode: schema_decoder!(DefaultPreemptionArgs, DefaultPreemption),
            },
        );
        schemas.insert(
            "InterPodAffinity",
            ArgsSchema {
                kind: "InterPodAffinityArgs",
                decode: schema_decoder!(InterPodAffinityArgs, InterPodAffinity),
            },
        );
        schemas.insert(
            "NodeAffinity",
            ArgsSchema {
                kind: "NodeAffinityArgs",
                decode: schema_decoder!(NodeAffinityArgs, NodeAffinity),
            },
        );
        schemas.insert(
            "NodeResourcesBalancedAllocation",
            ArgsSchema {
                kind: "NodeResourcesBalancedAllocationArgs",
                decode: schema_decoder!(
                    NodeResourcesBalancedAllocationArgs,
                    NodeResourcesBalancedAllocation
                ),
            },
        );
        schemas.insert(
            "NodeResourcesFit",
            ArgsSchema {
                kind: "NodeResourcesFitArgs",
                decode: schema_decoder!(NodeResourcesFitArgs, NodeResourcesFit),
            },
        );
        schemas.insert(
            "PodTopologySpread",
            ArgsSchema {
                kind: "PodTopologySpreadArgs",
                decode: schema_decoder!(PodTopologySpreadArgs, PodTopologySpread),
            },
        );
        schemas.insert(
            "VolumeBinding",
            ArgsSchema {
                kind: "VolumeBindingArgs",
                decode: schema_decoder!(VolumeBindingArgs, VolumeBinding),
            },
        );
        Self { schemas }
    }

    /// Returns true when the plugin name has a registered argument schema.
    #[must_use]
    pub fn is_registered(&self, plugin: &str) -> bool {
        self.schemas.contains_key(plugin)
    }

    /// Decodes a raw argument payload for the named plugin.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownPlugin`] when the plugin has no
    /// registered schema, or [`DecodeError::PluginArgs`] when the payload
    /// does not match the schema.
    pub fn decode_args(
        &self,
        plugin: &str,
        raw: serde_yaml::Value,
    ) -> Result<PluginArgs, DecodeError> {
        let Some(schema) = self.schemas.get(plugin) else {
            return Err(DecodeError::UnknownPlugin {
                plugin: plugin.to_string(),
            });
        };
        (schema.decode)(raw).map_err(|source| DecodeError::PluginArgs {
            plugin: plugin.to_string(),
            source,
        })
    }

    /// Decodes a standalone document of a registered argument-schema kind.
    ///
    /// Returns `None` when the kind tag is not an argument-schema kind.
    pub(crate) fn decode_kind(
        &self,
        kind: &str,
        raw: serde_yaml::Value,
    ) -> Option<Result<PluginArgs, serde_yaml::Error>> {
        let schema = self.schemas.values().find(|schema| schema.kind == kind)?;
        Some((schema.decode)(raw))
    }
}

impl Default for ArgsRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
