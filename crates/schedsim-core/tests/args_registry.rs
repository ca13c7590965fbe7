//! Argument schema registry tests for schedsim-core.
// crates/schedsim-core/tests/args_registry.rs
// ============================================================================
// Module: Argument Schema Registry Tests
// Description: Validate plugin-name dispatch over registered schemas.
// Purpose: Ensure registry decoding is typed, defaulted, and fail-closed.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use schedsim_core::ArgsRegistry;
use schedsim_core::PluginArgs;

type TestResult = Result<(), String>;

fn payload(yaml: &str) -> Result<serde_yaml::Value, String> {
    serde_yaml::from_str(yaml).map_err(|err| err.to_string())
}

#[test]
fn builtin_registry_knows_the_standard_plugins() -> TestResult {
    let registry = ArgsRegistry::builtin();
    for plugin in [
        "DefaultPreemption",
        "InterPodAffinity",
        "NodeAffinity",
        "NodeResourcesBalancedAllocation",
        "NodeResourcesFit",
        "PodTopologySpread",
        "VolumeBinding",
    ] {
        if !registry.is_registered(plugin) {
            return Err(format!("expected {plugin} to be registered"));
        }
    }
    if registry.is_registered("CustomScorer") {
        return Err("unexpected registration for CustomScorer".to_string());
    }
    Ok(())
}

#[test]
fn decode_args_dispatches_to_the_declared_schema() -> TestResult {
    let registry = ArgsRegistry::builtin();
    let raw = payload("scoringStrategy:\n  type: MostAllocated\n  resources:\n    - name: cpu\n")?;
    match registry.decode_args("NodeResourcesFit", raw) {
        Ok(PluginArgs::NodeResourcesFit(args)) => {
            let strategy = args.scoring_strategy.ok_or("strategy missing")?;
            let resource = strategy.resources.first().ok_or("resources empty")?;
            if resource.name != "cpu" || resource.weight != 1 {
                return Err(format!("unexpected resource {resource:?}"));
            }
            Ok(())
        }
        other => Err(format!("expected NodeResourcesFit args, got {other:?}")),
    }
}

#[test]
fn decode_args_rejects_unregistered_plugin() -> TestResult {
    let registry = ArgsRegistry::builtin();
    let raw = payload("weight: 3\n")?;
    match registry.decode_args("CustomScorer", raw) {
        Err(error) => {
            let message = error.to_string();
            if message.contains("CustomScorer") {
                Ok(())
            } else {
                Err(format!("error {message} did not name the plugin"))
            }
        }
        Ok(args) => Err(format!("expected failure, decoded {args:?}")),
    }
}

#[test]
fn decode_args_rejects_payload_of_the_wrong_shape() -> TestResult {
    let registry = ArgsRegistry::builtin();
    let raw = payload("hardPodAffinityWeight: [1, 2]\n")?;
    match registry.decode_args("InterPodAffinity", raw) {
        Err(error) => {
            let message = error.to_string();
            if message.contains("InterPodAffinity") {
                Ok(())
            } else {
                Err(format!("error {message} did not name the plugin"))
            }
        }
        Ok(args) => Err(format!("expected failure, decoded {args:?}")),
    }
}
