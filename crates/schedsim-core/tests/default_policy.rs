//! Default policy tests for schedsim-core.
// crates/schedsim-core/tests/default_policy.rs
// ============================================================================
// Module: Default Policy Tests
// Description: Verify the built-in baseline policy is deterministic and typed.
// Purpose: Guard the fallback used when no policy document is supplied.
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

use schedsim_core::PluginArgs;
use schedsim_core::SchedulerPolicy;
use schedsim_core::POLICY_API_VERSION;
use schedsim_core::POLICY_KIND;

type TestResult = Result<(), String>;

#[test]
fn default_policy_is_deterministic() -> TestResult {
    if SchedulerPolicy::default_policy() != SchedulerPolicy::default_policy() {
        return Err("default policy must be identical across calls".to_string());
    }
    Ok(())
}

#[test]
fn default_policy_carries_document_tags() -> TestResult {
    let policy = SchedulerPolicy::default_policy();
    if policy.api_version != POLICY_API_VERSION {
        return Err(format!("unexpected api version {}", policy.api_version));
    }
    if policy.kind != POLICY_KIND {
        return Err(format!("unexpected kind {}", policy.kind));
    }
    Ok(())
}

#[test]
fn default_policy_has_one_fully_typed_profile() -> TestResult {
    let policy = SchedulerPolicy::default_policy();
    if policy.profiles.len() != 1 {
        return Err(format!("expected one profile, got {}", policy.profiles.len()));
    }
    let profile = &policy.profiles[0];
    if profile.scheduler_name != "default-scheduler" {
        return Err(format!("unexpected scheduler name {}", profile.scheduler_name));
    }
    if profile.plugin_config.is_empty() {
        return Err("default profile must configure the registered schemas".to_string());
    }
    for entry in &profile.plugin_config {
        if entry.args.is_none() {
            return Err(format!("default entry {} has no typed args", entry.name));
        }
    }
    Ok(())
}

#[test]
fn default_policy_wires_queue_sort_and_bind() -> TestResult {
    let policy = SchedulerPolicy::default_policy();
    let plugins = policy.profiles[0].plugins.as_ref().ok_or("plugins missing")?;
    let queue_sort = plugins.queue_sort.enabled.first().ok_or("queue sort empty")?;
    if queue_sort.name != "PrioritySort" {
        return Err(format!("unexpected queue sort plugin {}", queue_sort.name));
    }
    let bind = plugins.bind.enabled.first().ok_or("bind empty")?;
    if bind.name != "DefaultBinder" {
        return Err(format!("unexpected bind plugin {}", bind.name));
    }
    Ok(())
}

#[test]
fn default_policy_serializes_with_camel_case_keys() -> TestResult {
    let policy = SchedulerPolicy::default_policy();
    let rendered = serde_yaml::to_string(&policy).map_err(|err| err.to_string())?;
    for needle in ["apiVersion", "schedulerName", "pluginConfig", "bindTimeoutSeconds"] {
        if !rendered.contains(needle) {
            return Err(format!("rendered policy missing key {needle}"));
        }
    }
    Ok(())
}

#[test]
fn default_policy_volume_binding_uses_default_timeout() -> TestResult {
    let policy = SchedulerPolicy::default_policy();
    let entry = policy.profiles[0]
        .plugin_config
        .iter()
        .find(|entry| entry.name == "VolumeBinding")
        .ok_or("VolumeBinding entry missing")?;
    match entry.args.as_ref() {
        Some(PluginArgs::VolumeBinding(args)) => {
            if args.bind_timeout_seconds == 600 {
                Ok(())
            } else {
                Err(format!("unexpected timeout {}", args.bind_timeout_seconds))
            }
        }
        other => Err(format!("expected VolumeBinding args, got {other:?}")),
    }
}
