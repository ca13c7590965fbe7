//! Resolver validation tests for schedsim-config.
// crates/schedsim-config/tests/resolver_validation.rs
// ============================================================================
// Module: Resolver Validation Tests
// Description: Validate step ordering, wrapping, and all-or-nothing failure.
// Purpose: Ensure resolution composes settings, policy, and credential.
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

use std::io::Write;

use schedsim_config::ClusterCredential;
use schedsim_config::ClusterCredentialLoader;
use schedsim_config::ConfigError;
use schedsim_config::CredentialError;
use schedsim_config::KubeconfigLoader;
use schedsim_config::ResolvedConfig;
use schedsim_config::SettingsFile;
use schedsim_core::PluginArgs;
use schedsim_core::SchedulerPolicy;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

/// Loader that must never be invoked.
struct PanickingLoader;

impl ClusterCredentialLoader for PanickingLoader {
    fn load_ambient(&self) -> Result<ClusterCredential, CredentialError> {
        panic!("credential loader invoked with external import disabled");
    }
}

/// Loader that always fails to resolve a credential.
struct FailingLoader;

impl ClusterCredentialLoader for FailingLoader {
    fn load_ambient(&self) -> Result<ClusterCredential, CredentialError> {
        Err(CredentialError::NoAmbientCredential)
    }
}

fn assert_invalid(result: Result<ResolvedConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected resolution failure".to_string()),
    }
}

#[test]
fn empty_api_host_defaults_to_loopback() -> TestResult {
    let settings = SettingsFile {
        kube_api_port: 3131,
        ..SettingsFile::default()
    };
    let config =
        ResolvedConfig::from_settings(settings, &PanickingLoader).map_err(|err| err.to_string())?;
    if config.api_server_address != "127.0.0.1:3131" {
        return Err(format!("unexpected address {}", config.api_server_address));
    }
    Ok(())
}

#[test]
fn explicit_api_host_is_used_verbatim() -> TestResult {
    let settings = SettingsFile {
        kube_api_host: "10.0.0.5".to_string(),
        kube_api_port: 6443,
        ..SettingsFile::default()
    };
    let config =
        ResolvedConfig::from_settings(settings, &PanickingLoader).map_err(|err| err.to_string())?;
    if config.api_server_address != "10.0.0.5:6443" {
        return Err(format!("unexpected address {}", config.api_server_address));
    }
    Ok(())
}

#[test]
fn port_is_taken_as_is_without_validation() -> TestResult {
    let settings = SettingsFile {
        port: -4,
        ..SettingsFile::default()
    };
    let config =
        ResolvedConfig::from_settings(settings, &PanickingLoader).map_err(|err| err.to_string())?;
    if config.port != -4 {
        return Err(format!("unexpected port {}", config.port));
    }
    Ok(())
}

#[test]
fn malformed_origin_fails_with_step_and_index() -> TestResult {
    let settings = SettingsFile {
        cors_allowed_origin_list: vec!["not a url".to_string(), "http://ok".to_string()],
        ..SettingsFile::default()
    };
    let result = ResolvedConfig::from_settings(settings, &PanickingLoader);
    assert_invalid(result, "validate origins in CorsAllowedOriginList")?;
    let settings = SettingsFile {
        cors_allowed_origin_list: vec!["not a url".to_string(), "http://ok".to_string()],
        ..SettingsFile::default()
    };
    assert_invalid(
        ResolvedConfig::from_settings(settings, &PanickingLoader),
        "invalid url at index 0",
    )?;
    Ok(())
}

#[test]
fn valid_origins_pass_through_in_order() -> TestResult {
    let settings = SettingsFile {
        cors_allowed_origin_list: vec!["http://a".to_string(), "https://b".to_string()],
        ..SettingsFile::default()
    };
    let config =
        ResolvedConfig::from_settings(settings, &PanickingLoader).map_err(|err| err.to_string())?;
    if config.cors_allowed_origins != ["http://a", "https://b"] {
        return Err(format!("origins not preserved: {:?}", config.cors_allowed_origins));
    }
    Ok(())
}

#[test]
fn import_disabled_skips_loader_and_leaves_credential_unset() -> TestResult {
    let config = ResolvedConfig::from_settings(SettingsFile::default(), &PanickingLoader)
        .map_err(|err| err.to_string())?;
    if config.cluster_credential.is_some() {
        return Err("credential must be absent when import is disabled".to_string());
    }
    if config.external_import_enabled {
        return Err("import flag should be false by default".to_string());
    }
    Ok(())
}

#[test]
fn import_enabled_loads_credential_from_override() -> TestResult {
    let mut kubeconfig = NamedTempFile::new().map_err(|err| err.to_string())?;
    kubeconfig.write_all(b"apiVersion: v1\nkind: Config\n").map_err(|err| err.to_string())?;
    let loader = KubeconfigLoader::with_override(kubeconfig.path());
    let settings = SettingsFile {
        external_import_enabled: true,
        ..SettingsFile::default()
    };
    let config = ResolvedConfig::from_settings(settings, &loader).map_err(|err| err.to_string())?;
    let credential = config.cluster_credential.ok_or("credential missing")?;
    if credential.source() != kubeconfig.path() {
        return Err("credential source does not match override".to_string());
    }
    if credential.kubeconfig() != b"apiVersion: v1\nkind: Config\n" {
        return Err("credential bytes do not match kubeconfig".to_string());
    }
    Ok(())
}

#[test]
fn import_enabled_propagates_loader_failure() -> TestResult {
    let settings = SettingsFile {
        external_import_enabled: true,
        ..SettingsFile::default()
    };
    assert_invalid(
        ResolvedConfig::from_settings(settings, &FailingLoader),
        "load cluster credential",
    )?;
    Ok(())
}

#[test]
fn empty_policy_path_uses_builtin_default() -> TestResult {
    let config = ResolvedConfig::from_settings(SettingsFile::default(), &PanickingLoader)
        .map_err(|err| err.to_string())?;
    if config.initial_policy != SchedulerPolicy::default_policy() {
        return Err("expected the built-in default policy".to_string());
    }
    Ok(())
}

#[test]
fn policy_path_decodes_file_into_typed_policy() -> TestResult {
    let mut policy_file = NamedTempFile::new().map_err(|err| err.to_string())?;
    policy_file
        .write_all(
            b"\
apiVersion: kubescheduler.config.k8s.io/v1beta2
kind: KubeSchedulerConfiguration
profiles:
  - schedulerName: sim-scheduler
    pluginConfig:
      - name: InterPodAffinity
        args:
          hardPodAffinityWeight: 7
",
        )
        .map_err(|err| err.to_string())?;
    let settings = SettingsFile {
        kube_scheduler_config_path: policy_file.path().to_string_lossy().into_owned(),
        ..SettingsFile::default()
    };
    let config =
        ResolvedConfig::from_settings(settings, &PanickingLoader).map_err(|err| err.to_string())?;
    match config.initial_policy.profiles[0].plugin_config[0].args.as_ref() {
        Some(PluginArgs::InterPodAffinity(args)) => {
            if args.hard_pod_affinity_weight == 7 {
                Ok(())
            } else {
                Err(format!("unexpected weight {}", args.hard_pod_affinity_weight))
            }
        }
        other => Err(format!("expected typed InterPodAffinity args, got {other:?}")),
    }
}

#[test]
fn missing_policy_file_fails_the_read_step() -> TestResult {
    let settings = SettingsFile {
        kube_scheduler_config_path: "/nonexistent/scheduler.yaml".to_string(),
        ..SettingsFile::default()
    };
    assert_invalid(
        ResolvedConfig::from_settings(settings, &PanickingLoader),
        "read scheduler config file",
    )?;
    Ok(())
}

#[test]
fn undecodable_policy_file_fails_the_decode_step() -> TestResult {
    let mut policy_file = NamedTempFile::new().map_err(|err| err.to_string())?;
    policy_file
        .write_all(b"apiVersion: kubescheduler.config.k8s.io/v1beta2\nkind: ClusterPolicy\n")
        .map_err(|err| err.to_string())?;
    let settings = SettingsFile {
        kube_scheduler_config_path: policy_file.path().to_string_lossy().into_owned(),
        ..SettingsFile::default()
    };
    assert_invalid(
        ResolvedConfig::from_settings(settings, &PanickingLoader),
        "decode scheduler config file",
    )?;
    Ok(())
}
