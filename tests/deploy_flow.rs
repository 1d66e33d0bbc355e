mod common;

use chart_deploy::defaults::CHART_REFERENCE;
use chart_deploy::flows::{run_deployment, DeployOutcome};
use chart_deploy::infra::helm::HelmDeployer;
use chart_deploy::infra::process::CommandOutcome;
use common::{deployment, MemoryStore, RecordingRunner};

const DEMO_CONFIG: &str = r#"{"chartVersion":"0.3.0","replicas":2}"#;

fn demo_store() -> MemoryStore {
    MemoryStore::with(vec![
        deployment("abc123", "demo", true, DEMO_CONFIG),
        deployment("off", "paused", false, DEMO_CONFIG),
        deployment("nover", "broken", true, r#"{"replicas":1}"#),
    ])
}

#[tokio::test]
async fn test_enabled_deployment_is_released_with_helm() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let outcome = run_deployment(Some("abc123"), &store, &deployer).await.unwrap();
    assert_eq!(
        outcome,
        DeployOutcome::Deployed { project_name: "demo".to_string(), version: "1.2.0".to_string() }
    );
    assert!(outcome.is_success());

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "helm");
    assert_eq!(
        calls[0].args,
        vec![
            "upgrade",
            "--install",
            "demo",
            "oci://registry-1.docker.io/markmorcos/base-chart",
            "--version",
            "0.3.0",
            "-f",
            "-",
            "-n",
            "demo",
            "--create-namespace",
        ]
    );
    assert_eq!(calls[0].input.as_deref(), Some("chartVersion: 0.3.0\nreplicas: 2\n"));
}

#[tokio::test]
async fn test_unknown_token_never_deploys() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let outcome = run_deployment(Some("missing"), &store, &deployer).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NotFound);
    assert!(!outcome.is_success());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_disabled_deployment_never_deploys() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let outcome = run_deployment(Some("off"), &store, &deployer).await.unwrap();
    assert_eq!(outcome, DeployOutcome::Disabled { project_name: "paused".to_string() });
    assert!(!outcome.is_success());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_helm_failure_carries_stderr() {
    let store = demo_store();
    let runner = RecordingRunner::answering(CommandOutcome::failed(
        "Error: UPGRADE FAILED: another operation is in progress\n",
    ));
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let outcome = run_deployment(Some("abc123"), &store, &deployer).await.unwrap();
    match &outcome {
        DeployOutcome::HelmFailed { project_name, reason } => {
            assert_eq!(project_name, "demo");
            assert!(reason.contains("another operation is in progress"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_missing_token_fails_before_database() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let err = run_deployment(None, &store, &deployer).await.unwrap_err();
    assert!(err.to_string().contains("DEPLOYMENT_TOKEN"));
    assert_eq!(store.queries(), 0);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_missing_chart_version_is_fatal() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "helm", CHART_REFERENCE);

    let err = run_deployment(Some("nover"), &store, &deployer).await.unwrap_err();
    assert!(err.to_string().contains("chartVersion"));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_dry_run_reaches_helm_flags() {
    let store = demo_store();
    let runner = RecordingRunner::succeeding();
    let deployer = HelmDeployer::new(&runner, "/opt/helm", "oci://example.test/charts/base").with_dry_run(true);

    let outcome = run_deployment(Some("abc123"), &store, &deployer).await.unwrap();
    assert!(outcome.is_success());

    let calls = runner.calls();
    assert_eq!(calls[0].program, "/opt/helm");
    assert_eq!(calls[0].args[3], "oci://example.test/charts/base");
    assert_eq!(calls[0].args.last().map(String::as_str), Some("--dry-run"));
}
