//! App lifecycle and sandbox access through the CLI surface

use crate::utils::ScriptedRunner;
use edgekit::cli::{AppCreateOptions, CliClient, CommandOutput};
use edgekit::registry::{wait_until_ready, ReadinessProbe, RegistryError, RetryPolicy};
use edgekit::EnvConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

fn client(runner: Arc<ScriptedRunner>) -> CliClient<Arc<ScriptedRunner>> {
    CliClient::with_runner(EnvConfig::default().cli_config(), runner)
}

#[tokio::test]
async fn create_get_delete_sequence() {
    let runner = Arc::new(ScriptedRunner::new());
    let client = client(runner.clone());

    runner.script(
        "app",
        ScriptedRunner::ok(r#"{"id": "da_echo", "name": "echo", "url": "http://echo.edge.local"}"#),
    );

    client
        .app_create(&AppCreateOptions {
            name: "echo".to_string(),
            owner: "ci".to_string(),
            package: "ci/echo@1.0.0".to_string(),
            app_type: Some("http".to_string()),
            no_wait: true,
        })
        .await
        .unwrap();

    let app = client.app_get("ci/echo").await.unwrap();
    assert_eq!(app.id, "da_echo");

    client.app_delete("ci/echo").await.unwrap();

    let apps: Vec<String> = runner
        .invocations()
        .iter()
        .filter(|invocation| invocation.args.first().map(String::as_str) == Some("app"))
        .map(|invocation| invocation.args[1].clone())
        .collect();
    assert_eq!(apps, vec!["create", "get", "delete"]);
}

#[tokio::test]
async fn list_shows_apps_in_namespace() {
    let runner = Arc::new(ScriptedRunner::new());
    let client = client(runner.clone());
    runner.script(
        "app",
        ScriptedRunner::ok(
            r#"[{"id": "da_echo", "name": "echo"}, {"id": "da_static", "name": "static-site"}]"#,
        ),
    );

    let apps = client.app_list("ci").await.unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[1].name, "static-site");
    assert_eq!(apps[1].url, None);

    let args = &runner.invocations()[0].args;
    assert!(args.windows(2).any(|w| w == ["--namespace", "ci"]));
}

#[tokio::test]
async fn app_info_is_plain_text() {
    let runner = Arc::new(ScriptedRunner::new());
    let client = client(runner.clone());
    runner.script("app", ScriptedRunner::ok("echo: running, 1 instance\n"));

    let output = client.app_info("ci/echo").await.unwrap();
    assert!(output.stdout.contains("running"));
}

#[tokio::test]
async fn app_create_flags() {
    let runner = Arc::new(ScriptedRunner::new());
    let client = client(runner.clone());

    client
        .app_create(&AppCreateOptions {
            name: "echo".to_string(),
            owner: "ci".to_string(),
            package: "ci/echo@1.0.0".to_string(),
            app_type: Some("http".to_string()),
            no_wait: true,
        })
        .await
        .unwrap();

    let args = &runner.invocations()[0].args;
    assert!(args.windows(2).any(|w| w == ["--name", "echo"]));
    assert!(args.windows(2).any(|w| w == ["--owner", "ci"]));
    assert!(args.windows(2).any(|w| w == ["--package", "ci/echo@1.0.0"]));
    assert!(args.windows(2).any(|w| w == ["--type", "http"]));
    assert!(args.iter().any(|arg| arg == "--no-wait"));
    assert!(args.iter().any(|arg| arg == "--non-interactive"));
}

#[tokio::test]
async fn ssh_runs_commands_in_the_sandbox() {
    let runner = Arc::new(ScriptedRunner::new());
    let client = client(runner.clone());
    runner.script(
        "ssh",
        CommandOutput {
            code: 0,
            stdout: "bin  dev  etc\n".to_string(),
            stderr: String::new(),
        },
    );

    let output = client.ssh("acme/sandbox", &["ls", "/"]).await.unwrap();
    assert!(output.stdout.contains("etc"));

    let args = &runner.invocations()[0].args;
    assert_eq!(&args[..3], &["ssh", "acme/sandbox", "--"]);
}

/// Probe whose answers are scripted per attempt
struct ScriptedProbe {
    statuses: Mutex<Vec<u16>>,
}

#[async_trait]
impl ReadinessProbe for ScriptedProbe {
    async fn probe(&self, _hostname: &str) -> Result<u16, RegistryError> {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            Ok(statuses.remove(0))
        } else {
            Ok(*statuses.first().unwrap_or(&503))
        }
    }
}

#[tokio::test]
async fn readiness_after_restart_like_outage() {
    // An app that was restarted answers 503 until its instance is back.
    let probe = ScriptedProbe {
        statuses: Mutex::new(vec![503, 503, 200]),
    };
    let policy = RetryPolicy {
        max_attempts: 5,
        poll_interval: Duration::from_millis(0),
        probe_timeout: Duration::from_secs(1),
    };
    assert!(wait_until_ready(&probe, "echo.edge.local", &policy).await);
}

#[tokio::test]
async fn readiness_budget_exhaustion_is_observable() {
    let probe = ScriptedProbe {
        statuses: Mutex::new(vec![503]),
    };
    let policy = RetryPolicy {
        max_attempts: 3,
        poll_interval: Duration::from_millis(0),
        probe_timeout: Duration::from_secs(1),
    };
    assert!(!wait_until_ready(&probe, "echo.edge.local", &policy).await);
}
