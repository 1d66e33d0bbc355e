#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chart_deploy::infra::db::DeploymentStore;
use chart_deploy::infra::process::{CommandOutcome, CommandRunner};
use chart_deploy::models::{ChartValues, Deployment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub input: Option<String>,
}

/// Records every command and answers with a fixed outcome.
pub struct RecordingRunner {
    outcome: CommandOutcome,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self::answering(CommandOutcome::ok("Release has been upgraded. Happy Helming!\n"))
    }

    pub fn answering(outcome: CommandOutcome) -> Self {
        Self { outcome, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], input: Option<&str>) -> CommandOutcome {
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.to_vec(),
            input: input.map(str::to_string),
        });
        self.outcome.clone()
    }
}

/// In-memory `deployments` table.
#[derive(Default)]
pub struct MemoryStore {
    rows: Vec<Deployment>,
    queries: AtomicUsize,
}

impl MemoryStore {
    pub fn with(rows: Vec<Deployment>) -> Self {
        Self { rows, queries: AtomicUsize::new(0) }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeploymentStore for MemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Deployment>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.iter().find(|d| d.token == token).cloned())
    }
}

pub fn deployment(token: &str, project: &str, enabled: bool, config: &str) -> Deployment {
    Deployment {
        token: token.to_string(),
        project_name: project.to_string(),
        version: "1.2.0".to_string(),
        enabled,
        config: ChartValues::from_json_str(config).unwrap(),
    }
}
