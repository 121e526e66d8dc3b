//! Runner that drives a single CLI command against the Quay API

use crate::cli::args::{Args, Command};
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::QuayClient;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

/// Which kind of resource a delete command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Repository,
    RobotAccount,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            ResourceKind::Repository => "repository",
            ResourceKind::RobotAccount => "robot account",
        }
    }
}

/// Outcome of one deletion in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub name: String,
    pub result: Result<bool>,
}

pub struct Runner {
    args: Args,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Self { args, output }
    }

    pub async fn run(&self) -> Result<()> {
        self.args.validate()?;

        let config = self.args.client_config()?;
        self.output.verbose(&format!("Quay API: {}", config.url));

        let client = Arc::new(
            QuayClient::builder(config.url.clone())
                .with_token(config.token.clone())
                .with_logger(self.output.clone())
                .build()?,
        );

        self.execute(&client, &self.args.command).await?;

        self.output.success(&format!(
            "Done in {}",
            self.output.format_duration(self.output.elapsed())
        ));
        Ok(())
    }

    /// Run one command with an already-built client
    pub async fn execute(&self, client: &Arc<QuayClient>, command: &Command) -> Result<()> {
        match command {
            Command::ListRepos { organization } => {
                self.output.section(&format!("Repositories in {}", organization));
                let repositories = client.get_all_repositories(organization).await?;
                let lines: Vec<String> = repositories
                    .iter()
                    .map(|repo| match (self.output.verbose, repo.last_modified) {
                        (true, Some(ts)) => format!("{} (last modified {})", repo.name, ts),
                        _ => repo.name.clone(),
                    })
                    .collect();
                self.output.list("Repositories", &lines);
                Ok(())
            }
            Command::ListRobots { organization } => {
                self.output.section(&format!("Robot accounts in {}", organization));
                let robots = client.get_all_robot_accounts(organization).await?;
                let lines: Vec<String> = robots.iter().map(|robot| robot.name.clone()).collect();
                self.output.list("Robot accounts", &lines);
                Ok(())
            }
            Command::DeleteRepo {
                organization,
                names,
            } => {
                self.delete_all(client, ResourceKind::Repository, organization, names)
                    .await
            }
            Command::DeleteRobot {
                organization,
                names,
            } => {
                self.delete_all(client, ResourceKind::RobotAccount, organization, names)
                    .await
            }
        }
    }

    async fn delete_all(
        &self,
        client: &Arc<QuayClient>,
        kind: ResourceKind,
        organization: &str,
        names: &[String],
    ) -> Result<()> {
        self.output.section(&format!("Deleting {}s in {}", kind.label(), organization));
        let started = Instant::now();

        let outcomes = delete_batch(client, kind, organization, names).await;

        let mut failures = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(true) => self.output.success(&format!("Deleted {}", outcome.name)),
                Ok(false) => self
                    .output
                    .info(&format!("{} does not exist, skipped", outcome.name)),
                Err(e) => {
                    failures += 1;
                    self.output
                        .error(&format!("Failed to delete {}: {}", outcome.name, e));
                }
            }
        }

        let deleted = outcomes.iter().filter(|o| o.result == Ok(true)).count();
        self.output.summary_kv(
            "Summary",
            &[
                ("Deleted", deleted.to_string()),
                ("Absent", (outcomes.len() - deleted - failures).to_string()),
                ("Failed", failures.to_string()),
                ("Elapsed", self.output.format_duration(started.elapsed())),
            ],
        );

        // Every outcome has been reported; surface the first failure as the exit error.
        match outcomes.into_iter().find_map(|o| o.result.err()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Issue every deletion concurrently through one shared client
///
/// Outcomes come back in the order of `names`.
pub async fn delete_batch(
    client: &Arc<QuayClient>,
    kind: ResourceKind,
    organization: &str,
    names: &[String],
) -> Vec<DeleteOutcome> {
    let tasks = names.iter().map(|name| {
        let client = Arc::clone(client);
        async move {
            let result = match kind {
                ResourceKind::Repository => client.delete_repository(organization, name).await,
                ResourceKind::RobotAccount => {
                    client.delete_robot_account(organization, name).await
                }
            };
            DeleteOutcome {
                name: name.clone(),
                result,
            }
        }
    });

    join_all(tasks).await
}
