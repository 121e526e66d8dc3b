//! Command-line argument parsing

use crate::config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, TOKEN_ENV};
use crate::error::{QuayError, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quay-client")]
#[command(about = "List and delete Quay repositories and robot accounts")]
#[command(version)]
pub struct Args {
    /// Quay API base URL
    #[arg(
        long = "url",
        env = API_URL_ENV,
        default_value = DEFAULT_API_URL,
        help = "Quay API base URL, e.g. https://quay.io/api/v1"
    )]
    pub url: String,

    /// OAuth bearer token
    #[arg(
        long = "token",
        env = TOKEN_ENV,
        hide_env_values = true,
        help = "Bearer token used to authenticate API calls"
    )]
    pub token: Option<String>,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet mode
    #[arg(
        long = "quiet",
        short = 'q',
        conflicts_with = "verbose",
        help = "Only print results and errors"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every repository in an organization
    ListRepos {
        /// Organization (namespace)
        organization: String,
    },
    /// List every robot account in an organization
    ListRobots {
        /// Organization (namespace)
        organization: String,
    },
    /// Delete repositories; names that do not exist are skipped
    DeleteRepo {
        /// Organization (namespace)
        organization: String,
        /// Repository names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Delete robot accounts by short name; names that do not exist are skipped
    DeleteRobot {
        /// Organization (namespace)
        organization: String,
        /// Robot short names (without the `organization+` prefix)
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        self.client_config()?.validate()?;

        let organization = match &self.command {
            Command::ListRepos { organization }
            | Command::ListRobots { organization }
            | Command::DeleteRepo { organization, .. }
            | Command::DeleteRobot { organization, .. } => organization,
        };
        if organization.trim().is_empty() {
            return Err(QuayError::Config("Organization cannot be empty".to_string()));
        }

        if let Command::DeleteRepo { names, .. } | Command::DeleteRobot { names, .. } = &self.command
        {
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(QuayError::Config("Names cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let token = self.token.clone().ok_or_else(|| {
            QuayError::Config(format!("No token given; pass --token or set {}", TOKEN_ENV))
        })?;
        Ok(ClientConfig::new(self.url.clone(), token))
    }
}
