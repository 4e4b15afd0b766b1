//! Command-line arguments.

use crate::render::TfFormat;
use crate::settings::{Settings, DEFAULT_CONFIG_FILE, DEFAULT_CREDENTIALS_FILE};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "envaws",
    version,
    about = "AWS access key manager",
    long_about = "AWS access key manager. Helps you export AWS credentials as environment variables and unset them again.",
    after_help = "Examples:
  eval $(envaws env default)      # export AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY for the default profile
  eval $(envaws unset)            # unset them
  envaws tf default -f var        # print a terraform.tfvars body"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Shared credentials file
    #[arg(long, global = true, env = "AWS_SHARED_CREDENTIALS_FILE", default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials_file: String,

    /// Shared config file
    #[arg(long, global = true, env = "AWS_CONFIG_FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings::new(self.credentials_file.clone(), self.config_file.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available profiles in the credentials file
    Ls {
        /// Print account ID, user ID and ARN for each profile
        #[arg(short, long)]
        full: bool,
    },
    /// Print keys as environment variables for a profile
    Env {
        /// Profile name
        #[arg(value_name = "PROFILE")]
        profile: String,
    },
    /// Print commands to unset the AWS_* environment variables
    Unset,
    /// Print keys as terraform variable definitions for a profile
    Tf {
        /// Profile name
        #[arg(value_name = "PROFILE")]
        profile: String,

        /// Output format: option, env, var or export
        #[arg(short, long, default_value = "env")]
        format: TfFormat,
    },
    /// Inspect IAM roles
    Role {
        #[command(subcommand)]
        command: RoleCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleCommand {
    /// List role names
    Ls {
        /// Print role ID and ARN for each role
        #[arg(short, long)]
        full: bool,
    },
    /// Print a role and its decoded trust policy
    Get {
        /// Role name
        #[arg(value_name = "ROLE_NAME")]
        role_name: String,
    },
}
