//! CLI argument definitions and command dispatch

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use ark_common::{ApiClient, Config};

use crate::service::ToolsService;
use crate::types::{NewTool, ToolSpecInput, ToolUpdate};

#[derive(Parser)]
#[command(name = "ark-tools")]
#[command(about = "Manage Ark tools in a namespace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ark API base URL (default: from ~/.ark/config.toml or http://localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the Ark API
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Namespace to operate in (default: from config or "default")
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tools in the namespace
    List,
    /// Show a tool with its schema and status
    Get {
        /// Tool name
        name: String,
    },
    /// Delete a tool
    Delete {
        /// Tool name
        name: String,
    },
    /// Create a tool
    Create(CreateArgs),
    /// Update labels, annotations or spec of a tool
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Tool name
    #[arg(long)]
    pub name: String,
    /// Tool type (e.g. http, agent)
    #[arg(long = "type")]
    pub tool_type: String,
    /// Tool description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Input schema as JSON text (dropped if it does not parse)
    #[arg(long)]
    pub input_schema: Option<String>,
    /// Endpoint URL for http tools
    #[arg(long)]
    pub url: Option<String>,
    /// Target agent for agent tools
    #[arg(long)]
    pub agent: Option<String>,
    /// Annotation as KEY=VALUE (repeatable)
    #[arg(long = "annotation", value_parser = parse_key_value)]
    pub annotations: Vec<(String, String)>,
    /// Label as KEY=VALUE (repeatable)
    #[arg(long = "label", value_parser = parse_key_value)]
    pub labels: Vec<(String, String)>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Tool name
    pub name: String,
    /// Replace labels with these KEY=VALUE pairs (repeatable)
    #[arg(long = "label", value_parser = parse_key_value)]
    pub labels: Vec<(String, String)>,
    /// Replace annotations with these KEY=VALUE pairs (repeatable)
    #[arg(long = "annotation", value_parser = parse_key_value)]
    pub annotations: Vec<(String, String)>,
    /// Replace the spec with one of this type
    #[arg(long = "type")]
    pub tool_type: Option<String>,
    /// Description for the replacement spec
    #[arg(long, requires = "tool_type")]
    pub description: Option<String>,
    /// Input schema for the replacement spec, as JSON text
    #[arg(long, requires = "tool_type")]
    pub input_schema: Option<String>,
    /// Endpoint URL for the replacement spec
    #[arg(long, requires = "tool_type")]
    pub url: Option<String>,
    /// Target agent for the replacement spec
    #[arg(long, requires = "tool_type")]
    pub agent: Option<String>,
}

/// Error for a malformed KEY=VALUE argument
#[derive(Error, Debug, PartialEq)]
pub enum KeyValueError {
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),
    #[error("empty key in '{0}'")]
    EmptyKey(String),
}

/// Parse a `KEY=VALUE` argument; the value may itself contain '='
pub fn parse_key_value(arg: &str) -> Result<(String, String), KeyValueError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| KeyValueError::MissingSeparator(arg.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(KeyValueError::EmptyKey(arg.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

fn into_map(pairs: Vec<(String, String)>) -> Option<BTreeMap<String, String>> {
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.into_iter().collect())
    }
}

impl From<CreateArgs> for NewTool {
    fn from(args: CreateArgs) -> Self {
        NewTool {
            name: args.name,
            spec: ToolSpecInput {
                tool_type: args.tool_type,
                description: args.description,
                input_schema: args.input_schema.map(Into::into),
                url: args.url,
                agent: args.agent,
            },
            annotations: into_map(args.annotations),
            labels: into_map(args.labels),
        }
    }
}

impl UpdateArgs {
    fn into_changes(self) -> (String, ToolUpdate) {
        let spec = self.tool_type.map(|tool_type| ToolSpecInput {
            tool_type,
            description: self.description.unwrap_or_default(),
            input_schema: self.input_schema.map(Into::into),
            url: self.url,
            agent: self.agent,
        });

        let changes = ToolUpdate {
            labels: into_map(self.labels),
            annotations: into_map(self.annotations),
            spec,
        };
        (self.name, changes)
    }
}

impl Cli {
    /// Merge CLI overrides into the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref url) = self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(ref token) = self.token {
            config.api.token = Some(token.clone());
        }
        if let Some(ref namespace) = self.namespace {
            config.api.namespace = namespace.clone();
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute a command against `service` in `namespace`
pub async fn run<C: ApiClient>(
    command: Commands,
    service: &ToolsService<C>,
    namespace: &str,
) -> Result<()> {
    match command {
        Commands::List => {
            let tools = service
                .get_all(namespace)
                .await
                .with_context(|| format!("Failed to list tools in namespace '{}'", namespace))?;
            print_json(&tools)
        }
        Commands::Get { name } => {
            let detail = service
                .get_detail(namespace, &name)
                .await
                .with_context(|| format!("Failed to get tool '{}'", name))?;
            print_json(&detail)
        }
        Commands::Delete { name } => {
            service
                .delete(namespace, &name)
                .await
                .with_context(|| format!("Failed to delete tool '{}'", name))?;
            eprintln!("Tool '{}' deleted from namespace '{}'", name, namespace);
            Ok(())
        }
        Commands::Create(args) => {
            let tool = NewTool::from(args);
            let name = tool.name.clone();
            service
                .create(namespace, tool)
                .await
                .with_context(|| format!("Failed to create tool '{}'", name))?;
            eprintln!("Tool '{}' created in namespace '{}'", name, namespace);
            Ok(())
        }
        Commands::Update(args) => {
            let (name, changes) = args.into_changes();
            let detail = service
                .update(namespace, &name, changes)
                .await
                .with_context(|| format!("Failed to update tool '{}'", name))?;
            print_json(&detail)
        }
    }
}
