mod files;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::debug;

use pscale_client::ClientConfig;
use pscale_client::config::{ENV_ENDPOINT, ENV_INSECURE, ENV_PASSWORD, ENV_TIMEOUT, ENV_USERNAME};
use pscale_core::diagnostics::{Diagnostics, Severity};
use pscale_core::provider::Provider;
use pscale_core::resource::State;
use pscale_core::schema::ResourceSchema;
use pscale_provider::PowerScaleProvider;
use pscale_provider::schemas;

#[derive(Parser)]
#[command(name = "pscale")]
#[command(about = "Manage PowerScale resources from JSON configuration", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings; each flag overrides its POWERSCALE_* variable
#[derive(Args, Default)]
struct ConnectionArgs {
    /// Cluster URL, e.g. https://10.0.0.1:8080
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[arg(long, global = true)]
    username: Option<String>,

    #[arg(long, global = true)]
    password: Option<String>,

    /// Accept self-signed certificates
    #[arg(long, global = true)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the attribute schema of a resource or data source type
    Schema {
        /// Type name; all types are listed when omitted
        resource_type: Option<String>,

        /// Look the type up among data sources
        #[arg(long)]
        data_source: bool,
    },
    /// Validate a configuration file without contacting the cluster
    Validate {
        file: PathBuf,

        #[arg(long)]
        data_source: bool,
    },
    /// Create the resource described by a configuration file
    Create {
        file: PathBuf,

        /// Where to write the resulting state
        #[arg(long, default_value = "state.json")]
        state: PathBuf,
    },
    /// Refresh a state file from the cluster
    Read {
        #[arg(long, default_value = "state.json")]
        state: PathBuf,
    },
    /// Bring an existing resource in line with a configuration file
    Update {
        file: PathBuf,

        #[arg(long, default_value = "state.json")]
        state: PathBuf,
    },
    /// Delete the resource recorded in a state file
    Delete {
        #[arg(long, default_value = "state.json")]
        state: PathBuf,
    },
    /// Read a data source and print the result
    Data { file: PathBuf },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Schema {
            resource_type,
            data_source,
        } => run_schema(resource_type.as_deref(), data_source),
        Commands::Validate { file, data_source } => run_validate(&file, data_source),
        Commands::Create { file, state } => run_create(&cli.connection, &file, &state).await,
        Commands::Read { state } => run_read(&cli.connection, &state).await,
        Commands::Update { file, state } => run_update(&cli.connection, &file, &state).await,
        Commands::Delete { state } => run_delete(&cli.connection, &state).await,
        Commands::Data { file } => run_data(&cli.connection, &file).await,
    };

    if let Err(diagnostics) = result {
        print_diagnostics(&diagnostics);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Diagnostics>;

fn message(summary: impl Into<String>) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_error(summary, "");
    diagnostics
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for d in diagnostics.iter() {
        let label = match d.severity {
            Severity::Error => "Error:".red().bold(),
            Severity::Warning => "Warning:".yellow().bold(),
        };
        eprintln!("{} {}", label, d.summary.bold());
        if let Some(id) = &d.resource {
            eprintln!("  with {}", id.to_string().cyan());
        }
        if !d.detail.is_empty() {
            eprintln!();
            eprintln!("{}", d.detail);
        }
        eprintln!();
    }
}

/// Connection settings from the environment, with flags taking precedence
fn client_config<F>(args: &ConnectionArgs, env: F) -> Result<ClientConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides: HashMap<&str, String> = HashMap::new();
    if let Some(endpoint) = &args.endpoint {
        overrides.insert(ENV_ENDPOINT, endpoint.clone());
    }
    if let Some(username) = &args.username {
        overrides.insert(ENV_USERNAME, username.clone());
    }
    if let Some(password) = &args.password {
        overrides.insert(ENV_PASSWORD, password.clone());
    }
    if args.insecure {
        overrides.insert(ENV_INSECURE, "true".to_string());
    }
    if let Some(timeout) = args.timeout {
        overrides.insert(ENV_TIMEOUT, timeout.to_string());
    }

    ClientConfig::from_lookup(|key| overrides.get(key).cloned().or_else(|| env(key)))
        .map_err(|e| e.to_string())
}

fn build_provider(args: &ConnectionArgs) -> Result<PowerScaleProvider, Diagnostics> {
    let config = client_config(args, |key| std::env::var(key).ok()).map_err(|e| {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("Unable to create powerscale client", e);
        diagnostics
    })?;
    debug!("Connecting with {:?}", config);
    PowerScaleProvider::from_config(&config).map_err(Diagnostics::from)
}

fn find_schema(resource_type: &str, data_source: bool) -> Option<ResourceSchema> {
    let all = if data_source {
        schemas::data_source_schemas()
    } else {
        schemas::resource_schemas()
    };
    all.into_iter().find(|s| s.resource_type == resource_type)
}

fn run_schema(resource_type: Option<&str>, data_source: bool) -> CliResult {
    let Some(resource_type) = resource_type else {
        println!("{}", "Resources:".cyan().bold());
        for schema in schemas::resource_schemas() {
            println!("  • {}", schema.resource_type);
        }
        println!("{}", "Data sources:".cyan().bold());
        for schema in schemas::data_source_schemas() {
            println!("  • {}", schema.resource_type);
        }
        return Ok(());
    };

    let schema = find_schema(resource_type, data_source)
        .ok_or_else(|| message(format!("Unknown type: {}", resource_type)))?;

    println!("{}", schema.resource_type.cyan().bold());
    if let Some(description) = &schema.description {
        println!("{}", description);
    }
    println!();
    for attr in schema.sorted_attributes() {
        println!("  {} ({})", attr.name.bold(), attr.mode_label().dimmed());
        if let Some(description) = &attr.description {
            println!("      {}", description);
        }
    }
    Ok(())
}

fn run_validate(file: &Path, data_source: bool) -> CliResult {
    let mut resource = files::load_resource(file, data_source).map_err(message)?;
    let schema = find_schema(&resource.id.resource_type, data_source).ok_or_else(|| {
        message(format!("Unknown type: {}", resource.id.resource_type))
    })?;

    println!("{}", "Validating...".cyan());
    schema.apply_defaults(&mut resource.attributes);
    if let Err(errors) = schema.validate(&resource.attributes) {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_validation_errors(&resource.id, &errors);
        return Err(diagnostics);
    }

    println!(
        "{}",
        format!("✓ {} validated successfully.", resource.id)
            .green()
            .bold()
    );
    Ok(())
}

fn print_state(state: &State) {
    let json = files::state_to_json(state);
    match serde_json::to_string_pretty(&json) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", json),
    }
}

async fn run_create(args: &ConnectionArgs, file: &Path, state_path: &Path) -> CliResult {
    let resource = files::load_resource(file, false).map_err(message)?;
    let provider = build_provider(args)?;

    let state = provider.create(&resource).await.map_err(Diagnostics::from)?;
    files::save_state(state_path, &state).map_err(message)?;

    println!("  {} {}", "+".green().bold(), resource.id);
    print_state(&state);
    Ok(())
}

async fn run_read(args: &ConnectionArgs, state_path: &Path) -> CliResult {
    let prior = files::load_state(state_path).map_err(message)?;
    let provider = build_provider(args)?;

    let state = provider.read(&prior).await.map_err(Diagnostics::from)?;
    if !state.exists {
        println!(
            "{}",
            format!("{} no longer exists.", prior.id).yellow()
        );
        return Ok(());
    }
    files::save_state(state_path, &state).map_err(message)?;
    print_state(&state);
    Ok(())
}

async fn run_update(args: &ConnectionArgs, file: &Path, state_path: &Path) -> CliResult {
    let resource = files::load_resource(file, false).map_err(message)?;
    let prior = files::load_state(state_path).map_err(message)?;
    let provider = build_provider(args)?;

    let state = provider
        .update(&prior, &resource)
        .await
        .map_err(Diagnostics::from)?;
    files::save_state(state_path, &state).map_err(message)?;

    println!("  {} {}", "~".yellow().bold(), resource.id);
    print_state(&state);
    Ok(())
}

async fn run_delete(args: &ConnectionArgs, state_path: &Path) -> CliResult {
    let state = files::load_state(state_path).map_err(message)?;
    let provider = build_provider(args)?;

    provider.delete(&state).await.map_err(Diagnostics::from)?;
    std::fs::remove_file(state_path)
        .map_err(|e| message(format!("Failed to remove {}: {}", state_path.display(), e)))?;

    println!("  {} {}", "-".red().bold(), state.id);
    Ok(())
}

async fn run_data(args: &ConnectionArgs, file: &Path) -> CliResult {
    let config = files::load_resource(file, true).map_err(message)?;
    let provider = build_provider(args)?;

    let state = provider
        .read_data_source(&config)
        .await
        .map_err(Diagnostics::from)?;
    print_state(&state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn config_comes_from_environment() {
        let config = client_config(
            &ConnectionArgs::default(),
            env(&[
                (ENV_ENDPOINT, "https://10.0.0.1:8080"),
                (ENV_USERNAME, "admin"),
                (ENV_PASSWORD, "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://10.0.0.1:8080");
        assert!(!config.insecure);
        assert_eq!(
            config.timeout,
            Duration::from_secs(ClientConfig::DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn flags_override_environment() {
        let args = ConnectionArgs {
            endpoint: Some("https://cluster:8080".to_string()),
            insecure: true,
            timeout: Some(30),
            ..Default::default()
        };
        let config = client_config(
            &args,
            env(&[
                (ENV_ENDPOINT, "https://10.0.0.1:8080"),
                (ENV_USERNAME, "admin"),
                (ENV_PASSWORD, "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://cluster:8080");
        assert!(config.insecure);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_credentials_are_reported() {
        let err = client_config(&ConnectionArgs::default(), env(&[])).unwrap_err();
        assert!(err.contains(ENV_ENDPOINT));
    }

    #[test]
    fn validate_reports_every_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("share.json");
        std::fs::write(
            &path,
            r#"{"type":"smb_share","name":"s","attributes":{"zone":"System","ca_timeout":-1}}"#,
        )
        .unwrap();

        let diagnostics = run_validate(&path, false).unwrap_err();
        assert!(diagnostics.has_error());
        assert!(diagnostics.len() >= 2);
    }

    #[test]
    fn validate_accepts_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fs.json");
        std::fs::write(
            &path,
            r#"{"type":"filesystem","name":"home","attributes":{
                "name":"home",
                "owner":{"id":"UID:0","name":"root","type":"user"},
                "group":{"id":"GID:0","name":"wheel","type":"group"}}}"#,
        )
        .unwrap();

        assert!(run_validate(&path, false).is_ok());
    }

    #[test]
    fn unknown_schema_type_is_rejected() {
        assert!(run_schema(Some("quota"), false).is_err());
        assert!(run_schema(Some("groupnet"), true).is_ok());
    }
}
