//! Basectl CLI Entry Point
//!
//! One-shot commands against a remote base: credential setup, connection
//! checks, table and record administration, and record validation.
//!
//! All output to stdout is a single JSON envelope. Diagnostics go to
//! stderr. The process exits non-zero when the operation fails; a failing
//! validation *report* is still a successful operation.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use basectl::client::BaseClient;
use basectl::config::{self, ConfigLocation, StoredCredentials};
use basectl::error::{BasectlError, Result};
use basectl::output::{ErrorEnvelope, Metadata, SuccessEnvelope};
use basectl::schema::TableSchema;
use basectl::validate::{validate, Rule};

/// Basectl - Bootstrap and administration client for remote bases
#[derive(Parser)]
#[command(name = "basectl")]
#[command(about = "Bootstrap and administration CLI for remote multi-table bases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively store credentials for later runs
    Init {
        /// Save to the per-user global config instead of ./.basectl
        #[arg(long)]
        global: bool,
    },

    /// Exchange credentials for a token and list the base's tables
    Check,

    /// List the base's tables
    Tables,

    /// List a table's field descriptors
    Fields {
        /// Table name
        table: String,
    },

    /// List a table's records
    Records {
        /// Table name
        table: String,
    },

    /// Create a table from a declarative schema file
    CreateTable {
        /// Path to a JSON schema file ({"name": ..., "fields": [...]})
        #[arg(long)]
        schema: PathBuf,
    },

    /// Delete a table by name (no-op when absent)
    DeleteTable {
        /// Table name
        name: String,
    },

    /// Insert one record into a table
    AddRecord {
        /// Table name
        table: String,

        /// Record fields as a JSON object
        #[arg(long)]
        fields: String,
    },

    /// Validate a record against a rule file
    Validate {
        /// Table name
        table: String,

        /// Path to a JSON rule file ([{"field": ..., "kind": ...}, ...])
        #[arg(long)]
        rules: PathBuf,

        /// Record id to validate (default: the table's first record)
        #[arg(long)]
        record: Option<String>,
    },
}

impl Commands {
    /// Command name used in output envelopes
    const fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Check => "check",
            Self::Tables => "tables",
            Self::Fields { .. } => "fields",
            Self::Records { .. } => "records",
            Self::CreateTable { .. } => "create-table",
            Self::DeleteTable { .. } => "delete-table",
            Self::AddRecord { .. } => "add-record",
            Self::Validate { .. } => "validate",
        }
    }
}

/// Outcome of one command: base id, data payload, optional record count
struct Outcome {
    base: String,
    data: Value,
    records: Option<usize>,
}

impl Outcome {
    fn new(base: impl Into<String>, data: Value) -> Self {
        Self { base: base.into(), data, records: None }
    }

    fn with_records(base: impl Into<String>, data: Value, records: usize) -> Self {
        Self { base: base.into(), data, records: Some(records) }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.name();
    let start = Instant::now();

    match run(cli.command).await {
        Ok(outcome) => {
            let elapsed = start.elapsed().as_millis() as u64;
            let meta = match outcome.records {
                Some(count) => Metadata::with_records(elapsed, count),
                None => Metadata::new(elapsed),
            };
            let envelope = SuccessEnvelope::new(outcome.base, command, outcome.data, meta);
            println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
        }
        Err(err) => {
            // Credentials may never have resolved; the base is then unknown.
            let base = config::load_credentials().map(|c| c.base_id).unwrap_or_default();
            let envelope = ErrorEnvelope::from_error(base, command, &err);
            println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands) -> Result<Outcome> {
    match command {
        Commands::Init { global } => init(global),
        command => {
            let credentials = config::load_credentials()?;
            let client = BaseClient::new(credentials);
            execute(&client, command).await
        }
    }
}

async fn execute(client: &BaseClient, command: Commands) -> Result<Outcome> {
    let base = client.base_id().to_string();

    match command {
        // Handled in run() before a client exists.
        Commands::Init { .. } => unreachable!("init never reaches execute"),

        Commands::Check => {
            let tables = client.list_tables().await?;
            let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
            let count = tables.len();
            Ok(Outcome::with_records(
                base,
                json!({"authenticated": true, "tables": names}),
                count,
            ))
        }

        Commands::Tables => {
            let tables = client.list_tables().await?;
            let count = tables.len();
            Ok(Outcome::with_records(base, json!({"items": tables}), count))
        }

        Commands::Fields { table } => {
            let table_id = client.table_id_by_name(&table).await?;
            let fields = client.fields(&table_id).await?;
            let count = fields.len();
            Ok(Outcome::with_records(
                base,
                json!({"table_id": table_id, "items": fields}),
                count,
            ))
        }

        Commands::Records { table } => {
            let table_id = client.table_id_by_name(&table).await?;
            let records = client.list_records(&table_id).await?;
            let count = records.len();
            Ok(Outcome::with_records(
                base,
                json!({"table_id": table_id, "items": records}),
                count,
            ))
        }

        Commands::CreateTable { schema } => {
            let schema = read_schema_file(&schema)?;
            let table_id = client.create_table(&schema).await?;
            Ok(Outcome::new(base, json!({"table_id": table_id, "name": schema.name})))
        }

        Commands::DeleteTable { name } => {
            let deleted = client.delete_table(&name).await?;
            Ok(Outcome::new(base, json!({"name": name, "deleted": deleted})))
        }

        Commands::AddRecord { table, fields } => {
            let fields = parse_fields(&fields)?;
            let table_id = client.table_id_by_name(&table).await?;
            let record = client.create_record(&table_id, fields).await?;
            Ok(Outcome::new(base, json!({"table_id": table_id, "record": record})))
        }

        Commands::Validate { table, rules, record } => {
            let rules = read_rules_file(&rules)?;
            let table_id = client.table_id_by_name(&table).await?;
            let records = client.list_records(&table_id).await?;

            let target = match &record {
                Some(record_id) => records
                    .iter()
                    .find(|r| &r.record_id == record_id)
                    .ok_or_else(|| {
                        BasectlError::not_found(format!(
                            "record '{record_id}' not found in table '{table}'"
                        ))
                    })?,
                None => records.first().ok_or_else(|| {
                    BasectlError::not_found(format!("table '{table}' has no records"))
                })?,
            };

            let report = validate(&target.fields, &rules);
            Ok(Outcome::new(
                base,
                json!({"record_id": target.record_id.clone(), "report": report}),
            ))
        }
    }
}

/// Prompt for credentials and store them
fn init(global: bool) -> Result<Outcome> {
    use dialoguer::{Input, Password};

    let app_id: String = Input::new()
        .with_prompt("Application id")
        .interact_text()
        .map_err(|e| BasectlError::config(format!("Prompt failed: {e}")))?;

    let app_secret: String = Password::new()
        .with_prompt("Application secret")
        .interact()
        .map_err(|e| BasectlError::config(format!("Prompt failed: {e}")))?;

    let base_id: String = Input::new()
        .with_prompt("Base id")
        .interact_text()
        .map_err(|e| BasectlError::config(format!("Prompt failed: {e}")))?;

    let stored = StoredCredentials::direct(app_id, app_secret, base_id.clone());
    let location = if global { ConfigLocation::Global } else { ConfigLocation::Local };
    let path = config::save_credentials(&stored, location)?;

    Ok(Outcome::new(base_id, json!({"saved": path.display().to_string()})))
}

fn read_schema_file(path: &PathBuf) -> Result<TableSchema> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BasectlError::invalid_input(format!("Could not read schema file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        BasectlError::invalid_input(format!("Invalid schema file {}: {e}", path.display()))
    })
}

fn read_rules_file(path: &PathBuf) -> Result<Vec<Rule>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BasectlError::invalid_input(format!("Could not read rule file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        BasectlError::invalid_input(format!("Invalid rule file {}: {e}", path.display()))
    })
}

fn parse_fields(raw: &str) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| BasectlError::invalid_input(format!("--fields is not valid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(BasectlError::invalid_input("--fields must be a JSON object")),
    }
}
