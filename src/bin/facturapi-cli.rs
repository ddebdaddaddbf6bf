use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use facturapi::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, Facturapi, ListParams};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "facturapi-cli",
    version,
    about = "Small CLI for querying the Facturapi API"
)]
struct Cli {
    /// Secret API key, sent as the HTTP basic auth user.
    #[arg(long, env = "FACTURAPI_KEY", hide_env_values = true)]
    api_key: String,

    /// API version path segment.
    #[arg(long, env = "FACTURAPI_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Base URL for the API.
    #[arg(long, env = "FACTURAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the service is up.
    Check,
    /// Look a tax ID (RFC) up in the SAT's EFOS list.
    ValidateTaxId {
        tax_id: String,
    },
    /// Customer operations.
    #[command(subcommand)]
    Customers(CustomersCommand),
    /// Send a raw request through the dispatcher.
    Request(RequestArgs),
}

#[derive(Debug, Subcommand)]
enum CustomersCommand {
    /// List customers, optionally filtered by a search term.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Retrieve one customer by id.
    Get { id: String },
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// HTTP method (GET, POST, PUT or DELETE).
    method: String,

    /// Resource endpoint (for example: customers).
    resource: String,

    /// Path segments appended after the resource (for example: an id).
    segments: Vec<String>,

    /// Query parameter as NAME=VALUE, e.g. `--query q=XAXX010101000`.
    #[arg(long = "query", value_name = "NAME=VALUE", value_parser = query_pair)]
    query: Vec<(String, String)>,

    #[command(flatten)]
    body: BodyInput,
}

#[derive(Debug, Args)]
struct BodyInput {
    /// JSON request body literal.
    #[arg(long, conflicts_with = "body_file")]
    body_json: Option<String>,

    /// Path to a file containing a JSON request body.
    #[arg(long, value_name = "PATH", conflicts_with = "body_json")]
    body_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = Facturapi::new(cli.api_key.clone())
        .context("failed to create HTTP client")?
        .with_api_version(cli.api_version.clone())
        .with_base_url(&cli.base_url)
        .with_context(|| format!("invalid base URL '{}'", cli.base_url))?;

    let output = match &cli.command {
        Command::Check => {
            let ok = client.check_status().context("health check failed")?;
            json!({ "ok": ok })
        }
        Command::ValidateTaxId { tax_id } => to_json(
            &client
                .tools()
                .validate_tax_id(tax_id)
                .with_context(|| format!("tax ID validation failed for '{tax_id}'"))?,
        )?,
        Command::Customers(command) => customers(&client, command)?,
        Command::Request(args) => send_request(&client, args)
            .with_context(|| format!("request failed: {} {}", args.method, args.resource))?,
    };

    print_json(&output, cli.compact).context("failed to print JSON output")?;
    Ok(())
}

fn customers(client: &Facturapi, command: &CustomersCommand) -> Result<Value> {
    match command {
        CustomersCommand::List {
            search,
            page,
            limit,
        } => {
            let params = ListParams {
                search: search.clone(),
                page: *page,
                limit: *limit,
                ..ListParams::default()
            };
            let list = client
                .customers()
                .all(&params)
                .context("failed to list customers")?;
            to_json(&list)
        }
        CustomersCommand::Get { id } => {
            let customer = client
                .customers()
                .retrieve(id)
                .with_context(|| format!("failed to retrieve customer '{id}'"))?;
            to_json(&customer)
        }
    }
}

/// Sends a raw request and reports the status next to the body.
///
/// The body is shown as JSON when it parses, as text otherwise.
fn send_request(client: &Facturapi, args: &RequestArgs) -> Result<Value> {
    let method = Method::from_str(&args.method.to_ascii_uppercase())
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;
    let body = args.body.load()?;

    let segments: Vec<&str> = args.segments.iter().map(String::as_str).collect();
    let query: Vec<(&str, String)> = args
        .query
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();

    let dispatcher = client.dispatcher();
    let url = dispatcher.build_url(&args.resource, &segments)?;
    let response = dispatcher.execute(method, url, &query, body.as_ref())?;

    let payload = response
        .json::<Value>()
        .unwrap_or_else(|_| Value::String(response.text()));
    Ok(json!({ "status": response.status().as_u16(), "body": payload }))
}

/// Clap value parser for `--query NAME=VALUE`.
fn query_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        Some(_) => Err("parameter name is empty".to_owned()),
        None => Err(format!("'{raw}' is not NAME=VALUE")),
    }
}

impl BodyInput {
    /// Request payload from `--body-json` or `--body-file`; clap already
    /// rejects passing both.
    fn load(&self) -> Result<Option<Value>> {
        if let Some(raw) = &self.body_json {
            return serde_json::from_str(raw)
                .map(Some)
                .context("--body-json is not valid JSON");
        }
        let Some(path) = &self.body_file else {
            return Ok(None);
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&raw)
            .map(Some)
            .with_context(|| format!("{} is not valid JSON", path.display()))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("failed to render response as JSON")
}

fn print_json(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    println!("{}", rendered.context("failed to render JSON output")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::query_pair;

    #[test]
    fn query_pair_splits_on_first_equals() {
        assert_eq!(
            query_pair("q=a=b").expect("valid pair"),
            ("q".to_owned(), "a=b".to_owned())
        );
        assert_eq!(
            query_pair("page=").expect("empty value is allowed"),
            ("page".to_owned(), String::new())
        );
    }

    #[test]
    fn query_pair_rejects_missing_name_or_separator() {
        assert!(query_pair("=1").is_err());
        assert!(query_pair("limit").is_err());
    }
}
