use std::sync::atomic::{AtomicU64, Ordering};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{method} failed with {code}: {message}")]
    Rpc { method: String, code: String, message: String },
    #[error("invalid JSON argument: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ds-mcp", about = "Design system MCP server debug client")]
struct Cli {
    #[arg(long, env = "MCP_BASE_URL", default_value = "http://127.0.0.1:13316")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET /healthz
    Health,
    /// POST /reload
    Reload,
    /// GET /mcp
    Probe,
    /// List the tool catalog.
    Tools,
    /// Invoke a tool through `tools/call`.
    Call {
        tool: String,
        #[arg(long, help = "Tool arguments as a JSON object")]
        args: Option<String>,
    },
    /// Send an arbitrary JSON-RPC method.
    Rpc {
        method: String,
        #[arg(long, help = "Method params as JSON")]
        params: Option<String>,
    },
    /// Health, tool catalog and component list, in order.
    Smoke,
}

struct Client {
    http: reqwest::Client,
    base_url: String,
    next_id: AtomicU64,
}

impl Client {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            next_id: AtomicU64::new(1),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<Value, CliError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_body(response).await
    }

    async fn post(&self, path: &str) -> Result<Value, CliError> {
        let response = self.http.post(self.url(path)).send().await?;
        read_body(response).await
    }

    async fn rpc(&self, method: &str, params: Option<Value>) -> Result<Value, CliError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut body = json!({ "jsonrpc": "2.0", "id": id, "method": method });
        if let Some(params) = params {
            body["params"] = params;
        }

        let response = self.http.post(self.url("/mcp")).json(&body).send().await?;
        let status = response.status();
        let value = response.json::<Value>().await.unwrap_or(Value::Null);

        if let Some(err) = rpc_error(method, &value) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(CliError::Status { status: status.as_u16(), body: value.to_string() });
        }
        Ok(value)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = Client::new(&cli.base_url);

    match cli.command {
        Command::Health => print_json(&client.get("/healthz").await?),
        Command::Reload => print_json(&client.post("/reload").await?),
        Command::Probe => print_json(&client.get("/mcp").await?),
        Command::Tools => print_json(&client.rpc("tools/list", None).await?),
        Command::Call { tool, args } => {
            let params = call_params(&tool, args.as_deref())?;
            print_json(&client.rpc("tools/call", Some(params)).await?)
        }
        Command::Rpc { method, params } => {
            let params = params.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            print_json(&client.rpc(&method, params).await?)
        }
        Command::Smoke => run_smoke(&client).await,
    }
}

async fn run_smoke(client: &Client) -> Result<(), CliError> {
    let health = client.get("/healthz").await?;
    println!(
        "health: {} components, {} stories, source {}",
        health["componentsCount"], health["loadedStories"], health["source"]
    );

    let tools = client.rpc("tools/list", None).await?;
    let names: Vec<&str> = tools["result"]["tools"]
        .as_array()
        .map(|tools| tools.iter().filter_map(|t| t["name"].as_str()).collect())
        .unwrap_or_default();
    println!("tools: {}", names.join(", "));

    let listed = client.rpc("tools/call", Some(call_params("list-all-components", None)?)).await?;
    print_json(&listed["result"])
}

async fn read_body(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), body: value.to_string() });
    }
    Ok(value)
}

fn call_params(tool: &str, args: Option<&str>) -> Result<Value, CliError> {
    let arguments = match args {
        Some(raw) => serde_json::from_str::<Value>(raw)?,
        None => json!({}),
    };
    Ok(json!({ "name": tool, "arguments": arguments }))
}

fn rpc_error(method: &str, body: &Value) -> Option<CliError> {
    let error = body.get("error")?;
    Some(CliError::Rpc {
        method: method.to_owned(),
        code: error["code"].as_str().unwrap_or("UNKNOWN").to_owned(),
        message: error["message"].as_str().unwrap_or_default().to_owned(),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
