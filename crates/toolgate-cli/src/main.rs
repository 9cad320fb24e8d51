use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod call_cmd;
mod rpc;

#[derive(Parser)]
#[command(name = "toolgate", about = "Toolgate CLI - call MCP tools over Streamable HTTP")]
struct Cli {
    /// Toolgate server URL
    #[arg(long, env = "TOOLGATE_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools the server exposes
    ListTools,

    /// Call a tool and print its text output
    Call {
        /// Tool name
        tool: String,

        /// Tool argument as key=value (repeatable)
        #[arg(long = "arg", value_parser = call_cmd::parse_key_val)]
        args: Vec<(String, String)>,

        /// Tool arguments as a JSON object; --arg values override its keys
        #[arg(long)]
        args_json: Option<String>,

        /// Send arguments directly in params instead of under "arguments"
        #[arg(long)]
        flat: bool,

        /// Read the response as an event stream (server must run in sse mode)
        #[arg(long)]
        stream: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListTools => {
            let resp = rpc::post(&cli.url, &rpc::request("tools/list", serde_json::json!({})))
                .await?;
            let result = rpc::into_result(resp)?;

            for tool in result["tools"].as_array().into_iter().flatten() {
                println!(
                    "{:<20} {}",
                    tool["name"].as_str().unwrap_or_default(),
                    tool["description"].as_str().unwrap_or_default()
                );
            }
        }
        Commands::Call {
            tool,
            args,
            args_json,
            flat,
            stream,
        } => {
            let options = call_cmd::CallOptions { flat, stream };
            call_cmd::run(&cli.url, &tool, args_json.as_deref(), args, options).await?;
        }
    }

    Ok(())
}
