use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use leetcode_mcp::config::{find_config_file, get_config, load_config, Site};
use leetcode_mcp::mcp::{McpServer, Services, ToolRegistry};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LeetCode MCP - LeetCode problems and a personal knowledge graph as MCP tools
#[derive(Parser, Debug)]
#[command(name = "leetcode-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for LeetCode problems and a Neo4j-backed knowledge store", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// LeetCode site to query (overrides LEETCODE_SITE)
    #[arg(long, value_enum, global = true)]
    site: Option<SiteArg>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// LeetCode deployments
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SiteArg {
    /// leetcode.com
    Global,
    /// leetcode.cn
    Cn,
}

impl From<SiteArg> for Site {
    fn from(site: SiteArg) -> Self {
        match site {
            SiteArg::Global => Site::Global,
            SiteArg::Cn => Site::Cn,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server (default when no command is given)
    #[command(alias = "run")]
    Serve {
        /// Serve over stdin/stdout instead of HTTP
        #[arg(long)]
        stdio: bool,

        /// Port for HTTP mode (default: PORT or 8000)
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to for HTTP mode
        #[arg(long)]
        host: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            stdio: false,
            port: None,
            host: None,
        }
    }
}

/// Print all available environment variables
fn print_env_vars() {
    println!("LeetCode MCP - Environment Variables");
    println!();
    println!("Server:");
    println!("  PORT                        HTTP listening port (default: 8000)");
    println!("  ENVIRONMENT                 Environment label reported by get_server_info (default: development)");
    println!();
    println!("LeetCode:");
    println!("  LEETCODE_SITE               'global' (leetcode.com) or 'cn' (leetcode.cn) (default: global)");
    println!("  LEETCODE_SESSION            Session cookie sent with every GraphQL request");
    println!("  LEETCODE_CSRF_TOKEN         CSRF token paired with the session cookie");
    println!("  LEETCODE_GRAPHQL_URL        GraphQL endpoint override (default: the site's /graphql/)");
    println!();
    println!("Knowledge Store (enabled only when both OPENAI_API_KEY and NEO4J_PASSWORD are set):");
    println!("  OPENAI_API_KEY              Completion service API key");
    println!("  OPENAI_BASE_URL             Completion service base URL (default: https://api.openai.com/v1)");
    println!("  MODEL_NAME                  Completion model (default: gpt-4o-mini)");
    println!("  NEO4J_URI                   Graph database URI (default: bolt://localhost:7687)");
    println!("  NEO4J_USER                  Graph database user (default: neo4j)");
    println!("  NEO4J_PASSWORD              Graph database password");
    println!();
    println!("Config File Overrides:");
    println!("  LEETCODE_MCP__<SECTION>__<KEY>  Override a config file value (e.g. LEETCODE_MCP__SERVER__PORT)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    std::process::exit(0);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    // stdout belongs to the MCP protocol in stdio mode
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("leetcode_mcp={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    if let Some(site) = cli.site {
        config.leetcode.site = site.into();
    }

    match cli.command.unwrap_or_default() {
        Commands::Serve { stdio, port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            tracing::info!("LeetCode site: {}", config.leetcode.site);
            let services = Services::connect(&config).await?;
            let leetcode = services.leetcode.clone();
            let registry = ToolRegistry::new(services);
            let server = McpServer::new(&registry, leetcode)?;

            if stdio {
                server.run().await?;
            } else {
                let addr = format!("{}:{}", config.server.host, config.server.port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                // Wait for the server to finish
                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["leetcode-mcp"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.site.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["leetcode-mcp", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_site_flag() {
        let cli = Cli::parse_from(["leetcode-mcp", "--site", "cn"]);
        assert_eq!(cli.site, Some(SiteArg::Cn));
        assert_eq!(Site::from(SiteArg::Cn), Site::Cn);
    }

    #[test]
    fn test_cli_invalid_site() {
        assert!(Cli::try_parse_from(["leetcode-mcp", "--site", "mars"]).is_err());
    }

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::parse_from(["leetcode-mcp", "serve", "--port", "9000"]);
        match cli.command {
            Some(Commands::Serve { stdio, port, host }) => {
                assert!(!stdio);
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_run_alias_stdio() {
        let cli = Cli::parse_from(["leetcode-mcp", "run", "--stdio"]);
        assert!(matches!(cli.command, Some(Commands::Serve { stdio: true, .. })));
    }

    #[test]
    fn test_default_command_is_http_serve() {
        assert!(matches!(
            Commands::default(),
            Commands::Serve {
                stdio: false,
                port: None,
                host: None
            }
        ));
    }
}
