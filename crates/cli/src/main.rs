use clap::{Parser, Subcommand};
use ferrous_mx_domain::{CliOverrides, RecordType};
use std::net::Ipv4Addr;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-mx")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous MX - DNS stub resolver for mail host lookup")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Name server as host or host:port (repeatable, replaces the configured list)
    #[arg(short = 's', long = "server", value_name = "HOST[:PORT]")]
    servers: Vec<String>,

    /// Timeout of the first attempt in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Attempts after the first
    #[arg(short = 'r', long)]
    retries: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the mail hosts of a domain, in delivery order
    Mx { domain: String },

    /// Send a single query and print the decoded response
    Lookup {
        name: String,

        #[arg(long = "type", value_name = "TYPE", default_value = "A")]
        record_type: RecordType,
    },

    /// Reverse-resolve an IPv4 address
    Ptr { ip: Ipv4Addr },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        name_servers: (!cli.servers.is_empty()).then(|| cli.servers.clone()),
        timeout_secs: cli.timeout,
        retries: cli.retries,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous MX v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let use_cases = di::UseCases::new(&config, &dns_services);

    let outcome = match cli.command {
        Command::Mx { domain } => commands::run_mx(&use_cases.resolve_mail_hosts, &domain),
        Command::Lookup { name, record_type } => {
            commands::run_lookup(dns_services.resolver.as_ref(), &name, record_type)
        }
        Command::Ptr { ip } => commands::run_ptr(&use_cases.reverse_lookup, ip),
    };

    dns_services.log_stats();
    outcome
}
