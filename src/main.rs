use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

use cidrkit::config::{Config, OutputFormat};
use cidrkit::{aggregate, config_loader, IpAddress};

/// IPv4/IPv6 address calculator: summarize, split and inspect CIDR networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print IPv6 addresses with every group written out
    #[arg(long, global = true)]
    uncompressed: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate networks into the smallest covering set
    Summarize {
        /// Networks to aggregate
        networks: Vec<String>,

        /// Read additional networks from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Split a network into COUNT pieces
    Split { network: String, count: usize },
    /// List every subnet of the given prefix length
    Subnet { network: String, prefix: usize },
    /// Widen a network to the given prefix length
    Supernet { network: String, prefix: usize },
    /// Show network, broadcast, host range and flags for an address
    Info { address: String },
    /// List the reverse DNS zones of a network
    Reverse { address: String },
    /// Run a YAML job file
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything `info` reports about one address
#[derive(Debug, Serialize)]
struct InfoReport {
    address: String,
    family: cidrkit::Family,
    network: String,
    broadcast: String,
    first: String,
    last: String,
    netmask: String,
    size: String,
    private: bool,
    loopback: bool,
    mapped: Option<String>,
}

#[derive(Debug)]
enum Output {
    Lines(Vec<String>),
    Info(Box<InfoReport>),
}

fn parse(text: &str) -> Result<IpAddress> {
    IpAddress::parse(text).wrap_err_with(|| format!("Invalid address '{}'", text))
}

fn render_all(networks: &[IpAddress], format: OutputFormat) -> Vec<String> {
    networks.iter().map(|n| format.render(n)).collect()
}

fn info_report(ip: &IpAddress, format: OutputFormat) -> InfoReport {
    InfoReport {
        address: format.render(ip),
        family: ip.family(),
        network: format.render(&ip.network()),
        broadcast: format.render(&ip.broadcast()),
        first: format.render(&ip.first()),
        last: format.render(&ip.last()),
        netmask: ip.prefix().to_ip_str(),
        size: ip.size().to_string(),
        private: ip.is_private(),
        loopback: ip.is_loopback(),
        mapped: ip.mapped().map(|m| m.to_string()),
    }
}

fn execute(command: &Command, format: OutputFormat, job: Option<&Config>) -> Result<Output> {
    let lines = match command {
        Command::Summarize { networks, file } => {
            let mut parsed = networks.iter().map(|n| parse(n)).collect::<Result<Vec<_>>>()?;
            if let Some(path) = file {
                parsed.extend(config_loader::load_network_list(path)?);
            }
            info!("Summarizing {} networks", parsed.len());
            render_all(&aggregate::summarize(&parsed), format)
        }
        Command::Split { network, count } => render_all(&parse(network)?.split(*count)?, format),
        Command::Subnet { network, prefix } => render_all(&parse(network)?.subnet(*prefix)?, format),
        Command::Supernet { network, prefix } => vec![format.render(&parse(network)?.supernet(*prefix)?)],
        Command::Info { address } => {
            return Ok(Output::Info(Box::new(info_report(&parse(address)?, format))));
        }
        Command::Reverse { address } => parse(address)?.dns_rev_domains(),
        Command::Run { config } => {
            let job = match job {
                Some(job) => job.clone(),
                None => config_loader::load_config(config)?,
            };
            let results = job.apply()?;
            info!("Job produced {} networks", results.len());
            job.render(&results)
        }
    };
    Ok(Output::Lines(lines))
}

fn print(output: &Output, json: bool) -> Result<()> {
    match (output, json) {
        (Output::Lines(lines), true) => println!("{}", serde_json::to_string_pretty(lines)?),
        (Output::Info(report), true) => println!("{}", serde_json::to_string_pretty(report)?),
        (Output::Lines(lines), false) => {
            for line in lines {
                println!("{}", line);
            }
        }
        (Output::Info(report), false) => {
            println!("address:   {}", report.address);
            println!("family:    {}", report.family);
            println!("network:   {}", report.network);
            println!("broadcast: {}", report.broadcast);
            println!("hosts:     {} - {}", report.first, report.last);
            println!("netmask:   {}", report.netmask);
            println!("size:      {}", report.size);
            println!("private:   {}", report.private);
            println!("loopback:  {}", report.loopback);
            if let Some(mapped) = &report.mapped {
                println!("mapped:    {}", mapped);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // A job file may carry its own log level and format
    let job = match &args.command {
        Command::Run { config } => Some(config_loader::load_config(config)?),
        _ => None,
    };

    let level = args
        .log_level
        .clone()
        .or_else(|| job.as_ref().and_then(|j| j.general.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let format = if args.uncompressed {
        OutputFormat::Uncompressed
    } else {
        job.as_ref().map(|j| j.general.format).unwrap_or_default()
    };
    debug!("Command: {:?}, format: {:?}", args.command, format);

    let output = execute(&args.command, format, job.as_ref())?;
    print(&output, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lines(output: Output) -> Vec<String> {
        match output {
            Output::Lines(lines) => lines,
            Output::Info(report) => panic!("expected lines, got {:?}", report),
        }
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["cidrkit", "--json", "split", "10.0.0.0/24", "3"]);
        assert!(args.json);
        match args.command {
            Command::Split { network, count } => {
                assert_eq!(network, "10.0.0.0/24");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from(&["cidrkit", "run", "--config", "job.yaml", "--log-level", "debug"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(args.command, Command::Run { config } if config == PathBuf::from("job.yaml")));
    }

    #[test]
    fn test_summarize_command() {
        let cmd = Command::Summarize {
            networks: vec!["10.0.0.1/24".into(), "10.0.1.1/24".into()],
            file: None,
        };
        let out = lines(execute(&cmd, OutputFormat::Compressed, None).unwrap());
        assert_eq!(out, vec!["10.0.0.0/23"]);
    }

    #[test]
    fn test_summarize_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10.0.2.0/24\n10.0.3.0/24").unwrap();
        let cmd = Command::Summarize {
            networks: vec!["10.0.0.0/23".into()],
            file: Some(file.path().to_path_buf()),
        };
        let out = lines(execute(&cmd, OutputFormat::Compressed, None).unwrap());
        assert_eq!(out, vec!["10.0.0.0/22"]);
    }

    #[test]
    fn test_split_and_reverse_commands() {
        let split = Command::Split { network: "172.16.10.0/24".into(), count: 2 };
        assert_eq!(
            lines(execute(&split, OutputFormat::Compressed, None).unwrap()),
            vec!["172.16.10.0/25", "172.16.10.128/25"]
        );
        let reverse = Command::Reverse { address: "173.17.5.1/23".into() };
        assert_eq!(
            lines(execute(&reverse, OutputFormat::Compressed, None).unwrap()),
            vec!["4.17.173.in-addr.arpa", "5.17.173.in-addr.arpa"]
        );
    }

    #[test]
    fn test_info_command() {
        let cmd = Command::Info { address: "192.168.100.4/30".into() };
        match execute(&cmd, OutputFormat::Compressed, None).unwrap() {
            Output::Info(report) => {
                assert_eq!(report.network, "192.168.100.4/30");
                assert_eq!(report.broadcast, "192.168.100.7/30");
                assert_eq!(report.netmask, "255.255.255.252");
                assert_eq!(report.size, "4");
                assert!(report.private);
            }
            other => panic!("expected info, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_address_reports_error() {
        let cmd = Command::Supernet { network: "300.1.1.1/8".into(), prefix: 4 };
        assert!(execute(&cmd, OutputFormat::Compressed, None).is_err());
    }
}
