use clap::{Parser, ValueEnum};
use pingo_core::{defaults, Identifier, Network, Protocol};
use std::str::FromStr;
use std::time::Duration;

/// The default value for `log-format`.
const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Pretty;

/// The default value for `log-span-events`.
const DEFAULT_LOG_SPAN_EVENTS: LogSpanEvents = LogSpanEvents::Off;

/// The default value for `log-filter`.
const DEFAULT_LOG_FILTER: &str = "pingo=debug";

/// Measure the round trip time of a single ICMP echo
#[derive(Parser, Debug)]
#[command(name = "pingo", author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Args {
    /// The hostname or IP to send the echo request to
    pub host: String,

    /// The transport mode, one of udp4, ip4:icmp, udp6 or ip6:ipv6-icmp [default: udp4]
    #[arg(short = 'n', long, value_parser = parse_network)]
    pub network: Option<Network>,

    /// The protocol used to choose the address and parse replies, icmp (1) or ipv6-icmp (58)
    /// [default: matches the network]
    #[arg(short = 'p', long, value_parser = parse_protocol)]
    pub protocol: Option<Protocol>,

    /// The time to wait for each reply [default: 1s]
    #[arg(short = 't', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// The sequence discriminator, the sequence number sent is 2^seq [default: 0]
    #[arg(short = 's', long)]
    pub seq: Option<u32>,

    /// The echo payload [default: empty]
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// The echo identifier [default: the process id]
    #[arg(long)]
    pub identifier: Option<u16>,

    /// The debug log format [default: pretty]
    #[arg(value_enum, long)]
    pub log_format: Option<LogFormat>,

    /// The debug log filter [default: pingo=debug]
    #[arg(long)]
    pub log_filter: Option<String>,

    /// The debug log span events [default: off]
    #[arg(value_enum, long)]
    pub log_span_events: Option<LogSpanEvents>,

    /// Enable verbose debug logging
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

/// How to format log data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Display log data in a compact format.
    Compact,
    /// Display log data in a pretty format.
    Pretty,
    /// Display log data in a json format.
    Json,
}

/// How to log event spans.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogSpanEvents {
    /// Do not display event spans.
    Off,
    /// Display enter and exit event spans.
    Active,
    /// Display all event spans.
    Full,
}

/// Fully parsed and validated configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PingoConfig {
    pub host: String,
    pub network: Network,
    pub protocol: Option<Protocol>,
    pub timeout: Duration,
    pub sequence_discriminator: u32,
    pub identifier: Option<Identifier>,
    pub payload: Vec<u8>,
    pub verbose: bool,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub log_span_events: LogSpanEvents,
}

impl From<Args> for PingoConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            network: args.network.unwrap_or(defaults::DEFAULT_NETWORK),
            protocol: args.protocol,
            timeout: args.timeout.unwrap_or(defaults::DEFAULT_TIMEOUT),
            sequence_discriminator: args
                .seq
                .unwrap_or(defaults::DEFAULT_SEQUENCE_DISCRIMINATOR),
            identifier: args.identifier.map(Identifier),
            payload: args.message.map(String::into_bytes).unwrap_or_default(),
            verbose: args.verbose,
            log_format: args.log_format.unwrap_or(DEFAULT_LOG_FORMAT),
            log_filter: args
                .log_filter
                .unwrap_or_else(|| String::from(DEFAULT_LOG_FILTER)),
            log_span_events: args.log_span_events.unwrap_or(DEFAULT_LOG_SPAN_EVENTS),
        }
    }
}

fn parse_network(value: &str) -> anyhow::Result<Network> {
    Ok(Network::from_str(value)?)
}

fn parse_protocol(value: &str) -> anyhow::Result<Protocol> {
    match value {
        "icmp" => Ok(Protocol::Icmp),
        "ipv6-icmp" => Ok(Protocol::IcmpV6),
        number => Ok(Protocol::try_from(u8::from_str(number)?)?),
    }
}

fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    Ok(humantime::parse_duration(value)?)
}
