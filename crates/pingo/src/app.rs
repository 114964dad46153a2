use crate::config::{LogFormat, LogSpanEvents, PingoConfig};
use anyhow::Context;
use pingo_core::Builder;
use tracing_subscriber::fmt::format::FmtSpan;

/// Run the echo probe and print the round trip time.
pub fn run_pingo(cfg: &PingoConfig) -> anyhow::Result<()> {
    configure_logging(cfg);
    let mut builder = Builder::new(cfg.network, cfg.host.as_str())
        .timeout(cfg.timeout)
        .sequence_discriminator(cfg.sequence_discriminator)
        .payload(cfg.payload.as_slice());
    if let Some(protocol) = cfg.protocol {
        builder = builder.protocol(protocol);
    }
    if let Some(identifier) = cfg.identifier {
        builder = builder.identifier(identifier);
    }
    let prober = builder.build()?;
    tracing::debug!(config = ?prober.config(), "starting probe");
    let delay = prober
        .run()
        .with_context(|| format!("failed to ping {} using {}", cfg.host, cfg.network))?;
    println!(
        "Seq: {} Network: {} Addr: {} Delay: {delay:?}",
        cfg.sequence_discriminator, cfg.network, cfg.host
    );
    Ok(())
}

fn configure_logging(cfg: &PingoConfig) {
    if cfg.verbose {
        let fmt_span = match cfg.log_span_events {
            LogSpanEvents::Off => FmtSpan::NONE,
            LogSpanEvents::Active => FmtSpan::ACTIVE,
            LogSpanEvents::Full => FmtSpan::FULL,
        };
        match cfg.log_format {
            LogFormat::Compact => {
                tracing_subscriber::fmt()
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(std::io::stderr)
                    .compact()
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(std::io::stderr)
                    .pretty()
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(std::io::stderr)
                    .json()
                    .init();
            }
        }
    }
}
