//! Replays an NMEA log file, or reads a TCP feed, and prints every message.
//!
//! ```text
//! cargo run --example playback -- track.nmea
//! RUST_LOG=nmea0183_stream=debug cargo run --example playback -- --tcp 127.0.0.1:10110
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use nmea0183_stream::{
    ChecksumMode, NmeaParser,
    device::{DeviceConfig, DeviceEngine, DeviceEvent, FileTransport, TcpTransport, Transport},
};

/// NMEA 0183 playback
#[derive(Parser, Debug)]
#[command(
    name = "playback",
    version,
    about = "Print NMEA 0183 messages from a log file or a TCP feed"
)]
struct Cli {
    /// Log file to replay
    #[arg(required_unless_present = "tcp")]
    file: Option<PathBuf>,

    /// Read from a TCP address instead of a file
    #[arg(long, conflicts_with = "file")]
    tcp: Option<String>,

    /// Reject sentences without a checksum
    #[arg(long)]
    require_checksum: bool,

    /// Bytes requested per read
    #[arg(long, default_value_t = 1024)]
    buffer_size: usize,

    /// Stop after this many seconds, runs until Ctrl-C otherwise
    #[arg(long, env = "PLAYBACK_SECONDS")]
    seconds: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match (&cli.file, &cli.tcp) {
        (_, Some(address)) => {
            let transport =
                TcpTransport::new(address.as_str()).connect_timeout(Duration::from_secs(10));
            run(transport, &cli).await
        }
        (Some(path), None) => run(FileTransport::new(path), &cli).await,
        (None, None) => Err("no input given".into()),
    }
}

async fn run<T: Transport>(transport: T, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let checksum_mode = if cli.require_checksum {
        ChecksumMode::Required
    } else {
        ChecksumMode::Optional
    };
    let parser = NmeaParser::builder().checksum_mode(checksum_mode).build();
    let config = DeviceConfig::default().read_buffer_size(cli.buffer_size);

    let (device, mut events) = DeviceEngine::with_channel(transport);
    let mut device = device.with_parser(parser).with_config(config);
    device.open().await?;

    let deadline = async {
        match cli.seconds {
            Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
            None => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            event = events.recv() => match event {
                Some(event) => print_event(&event),
                None => break,
            },
        }
    }

    device.close().await?;
    Ok(())
}

fn print_event(event: &DeviceEvent) {
    let message = &event.message;
    let mut line = format!("{} [{}]", message.type_id(), message.talker().description());

    if let Some(time) = message.timestamp() {
        line.push_str(&format!(" {time}"));
    }
    if let Some(location) = message.location() {
        line.push_str(&format!(" {:.6},{:.6}", location.latitude, location.longitude));
    }
    println!("{line}  {:?}", message.body());

    if let Some(group) = &event.completed_group {
        let types: Vec<&str> = group.iter().map(|m| m.type_id()).collect();
        println!("-- cycle complete: {}", types.join(" "));
    }
}
