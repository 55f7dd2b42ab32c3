//! `send-sms`: send one SMS through the gateway named in the config file.
//!
//! Prints `"{status_code} {status_message} {body}"` on success. Exits with 1
//! on configuration or transport failures and 2 when the reply cannot be
//! decoded.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use sms_core::{Config, ReadMode, SendSms, SmsClient, SmsError, TcpTransport, TracingLogger};
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(name = "send-sms", version, about = "Send an SMS through the configured gateway")]
struct Args {
    /// Sender phone number
    sender_number: String,

    /// Recipient phone number
    recipient_number: String,

    /// Message text
    text: String,

    /// TOML file with the `[sms_service]` section
    #[arg(short, long, default_value = "config.toml", env = "SMS_CONFIG")]
    config: PathBuf,

    /// File the log records are appended to
    #[arg(long, default_value = "send_sms.log", env = "SMS_LOG_FILE")]
    log_file: PathBuf,

    /// Read the reply until its Content-Length is satisfied instead of a
    /// single 2048-byte read
    #[arg(long)]
    full_read: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("warning: cannot open log file {}: {err}", args.log_file.display());
    }

    match run(&args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(args: &Args) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)?;
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn run(args: &Args) -> Result<String, SmsError> {
    info!(
        sender = %args.sender_number,
        recipient = %args.recipient_number,
        text = %args.text,
        "sending sms"
    );

    let config = Config::load(&args.config)?;
    let service = &config.sms_service;
    info!(url = %service.url, path = %service.path, username = %service.username, "gateway configured");

    let client = SmsClient::new(service, Arc::new(TracingLogger));
    let mut transport = TcpTransport::with_read_mode(read_mode(args.full_read));
    let sms = SendSms::new(&args.sender_number, &args.recipient_number, &args.text);
    client.send_sms(&mut transport, &sms)
}

fn read_mode(full_read: bool) -> ReadMode {
    if full_read {
        ReadMode::UntilComplete
    } else {
        ReadMode::default()
    }
}
