use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use signal_bridge::{BridgeConfig, CHANNEL_NAME, MethodCall, Outcome, SignalBridge, codec};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "signal-bridge")]
#[command(about = "Answer Wi-Fi signal strength queries over a method channel")]
#[command(disable_version_flag = true)]
#[command(version)]
struct Args {
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Only consider this wireless interface
    #[arg(short, long, global = true)]
    interface: Option<String>,

    /// Name of the channel to answer on
    #[arg(long, global = true, default_value = CHANNEL_NAME)]
    channel: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current signal strength in dBm
    Query,
    /// Dispatch one method call and print the reply envelope
    Call {
        /// Method name
        method: String,
        /// JSON arguments
        #[arg(long)]
        args: Option<String>,
    },
    /// Answer newline-delimited JSON method calls from stdin on stdout
    Serve,
}

impl Args {
    fn config(&self) -> BridgeConfig {
        let config = BridgeConfig::new().with_channel_name(self.channel.clone());
        match &self.interface {
            Some(interface) => config.with_interface(interface.clone()),
            None => config,
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.version {
        println!("signal-bridge {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let bridge = SignalBridge::with_config(args.config());
    debug!("Answering on channel {}", bridge.channel().name());

    match args.command.unwrap_or(Command::Query) {
        Command::Query => query(&bridge).await,
        Command::Call { method, args } => call(&bridge, method, args.as_deref()).await,
        Command::Serve => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            let answered = serve(&bridge, stdin, &mut stdout).await?;
            info!("Input closed after {answered} calls");
            Ok(())
        }
    }
}

async fn query(bridge: &SignalBridge) -> anyhow::Result<()> {
    match bridge.wifi_rssi_dbm().await {
        Outcome::Success(dbm) => {
            println!("{dbm} dBm");
            Ok(())
        }
        other => bail!("{other}"),
    }
}

async fn call(bridge: &SignalBridge, method: String, args: Option<&str>) -> anyhow::Result<()> {
    let mut call = MethodCall::new(method);
    if let Some(raw) = args {
        let value = serde_json::from_str(raw).context("--args is not valid JSON")?;
        call = call.with_arguments(value);
    }

    let outcome = bridge.dispatch(call).await;
    let envelope = codec::encode_outcome(&outcome)?;
    println!("{}", String::from_utf8_lossy(&envelope));

    if outcome.is_success() {
        Ok(())
    } else {
        bail!("{outcome}")
    }
}

/// Answers newline-delimited method calls read from `input`.
///
/// Every non-blank input line produces exactly one output line: the encoded
/// reply, or an empty line for a not-implemented method. Blank lines are
/// skipped. Lines are read as raw bytes, so a line that is not valid UTF-8
/// is answered with an error envelope like any other undecodable call.
/// Returns the number of calls answered once `input` is exhausted.
pub async fn serve<R, W>(bridge: &SignalBridge, mut input: R, output: &mut W) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut answered = 0;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let request = line.trim_ascii();
        if request.is_empty() {
            continue;
        }
        debug!("Received request: {}", String::from_utf8_lossy(request));

        let reply = bridge.handle_message(request).await?;
        output.write_all(&reply).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        answered += 1;
    }

    Ok(answered)
}
