#[tokio::main]
async fn main() -> anyhow::Result<()> {
    signal_bridge_cli::run().await
}
