#[tokio::main]
async fn main() -> std::io::Result<()> {
    portfolio_server::run_with_config().await
}
