use server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env for local development; real deployments set the
    // MEMCORE__* variables directly.
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    start_server(config).await
}
