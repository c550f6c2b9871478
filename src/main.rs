use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdoutはMCPトランスポートが使うため、ログはstderrへ
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let catalog_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("library.json"));

    library_mcp::interface::mcp::run(catalog_path).await
}
