use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dockside::init().await
}
