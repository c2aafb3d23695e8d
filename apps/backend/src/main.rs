#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adaptive_practice_backend::run().await
}
