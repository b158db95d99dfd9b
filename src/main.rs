#[tokio::main]
async fn main() -> std::io::Result<()> {
    aero_express::frameworks::client::run_with_config().await
}
