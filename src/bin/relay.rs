#[tokio::main]
async fn main() -> std::io::Result<()> {
    aero_express::frameworks::relay::run_with_config().await
}
