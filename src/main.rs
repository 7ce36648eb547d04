#[tokio::main]
async fn main() {
    if let Err(err) = dentara::run().await {
        eprintln!("dentara: {err}");
        std::process::exit(1);
    }
}
