#[tokio::main]
async fn main() {
    if let Err(err) = court_booking::run().await {
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
}
