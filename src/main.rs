#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = notecast_lib::run().await {
        eprintln!("notecast: {}", e);
        std::process::exit(1);
    }
}
