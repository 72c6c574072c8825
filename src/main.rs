use clap::Parser;
use figma_tokens_lib::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = figma_tokens_lib::run(cli).await {
        log::error!("Startup failed: {err:?}");
        std::process::exit(1);
    }
}
