//! `cinedesk` binary entrypoint.

#[tokio::main]
async fn main() {
    let code = cinedesk_cli::run().await;
    std::process::exit(code);
}
