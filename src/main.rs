use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    sitepulse_lib::run().await
}
