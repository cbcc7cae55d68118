use anyhow::Result;
use cancapp_admin::cli;
use std::process::ExitCode;

async fn run() -> Result<()> {
    let action = cli::start()?;

    action.execute().await
}

// Main function
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One line: context and cause joined with ": ".
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
