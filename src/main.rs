use clap::Parser;

use release_herald::{cli, command, result::Result};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_herald")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    match &cli_args.command {
        cli::Command::Report(cmd) => {
            command::report::execute(&cli_args, cmd).await
        }
        cli::Command::MoveToQa(cmd) => {
            command::move_to_qa::execute(&cli_args, cmd).await
        }
        cli::Command::CheckAcks(cmd) => {
            command::check_acks::execute(&cli_args, cmd).await
        }
        cli::Command::ReleaseIssues(cmd) => {
            command::release_issues::execute(&cli_args, cmd).await
        }
    }
}
