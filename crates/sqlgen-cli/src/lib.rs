mod cli;
mod config;
mod connect;
mod generate;
mod logging;

pub use sqlgen::Dialect;

/// Entry point shared by `mysqlgen` and `psqlgen`.
pub async fn run(dialect: Dialect, args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help => {
            cli::print_help(dialect);
            Ok(())
        }
        cli::Command::Generate(args) => {
            logging::init_logging(args.verbose);
            generate::run(dialect, args).await
        }
    }
}
