use chainkv::cli::run_cli;
use chainkv::common::exception::CliError;

fn main() -> Result<(), CliError> {
    run_cli()
}
