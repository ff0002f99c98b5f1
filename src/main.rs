use anyhow::Result;
use quiet_nav::cli;

fn main() -> Result<()> {
    match cli::run(cli::parse()) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("quiet-nav: error: {e:#}");
            std::process::exit(1);
        }
    }
}
