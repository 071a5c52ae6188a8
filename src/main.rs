use anyhow::Result;
use cp3mm::cli;

fn main() -> Result<()> {
    cli::run()
}
