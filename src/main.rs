use anyhow::Result;

fn main() -> Result<()> {
    let invocation = txfleet::cli::parse(std::env::args().skip(1))?;
    txfleet::cli::run(invocation)
}
