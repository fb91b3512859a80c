mod cli;
mod config;
mod dice;
mod error;
mod input;
mod logging;
mod report;
mod runner;
#[cfg(test)]
mod testutil;
mod volume;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
