use anyhow::Result;
use env_logger::Env;
use notedrill::config::DrillConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = DrillConfig::load()?;
    notedrill::repl::start(config)
}
