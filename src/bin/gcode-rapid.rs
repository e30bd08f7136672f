use anyhow::Result;
use gcode_rapid::Config;
use gcode_rapid::rewrite::run;

fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();
    run(&config)
}
