use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the parent directory of the logbook
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.log_file.clone(), cli.test)?;
    let log_path = cfg.log_path();

    info("Initializing rSplitwatch…");
    if cli.test {
        info("Test mode: configuration file not written");
    } else {
        success(format!("Config file : {}", Config::config_file().display()));
    }

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    success(format!("Logbook     : {}", log_path.display()));

    Ok(())
}
