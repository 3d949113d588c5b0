use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs the terminal logger; only records from the expanse crates pass.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Debug)
        .set_target_level(LevelFilter::Trace)
        .add_filter_allow_str("expanse")
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
