use simplelog::LevelFilter;

fn select_log_level_filter(verbosity: i32) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logging(verbosity: i32) -> Result<(), log::SetLoggerError> {
    simplelog::TermLogger::init(
        select_log_level_filter(verbosity),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}

#[cfg(test)]
mod tests {
    use super::select_log_level_filter;
    use simplelog::LevelFilter;

    #[test]
    fn verbosity_levels() {
        assert_eq!(select_log_level_filter(0), LevelFilter::Off);
        assert_eq!(select_log_level_filter(3), LevelFilter::Info);
        assert_eq!(select_log_level_filter(9), LevelFilter::Trace);
    }
}
