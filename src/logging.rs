use tracing_subscriber::filter::EnvFilter;

use crate::config;

/// Log to stderr so the rendered session on stdout stays readable
pub fn set_up(verbosity: u8) {
    let level = max_level(verbosity);

    let mut filter = EnvFilter::new("warn");
    for target in [config::BIN_NAME, "bankist_lib"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
