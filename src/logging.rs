use env_logger::{Builder, Env, Target};

const LOG_ENV: &str = "WILDWATCH_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Logs go to stderr so report output on stdout stays parseable.
pub fn init() {
    let env = Env::new().filter_or(LOG_ENV, DEFAULT_FILTER);
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp_secs()
        .try_init();
}
