use tracing_subscriber::EnvFilter;

// setup_tracing installs the global subscriber. Under Lambda the output is JSON without
// ANSI codes or timestamps since CloudWatch adds the ingestion time.
pub fn setup_tracing(lambda: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if lambda {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            // disable printing the name of the module in every log line.
            .with_target(false)
            .with_ansi(false)
            .without_time()
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
