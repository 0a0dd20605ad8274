use html_analyzer::report::OUTPUT_URL_ERROR;
use html_analyzer::{analyze_url, AnalyzerConfig};
use log::{debug, error};
use std::env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.len() != 1 {
        debug!("expected exactly one URL argument, got {}", args.len());
        println!("{}", OUTPUT_URL_ERROR);
        return;
    }

    let config = match AnalyzerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}; using default settings", e);
            AnalyzerConfig::default()
        }
    };
    debug!("config: {:?}", config);

    println!("{}", analyze_url(&args[0], &config));
}
