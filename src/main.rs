use crawlopts::config::{CrawlConfig, DEFAULT_CONFIG_PATH};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = CrawlConfig::from_file(&path);

    let parsed = config.to_options().parse_all();
    info!(
        "parsed {} header(s), {} argument(s), {} cookie(s)",
        parsed.custom_headers.len(),
        parsed.headless_optional_arguments.len(),
        parsed.cookies.len()
    );

    print!("{}", toml::to_string(&parsed)?);
    Ok(())
}
