use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use argh::FromArgs;
use cityweather::{CityWeatherConfig, ForecastResolver, logging, render_text, web};

#[derive(FromArgs)]
/// Five-day city weather forecasts from Open-Meteo
struct Args {
    /// path to the configuration file (defaults to the user config directory)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Lookup(LookupArgs),
    Serve(ServeArgs),
}

#[derive(FromArgs)]
/// print the forecast for a city
#[argh(subcommand, name = "lookup")]
struct LookupArgs {
    /// print the raw JSON result instead of text
    #[argh(switch)]
    json: bool,

    /// city name; several words are joined with spaces
    #[argh(positional)]
    city: Vec<String>,
}

#[derive(FromArgs)]
/// serve the forecast API and web page
#[argh(subcommand, name = "serve")]
struct ServeArgs {
    /// port to listen on (overrides the configured port)
    #[argh(option, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args: Args = argh::from_env();

    let config = CityWeatherConfig::load_from_path(args.config)
        .context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    let resolver = ForecastResolver::new(&config.api)?;

    match args.command {
        Command::Lookup(lookup) => {
            let city = lookup.city.join(" ");
            let result = resolver.resolve(&city).await;

            if lookup.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render_text(&result).trim_end());
            }

            if result.is_error() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Serve(serve) => {
            let port = serve.port.unwrap_or(config.web.port);
            web::run(resolver, port, &config.web.static_dir).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
