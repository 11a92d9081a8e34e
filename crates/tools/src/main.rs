use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foundation::math::LatLng;
use quiz::{HeadlessPanel, InteractionDispatcher, QuizConfig};
use render::HeadlessRenderer;
use scene::picking::Viewport;
use scene::resolve::CountryResolver;
use tools::script::{Player, parse_script};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "globequiz", about = "Country quiz globe tooling")]
#[command(version)]
struct Cli {
    /// JSON config overriding the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a country dataset, or show one country.
    Info {
        dataset: PathBuf,
        name: Option<String>,
    },
    /// Print the country at a latitude/longitude.
    Resolve {
        dataset: PathBuf,
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Replay an input script against a headless session and print the final
    /// state as JSON.
    Play {
        dataset: PathBuf,
        script: PathBuf,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => QuizConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => QuizConfig::default(),
    };

    match cli.command {
        Command::Info { dataset, name } => cmd_info(dataset, name),
        Command::Resolve { dataset, lat, lng } => cmd_resolve(&config, dataset, lat, lng),
        Command::Play {
            dataset,
            script,
            width,
            height,
            fps,
        } => cmd_play(&config, dataset, script, Viewport::new(width, height), fps),
    }
}

fn cmd_info(dataset: PathBuf, name: Option<String>) -> Result<()> {
    let countries = formats::load_countries(&dataset)?;

    if let Some(name) = name {
        let country = countries
            .find_by_name(&name)
            .with_context(|| format!("no country named {name:?}"))?;
        println!("{}", country.name());
        println!("{}", country.details());
        if let Some(bbox) = country.bbox() {
            let c = bbox.center();
            println!("center: {:.3}, {:.3}", c.lat_deg, c.lng_deg);
        }
        return Ok(());
    }

    println!("{} countries in {}", countries.len(), dataset.display());
    for country in &countries {
        println!(
            "{:<32} {:>3} polygon(s)",
            country.name(),
            country.geometry.polygon_count()
        );
    }
    Ok(())
}

fn cmd_resolve(config: &QuizConfig, dataset: PathBuf, lat: f64, lng: f64) -> Result<()> {
    let countries = formats::load_countries(&dataset)?;
    let resolver = CountryResolver::new(config.resolve);
    match resolver.resolve(countries.as_slice(), LatLng::new(lat, lng)) {
        Some(country) => println!("{}", country.name()),
        None => println!("(none)"),
    }
    Ok(())
}

fn cmd_play(
    config: &QuizConfig,
    dataset: PathBuf,
    script: PathBuf,
    viewport: Viewport,
    fps: f64,
) -> Result<()> {
    let source =
        fs::read_to_string(&script).with_context(|| format!("reading {}", script.display()))?;
    let steps = parse_script(&source).with_context(|| format!("parsing {}", script.display()))?;

    let renderer = HeadlessRenderer::new(config.globe, viewport);
    let mut session = InteractionDispatcher::new(config, renderer, HeadlessPanel::new());
    session.load_countries(&dataset)?;

    let mut player = Player::new(fps);
    player.run(&mut session, &steps);

    let feedback = session.panel().feedback_message().map(str::to_string);
    let report = player.report(&session, feedback);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
