use chrono::Utc;
use clap::Parser;
use placement_engine::{
    args::Args,
    config::{ConfigError, EngineConfig},
    feedback::{FeedbackKind, FeedbackLimiter},
    images::{ImageLinks, ImageSource},
    model::{
        match_mode, placement::PlacementSession, structures::{map_record::MapRecord, player_state::PlayerState},
        EngineError, PlacementEngine
    },
    pool::{canonical_url, CsvPool, PoolError, PoolProvider},
    state::{JsonFileStore, StateStore, StoreError}
};
use std::{
    io::{self, BufRead, Write},
    process::ExitCode
};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error)
}

/// What the player asked to do with the presented map
enum Command {
    Resolve(bool),
    Skip,
    Feedback(FeedbackKind),
    Quit,
    Unknown
}

impl Command {
    fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "s" => Command::Resolve(true),
            "u" => Command::Resolve(false),
            "skip" => Command::Skip,
            "like" => Command::Feedback(FeedbackKind::Like),
            "dislike" => Command::Feedback(FeedbackKind::Dislike),
            "report" => Command::Feedback(FeedbackKind::Report),
            "q" | "quit" => Command::Quit,
            _ => Command::Unknown
        }
    }
}

const HELP: &str = "Commands: s (passed), u (failed), skip, like, dislike, report, q";

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Engine(EngineError::EmptyPool)) => {
            error!("no maps available");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = EngineConfig::from_env()?;
    let pool = CsvPool::from_path(&args.pool_path).load_pool()?;
    let store = JsonFileStore::new(&args.state_path, &config);
    let mut state = store.load()?;

    let mut engine = match args.seed {
        Some(seed) => PlacementEngine::seeded(config, seed),
        None => PlacementEngine::from_entropy(config)
    };

    let links = match &args.links_path {
        Some(path) => ImageLinks::from_path(path).unwrap_or_else(|e| {
            warn!("{e}, continuing without image links");
            ImageLinks::default()
        }),
        None => ImageLinks::default()
    };

    let was_rated = state.has_rating;
    let mut session = engine.begin(&pool, &mut state)?;
    if !was_rated && state.has_rating {
        store.save(&state)?;
        if let Some(rating) = state.rating {
            println!("Placements complete! Your rating: {rating:.2}");
        }
    }

    let mut limiter = FeedbackLimiter::default();
    let mut lines = io::stdin().lock().lines();

    info!(maps = pool.len(), rated = state.has_rating, "Ready");

    loop {
        let map = engine.next_map(session.as_ref(), &pool, &state)?;
        present(&engine, session.as_ref(), &pool, &links, map, &state);

        loop {
            print!("> ");
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(())
            };

            match Command::parse(&line) {
                Command::Resolve(passed) => {
                    let resolution = engine.resolve(session.take(), map, passed, state)?;
                    session = resolution.session;
                    state = resolution.player_state;
                    store.save(&state)?;

                    if let Some(rating) = resolution.completed_rating {
                        println!("Placements complete! Your rating: {rating:.2}");
                    }
                    break;
                }
                Command::Skip => {
                    let outcome = engine.skip(session.take(), state);
                    session = outcome.session;
                    state = outcome.player_state;

                    if outcome.allowed {
                        store.save(&state)?;
                        break;
                    }

                    let (_, status) = engine.skip_status(session.as_ref(), &state);
                    if status.is_empty() {
                        println!("No skips left");
                    } else {
                        println!("{status}");
                    }
                }
                Command::Feedback(kind) => match limiter.try_submit(kind, map, Utc::now()) {
                    Ok(event) if kind == FeedbackKind::Report => {
                        println!("Report noted for {}", event.map_label())
                    }
                    Ok(_) => println!("Thanks for the feedback!"),
                    Err(e) => println!("{e}")
                },
                Command::Quit => return Ok(()),
                Command::Unknown => println!("{HELP}")
            }
        }
    }
}

fn present(
    engine: &PlacementEngine,
    session: Option<&PlacementSession>,
    pool: &[MapRecord],
    links: &ImageLinks,
    map: &MapRecord,
    state: &PlayerState
) {
    println!();
    println!("{}", match_mode(session));
    println!("{}", map.title());
    println!("{}", canonical_url(pool, map));
    match links.resolve(map) {
        ImageSource::Linked(url) | ImageSource::Background(url) => println!("Image: {url}"),
        ImageSource::Missing => println!("[No image found]")
    }
    println!("{}", engine.context_line(session, map, state));

    let (_, status) = engine.skip_status(session, state);
    if !status.is_empty() {
        println!("{status}");
    }
}
