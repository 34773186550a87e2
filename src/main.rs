// src/main.rs
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use dircut::app::utils::decade_label;
use dircut::app::{
    catalog, AnnotationStore, DecadeFilter, FilterCriteria, MovieRecord, RuntimeBucket,
    RuntimeFilter, Session, TAG_FAVORITE,
};
use dircut::config::{load_config, AppConfig, ENV_DATA_DIR};

/// Command-line arguments for dircut
#[derive(Parser, Debug)]
#[command(name = "dircut", about = "Browse a movie catalog enriched from TMDb", version)]
struct Cli {
    /// Directory holding the catalog and annotation files
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the catalog, filtered
    List(FilterArgs),
    /// Three random picks from the filtered catalog
    Surprise(FilterArgs),
    /// Replace the catalog with an uploaded CSV
    Import { path: PathBuf },
    /// Set the note for a title
    Note {
        title: String,
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Add or remove a tag
    Tag {
        title: String,
        tag: String,
        state: Toggle,
    },
    /// Stamp a title as watched now
    Watched { title: String },
    /// Print the annotation for a title
    Show { title: String },
    /// List titles carrying a tag
    #[command(alias = "favorites")]
    Tagged {
        #[arg(default_value = TAG_FAVORITE)]
        tag: String,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// All, 1980s .. 2020s, Unknown
    #[arg(long, value_parser = parse_decade, default_value = "All")]
    decade: DecadeFilter,
    /// All, Short, Medium, Long, Unknown
    #[arg(long, value_parser = parse_runtime, default_value = "All")]
    runtime: RuntimeFilter,
    /// Only the last five catalog entries
    #[arg(long)]
    recent: bool,
}

impl FilterArgs {
    fn criteria(&self, surprise: bool) -> FilterCriteria {
        FilterCriteria {
            decade: self.decade,
            runtime: self.runtime,
            recent_only: self.recent,
            surprise,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Toggle {
    On,
    Off,
}

fn parse_decade(s: &str) -> Result<DecadeFilter, String> {
    DecadeFilter::from_str(s)
        .ok_or_else(|| format!("try one of {}", DecadeFilter::CHOICES.join(", ")))
}

fn parse_runtime(s: &str) -> Result<RuntimeFilter, String> {
    RuntimeFilter::from_str(s)
        .ok_or_else(|| format!("try one of {}", RuntimeFilter::CHOICES.join(", ")))
}

fn print_card(movie: &MovieRecord, notes: &AnnotationStore) {
    let annotation = notes.get(&movie.title);
    println!(
        "{} ({}, {})",
        movie.title,
        movie.release_year,
        decade_label(&movie.release_year)
    );
    let runtime = movie
        .runtime_minutes
        .map(|m| format!("{m} min"))
        .unwrap_or_else(|| "-".into());
    println!(
        "  {} | {} [{}]",
        movie.genres.join(", "),
        runtime,
        RuntimeBucket::of(movie.runtime_minutes).label()
    );
    if movie.overview.is_empty() {
        println!("  No summary available.");
    } else {
        println!("  {}", movie.overview);
    }
    println!("  poster: {}", movie.poster_url);
    if !annotation.note.is_empty() {
        println!("  note: {}", annotation.note);
    }
    if !annotation.tags.is_empty() {
        let tags: Vec<&str> = annotation.tags.iter().map(String::as_str).collect();
        println!("  tags: {}", tags.join(", "));
    }
    if let Some(date) = notes.last_watched_date(&movie.title) {
        println!("  last watched: {date}");
    }
    println!();
}

fn run(cli: Cli) -> Result<(), String> {
    let mut cfg = load_config();
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }

    // Annotation-only commands do not need TMDb credentials.
    let notes = || AnnotationStore::load(cfg.annotations_path()).map_err(|e| e.to_string());

    match cli.command {
        Command::List(filters) => render(cfg.clone(), filters.criteria(false)),
        Command::Surprise(filters) => render(cfg.clone(), filters.criteria(true)),
        Command::Import { path } => {
            let bytes = fs::read(&path).map_err(|e| format!("read {}: {e}", path.display()))?;
            let count =
                catalog::replace_catalog(&cfg.catalog_path(), &bytes).map_err(|e| e.to_string())?;
            println!("Movie list updated ({count} titles).");
            Ok(())
        }
        Command::Note { title, text } => notes()?
            .set_note(&title, &text.join(" "))
            .map_err(|e| e.to_string()),
        Command::Tag { title, tag, state } => notes()?
            .set_tag(&title, &tag, state == Toggle::On)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Command::Watched { title } => {
            let when = notes()?.mark_watched_now(&title).map_err(|e| e.to_string())?;
            println!("{title}: watched {}", when.format("%Y-%m-%d %H:%M"));
            Ok(())
        }
        Command::Show { title } => {
            let store = notes()?;
            let a = store.get(&title);
            println!("{title}");
            println!("  note: {}", if a.note.is_empty() { "none" } else { a.note.as_str() });
            let tags: Vec<&str> = a.tags.iter().map(String::as_str).collect();
            println!("  tags: {}", if tags.is_empty() { "none".into() } else { tags.join(", ") });
            println!(
                "  last watched: {}",
                store.last_watched_date(&title).unwrap_or_else(|| "never".into())
            );
            Ok(())
        }
        Command::Tagged { tag } => {
            let store = notes()?;
            let titles = store.titles_with_tag(&tag);
            if titles.is_empty() {
                println!("Nothing tagged {tag}.");
            }
            for title in titles {
                println!("{title}");
            }
            Ok(())
        }
    }
}

fn render(cfg: AppConfig, criteria: FilterCriteria) -> Result<(), String> {
    let mut session = Session::open(cfg).map_err(|e| e.to_string())?;
    let pass = session.render(&criteria);

    if !pass.not_found.is_empty() {
        eprintln!("not found on TMDb: {}", pass.not_found.join(", "));
    }
    let picks = pass.surprise.as_ref().unwrap_or(&pass.shown);
    if picks.is_empty() {
        println!("Nothing to show.");
    }
    if pass.surprise.is_some() {
        println!("Your movie night picks:\n");
    }
    for movie in picks {
        print_card(movie, session.annotations());
    }
    Ok(())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
