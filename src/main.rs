//! hashflake CLI: render, encode and inspect seeded snowflakes.

use clap::{Args, Parser, Subcommand};
use hashflake::settings::Settings;
use hashflake::{builder, codec, export, svg};
use hashflake::{DigestKind, DrawSettings, Result, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashflake")]
#[command(version)]
#[command(about = "hashflake: seeded six-fold snowflakes with shareable URL fragments", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/hashflake/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a snowflake as an SVG document
    Svg {
        /// Seed text; derives the snowflake deterministically
        #[arg(short, long)]
        seed: Option<String>,

        /// Persisted fragment (pos:len,pos:len,...), with or without '#'
        #[arg(short, long, conflicts_with = "url")]
        fragment: Option<String>,

        /// Full URL whose '#' fragment holds the configuration
        #[arg(short, long)]
        url: Option<String>,

        #[command(flatten)]
        draw: DrawArgs,

        /// Write the document to this file instead of stdout
        #[arg(short, long, conflicts_with_all = ["export_dir", "data_uri"])]
        out: Option<PathBuf>,

        /// Export into this directory as <fragment>.svg
        #[arg(short, long = "export", value_name = "DIR", conflicts_with = "data_uri")]
        export_dir: Option<PathBuf>,

        /// Print a data: URI instead of the raw document
        #[arg(long)]
        data_uri: bool,
    },

    /// Print the fragment a seed derives to
    Fragment {
        /// Seed text
        #[arg(short, long)]
        seed: String,

        #[command(flatten)]
        draw: DrawArgs,
    },

    /// Decode a fragment and print it as JSON
    Inspect {
        /// Fragment to decode, with or without '#'
        fragment: String,
    },

    /// Read seeds and '#fragments' from stdin, printing the fragment after each
    Session {
        #[command(flatten)]
        draw: DrawArgs,
    },
}

/// Overrides for the `[draw]` table of the settings file
#[derive(Args)]
struct DrawArgs {
    /// Border stroke width (1-100)
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Branch width (1-250)
    #[arg(short, long)]
    branch_width: Option<f64>,

    /// Upper bound on the number of branches (1-20)
    #[arg(short = 'n', long)]
    max_branches: Option<u32>,

    /// Arm length in view box units (1-2000)
    #[arg(long)]
    size: Option<u32>,

    /// Animate a slow rotation
    #[arg(short, long)]
    rotate: bool,

    /// Skip the border layer
    #[arg(long)]
    no_border: bool,

    /// Fill color (#rgb or #rrggbb)
    #[arg(long)]
    fill_color: Option<String>,

    /// Border color (#rgb or #rrggbb)
    #[arg(long)]
    border_color: Option<String>,

    /// Digest feeding the number generator
    #[arg(long, value_enum)]
    digest: Option<DigestKind>,
}

impl DrawArgs {
    fn apply(self, mut draw: DrawSettings) -> Result<DrawSettings> {
        if let Some(v) = self.stroke_width {
            draw.stroke_width = v;
        }
        if let Some(v) = self.branch_width {
            draw.branch_width = v;
        }
        if let Some(v) = self.max_branches {
            draw.max_branches = v;
        }
        if let Some(v) = self.size {
            draw.size = v;
        }
        if self.rotate {
            draw.rotate = true;
        }
        if self.no_border {
            draw.border = false;
        }
        if let Some(v) = self.fill_color {
            draw.fill_color = v;
        }
        if let Some(v) = self.border_color {
            draw.border_color = v;
        }
        if let Some(v) = self.digest {
            draw.digest = v;
        }
        draw.validated()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hashflake=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        Commands::Svg {
            seed,
            fragment,
            url,
            draw,
            out,
            export_dir,
            data_uri,
        } => {
            let draw = draw.apply(settings.draw)?;
            let fragment = fragment
                .or_else(|| url.as_deref().and_then(codec::fragment_of_url))
                .unwrap_or_default();

            let mut session = Session::new(draw, StdRng::from_entropy());
            session.fragment_changed(&fragment);
            if let Some(seed) = seed {
                session.generate(&seed)?;
            }

            let document = svg::to_svg(&session.render());
            let fragment = session.fragment().unwrap_or_default();
            tracing::info!(fragment, "rendered snowflake");

            if let Some(path) = out {
                std::fs::write(&path, &document)?;
            } else if let Some(dir) = export_dir {
                let path = export::export(&document, fragment, &dir)?;
                println!("{}", path.display());
            } else if data_uri {
                println!("{}", export::data_uri(&document));
            } else {
                io::stdout().write_all(document.as_bytes())?;
            }
        }
        Commands::Fragment { seed, draw } => {
            let draw = draw.apply(settings.draw)?;
            let configuration = builder::build(&seed, &draw)?;
            println!("{}", codec::encode(&configuration));
        }
        Commands::Inspect { fragment } => {
            let configuration = codec::decode(&fragment)?;
            let report = serde_json::json!({
                "fragment": codec::encode(&configuration),
                "hexagon_size": configuration.hexagon_size(),
                "branches": configuration.branches,
            });
            println!("{report:#}");
        }
        Commands::Session { draw } => {
            let draw = draw.apply(settings.draw)?;
            run_session(Session::new(draw, StdRng::from_entropy()))?;
        }
    }

    Ok(())
}

/// Lines starting with '#' are external fragment changes, anything else is a seed
fn run_session(mut session: Session) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(fragment) = session.fragment_changed("") {
        writeln!(out, "#{fragment}")?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim_end();

        let written = if line.starts_with('#') {
            session.fragment_changed(line)
        } else {
            match session.generate(line) {
                Ok(written) => written,
                Err(e) => {
                    eprintln!("error: {e}");
                    None
                }
            }
        };

        if let Some(fragment) = written {
            writeln!(out, "#{fragment}")?;
        }
        out.flush()?;
    }

    Ok(())
}
