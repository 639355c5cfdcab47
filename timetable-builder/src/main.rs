use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use timetable_builder::display::{print_timetables, write_timetables_to_file};
use timetable_builder::form::{export_timetables_to_csv, SubjectRequest};
use timetable_builder::logger;
use timetable_builder::parser::load_subjects;
use timetable_builder::{web, AppConfig, TimetableSession};

#[derive(Debug, Parser)]
#[command(name = "timetable-builder")]
#[command(about = "Builds randomized weekly timetables per section")]
struct Cli {
    /// TOML config file overriding days, time slots and server settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate timetables from a CSV of subjects
    Generate {
        #[arg(long)]
        input: PathBuf,

        /// Seed for a reproducible timetable
        #[arg(long)]
        seed: Option<u64>,

        /// Write the rendered timetables to this text file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export the timetables as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Run the browser-based builder
    Web {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Web { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            tracing::info!("Starting web server on {}:{}", config.server.host, config.server.port);
            println!("Access the site at http://localhost:{}", config.server.port);
            web::start_server(config).await?;
        }
        Command::Generate { input, seed, output, csv } => {
            tracing::info!("Loading subjects from {}", input.display());
            let subjects = load_subjects(&input)?;
            println!("Loaded {} subjects", subjects.len());

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let mut session = TimetableSession::new(config.week.clone());
            for subject in &subjects {
                session.add_subject(&SubjectRequest::from(subject));
            }
            session.generate(&mut rng)?;

            print_timetables(session.timetables(), session.layout());

            if let Some(path) = output {
                write_timetables_to_file(session.timetables(), session.layout(), &path)?;
                println!("Timetables saved to {}", path.display());
            }
            if let Some(path) = csv {
                export_timetables_to_csv(session.timetables(), session.layout(), &path)?;
                println!("CSV export saved to {}", path.display());
            }
        }
    }

    Ok(())
}
