use anyhow::Context;
use chrono::{Local, Utc};
use clap::Parser;
use moodjour::application::add_entry::parse_date_arg;
use moodjour::application::{
    AddEntryOptions, AddEntryService, AnalyzeOptions, AnalyzeService, AssessService,
    ConfigService, InitService, LogService,
};
use moodjour::cli::{
    format_assessment, format_log, format_log_list, format_questions, format_report, Cli,
    Commands,
};
use moodjour::error::MoodjourError;
use moodjour::infrastructure::FileSystemStore;
use moodjour::logging;

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<MoodjourError>() {
            Some(err) => {
                eprintln!("Error: {}", err.display_with_suggestions());
                std::process::exit(err.exit_code());
            }
            None => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init { path }) => {
            InitService::execute(&path)?;
            println!("Initialized moodjour journal at {}", path.display());
            Ok(())
        }
        Some(Commands::Add {
            text,
            date,
            emotions,
            detection,
        }) => {
            let date = date.as_deref().map(parse_date_arg).transpose()?;
            let store = FileSystemStore::discover()?;
            let service = AddEntryService::new(store);

            let options = AddEntryOptions {
                text,
                date,
                emotions,
                detection,
            };
            let (filename, log) = service.execute(options, Local::now().fixed_offset())?;

            let names: Vec<&str> = log
                .detected_emotions
                .iter()
                .flatten()
                .map(|e| e.emotion.as_str())
                .collect();
            println!("Recorded {}", filename);
            if !names.is_empty() {
                println!("Emotions: {}", names.join(", "));
            }
            if let Some(metadata) = &log.emotion_metadata {
                println!(
                    "Intensity: {} ({})",
                    metadata.intensity, metadata.complexity
                );
            }
            Ok(())
        }
        Some(Commands::List { from, to, limit }) => {
            let from = from.as_deref().map(parse_date_arg).transpose()?;
            let to = to.as_deref().map(parse_date_arg).transpose()?;
            let service = LogService::new(FileSystemStore::discover()?);
            print!("{}", format_log_list(&service.list(from, to, limit)?));
            Ok(())
        }
        Some(Commands::Show { id, json }) => {
            let service = LogService::new(FileSystemStore::discover()?);
            let record = service.show(&id)?;
            if json {
                println!("{}", record.log.to_json()?);
            } else {
                print!("{}", format_log(&record));
            }
            Ok(())
        }
        Some(Commands::Update { id, json, file }) => {
            let document = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => json.unwrap_or_default(),
            };
            let service = LogService::new(FileSystemStore::discover()?);
            let record = service.update(&id, &document, Local::now().fixed_offset())?;
            println!("Updated {}", record.id);
            Ok(())
        }
        Some(Commands::Delete { id }) => {
            let service = LogService::new(FileSystemStore::discover()?);
            service.delete(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
        Some(Commands::Assess {
            answers,
            questions,
            last,
        }) => {
            if questions {
                print!("{}", format_questions());
                return Ok(());
            }

            let service = AssessService::new(FileSystemStore::discover()?);
            if last {
                match service.latest()? {
                    Some(record) => print!("{}", format_assessment(&record)),
                    None => println!("No assessments taken yet"),
                }
                return Ok(());
            }

            let record = service.execute(answers.as_deref().unwrap_or_default(), Utc::now())?;
            print!("{}", format_assessment(&record));
            Ok(())
        }
        Some(Commands::Analyze { days, limit, json }) => {
            let store = FileSystemStore::discover()?;
            let service = AnalyzeService::new(store);
            let report = service.execute(AnalyzeOptions { days, limit }, Local::now().date_naive())?;

            if json {
                let rendered = serde_json::to_string_pretty(&report)
                    .context("failed to render analysis report as JSON")?;
                println!("{}", rendered);
            } else {
                print!("{}", format_report(&report));
            }
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let store = FileSystemStore::discover()?;
            let service = ConfigService::new(store);

            if list {
                let config = service.list()?;
                println!("range_days = {}", config.analysis.range_days);
                println!("limit = {}", config.analysis.limit);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: moodjour config [--list | <key> [<value>]]");
                println!("Valid keys: range_days, limit, created");
            }
            Ok(())
        }
        None => {
            println!("moodjour - Emotion-aware terminal journal");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
