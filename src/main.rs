use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command};
use po_navigator::{
    CatalogStatistics, Document, MsgfmtStatistics, Position, Settings, StatisticsProvider, Target,
    VerbosityLevel, find_target, msgstr_position, parse_message_at, provide_definition,
};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn line_arg() -> Arg {
    Arg::new("line")
        .long("line")
        .short('l')
        .help("Zero-based line of the cursor")
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

fn cli() -> Command {
    Command::new("po-navigator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Jump between untranslated and fuzzy entries of a gettext PO catalog")
        .subcommand_required(true)
        .arg(
            Arg::new("file")
                .help("PO catalog to navigate")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log boundary decisions and visited messages")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log warnings and errors")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("show")
                .about("Show the message under the cursor")
                .arg(line_arg()),
        )
        .subcommand(
            Command::new("next")
                .about("Find the next message needing work and print where to edit it")
                .arg(line_arg())
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("untranslated, fuzzy or any")
                        .default_value("untranslated")
                        .value_parser(clap::value_parser!(Target)),
                )
                .arg(
                    Arg::new("backwards")
                        .long("backwards")
                        .short('b')
                        .help("Search towards the start of the catalog")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("goto-source")
                .about("Resolve the `#:` source references on a line")
                .arg(line_arg())
                .arg(
                    Arg::new("workspace")
                        .long("workspace")
                        .short('w')
                        .help("Directory the references are relative to")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Print translation statistics for the catalog")
                .arg(
                    Arg::new("builtin")
                        .long("builtin")
                        .help("Count messages directly instead of running msgfmt")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("msgfmt")
                        .long("msgfmt")
                        .help("msgfmt program to run"),
                ),
        )
}

fn init_tracing(verbosity: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cursor_line(matches: &ArgMatches) -> usize {
    matches.get_one::<usize>("line").copied().unwrap_or(0)
}

fn show(
    document: &Document,
    matches: &ArgMatches,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = document.check_line(cursor_line(matches))?;
    let Some(message) = parse_message_at(document, line) else {
        info!(line, "no message at cursor");
        return Ok(());
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&message)?);
        return Ok(());
    }

    println!("lines:   {}-{}", message.first_line, message.last_line);
    if let Some(context) = &message.msgctxt {
        println!("msgctxt: \"{}\"", context);
    }
    println!("msgid:   \"{}\"", message.msgid);
    if let Some(plural) = &message.msgid_plural {
        println!("plural:  \"{}\"", plural);
    }
    if let Some(translation) = &message.msgstr {
        println!("msgstr:  \"{}\"", translation);
    }
    for (index, translation) in message.msgstr_plural.iter().enumerate() {
        println!("msgstr[{}]: \"{}\"", index, translation);
    }
    println!("fuzzy:   {}", message.is_fuzzy);
    println!("untranslated: {}", message.is_untranslated());
    Ok(())
}

fn next(
    document: &Document,
    matches: &ArgMatches,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = document.check_line(cursor_line(matches))?;
    let target = matches
        .get_one::<Target>("target")
        .copied()
        .unwrap_or(Target::Untranslated);
    let backwards = matches.get_flag("backwards");

    let found = find_target(document, line, target, backwards);
    let position = found
        .as_ref()
        .map(msgstr_position)
        .unwrap_or(Position::new(line, 0));
    if found.is_none() {
        info!(%target, backwards, "no matching message, cursor stays");
    }

    if settings.json {
        let output = json!({ "position": position, "message": found });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(message) = found {
        println!("{}\t{}", position, message.msgid);
    } else {
        println!("{}", position);
    }
    Ok(())
}

fn goto_source(
    document: &Document,
    matches: &ArgMatches,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = cursor_line(matches);
    let workspace = matches
        .get_one::<PathBuf>("workspace")
        .unwrap_or(&settings.workspace);

    let locations = provide_definition(document, line, workspace)?;
    if settings.json {
        println!("{}", serde_json::to_string_pretty(&locations)?);
        return Ok(());
    }
    for location in locations {
        println!("{}:{}", location.path.display(), location.position);
    }
    Ok(())
}

async fn status(
    path: &Path,
    matches: &ArgMatches,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider: Box<dyn StatisticsProvider> = if matches.get_flag("builtin") {
        Box::new(CatalogStatistics)
    } else {
        let program = matches
            .get_one::<String>("msgfmt")
            .unwrap_or(&settings.msgfmt_program);
        Box::new(MsgfmtStatistics::new(program.as_str()))
    };

    match provider.statistics(path).await? {
        Some(summary) if settings.json => println!("{}", json!({ "summary": summary })),
        Some(summary) => println!("{}", summary),
        None => debug!("no statistics to show"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let mut settings = Settings::from_env()?;
    settings
        .with_verbosity(VerbosityLevel::from_flags(
            matches.get_flag("quiet"),
            matches.get_flag("verbose"),
        ))
        .with_json(matches.get_flag("json"));
    init_tracing(settings.verbosity);

    let path = matches
        .get_one::<PathBuf>("file")
        .ok_or("missing catalog path")?;

    match matches.subcommand() {
        Some(("status", sub)) => status(path, sub, &settings).await,
        Some((name, sub)) => {
            let document = Document::open(path)?;
            debug!(path = %path.display(), lines = document.lines().len(), "catalog loaded");
            match name {
                "show" => show(&document, sub, &settings),
                "next" => next(&document, sub, &settings),
                "goto-source" => goto_source(&document, sub, &settings),
                other => Err(format!("Unknown command '{}'", other).into()),
            }
        }
        None => Err("No command given".into()),
    }
}
