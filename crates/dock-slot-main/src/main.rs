// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use dock_slot_core::clock::{TimestampParseError, format_clock, format_timestamp, parse_timestamp};
use dock_slot_core::prelude::*;
use dock_slot_engine::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const USAGE: &str = "\
usage: dock-slot <routes.json> <route-id> [options]
       dock-slot --generate <count> [seed]

options:
  --margin <minutes>        safety margin around busy windows (default 5)
  --docks <n>               number of configured docks (default 4)
  --now <timestamp>         drop candidate slots before this time
  --move <timestamp> <dock> commit a move of the route before reporting
  --additive                show original slots of moved routes too";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Load(LoadError),
    Session(SessionError),
    Config(ConfigBuildError),
    Timestamp(TimestampParseError),
    Output(serde_json::Error),
    Io(io::Error),
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

impl From<ConfigBuildError> for CliError {
    fn from(e: ConfigBuildError) -> Self {
        Self::Config(e)
    }
}

impl From<TimestampParseError> for CliError {
    fn from(e: TimestampParseError) -> Self {
        Self::Timestamp(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}\n\n{USAGE}"),
            CliError::Load(e) => write!(f, "cannot load routes: {e}"),
            CliError::Session(e) => write!(f, "{e}"),
            CliError::Config(e) => write!(f, "invalid settings: {e}"),
            CliError::Timestamp(e) => write!(f, "{e}"),
            CliError::Output(e) => write!(f, "cannot write report: {e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Debug, Default)]
struct Args {
    path: String,
    route: String,
    margin: Option<i64>,
    docks: Option<u32>,
    now: Option<Instant>,
    relocation: Option<(Instant, String)>,
    additive: bool,
}

enum Command {
    Analyze(Args),
    Generate { count: usize, seed: u64 },
}

fn value<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<String, CliError> {
    it.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, CliError> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("{flag}: '{raw}' is not a number")))
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Command, CliError> {
    let mut positional = Vec::new();
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--generate" => {
                let count = number(&value(&mut it, "--generate")?, "--generate")?;
                let seed = match it.next() {
                    Some(s) => number(&s, "seed")?,
                    None => 42,
                };
                return Ok(Command::Generate { count, seed });
            }
            "--margin" => args.margin = Some(number(&value(&mut it, "--margin")?, "--margin")?),
            "--docks" => args.docks = Some(number(&value(&mut it, "--docks")?, "--docks")?),
            "--now" => args.now = Some(parse_timestamp(&value(&mut it, "--now")?)?),
            "--move" => {
                let at = parse_timestamp(&value(&mut it, "--move")?)?;
                let dock = value(&mut it, "--move")?;
                args.relocation = Some((at, dock));
            }
            "--additive" => args.additive = true,
            "-h" | "--help" => return Err(CliError::Usage("help requested".to_owned())),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    match (positional.next(), positional.next()) {
        (Some(path), Some(route)) => {
            args.path = path;
            args.route = route;
            Ok(Command::Analyze(args))
        }
        _ => Err(CliError::Usage("expected <routes.json> <route-id>".to_owned())),
    }
}

#[derive(Debug, Serialize)]
struct SlotRow {
    time: String,
    free_docks: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OfferRow {
    dock: String,
    time: String,
    offset_minutes: i64,
}

#[derive(Debug, Serialize)]
struct EntryRow {
    time: String,
    label: String,
    relocated: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    route: String,
    label: String,
    dock: String,
    driver: String,
    phone: String,
    planned_arrival: String,
    planned_departure: String,
    margin_minutes: i64,
    notices: Vec<String>,
    slots: Vec<SlotRow>,
    offers: Vec<OfferRow>,
    schedule: BTreeMap<String, Vec<EntryRow>>,
}

impl Report {
    fn new(analysis: &Analysis, schedule: &Schedule, notices: &[LoadNotice]) -> Self {
        let route = analysis.route();
        Self {
            route: route.id().as_str().to_owned(),
            label: route.label().to_owned(),
            dock: route.dock().to_string(),
            driver: route.driver_name(),
            phone: route.driver_phone().to_owned(),
            planned_arrival: format_timestamp(route.planned_arrival()),
            planned_departure: format_timestamp(route.planned_departure()),
            margin_minutes: analysis.margin().value() / 60,
            notices: notices.iter().map(ToString::to_string).collect(),
            slots: analysis
                .slots()
                .iter()
                .map(|s| SlotRow {
                    time: format_clock(s.time()),
                    free_docks: s.free_docks().iter().map(ToString::to_string).collect(),
                })
                .collect(),
            offers: analysis
                .offers()
                .iter()
                .map(|o| OfferRow {
                    dock: o.dock().to_string(),
                    time: format_clock(o.time()),
                    offset_minutes: o.offset().value() / 60,
                })
                .collect(),
            schedule: schedule
                .iter()
                .map(|(dock, entries)| {
                    let rows = entries
                        .iter()
                        .map(|e| EntryRow {
                            time: format_clock(e.time()),
                            label: e.label().to_owned(),
                            relocated: e.relocated(),
                        })
                        .collect();
                    (dock.to_string(), rows)
                })
                .collect(),
        }
    }
}

fn analyze(args: Args) -> Result<(), CliError> {
    let mut builder = SessionConfig::builder();
    if let Some(m) = args.margin {
        builder = builder.margin_minutes(m);
    }
    if let Some(n) = args.docks {
        builder = builder.dock_count(n);
    }
    if args.additive {
        builder = builder.projection(ProjectionMode::Additive);
    }
    let config = builder.build()?;
    info!(%config, "Starting session");

    let mut session = SchedulingSession::new(config);
    let summary = session.load_path(&args.path)?;
    let id = RouteId::new(args.route);

    if let Some((at, dock)) = &args.relocation {
        let record = session.commit_move(&id, *at, dock)?;
        info!(
            dock = %record.new_dock(),
            at = %format_clock(record.new_arrival()),
            "Move committed"
        );
    }

    let analysis = match args.now {
        Some(now) => session.analyze_at(&id, now)?,
        None => session.analyze(&id)?,
    };
    let report = Report::new(&analysis, &session.schedule(), summary.notices());

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn generate(count: usize, seed: u64) -> Result<(), CliError> {
    let config = RouteGenConfigBuilder::new()
        .route_count(count)
        .seed(seed)
        .build()
        .map_err(|e| CliError::Usage(e.to_string()))?;
    let routes = RouteGenerator::new(config).generate_json();
    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &routes)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();

    let result = parse_args(std::env::args().skip(1)).and_then(|command| match command {
        Command::Analyze(args) => analyze(args),
        Command::Generate { count, seed } => generate(count, seed),
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("{}", CliError::Usage(msg));
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "dock-slot failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Command, CliError> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_analyze_with_options() {
        let Ok(Command::Analyze(a)) = args(&[
            "routes.json",
            "R1",
            "--margin",
            "10",
            "--move",
            "2024-01-01T12:00:00",
            "Dock 2",
        ]) else {
            panic!("expected analyze command");
        };
        assert_eq!(a.path, "routes.json");
        assert_eq!(a.route, "R1");
        assert_eq!(a.margin, Some(10));
        let (at, dock) = a.relocation.unwrap();
        assert_eq!(format_clock(at), "12:00:00");
        assert_eq!(dock, "Dock 2");
    }

    #[test]
    fn test_parse_generate() {
        assert!(matches!(
            args(&["--generate", "25"]),
            Ok(Command::Generate { count: 25, seed: 42 })
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(args(&["routes.json"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["a", "b", "--margin", "x"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["a", "b", "--bogus"]), Err(CliError::Usage(_))));
        assert!(matches!(
            args(&["a", "b", "--now", "noon"]),
            Err(CliError::Timestamp(_))
        ));
    }
}
