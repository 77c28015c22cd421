/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;

use crate::error::RecordError;
use crate::interactor::{RecordInteractor, RecordTypeInteractor, RunningRecordInteractor};
use crate::remove::RemoveRecordState;
use crate::settings::Settings;
use crate::statistics::{self, ChartGrouping, ChartLength, StatisticsTarget};
use crate::time_format::{format_date_year_time, format_interval, format_timer};
use crate::types::{Record, RecordId, RecordQuery, RecordType, RecordTypeId};
use crate::{color, db, icon, running};

#[derive(Parser)]
#[command(name = "stt", version, about = "stt - A simple terminal time tracker")]
pub struct Cli {
    /// Path of the SQLite database.
    #[arg(long, env = "STT_DB", global = true)]
    pub db: Option<PathBuf>,
    /// Log level written to the log file (error, warn, info, debug, trace).
    #[arg(long, env = "STT_LOG", global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage record types.
    Type {
        #[command(subcommand)]
        command: TypeCommand,
    },
    /// Start tracking a record type.
    Start {
        name: String,
        #[arg(short = 'c', long = "comment")]
        comment: Option<String>,
    },
    /// Stop a running record type.
    Stop { name: String },
    /// Add a finished record.
    Add {
        name: String,
        #[arg(short = 's', long = "start")]
        start: String,
        #[arg(short = 'e', long = "end")]
        end: String,
        #[arg(short = 'c', long = "comment", default_value = "")]
        comment: String,
    },
    /// List records, optionally for one type.
    Records {
        #[arg(short = 't', long = "type")]
        name: Option<String>,
        /// Only records overlapping this RFC 3339 time or later.
        #[arg(long)]
        since: Option<String>,
        /// Only records overlapping this RFC 3339 time or earlier.
        #[arg(long)]
        until: Option<String>,
    },
    /// Remove a record by id.
    Remove { id: RecordId },
    /// Show statistics for a record type or for untracked time.
    Stats {
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        untracked: bool,
        #[arg(short = 'g', long, value_enum, default_value_t = GroupingArg::Daily)]
        grouping: GroupingArg,
        #[arg(short = 'l', long, value_enum, default_value_t = LengthArg::Ten)]
        length: LengthArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum TypeCommand {
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    List,
    Remove { name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupingArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<GroupingArg> for ChartGrouping {
    fn from(value: GroupingArg) -> Self {
        match value {
            GroupingArg::Daily => ChartGrouping::Daily,
            GroupingArg::Weekly => ChartGrouping::Weekly,
            GroupingArg::Monthly => ChartGrouping::Monthly,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LengthArg {
    #[value(name = "10")]
    Ten,
    #[value(name = "50")]
    Fifty,
    #[value(name = "100")]
    Hundred,
}

impl From<LengthArg> for ChartLength {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::Ten => ChartLength::Ten,
            LengthArg::Fifty => ChartLength::Fifty,
            LengthArg::Hundred => ChartLength::Hundred,
        }
    }
}

/// Execute a CLI command.
pub fn run(command: Command, conn: &Connection) -> Result<()> {
    tracing::debug!(?command, "running command");
    match command {
        Command::Type {
            command: TypeCommand::Add { name, color, icon },
        } => handle_type_add(name, color, icon, conn)?,
        Command::Type {
            command: TypeCommand::List,
        } => handle_type_list(conn)?,
        Command::Type {
            command: TypeCommand::Remove { name },
        } => handle_type_remove(&name, conn)?,
        Command::Start { name, comment } => handle_start(&name, comment, conn)?,
        Command::Stop { name } => handle_stop(&name, conn)?,
        Command::Add {
            name,
            start,
            end,
            comment,
        } => handle_add(&name, &start, &end, comment, conn)?,
        Command::Records { name, since, until } => {
            handle_records(name.as_deref(), since.as_deref(), until.as_deref(), conn)?
        }
        Command::Remove { id } => handle_remove(id, conn)?,
        Command::Stats {
            name,
            untracked,
            grouping,
            length,
        } => handle_stats(name.as_deref(), untracked, grouping.into(), length.into(), conn)?,
    }
    Ok(())
}

fn find_type(name: &str, conn: &Connection) -> Result<Option<RecordType>> {
    let record_type = db::query_record_type_by_name(name, conn)?;
    if record_type.is_none() {
        println!("{}", RecordError::RecordTypeNameNotFound(name.to_string()));
    }
    Ok(record_type)
}

fn handle_type_add(
    name: String,
    color_opt: Option<String>,
    icon_opt: Option<String>,
    conn: &Connection,
) -> Result<()> {
    if db::check_record_type_exists(&name, conn)? {
        println!("{}", RecordError::DuplicateTypeName(name));
        return Ok(());
    }
    let color = match color_opt {
        Some(value) => match color::normalize_hex(&value) {
            Some(color) => color,
            None => {
                println!("{}", RecordError::InvalidColor(value));
                return Ok(());
            }
        },
        None => color::random_color(),
    };
    let icon = match icon_opt {
        Some(value) if !icon::is_known(&value) => {
            println!("{}", RecordError::UnknownIcon(value));
            return Ok(());
        }
        Some(value) => value,
        None => icon::default_icon().to_string(),
    };
    let id = RecordTypeInteractor::add(
        conn,
        &RecordType {
            id: None,
            name: name.clone(),
            icon,
            color,
        },
    )?;
    tracing::info!(id, %name, "record type created");
    println!("Created '{name}'");
    Ok(())
}

fn handle_type_list(conn: &Connection) -> Result<()> {
    let mut record_types = RecordTypeInteractor::get_all(conn)?;
    Settings::load(conn)?.sort_record_types(&mut record_types);
    let running = RunningRecordInteractor::get_all(conn)?;
    let now = Local::now();
    for record_type in record_types {
        let timer = running
            .iter()
            .find(|r| Some(r.type_id) == record_type.id)
            .map(|r| format!("  running {}", format_timer(r.elapsed(now))))
            .unwrap_or_default();
        println!(
            "{} {} {}{timer}",
            icon::glyph(&record_type.icon),
            record_type.name,
            record_type.color
        );
    }
    Ok(())
}

fn handle_type_remove(name: &str, conn: &Connection) -> Result<()> {
    let Some(record_type) = find_type(name, conn)? else {
        return Ok(());
    };
    if let Some(id) = record_type.id {
        db::delete_record_type(id, conn)?;
        tracing::info!(id, name, "record type removed");
        println!("Removed '{name}' and its records");
    }
    Ok(())
}

fn handle_start(name: &str, comment: Option<String>, conn: &Connection) -> Result<()> {
    let Some(RecordType { id: Some(id), .. }) = find_type(name, conn)? else {
        return Ok(());
    };
    let now = Local::now();
    if !running::start(conn, id, now)? {
        println!("{}", RecordError::AlreadyRunning(name.to_string()));
        return Ok(());
    }
    if let Some(comment) = comment {
        let mut edit = running::ChangeRunningRecord::open(conn, id)?;
        edit.change_comment(comment);
        edit.save(conn, now)?;
    }
    println!("Started '{name}'");
    Ok(())
}

fn handle_stop(name: &str, conn: &Connection) -> Result<()> {
    let Some(RecordType { id: Some(id), .. }) = find_type(name, conn)? else {
        return Ok(());
    };
    match running::stop(conn, id, Local::now()) {
        Ok(record) => println!("Stopped '{name}' after {}", format_interval(record.duration())),
        Err(err) => match err.downcast_ref::<RecordError>() {
            Some(domain) => println!("{domain}"),
            None => return Err(err),
        },
    }
    Ok(())
}

fn handle_add(
    name: &str,
    start: &str,
    end: &str,
    comment: String,
    conn: &Connection,
) -> Result<()> {
    let Some(RecordType { id: Some(type_id), .. }) = find_type(name, conn)? else {
        return Ok(());
    };
    let time_started = parse_datetime(start)?;
    let time_ended = parse_datetime(end)?;
    if time_ended < time_started {
        println!("{}", RecordError::InvalidTimeRange);
        return Ok(());
    }
    let id = RecordInteractor::add(
        conn,
        &Record {
            id: None,
            type_id,
            time_started,
            time_ended,
            comment,
        },
    )?;
    tracing::info!(id, type_id, "record added");
    println!("Added record {id}");
    Ok(())
}

fn handle_records(
    name: Option<&str>,
    since: Option<&str>,
    until: Option<&str>,
    conn: &Connection,
) -> Result<()> {
    let type_id = match name {
        Some(name) => {
            let Some(RecordType { id: Some(type_id), .. }) = find_type(name, conn)? else {
                return Ok(());
            };
            Some(type_id)
        }
        None => None,
    };
    let since = since.map(parse_datetime).transpose()?;
    let until = until.map(parse_datetime).transpose()?;
    let records = select_records(type_id, since, until, conn)?;
    let record_types = RecordTypeInteractor::get_all(conn)?;
    for record in records {
        let type_name = record_types
            .iter()
            .find(|t| t.id == Some(record.type_id))
            .map(|t| t.name.as_str())
            .unwrap_or_default();
        println!(
            "{:>5}  {:<16} {} -> {}  {}{}",
            record.id.unwrap_or_default(),
            type_name,
            format_date_year_time(record.time_started),
            format_date_year_time(record.time_ended),
            format_interval(record.duration()),
            if record.comment.is_empty() {
                String::new()
            } else {
                format!("  ({})", record.comment)
            }
        );
    }
    Ok(())
}

/// Records of one type (or all), keeping those that overlap the range when
/// either bound is given. A missing upper bound means now.
fn select_records(
    type_id: Option<RecordTypeId>,
    since: Option<DateTime<Local>>,
    until: Option<DateTime<Local>>,
    conn: &Connection,
) -> Result<Vec<Record>> {
    let mut records = if since.is_some() || until.is_some() {
        db::query_records(
            RecordQuery::ByTimeRange(since.unwrap_or_default(), until.unwrap_or_else(Local::now)),
            conn,
        )?
    } else {
        RecordInteractor::get_all(conn)?
    };
    if let Some(type_id) = type_id {
        records.retain(|record| record.type_id == type_id);
    }
    Ok(records)
}

fn handle_remove(id: RecordId, conn: &Connection) -> Result<()> {
    if RecordInteractor::get(conn, id)?.is_none() {
        println!("{}", RecordError::RecordNotFound(id));
        return Ok(());
    }
    let mut state = RemoveRecordState::default();
    state.prepare(Some(id));
    state.on_delete_click(conn)?;
    if let Some(message) = &state.message {
        println!("{}", message.text);
    }
    Ok(())
}

fn handle_stats(
    name: Option<&str>,
    untracked: bool,
    grouping: ChartGrouping,
    length: ChartLength,
    conn: &Connection,
) -> Result<()> {
    let target = if untracked {
        StatisticsTarget::Untracked
    } else {
        let Some(name) = name else {
            println!("Give a record type name or --untracked");
            return Ok(());
        };
        let Some(RecordType { id: Some(type_id), .. }) = find_type(name, conn)? else {
            return Ok(());
        };
        StatisticsTarget::RecordType(type_id)
    };

    let settings = Settings::load(conn)?;
    let detail = statistics::load_detail(conn, target, grouping, length, &settings, Local::now())?;
    let view = &detail.view;
    println!("{} {}", icon::glyph(&view.icon), view.name);
    for (label, value) in [
        ("Total", &view.total_duration),
        ("Records", &view.times_tracked),
        ("Shortest", &view.shortest_record),
        ("Average", &view.average_record),
        ("Longest", &view.longest_record),
        ("First", &view.first_record),
        ("Last", &view.last_record),
    ] {
        if !value.is_empty() {
            println!("  {label:<9}{value}");
        }
    }
    let values = detail
        .chart
        .data
        .iter()
        .map(|value| format!("{value:.1}"))
        .collect::<Vec<_>>();
    println!("  Chart ({}): {}", detail.chart.legend_suffix, values.join(" "));
    Ok(())
}

fn parse_datetime(value: &str) -> Result<DateTime<Local>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Local))
}
