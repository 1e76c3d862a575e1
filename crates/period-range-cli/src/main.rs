mod logging;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use period_range::input::{format_instant, now_in, parse_instant, parse_timezone};
use period_range::{
    resolve_with_options, CalendarUnit, DateRange, PeriodFilter, PeriodQuery, ResolveOptions,
    Shortcut, WeekStartDay, DEFAULT_PERIOD_COLUMN,
};

#[derive(Parser)]
#[command(name = "periods", version)]
#[command(about = "Resolve relative period filters into inclusive date ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reference instant (RFC 3339, or a wall-clock time in --timezone). Defaults to now.
    #[arg(long, global = true)]
    now: Option<String>,

    /// IANA timezone whose calendar the range is aligned to
    #[arg(long, global = true, default_value = "UTC")]
    timezone: String,

    /// First day of the week for week ranges
    #[arg(long, global = true, value_enum, default_value_t = WeekStart::Monday)]
    week_start: WeekStart,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// First day of the week.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum WeekStart {
    /// ISO 8601 weeks
    #[default]
    #[value(alias = "mon")]
    Monday,
    /// US/Canada weeks
    #[value(alias = "sun")]
    Sunday,
}

impl From<WeekStart> for WeekStartDay {
    fn from(day: WeekStart) -> Self {
        match day {
            WeekStart::Monday => WeekStartDay::Monday,
            WeekStart::Sunday => WeekStartDay::Sunday,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resolve N periods of a unit; negative counts look into the past
    Range {
        /// minute, hour, day, week, month or year
        unit: String,

        /// Signed number of periods
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// Also include the period that contains the reference instant
        #[arg(long)]
        include_current: bool,
    },

    /// Resolve a named shortcut such as today, lastMonth or nextWeek
    Shortcut {
        /// Shortcut name
        name: String,
    },

    /// Resolve a JSON filter, e.g. '{"unit":"week","count":-2,"column":"seen_at"}'
    Filter {
        /// Filter as JSON
        json: String,
    },

    /// List every shortcut name
    Shortcuts,
}

#[derive(Serialize)]
struct RangeOutput {
    unit: CalendarUnit,
    count: i64,
    include_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortcut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<String>,
    timezone: String,
    start: String,
    end: String,
}

impl RangeOutput {
    fn new(query: &PeriodQuery, range: &DateRange<Tz>, timezone: &Tz) -> Self {
        Self {
            unit: query.unit,
            count: query.count,
            include_current: query.include_current,
            shortcut: None,
            column: None,
            timezone: timezone.name().to_string(),
            start: format_instant(range.start()),
            end: format_instant(range.end()),
        }
    }
}

#[derive(Serialize)]
struct ShortcutEntry {
    name: String,
    #[serde(flatten)]
    query: PeriodQuery,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let tz = parse_timezone(&cli.timezone)?;
    let options = ResolveOptions {
        week_start: cli.week_start.into(),
    };
    let now = reference_instant(cli.now.as_deref(), &tz)?;
    tracing::debug!(now = %format_instant(&now), timezone = %tz.name(), "reference instant");

    let output = match cli.command {
        Command::Range {
            unit,
            count,
            include_current,
        } => {
            let unit: CalendarUnit = unit.parse()?;
            let query = PeriodQuery::new(unit, count, include_current);
            let range = resolve_with_options(&query, &now, &options);
            serde_json::to_string_pretty(&RangeOutput::new(&query, &range, &tz))?
        }
        Command::Shortcut { name } => {
            let shortcut: Shortcut = name.parse()?;
            let query = shortcut.query();
            let range = shortcut.resolve(&now, &options);
            let mut output = RangeOutput::new(&query, &range, &tz);
            output.shortcut = Some(shortcut.name());
            serde_json::to_string_pretty(&output)?
        }
        Command::Filter { json } => {
            let filter: PeriodFilter =
                serde_json::from_str(&json).context("failed to parse filter JSON")?;
            let predicate = filter.predicate(&now, &options, DEFAULT_PERIOD_COLUMN);
            let mut output = RangeOutput::new(&filter.query(), &predicate.range, &tz);
            output.column = Some(predicate.column);
            serde_json::to_string_pretty(&output)?
        }
        Command::Shortcuts => {
            let entries: Vec<ShortcutEntry> = Shortcut::all()
                .map(|shortcut| ShortcutEntry {
                    name: shortcut.name(),
                    query: shortcut.query(),
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };

    println!("{output}");
    Ok(())
}

fn reference_instant(now: Option<&str>, tz: &Tz) -> Result<DateTime<Tz>> {
    match now {
        Some(s) => parse_instant(s, tz).context("invalid --now"),
        None => Ok(now_in(tz)),
    }
}
