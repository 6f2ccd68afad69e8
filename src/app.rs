//! Command dispatch and the poll cycle.

use chrono::Local;

use crate::cli::{Cli, Commands, Settings};
use crate::error::AppError;
use crate::fritz::{self, FritzClient, MetricTable, Sid};
use crate::ledger;
use crate::output;
use crate::report::DayReport;
use crate::utils::{debug_enabled, parse_date};

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let settings = cli.settings()?;
    match &cli.command {
        Some(Commands::Poll) => poll(&settings),
        Some(Commands::Report { date }) => report(&settings, date.as_deref(), cli.json),
        Some(Commands::Show) | None => show(&settings, cli.json),
    }
}

/// Run `body` inside an authenticated session and release the session on
/// every exit path. A failed logout becomes a warning once the cycle's
/// primary result is fixed; it never replaces that result.
fn with_session<T>(
    client: &FritzClient,
    settings: &Settings,
    body: impl FnOnce(&Sid) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let password = settings.require_password()?;
    let sid = fritz::authenticate(client, &settings.user, password)?;
    let result = body(&sid);
    if let Err(err) = fritz::logout(client, &sid) {
        eprintln!("Warning: logout failed: {err}");
    }
    result
}

fn show(settings: &Settings, json: bool) -> Result<(), AppError> {
    let client = FritzClient::new(&settings.host, settings.timeout);
    let table = MetricTable::new(settings.error_columns);
    let stats = with_session(&client, settings, |sid| {
        fritz::fetch_stats(&client, sid, &table)
    })?;

    if json {
        println!("{}", output::stats_json(&stats));
    } else {
        output::print_stats_table(&stats);
    }
    Ok(())
}

/// One full cycle: authenticate, scrape, append. Quiet on success so it
/// can run from cron or a systemd timer without chatter.
fn poll(settings: &Settings) -> Result<(), AppError> {
    let client = FritzClient::new(&settings.host, settings.timeout);
    let table = MetricTable::new(settings.error_columns);
    let path = with_session(&client, settings, |sid| {
        let stats = fritz::fetch_stats(&client, sid, &table)?;
        Ok(ledger::append(&settings.dir, &stats, Local::now())?)
    })?;

    if debug_enabled() {
        eprintln!("appended to {}", path.display());
    }
    Ok(())
}

fn report(settings: &Settings, date: Option<&str>, json: bool) -> Result<(), AppError> {
    let date = match date {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let log = ledger::read_day(&settings.dir, date)?;
    if debug_enabled() {
        eprintln!("read {} ({} rows)", log.path.display(), log.rows.len());
    }
    match DayReport::build(&log)? {
        Some(report) => {
            if json {
                println!("{}", output::report_json(&report));
            } else {
                output::print_report_table(&report);
            }
        }
        None => println!("No samples recorded for {date}."),
    }
    Ok(())
}
