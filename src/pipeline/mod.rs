//! Monthly run orchestration.
//!
//! Resolves the target period, pulls the month's records, aggregates them,
//! renders one statement PDF per business plus the filing sheet, optionally
//! dumps everything to a local directory, and attempts one digest delivery.
//! Single-threaded and fully in-memory; nothing survives the run.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::core::{
    EntityDirectory, JeongsanError, Period, PriceCatalog, RawRecord, Supplier, aggregate,
    build_statement,
};
use crate::filing::{aggregate_total, build_filing_rows, to_sheet_csv};
use crate::mail::{Attachment, MailTransport, MailerConfig, notify};
use crate::pdf::render_statement_pdf;

/// The queryable record store — an external collaborator.
///
/// Implementations return every record whose date falls in the period,
/// ordered by (location, date) ascending; the aggregator relies on that
/// convention for a stable statement layout. One fallible single-shot call,
/// no retry inside the pipeline.
pub trait RecordSource {
    fn monthly_records(&self, period: Period) -> Result<Vec<RawRecord>, JeongsanError>;
}

/// Static configuration for a run, loaded once at process start.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub supplier: Supplier,
    pub directory: EntityDirectory,
    pub catalog: PriceCatalog,
    pub mailer: MailerConfig,
    /// When set, all generated attachments are also written to a per-period
    /// subdirectory — a debugging aid only.
    pub save_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Populate `save_dir` from the `SAVE_LOCAL` environment toggle (any
    /// non-empty value names the base directory).
    pub fn save_dir_from_env() -> Option<PathBuf> {
        std::env::var("SAVE_LOCAL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

/// What a run did, reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub period: Period,
    pub record_count: usize,
    pub business_count: usize,
    pub grand_total: i64,
    pub attachment_names: Vec<String>,
    pub mailed: bool,
}

impl RunReport {
    /// True when the period had no records and the run exited cleanly with
    /// zero documents.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Resolve the target period: two positional (year, month) arguments
/// override; the default is the calendar month before `today`.
pub fn resolve_period(args: &[String], today: chrono::NaiveDate) -> Result<Period, JeongsanError> {
    match args {
        [year, month, ..] => {
            let year = year
                .parse::<i32>()
                .map_err(|_| JeongsanError::Period(format!("invalid year: {year}")))?;
            let month = month
                .parse::<u32>()
                .map_err(|_| JeongsanError::Period(format!("invalid month: {month}")))?;
            Period::new(year, month)
        }
        _ => Ok(Period::preceding(today)),
    }
}

/// Statement attachment name: `{y}년_{m}월_거래명세서_{business}.pdf`.
pub fn statement_filename(period: Period, business_name: &str) -> String {
    format!(
        "{}년_{}월_거래명세서_{}.pdf",
        period.year,
        period.month,
        business_name.replace(' ', "_")
    )
}

/// Filing sheet attachment name: `홈택스_세금계산서_{y}년{m}월.csv`.
pub fn sheet_filename(period: Period) -> String {
    format!("홈택스_세금계산서_{}년{}월.csv", period.year, period.month)
}

/// Execute one settlement run for `period`.
///
/// An empty period terminates early and cleanly: zero documents, notifier
/// not invoked, `RunReport::is_empty()` true. Document generation always
/// completes before the single notification attempt, so a transport failure
/// never loses documents (they are still persisted when `save_dir` is set).
pub fn run(
    source: &dyn RecordSource,
    transport: &dyn MailTransport,
    config: &RunConfig,
    period: Period,
) -> Result<RunReport, JeongsanError> {
    info!("=== {} 세탁물 정산 ===", period.label());

    let records = source.monthly_records(period)?;
    if records.is_empty() {
        info!("no records for {}, nothing to do", period.label());
        return Ok(RunReport {
            period,
            record_count: 0,
            business_count: 0,
            grand_total: 0,
            attachment_names: Vec::new(),
            mailed: false,
        });
    }
    let record_count = records.len();
    info!("{record_count} records fetched");

    let businesses = aggregate(records, &config.directory);
    let business_count = businesses.len();
    info!("{business_count} businesses aggregated");

    let mut attachments = Vec::with_capacity(business_count + 1);
    let mut grand_total: i64 = 0;

    for business in businesses.values() {
        let statement = build_statement(business, period, &config.catalog);
        grand_total += statement.grand_total;
        let bytes = render_statement_pdf(&statement, &config.supplier)?;
        attachments.push(Attachment::new(statement_filename(period, &business.name), bytes));
    }

    let rows = build_filing_rows(&businesses, period, &config.catalog);
    attachments.push(Attachment::new(
        sheet_filename(period),
        to_sheet_csv(&rows).into_bytes(),
    ));

    debug_assert_eq!(
        grand_total,
        businesses.values().map(|b| aggregate_total(b, &config.catalog)).sum::<i64>()
    );

    if let Some(base) = &config.save_dir {
        persist_locally(base, period, &attachments)?;
    }

    let attachment_names: Vec<String> =
        attachments.iter().map(|a| a.filename.clone()).collect();

    let mailed = notify(
        &config.mailer,
        transport,
        &config.supplier.name,
        period,
        business_count,
        grand_total,
        attachments,
    );

    Ok(RunReport {
        period,
        record_count,
        business_count,
        grand_total,
        attachment_names,
        mailed,
    })
}

/// Write every attachment into `{base}/invoice_{year}_{month}/`.
fn persist_locally(
    base: &Path,
    period: Period,
    attachments: &[Attachment],
) -> Result<(), JeongsanError> {
    let dir = base.join(format!("invoice_{}_{}", period.year, period.month));
    fs::create_dir_all(&dir)?;
    for attachment in attachments {
        fs::write(dir.join(&attachment.filename), &attachment.bytes)?;
    }
    info!("attachments saved to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn resolve_period_defaults_to_prior_month() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let period = resolve_period(&[], today).unwrap();
        assert_eq!(period, Period::new(2026, 7).unwrap());
    }

    #[test]
    fn resolve_period_honors_override() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let args = vec!["2026".to_string(), "3".to_string()];
        assert_eq!(resolve_period(&args, today).unwrap(), Period::new(2026, 3).unwrap());
    }

    #[test]
    fn resolve_period_rejects_garbage() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let args = vec!["twenty".to_string(), "3".to_string()];
        assert!(resolve_period(&args, today).is_err());
    }

    #[test]
    fn filenames() {
        let period = Period::new(2026, 7).unwrap();
        assert_eq!(
            statement_filename(period, "주식회사 콥스"),
            "2026년_7월_거래명세서_주식회사_콥스.pdf"
        );
        assert_eq!(sheet_filename(period), "홈택스_세금계산서_2026년7월.csv");
    }
}
