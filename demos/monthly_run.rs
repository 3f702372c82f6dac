//! End-to-end settlement run against an in-memory record source.
//!
//! The mail transport here only prints the composed digest; plug a real SMTP
//! client into [`MailTransport`] for actual delivery.

use chrono::{Local, NaiveDate};
use jeongsan::core::*;
use jeongsan::mail::{MailTransport, MailerConfig, OutboundMessage};
use jeongsan::pipeline::*;

struct InMemorySource(Vec<RawRecord>);

impl RecordSource for InMemorySource {
    fn monthly_records(&self, period: Period) -> Result<Vec<RawRecord>, JeongsanError> {
        let mut records: Vec<RawRecord> = self
            .0
            .iter()
            .filter(|r| r.date >= period.first_day() && r.date <= period.last_day())
            .cloned()
            .collect();
        records.sort_by(|a, b| (&a.location, a.date).cmp(&(&b.location, b.date)));
        Ok(records)
    }
}

struct StdoutTransport;

impl MailTransport for StdoutTransport {
    fn send(&self, message: &OutboundMessage) -> Result<(), JeongsanError> {
        println!("--- {} ---", message.subject);
        println!("{}", message.body);
        for attachment in &message.attachments {
            println!("attachment: {} ({} bytes)", attachment.filename, attachment.bytes.len());
        }
        Ok(())
    }
}

fn main() {
    let directory = EntityDirectory::from_entries([
        ("마포구 월드컵로 10", BusinessIdentity::new("123-45-67890", "한강스테이", "박서준")),
        ("마포구 월드컵로 12", BusinessIdentity::new("123-45-67890", "한강스테이", "박서준")),
        ("용산구 이태원로 55", BusinessIdentity::new("987-65-43210", "서울하우스", "최민지")),
    ]);

    let date = |d: u32| NaiveDate::from_ymd_opt(2026, 7, d).unwrap();
    let source = InMemorySource(vec![
        RawRecord::new(
            date(2),
            "마포구 월드컵로 10",
            ItemCounts { blanket: 4, towel: 12, ..ItemCounts::default() },
        ),
        RawRecord::new(
            date(9),
            "마포구 월드컵로 12",
            ItemCounts { mat: 2, pillow_cover: 6, ..ItemCounts::default() },
        ),
        RawRecord::new(
            date(16),
            "용산구 이태원로 55",
            ItemCounts { blanket: 1, body_towel: 8, ..ItemCounts::default() },
        ),
    ]);

    let config = RunConfig {
        supplier: Supplier {
            name: "세탁소".into(),
            registration_id: "000-00-00000".into(),
            owner: "홍길동".into(),
            bank_account: "은행 000-000-000000".into(),
        },
        directory,
        catalog: PriceCatalog::standard(),
        mailer: MailerConfig {
            from: "billing@example.com".into(),
            to: "owner@example.com".into(),
            password: Some("demo".into()),
        },
        save_dir: RunConfig::save_dir_from_env(),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let period = resolve_period(&args, Local::now().date_naive()).expect("valid period");
    // the demo data lives in 2026-07; fall back to it when the default period is empty
    let period = if args.is_empty() { Period::new(2026, 7).unwrap() } else { period };

    let report = run(&source, &StdoutTransport, &config, period).expect("run failed");
    println!(
        "{}: {} records, {} businesses, total {}",
        report.period.label(),
        report.record_count,
        report.business_count,
        format_krw(report.grand_total),
    );
}
