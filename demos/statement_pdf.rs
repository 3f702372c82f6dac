//! Render a single statement PDF to a file.

use jeongsan::core::*;
use jeongsan::pdf::render_statement_pdf;

fn main() {
    let mut aggregate = BusinessAggregate::new("123-45-67890", "한강스테이", "박서준");
    aggregate.locations.insert(
        "마포구 월드컵로 10".into(),
        ItemCounts { blanket: 4, towel: 12, pillow_cover: 6, ..ItemCounts::default() },
    );
    aggregate.push_extra(ExtraLineItem::new("커튼 세탁", 1, 20_000));

    let statement = build_statement(
        &aggregate,
        Period::new(2026, 7).unwrap(),
        &PriceCatalog::standard(),
    );
    let supplier = Supplier {
        name: "세탁소".into(),
        registration_id: "000-00-00000".into(),
        owner: "홍길동".into(),
        bank_account: "은행 000-000-000000".into(),
    };

    let bytes = render_statement_pdf(&statement, &supplier).expect("render failed");
    let path = "statement_demo.pdf";
    std::fs::write(path, &bytes).expect("write failed");

    let split = statement.tax_split();
    println!("wrote {path} ({} bytes)", bytes.len());
    println!(
        "합계 {} = 공급가액 {} + 부가세 {}",
        format_krw(statement.grand_total),
        format_krw(split.supply_amount),
        format_krw(split.tax_amount),
    );
}
