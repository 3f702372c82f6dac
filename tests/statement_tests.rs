use chrono::NaiveDate;
use jeongsan::core::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
}

fn directory() -> EntityDirectory {
    EntityDirectory::from_entries([(
        "관악구 신림동1길 19-5",
        BusinessIdentity::new("461-86-03598", "주식회사스테이모먼트", "유경민"),
    )])
}

fn period() -> Period {
    Period::new(2026, 7).unwrap()
}

/// Two records for the same mapped location: blanket 3, then blanket 2 +
/// towel 5. Bucket sums to {blanket 5, towel 5}; at 6,500/1,000 the subtotal
/// is 37,500, split 34,090 + 3,410.
#[test]
fn worked_settlement_scenario() {
    let records = vec![
        RawRecord::new(
            date(3),
            "관악구 신림동1길 19-5",
            ItemCounts { blanket: 3, ..ItemCounts::default() },
        ),
        RawRecord::new(
            date(21),
            "관악구 신림동1길 19-5",
            ItemCounts { blanket: 2, towel: 5, ..ItemCounts::default() },
        ),
    ];

    let businesses = aggregate(records, &directory());
    let statement =
        build_statement(&businesses["461-86-03598"], period(), &PriceCatalog::standard());

    assert_eq!(statement.sections.len(), 1);
    assert_eq!(statement.sections[0].subtotal, 37_500);
    assert_eq!(statement.grand_total, 37_500);
    assert_eq!(
        statement.tax_split(),
        TaxSplit { supply_amount: 34_090, tax_amount: 3_410 }
    );
}

#[test]
fn lines_follow_catalog_declaration_order() {
    let mut aggregate = BusinessAggregate::new("461-86-03598", "주식회사스테이모먼트", "유경민");
    aggregate.locations.insert(
        "관악구 신림동1길 19-5".into(),
        ItemCounts { body_towel: 2, blanket: 1, towel: 3, ..ItemCounts::default() },
    );

    let statement = build_statement(&aggregate, period(), &PriceCatalog::standard());
    let names: Vec<_> = statement.sections[0].lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["이불", "수건", "바디타월"]);
}

#[test]
fn totals_reconcile() {
    let mut aggregate = BusinessAggregate::new("461-86-03598", "주식회사스테이모먼트", "유경민");
    aggregate.locations.insert(
        "숙소 A".into(),
        ItemCounts { blanket: 4, mat: 2, pillow_cover: 6, ..ItemCounts::default() },
    );
    aggregate.locations.insert(
        "숙소 B".into(),
        ItemCounts { towel: 30, body_towel: 10, ..ItemCounts::default() },
    );
    aggregate.push_extra(ExtraLineItem::new("특수 세탁", 2, 8_000));

    let statement = build_statement(&aggregate, period(), &PriceCatalog::standard());

    let subtotal_sum: i64 = statement.sections.iter().map(|s| s.subtotal).sum();
    let extras_sum: i64 = statement.extra_items.iter().map(|e| e.amount).sum();
    assert_eq!(subtotal_sum + extras_sum, statement.grand_total);

    let split = statement.tax_split();
    assert_eq!(split.supply_amount + split.tax_amount, statement.grand_total);

    // every line reconciles independently
    for section in &statement.sections {
        let line_sum: i64 = section.lines.iter().map(|l| l.amount).sum();
        assert_eq!(line_sum, section.subtotal);
        for line in &section.lines {
            assert_eq!(line.amount, i64::from(line.quantity) * line.unit_price);
        }
    }
}

#[test]
fn sections_keep_first_seen_location_order() {
    let mut aggregate = BusinessAggregate::new("461-86-03598", "주식회사스테이모먼트", "유경민");
    for name in ["숙소 셋", "숙소 하나", "숙소 둘"] {
        aggregate
            .locations
            .insert(name.into(), ItemCounts { towel: 1, ..ItemCounts::default() });
    }

    let statement = build_statement(&aggregate, period(), &PriceCatalog::standard());
    let order: Vec<_> = statement.sections.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(order, vec!["숙소 셋", "숙소 하나", "숙소 둘"]);
}

#[test]
fn identical_aggregates_build_identical_statements() {
    let mut aggregate = BusinessAggregate::new("461-86-03598", "주식회사스테이모먼트", "유경민");
    aggregate.locations.insert(
        "숙소 A".into(),
        ItemCounts { blanket: 2, ..ItemCounts::default() },
    );

    let a = build_statement(&aggregate, period(), &PriceCatalog::standard());
    let b = build_statement(&aggregate, period(), &PriceCatalog::standard());
    assert_eq!(a, b);
}
