//! Statement PDF rendering via lopdf.
//!
//! Lays a [`Statement`] out as an A4, page-oriented document: title, a
//! two-column supplier/customer identity block, one table per location
//! ending in a subtotal row, an optional extras section, the three-row
//! supply/tax/total summary, and the payment-account line. Output bytes are
//! deterministic for identical inputs — nothing time-dependent is embedded.
//!
//! TODO: embed a NotoSansKR subset; the base-14 Helvetica carries no Hangul
//! glyphs, so Korean labels only survive at the byte level for now.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::core::{JeongsanError, Statement, Supplier, format_grouped, format_krw};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_TOP: f32 = 800.0;
const MARGIN_BOTTOM: f32 = 60.0;

/// Item-table column x positions: 품목 / 수량 / 단가 / 금액.
const COLUMNS: [f32; 4] = [60.0, 280.0, 370.0, 470.0];

/// One positioned text run on a page.
struct TextRun {
    x: f32,
    text: String,
}

/// One visual row: its runs, font size, and the vertical space it consumes.
struct Row {
    runs: Vec<TextRun>,
    size: f32,
    advance: f32,
}

impl Row {
    fn single(x: f32, text: impl Into<String>, size: f32, advance: f32) -> Self {
        Self { runs: vec![TextRun { x, text: text.into() }], size, advance }
    }

    fn table(cells: [String; 4], size: f32, advance: f32) -> Self {
        Self {
            runs: COLUMNS
                .iter()
                .zip(cells)
                .map(|(&x, text)| TextRun { x, text })
                .collect(),
            size,
            advance,
        }
    }

    fn gap(advance: f32) -> Self {
        Self { runs: Vec::new(), size: 0.0, advance }
    }
}

/// Render a statement into PDF bytes.
pub fn render_statement_pdf(
    statement: &Statement,
    supplier: &Supplier,
) -> Result<Vec<u8>, JeongsanError> {
    let rows = layout_rows(statement, supplier);
    build_document(&rows)
}

/// Flatten the statement into visual rows, top to bottom.
fn layout_rows(statement: &Statement, supplier: &Supplier) -> Vec<Row> {
    let mut rows = Vec::new();

    // Title
    rows.push(Row::single(
        180.0,
        format!("{} 거래명세서", statement.period.label()),
        18.0,
        32.0,
    ));

    // Supplier / customer identity block, two columns
    let left = 60.0;
    let right = 320.0;
    rows.push(Row {
        runs: vec![
            TextRun { x: left, text: "공급자".into() },
            TextRun { x: right, text: "공급받는자".into() },
        ],
        size: 11.0,
        advance: 16.0,
    });
    for (label, lhs, rhs) in [
        ("상호", &supplier.name, &statement.business_name),
        ("사업자번호", &supplier.registration_id, &statement.registration_id),
        ("대표자", &supplier.owner, &statement.owner_name),
    ] {
        rows.push(Row {
            runs: vec![
                TextRun { x: left, text: format!("{label}: {lhs}") },
                TextRun { x: right, text: format!("{label}: {rhs}") },
            ],
            size: 9.0,
            advance: 13.0,
        });
    }
    rows.push(Row::gap(14.0));

    // Per-location sections
    for (idx, section) in statement.sections.iter().enumerate() {
        rows.push(Row::single(
            60.0,
            format!("[{}] {}", idx + 1, section.location),
            12.0,
            18.0,
        ));
        rows.push(Row::table(
            ["품목".into(), "수량".into(), "단가".into(), "금액".into()],
            9.0,
            13.0,
        ));
        for line in &section.lines {
            rows.push(Row::table(
                [
                    line.name.clone(),
                    format_grouped(i64::from(line.quantity)),
                    format_krw(line.unit_price),
                    format_krw(line.amount),
                ],
                9.0,
                13.0,
            ));
        }
        rows.push(Row::table(
            ["소계".into(), String::new(), String::new(), format_krw(section.subtotal)],
            9.0,
            13.0,
        ));
        rows.push(Row::gap(10.0));
    }

    // Extras section, only when present
    if !statement.extra_items.is_empty() {
        rows.push(Row::single(60.0, "[기타]", 12.0, 18.0));
        rows.push(Row::table(
            ["항목".into(), "수량".into(), "단가".into(), "금액".into()],
            9.0,
            13.0,
        ));
        for extra in &statement.extra_items {
            rows.push(Row::table(
                [
                    extra.name.clone(),
                    format_grouped(i64::from(extra.quantity)),
                    format_krw(extra.unit_price),
                    format_krw(extra.amount),
                ],
                9.0,
                13.0,
            ));
        }
        rows.push(Row::gap(10.0));
    }

    // Summary block
    let split = statement.tax_split();
    for (label, amount) in [
        ("공급가액", split.supply_amount),
        ("부가세", split.tax_amount),
        ("합계", statement.grand_total),
    ] {
        rows.push(Row {
            runs: vec![
                TextRun { x: 60.0, text: label.into() },
                TextRun { x: 470.0, text: format_krw(amount) },
            ],
            size: 11.0,
            advance: 16.0,
        });
    }
    rows.push(Row::gap(12.0));

    // Payment account
    rows.push(Row::single(
        60.0,
        format!("입금계좌: {}", supplier.bank_account),
        10.0,
        14.0,
    ));

    rows
}

/// Assemble rows into pages, breaking when the cursor passes the bottom
/// margin, and serialize the document.
fn build_document(rows: &[Row]) -> Result<Vec<u8>, JeongsanError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });

    let mut page_ids = Vec::new();
    let mut operations: Vec<Operation> = Vec::new();
    let mut y = MARGIN_TOP;

    for row in rows {
        if y - row.advance < MARGIN_BOTTOM && !operations.is_empty() {
            page_ids.push(flush_page(
                &mut doc,
                pages_id,
                resources_id,
                std::mem::take(&mut operations),
            )?);
            y = MARGIN_TOP;
        }
        for run in &row.runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), row.size.into()]));
            operations.push(Operation::new("Td", vec![run.x.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(run.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        y -= row.advance;
    }
    page_ids.push(flush_page(&mut doc, pages_id, resources_id, operations)?);

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| JeongsanError::Render(format!("failed to save PDF: {e}")))?;
    Ok(out)
}

fn flush_page(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    resources_id: lopdf::ObjectId,
    operations: Vec<Operation>,
) -> Result<lopdf::ObjectId, JeongsanError> {
    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| JeongsanError::Render(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    }))
}
