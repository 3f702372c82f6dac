use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::JeongsanError;

/// Divisor for the tax-inclusive split. KRW totals carry 10% VAT, so the
/// supply amount is `floor(total / 1.1)`. A rate change means changing this
/// one constant; the floor policy itself must stay, since the downstream
/// filing system depends on it bit-exactly.
pub const TAX_DIVISOR: Decimal = dec!(1.1);

/// A settlement period — one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Create a period, rejecting out-of-range months.
    pub fn new(year: i32, month: u32) -> Result<Self, JeongsanError> {
        if !(1..=12).contains(&month) {
            return Err(JeongsanError::Period(format!(
                "month must be 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The calendar month preceding `date`'s month.
    pub fn preceding(date: NaiveDate) -> Self {
        if date.month() == 1 {
            Self { year: date.year() - 1, month: 12 }
        } else {
            Self { year: date.year(), month: date.month() - 1 }
        }
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Last calendar day of the period.
    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1).unwrap().pred_opt().unwrap()
    }

    /// Flat 8-digit filing date (`YYYYMMDD` of the last day, no separators).
    /// This literal encoding is what the Hometax bulk upload expects.
    pub fn filing_date(&self) -> String {
        self.last_day().format("%Y%m%d").to_string()
    }

    /// Display label, e.g. `2026년 7월`.
    pub fn label(&self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }
}

/// The five laundry item kinds, in catalog declaration order.
///
/// Statement lines iterate kinds in this order. Because records carry counts
/// per kind as typed fields, a record item kind missing from the price
/// catalog is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// 이불
    Blanket,
    /// 요
    Mat,
    /// 베개커버
    PillowCover,
    /// 수건
    Towel,
    /// 바디타월
    BodyTowel,
}

impl ItemKind {
    /// All kinds in fixed declaration order.
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Blanket,
        ItemKind::Mat,
        ItemKind::PillowCover,
        ItemKind::Towel,
        ItemKind::BodyTowel,
    ];

    /// Stable snake_case key, matching the record store's column names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Blanket => "blanket",
            Self::Mat => "mat",
            Self::PillowCover => "pillow_cover",
            Self::Towel => "towel",
            Self::BodyTowel => "body_towel",
        }
    }

    /// Parse from a record store column name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "blanket" => Some(Self::Blanket),
            "mat" => Some(Self::Mat),
            "pillow_cover" => Some(Self::PillowCover),
            "towel" => Some(Self::Towel),
            "body_towel" => Some(Self::BodyTowel),
            _ => None,
        }
    }
}

/// Per-kind item counts. Nullable store columns are resolved to zero at the
/// data-source boundary, so counts are plain non-negative integers here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    pub blanket: u32,
    pub mat: u32,
    pub pillow_cover: u32,
    pub towel: u32,
    pub body_towel: u32,
}

impl ItemCounts {
    pub fn get(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Blanket => self.blanket,
            ItemKind::Mat => self.mat,
            ItemKind::PillowCover => self.pillow_cover,
            ItemKind::Towel => self.towel,
            ItemKind::BodyTowel => self.body_towel,
        }
    }

    pub fn add(&mut self, kind: ItemKind, count: u32) {
        match kind {
            ItemKind::Blanket => self.blanket += count,
            ItemKind::Mat => self.mat += count,
            ItemKind::PillowCover => self.pillow_cover += count,
            ItemKind::Towel => self.towel += count,
            ItemKind::BodyTowel => self.body_towel += count,
        }
    }

    /// Add every kind's count from `other` into `self`. Pure summation — no
    /// overwrite, no dedup.
    pub fn merge(&mut self, other: &ItemCounts) {
        for kind in ItemKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    pub fn is_empty(&self) -> bool {
        ItemKind::ALL.iter().all(|&k| self.get(k) == 0)
    }
}

/// One raw dated record from the store: item counts for one location on one
/// day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub location: String,
    pub counts: ItemCounts,
}

impl RawRecord {
    pub fn new(date: NaiveDate, location: impl Into<String>, counts: ItemCounts) -> Self {
        Self { date, location: location.into(), counts }
    }
}

/// A free-form line outside the catalog (e.g. a one-off pickup charge),
/// appended to a business's statement in a separate section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
    /// Always `quantity × unit_price`; fixed by the constructor and summed
    /// as given downstream.
    pub amount: i64,
}

impl ExtraLineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            amount: i64::from(quantity) * unit_price,
        }
    }
}

/// Everything aggregated for one business entity in one period: per-location
/// summed counts (first-seen location order) plus any extra line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessAggregate {
    /// Business registration id as registered (separators kept).
    pub registration_id: String,
    /// 상호 (business display name).
    pub name: String,
    /// 대표자 (owner name).
    pub owner: String,
    /// location → summed counts, iterated in first-seen order.
    pub locations: IndexMap<String, ItemCounts>,
    pub extra_items: Vec<ExtraLineItem>,
}

impl BusinessAggregate {
    pub fn new(
        registration_id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            name: name.into(),
            owner: owner.into(),
            locations: IndexMap::new(),
            extra_items: Vec::new(),
        }
    }

    pub fn push_extra(&mut self, item: ExtraLineItem) {
        self.extra_items.push(item);
    }

    /// Registration id with all non-digit separators stripped, as the filing
    /// upload requires.
    pub fn normalized_registration_id(&self) -> String {
        self.registration_id.chars().filter(char::is_ascii_digit).collect()
    }
}

/// Supplier identity and payment details printed on every statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// 상호.
    pub name: String,
    /// 사업자번호, separators kept for display.
    pub registration_id: String,
    /// 대표자.
    pub owner: String,
    /// 입금계좌 line, printed verbatim.
    pub bank_account: String,
}

/// Tax-inclusive total decomposed into supply amount (공급가액) and tax
/// amount (부가세). A pure derived view of a grand total, never stored
/// alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub supply_amount: i64,
    pub tax_amount: i64,
}

impl TaxSplit {
    /// Split a tax-inclusive grand total.
    ///
    /// `supply_amount = floor(grand_total / 1.1)` with exact decimal
    /// division — truncation is always downward on the supply side, never
    /// bankers' rounding. `tax_amount` takes the remainder, so the two parts
    /// always sum back to `grand_total` exactly.
    pub fn of(grand_total: i64) -> Self {
        let supply_amount = (Decimal::from(grand_total) / TAX_DIVISOR)
            .floor()
            .to_i64()
            .expect("quotient magnitude is bounded by grand_total");
        Self { supply_amount, tax_amount: grand_total - supply_amount }
    }
}

/// Thousands-grouped integer, e.g. `37500` → `37,500`.
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency rendering: thousands-grouped KRW with the `원` suffix.
pub fn format_krw(value: i64) -> String {
    format!("{}원", format_grouped(value))
}
