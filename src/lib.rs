//! # jeongsan
//!
//! Monthly laundry settlement pipeline: aggregates per-location, per-day
//! laundry-item counts for a calendar month into per-business billing
//! documents — a detailed statement (거래명세서) per business, a consolidated
//! Hometax tax-invoice sheet (세금계산서), and a mail digest distributing both.
//!
//! All monetary values are integer KRW; the supply/tax split is computed with
//! [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use jeongsan::core::*;
//!
//! let directory = EntityDirectory::from_entries([(
//!     "서대문구 연희로4길 25-7",
//!     BusinessIdentity::new("767-87-02214", "주식회사 콥스", "남택호"),
//! )]);
//!
//! let records = vec![
//!     RawRecord::new(
//!         NaiveDate::from_ymd_opt(2026, 7, 3).unwrap(),
//!         "서대문구 연희로4길 25-7",
//!         ItemCounts { blanket: 3, ..ItemCounts::default() },
//!     ),
//!     RawRecord::new(
//!         NaiveDate::from_ymd_opt(2026, 7, 17).unwrap(),
//!         "서대문구 연희로4길 25-7",
//!         ItemCounts { blanket: 2, towel: 5, ..ItemCounts::default() },
//!     ),
//! ];
//!
//! let period = Period::new(2026, 7).unwrap();
//! let businesses = aggregate(records, &directory);
//! let statement = build_statement(
//!     &businesses["767-87-02214"],
//!     period,
//!     &PriceCatalog::standard(),
//! );
//!
//! assert_eq!(statement.grand_total, 37_500);
//! assert_eq!(statement.tax_split(), TaxSplit { supply_amount: 34_090, tax_amount: 3_410 });
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Period, records, price catalog, entity directory, aggregation, statement building |
//! | `filing` | Hometax filing rows + flat-sheet CSV |
//! | `pdf` | Statement PDF rendering via lopdf |
//! | `mail` | Settlement digest composition + transport seam |
//! | `pipeline` | Monthly run orchestration |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "filing")]
pub mod filing;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "mail")]
pub mod mail;

#[cfg(feature = "pipeline")]
pub mod pipeline;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
