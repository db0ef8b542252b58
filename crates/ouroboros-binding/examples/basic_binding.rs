//! Basic Binding Example
//!
//! Binds a query string into a nested record, registers a custom rule, and
//! prints the errors produced by bad input.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-binding --example basic_binding
//! ```

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use ouroboros_binding::{Bindable, BindResult, FnRule, RawData, RuleError, Schema, Validator};

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Default)]
struct Paging {
    page: u32,
    per_page: u32,
}

#[derive(Debug, Default)]
struct Search {
    paging: Paging,
    query: String,
    since: DateTime<Utc>,
    interval: String,
    include_archived: bool,
}

impl Bindable for Paging {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<Paging>> = Lazy::new(|| {
            Schema::<Paging>::builder("Paging")
                .field("page", |p: &mut Paging| &mut p.page, |f| {
                    f.data_key("page").rules("unsigned")
                })
                .field("per_page", |p: &mut Paging| &mut p.per_page, |f| {
                    f.data_key("per_page").rules("unsigned")
                })
                .build()
        });
        &SCHEMA
    }
}

impl Bindable for Search {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<Search>> = Lazy::new(|| {
            Schema::<Search>::builder("Search")
                .nested("paging", |s: &mut Search| &mut s.paging)
                .field("query", |s: &mut Search| &mut s.query, |f| {
                    f.data_key("q").rules("required")
                })
                .field("since", |s: &mut Search| &mut s.since, |f| {
                    f.data_key("since").rules("time")
                })
                .field("interval", |s: &mut Search| &mut s.interval, |f| {
                    f.data_key("interval").rules("interval")
                })
                .field("include_archived", |s: &mut Search| &mut s.include_archived, |f| {
                    f.data_key("archived")
                })
                .build()
        });
        &SCHEMA
    }
}

fn build_validator() -> BindResult<Validator> {
    let mut validator = Validator::new();
    validator.register_rule(
        "interval",
        FnRule::new(|key, data, _| match data.get(key) {
            None | Some("minute" | "hour" | "day") => Ok(()),
            Some(other) => Err(RuleError::constraint(
                key,
                format!("'{}' is not one of minute/hour/day", other),
            )),
        }),
    )?;
    Ok(validator)
}

fn main() -> BindResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Basic Binding Example");
    println!("=====================\n");

    let validator = build_validator()?;

    let data = RawData::from_query(
        "q=rust+binding&page=2&per_page=50&since=2019-08-21T09:00:00Z&interval=day&archived=1",
    );
    let mut search = Search::default();
    validator.validate_and_bind(&data, &mut search)?;
    println!("Bound: {:#?}\n", search);

    for query in [
        "page=2",
        "q=x&page=-1",
        "q=x&since=yesterday",
        "q=x&interval=week",
        "q=x&archived=maybe",
    ] {
        let mut search = Search::default();
        match validator.validate_and_bind(&RawData::from_query(query), &mut search) {
            Ok(()) => println!("  {:<24} ok", query),
            Err(e) => println!(
                "  {:<24} {} at {}: {}",
                query,
                e.kind(),
                e.field_path().unwrap_or_default(),
                e
            ),
        }
    }

    Ok(())
}
