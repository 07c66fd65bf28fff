use chrono::{NaiveDate, NaiveDateTime};
use named_constructor::{Record, Value};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a record from `(column, value)` pairs, keys taken as given
pub fn record<const N: usize>(columns: [(&str, Value); N]) -> Record {
    columns.into_iter().collect()
}

#[must_use]
pub fn timestamp(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Rows of `single_table(id, foo, bar)`, absent cells as nulls
#[must_use]
pub fn single_table() -> Vec<Record> {
    vec![
        record([("id", 1i64.into()), ("foo", "fff".into()), ("bar", 42i64.into())]),
        record([("id", 2i64.into()), ("foo", "nnn".into()), ("bar", Value::Null)]),
        record([("id", 3i64.into()), ("foo", Value::Null), ("bar", 43i64.into())]),
    ]
}

/// Rows of `subclasses_table(id, discriminator_col, common_col, foo_col, bar_col)`
#[must_use]
pub fn subclasses_table() -> Vec<Record> {
    vec![
        record([
            ("id", 1i64.into()),
            ("discriminator_col", "Foo".into()),
            ("common_col", "fff".into()),
            ("foo_col", 42i64.into()),
            ("bar_col", Value::Null),
        ]),
        record([
            ("id", 2i64.into()),
            ("discriminator_col", "Bar".into()),
            ("common_col", "bbb".into()),
            ("foo_col", Value::Null),
            ("bar_col", timestamp("2012-01-01").into()),
        ]),
        record([
            ("id", 3i64.into()),
            ("discriminator_col", "Foo".into()),
            ("common_col", "nnn".into()),
            ("foo_col", Value::Null),
            ("bar_col", Value::Null),
        ]),
    ]
}
