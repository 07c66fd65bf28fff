//! Shared resolvers mapping rows from many threads at once

use std::sync::Arc;
use std::thread;

use named_constructor::{mapper, named_constructors, Record, RowMapper, Value};

use crate::utils::{init_logging, record};

#[derive(Debug, PartialEq)]
pub struct Reading {
    pub sensor: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[named_constructors]
impl Reading {
    fn new(
        #[named("sensor")] sensor: String,
        #[named("value")] value: f64,
        #[named("unit")] unit: Option<String>,
    ) -> Self {
        Self {
            sensor,
            value,
            unit,
        }
    }

    fn unitless(#[named("sensor")] sensor: String, #[named("value")] value: f64) -> Self {
        Self {
            sensor,
            value,
            unit: None,
        }
    }
}

fn rows(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let row = record([
                ("sensor", Value::from(format!("s{i}"))),
                ("value", Value::from(i as f64)),
            ]);
            if i % 2 == 0 {
                row.with("unit", "celsius")
            } else {
                row
            }
        })
        .collect()
}

#[test]
fn test_parallel_matches_sequential() {
    init_logging();
    let resolver = mapper::for_type::<Reading>().unwrap();
    let rows = rows(1_000);

    let sequential = resolver.map_records(&rows).unwrap();
    let parallel = resolver.par_map_records(&rows).unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(parallel[10].unit.as_deref(), Some("celsius"));
    assert_eq!(parallel[11].unit, None);
}

#[test]
fn test_shared_across_threads() {
    init_logging();
    let resolver = Arc::new(mapper::for_type::<Reading>().unwrap());
    let rows = Arc::new(rows(200));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            let rows = Arc::clone(&rows);
            thread::spawn(move || resolver.map_records(&rows).unwrap())
        })
        .collect();

    let expected = resolver.map_records(&rows).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_parallel_reports_errors() {
    init_logging();
    let resolver = mapper::for_type::<Reading>().unwrap();
    let mut rows = rows(100);
    rows[57] = record([("sensor", Value::from("broken"))]);

    assert!(resolver.par_map_records(&rows).is_err());
}
