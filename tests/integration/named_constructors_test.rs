//! Tests for the `#[named_constructors]` attribute
//!
//! Declarations the attribute accepts syntactically but the extractor
//! rejects must fail when the resolver is built, never while mapping.

use std::num::ParseIntError;

use named_constructor::{
    mapper, named_constructors, ExtractionIssue, MapperError, RowMapper, SchemaSource, Value,
};

use crate::utils::{init_logging, record};

#[derive(Debug, PartialEq)]
pub struct PartlyNamed {
    pub id: i64,
}

#[named_constructors]
impl PartlyNamed {
    fn new(#[named("id")] id: i64, extra: i64) -> Self {
        Self { id: id + extra }
    }
}

#[test]
fn test_partial_naming_rejected_at_build() {
    init_logging();
    match mapper::for_type::<PartlyNamed>() {
        Err(err @ MapperError::SchemaExtraction { .. }) => {
            assert!(err.is_build_time());
            let MapperError::SchemaExtraction {
                type_name,
                factory,
                issue,
            } = err
            else {
                unreachable!()
            };
            assert_eq!(type_name, "PartlyNamed");
            assert_eq!(factory, "new");
            assert_eq!(issue, ExtractionIssue::InconsistentNaming { named: 1, total: 2 });
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[derive(Debug)]
pub struct Twice;

#[named_constructors]
impl Twice {
    fn first(#[named("a")] _a: i64, #[named("b")] _b: i64) -> Self {
        Self
    }

    fn second(#[named("B")] _b: i64, #[named("A")] _a: i64) -> Self {
        Self
    }
}

#[test]
fn test_duplicate_name_sets_rejected() {
    init_logging();
    match mapper::for_type::<Twice>() {
        Err(MapperError::DuplicateSchema { first, second, .. }) => {
            assert_eq!(first, "first(a, b)");
            assert_eq!(second, "second(b, a)");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[derive(Debug)]
pub struct BadNames;

#[named_constructors]
impl BadNames {
    fn blank(#[named(" ")] _a: i64) -> Self {
        Self
    }
}

#[derive(Debug)]
pub struct RepeatedName;

#[named_constructors]
impl RepeatedName {
    fn new(#[named("a")] _a: i64, #[named("A")] _b: i64) -> Self {
        Self
    }
}

#[test]
fn test_malformed_names_rejected() {
    init_logging();
    assert!(matches!(
        mapper::for_type::<BadNames>(),
        Err(MapperError::SchemaExtraction {
            issue: ExtractionIssue::BlankName { position: 0 },
            ..
        })
    ));
    assert!(matches!(
        mapper::for_type::<RepeatedName>(),
        Err(MapperError::SchemaExtraction {
            issue: ExtractionIssue::DuplicateName { .. },
            ..
        })
    ));
}

#[derive(Debug)]
pub struct NothingEligible;

#[named_constructors]
impl NothingEligible {
    #[allow(dead_code)]
    fn empty() -> Self {
        Self
    }

    #[allow(dead_code)]
    fn unnamed(_a: i64) -> Self {
        Self
    }
}

#[test]
fn test_no_eligible_schema() {
    init_logging();
    assert_eq!(NothingEligible::factories().len(), 2);
    assert!(matches!(
        mapper::for_type::<NothingEligible>(),
        Err(MapperError::NoEligibleSchema { type_name }) if type_name == "NothingEligible"
    ));
}

#[derive(Debug, PartialEq)]
pub struct Code {
    pub value: u32,
}

#[named_constructors(name = "ProductCode")]
impl Code {
    fn parse(#[named("code")] code: String) -> Result<Self, ParseIntError> {
        Ok(Self {
            value: code.trim().parse()?,
        })
    }

    fn checked(#[named("code")] code: String, #[named("check")] check: i64) -> anyhow::Result<Self> {
        let value: u32 = code.parse()?;
        anyhow::ensure!(i64::from(value % 10) == check, "check digit mismatch for {code}");
        Ok(Self { value })
    }

    /// Not a factory: takes a receiver
    #[allow(dead_code)]
    fn bump(&self) -> Self {
        Self {
            value: self.value + 1,
        }
    }
}

#[test]
fn test_fallible_factories() {
    init_logging();
    let resolver = mapper::for_type::<Code>().unwrap();
    assert_eq!(resolver.type_name(), "ProductCode");
    assert_eq!(resolver.registry().len(), 2);

    let row = record([("code", Value::from(" 17 "))]);
    assert_eq!(resolver.map_record(&row).unwrap(), Code { value: 17 });

    let row = record([("code", Value::from("x7"))]);
    let err = resolver.map_record(&row).unwrap_err();
    assert!(matches!(
        &err,
        MapperError::ConstructionInvocation { schema, source, .. }
            if schema == "parse(code)" && source.downcast_ref::<ParseIntError>().is_some()
    ));

    let row = record([("code", Value::from("17")), ("check", Value::from(7i64))]);
    assert_eq!(resolver.map_record(&row).unwrap(), Code { value: 17 });

    let row = record([("code", Value::from("17")), ("check", Value::from(3i64))]);
    let err = resolver.map_record(&row).unwrap_err();
    let source = std::error::Error::source(&err).expect("factory error is the source");
    assert_eq!(source.to_string(), "check digit mismatch for 17");
}

mod wrapped {
    pub use named_constructor as runtime;
}

#[derive(Debug, PartialEq)]
pub struct Reexported(pub i64);

#[named_constructors(crate = "wrapped::runtime")]
impl Reexported {
    fn new(#[named("n")] n: i64) -> Self {
        Self(n)
    }
}

#[test]
fn test_crate_path_option() {
    let resolver = mapper::for_type::<Reexported>().unwrap();
    let row = record([("n", Value::from(3i64))]);
    assert_eq!(resolver.map_record(&row).unwrap(), Reexported(3));
}
