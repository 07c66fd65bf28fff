//! Tests for subtype dispatch on a discriminator column

use chrono::NaiveDateTime;
use named_constructor::{
    mapper, named_constructors, DiscriminatedResolver, MapperConfig, MapperError, Record, RowMapper,
    Value,
};

use crate::utils::{init_logging, record, subclasses_table, timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct Foo {
    pub id: i64,
    pub common: String,
    pub foo_column: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub id: i64,
    pub common: String,
    pub bar_column: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    Foo(Foo),
    Bar(Bar),
}

impl Parent {
    #[must_use]
    pub fn common(&self) -> &str {
        match self {
            Self::Foo(foo) => &foo.common,
            Self::Bar(bar) => &bar.common,
        }
    }
}

impl From<Foo> for Parent {
    fn from(foo: Foo) -> Self {
        Self::Foo(foo)
    }
}

impl From<Bar> for Parent {
    fn from(bar: Bar) -> Self {
        Self::Bar(bar)
    }
}

#[named_constructors]
impl Foo {
    fn new(
        #[named("id")] id: i64,
        #[named("common_col")] common: String,
        #[named("foo_col")] foo_col: Option<i64>,
    ) -> Self {
        Self {
            id,
            common,
            foo_column: foo_col.unwrap_or(-1),
        }
    }
}

#[named_constructors]
impl Bar {
    fn new(
        #[named("id")] id: i64,
        #[named("common_col")] common: String,
        #[named("bar_col")] bar_column: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            common,
            bar_column,
        }
    }
}

fn resolver() -> DiscriminatedResolver<Parent> {
    init_logging();
    mapper::builder("discriminator_col")
        .add_subtype::<Foo>("Foo")
        .and_then(|builder| builder.add_subtype::<Bar>("Bar"))
        .and_then(|builder| builder.build())
        .expect("both subtypes declare valid schemas")
}

#[test]
fn test_subclasses_table() {
    let list = resolver()
        .map_records(&subclasses_table())
        .expect("every row should map");

    assert_eq!(list.len(), 3, "Size fail");
    assert_eq!(
        list[0],
        Parent::Foo(Foo {
            id: 1,
            common: "fff".to_string(),
            foo_column: 42,
        })
    );
    assert_eq!(
        list[1],
        Parent::Bar(Bar {
            id: 2,
            common: "bbb".to_string(),
            bar_column: Some(timestamp("2012-01-01")),
        })
    );
    assert!(matches!(&list[2], Parent::Foo(foo) if foo.foo_column == -1));
    assert_eq!(list[2].common(), "nnn");
}

#[test]
fn test_discriminator_is_case_insensitive() {
    let resolver = resolver();
    assert_eq!(resolver.column(), "discriminator_col");
    assert_eq!(resolver.known_values(), ["bar", "foo"]);

    for value in ["foo", "FOO", "fOo"] {
        let row = record([
            ("id", 1i64.into()),
            ("discriminator_col", value.into()),
            ("common_col", "c".into()),
        ]);
        assert_eq!(resolver.resolve_subtype(&row).unwrap(), "Foo");
    }

    let parent = resolver
        .map_columns([
            ("ID", Value::from(4i64)),
            ("Discriminator_Col", Value::from("BAR")),
            ("COMMON_COL", Value::from("x")),
            ("BAR_COL", Value::Null),
        ])
        .unwrap();
    assert!(matches!(parent, Parent::Bar(bar) if bar.bar_column.is_none()));
}

#[test]
fn test_unknown_discriminator() {
    let resolver = resolver();
    let row = record([
        ("id", 1i64.into()),
        ("discriminator_col", "baz".into()),
        ("common_col", "c".into()),
    ]);

    let err = resolver.map_record(&row).unwrap_err();
    assert!(err.to_string().contains("'baz'"));
    match err {
        MapperError::UnknownDiscriminator { value, known, .. } => {
            assert_eq!(value, "baz");
            assert_eq!(known, ["bar", "foo"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_discriminator() {
    let resolver = resolver();
    let rows = [
        record([("id", 1i64.into()), ("common_col", "c".into())]),
        record([
            ("id", 1i64.into()),
            ("discriminator_col", Value::Null),
            ("common_col", "c".into()),
        ]),
        record([
            ("id", 1i64.into()),
            ("discriminator_col", 7i64.into()),
            ("common_col", "c".into()),
        ]),
    ];

    for row in &rows {
        assert!(matches!(
            resolver.map_record(row),
            Err(MapperError::MissingDiscriminator { column, .. }) if column == "discriminator_col"
        ));
    }
}

#[test]
fn test_subtype_schema_errors_propagate() {
    let resolver = resolver();
    let row = record([("discriminator_col", "foo".into()), ("id", 1i64.into())]);
    assert!(matches!(
        resolver.map_record(&row),
        Err(MapperError::NoMatchingSchema { type_name, .. }) if type_name == "Foo"
    ));
}

#[test]
fn test_builder_rejects_bad_tables() {
    init_logging();
    assert!(matches!(
        mapper::builder::<Parent>("  ").add_subtype::<Foo>("foo").and_then(|b| b.build()),
        Err(MapperError::InvalidDiscriminatorColumn)
    ));
    assert!(matches!(
        mapper::builder::<Parent>("kind").build(),
        Err(MapperError::EmptyDiscriminatorTable { column }) if column == "kind"
    ));

    let duplicate = mapper::builder::<Parent>("kind")
        .add_subtype::<Foo>("Foo")
        .and_then(|b| b.add_subtype::<Bar>("FOO"));
    match duplicate {
        Err(err @ MapperError::DuplicateDiscriminator { .. }) => assert!(err.is_build_time()),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("duplicate discriminator accepted"),
    }
}

#[test]
fn test_custom_conversion() {
    init_logging();
    let resolver = mapper::builder::<String>("kind")
        .with_config(MapperConfig::default().with_log_resolutions(true))
        .add_subtype_with("foo", |foo: Foo| format!("foo #{}", foo.id))
        .and_then(|b| b.add_subtype_with("bar", |bar: Bar| format!("bar #{}", bar.id)))
        .and_then(|b| b.build())
        .unwrap();

    let row: Record = record([
        ("kind", "Bar".into()),
        ("id", 9i64.into()),
        ("common_col", "c".into()),
        ("bar_col", Value::Null),
    ]);
    assert_eq!(resolver.map_record(&row).unwrap(), "bar #9");
}
