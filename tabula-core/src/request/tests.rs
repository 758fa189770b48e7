//! Tests for request descriptor construction.

use super::*;
use proptest::prelude::*;

fn flags(engine: &str) -> RequestFlags {
    RequestFlags {
        engine: Some(engine.to_string()),
        ..RequestFlags::default()
    }
}

#[test]
fn test_build_with_defaults() {
    let descriptor = RequestDescriptor::build(&flags("sqlite")).unwrap();

    assert_eq!(descriptor.engine(), Engine::Sqlite);
    assert_eq!(descriptor.border_style(), DEFAULT_BORDER_STYLE);
    assert_eq!(descriptor.header_style_link(), "Type");
    assert_eq!(descriptor.queries(), "");
    assert_eq!(descriptor.connection_string(), None);
    assert_eq!(descriptor.database_name(), None);
    assert_eq!(descriptor.log_file_path(), None);
}

#[test]
fn test_dest_folder_defaults_to_tmpdir() {
    // TMPDIR is process-wide, so it must point at a real directory while
    // other tests create temp dirs
    let tmp = tempfile::TempDir::new().unwrap();
    temp_env::with_var("TMPDIR", Some(tmp.path()), || {
        let descriptor = RequestDescriptor::build(&flags("mysql")).unwrap();
        assert_eq!(descriptor.dest_folder(), tmp.path());
    });
}

#[test]
fn test_build_all_fields() {
    let raw = RequestFlags {
        engine: Some("postgresql".to_string()),
        conn_str: Some("postgres://app:pw@localhost/app".to_string()),
        db_name: Some("app".to_string()),
        queries: Some("select 1; select 2;".to_string()),
        border_style: Some("3".to_string()),
        dest_folder: Some(PathBuf::from("/tmp/out")),
        log_file: Some(PathBuf::from("/tmp/logs/tabula.log")),
        option: Some("2".to_string()),
        header_style_link: Some("Title".to_string()),
    };

    let descriptor = RequestDescriptor::build(&raw).unwrap();

    assert_eq!(descriptor.engine(), Engine::PostgreSql);
    assert_eq!(
        descriptor.connection_string(),
        Some("postgres://app:pw@localhost/app")
    );
    assert_eq!(descriptor.database_name(), Some("app"));
    assert_eq!(descriptor.queries(), "select 1; select 2;");
    assert_eq!(descriptor.border_style(), 3);
    assert_eq!(descriptor.dest_folder(), Path::new("/tmp/out"));
    assert_eq!(
        descriptor.log_file_path(),
        Some(Path::new("/tmp/logs/tabula.log"))
    );
    assert_eq!(descriptor.header_style_link(), "Title");
    assert_eq!(raw.operation().unwrap(), Operation::ListTables);
}

#[test]
fn test_missing_engine_is_invalid() {
    let error = RequestDescriptor::build(&RequestFlags::default()).unwrap_err();
    assert!(matches!(error, TabulaError::InvalidEngine { .. }));
}

#[test]
fn test_unknown_engine_is_invalid() {
    let error = RequestDescriptor::build(&flags("sybase")).unwrap_err();
    assert!(matches!(error, TabulaError::InvalidEngine { ref value } if value == "sybase"));
}

#[test]
fn test_non_numeric_border_style() {
    let raw = RequestFlags {
        border_style: Some("thick".to_string()),
        ..flags("mysql")
    };

    let error = RequestDescriptor::build(&raw).unwrap_err();
    assert!(matches!(
        error,
        TabulaError::InvalidNumericOption { flag: "border-style", ref value } if value == "thick"
    ));
}

#[test]
fn test_non_numeric_option() {
    let raw = RequestFlags {
        option: Some("ping".to_string()),
        ..flags("mysql")
    };

    assert!(matches!(
        raw.option_code(),
        Err(TabulaError::InvalidNumericOption { flag: "option", .. })
    ));
    // The descriptor itself does not depend on the option code
    assert!(RequestDescriptor::build(&raw).is_ok());
}

#[test]
fn test_option_defaults_to_run() {
    let raw = flags("sqlite");
    assert_eq!(raw.option_code().unwrap(), 1);
    assert_eq!(raw.operation().unwrap(), Operation::Run);
}

#[test]
fn test_unknown_option_code() {
    let raw = RequestFlags {
        option: Some("7".to_string()),
        ..flags("sqlite")
    };
    assert!(matches!(
        raw.operation(),
        Err(TabulaError::UnknownOperation { code: 7 })
    ));
}

#[test]
fn test_empty_queries_are_accepted() {
    let raw = RequestFlags {
        queries: Some(String::new()),
        ..flags("sqlite")
    };
    let descriptor = RequestDescriptor::build(&raw).unwrap();

    assert_eq!(descriptor.queries(), "");
    assert!(matches!(
        descriptor.require_queries(),
        Err(TabulaError::MissingRequiredField { field: "queries" })
    ));
}

#[test]
fn test_require_fields() {
    let descriptor = RequestDescriptor::build(&flags("mysql")).unwrap();

    assert!(matches!(
        descriptor.require_connection_string(),
        Err(TabulaError::MissingRequiredField {
            field: "connection string"
        })
    ));
    assert!(matches!(
        descriptor.require_database_name(),
        Err(TabulaError::MissingRequiredField {
            field: "database name"
        })
    ));

    let raw = RequestFlags {
        conn_str: Some("   ".to_string()),
        ..flags("mysql")
    };
    let descriptor = RequestDescriptor::build(&raw).unwrap();
    assert!(descriptor.require_connection_string().is_err());
}

#[test]
fn test_redacted_descriptor_hides_password() {
    let raw = RequestFlags {
        conn_str: Some("mysql://root:hunter2@db:3306/shop".to_string()),
        ..flags("mysql")
    };
    let descriptor = RequestDescriptor::build(&raw).unwrap();

    let json = descriptor.to_log_json().unwrap();
    assert!(!json.contains("hunter2"));
    assert!(json.contains("\"engine\":\"MYSQL\""));
    assert!(json.contains("root:****@db:3306"));
}

#[test]
fn test_end_to_end_flags() {
    let raw = RequestFlags {
        engine: Some("mysql".to_string()),
        conn_str: Some("host=x".to_string()),
        db_name: Some("mydb".to_string()),
        queries: Some("SELECT 1;".to_string()),
        option: Some("4".to_string()),
        ..RequestFlags::default()
    };

    let descriptor = RequestDescriptor::build(&raw).unwrap();
    assert_eq!(descriptor.engine(), Engine::MySql);
    assert_eq!(descriptor.queries(), "SELECT 1;");
    assert_eq!(raw.operation().unwrap(), Operation::Ping);
}

fn any_case(name: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), name.len()).prop_map(move |mask| {
        name.chars()
            .zip(mask)
            .map(|(c, upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_engine_names_are_case_insensitive(
        (engine, spelled) in prop::sample::select(Engine::ALL.to_vec())
            .prop_flat_map(|engine| (Just(engine), any_case(engine.canonical_name())))
    ) {
        let descriptor = RequestDescriptor::build(&flags(&spelled)).unwrap();
        prop_assert_eq!(descriptor.engine(), engine);
    }

    #[test]
    fn prop_unknown_engines_are_rejected(name in "[a-z]{1,12}") {
        prop_assume!(name.parse::<Engine>().is_err());
        let result = RequestDescriptor::build(&flags(&name));
        prop_assert!(
            matches!(result, Err(TabulaError::InvalidEngine { .. })),
            "expected InvalidEngine"
        );
    }

    #[test]
    fn prop_integer_flags_round_trip(value in any::<i64>()) {
        let raw = RequestFlags {
            border_style: Some(value.to_string()),
            option: Some(value.to_string()),
            ..flags("sqlite")
        };

        let descriptor = RequestDescriptor::build(&raw).unwrap();
        prop_assert_eq!(descriptor.border_style(), value);
        prop_assert_eq!(raw.option_code().unwrap(), value);
    }

    #[test]
    fn prop_non_numeric_flags_are_rejected(value in "[a-zA-Z_]{1,8}") {
        let raw = RequestFlags {
            border_style: Some(value.clone()),
            option: Some(value),
            ..flags("sqlite")
        };

        prop_assert!(
            matches!(
                RequestDescriptor::build(&raw),
                Err(TabulaError::InvalidNumericOption { flag: "border-style", .. })
            ),
            "expected InvalidNumericOption for border style"
        );
        prop_assert!(
            matches!(
                raw.option_code(),
                Err(TabulaError::InvalidNumericOption { flag: "option", .. })
            ),
            "expected InvalidNumericOption for option"
        );
    }

    #[test]
    fn prop_build_is_idempotent(
        engine in prop::sample::select(Engine::ALL.to_vec()),
        queries in ".{0,40}",
        border in 0i64..10,
    ) {
        let raw = RequestFlags {
            engine: Some(engine.canonical_name().to_lowercase()),
            queries: Some(queries),
            border_style: Some(border.to_string()),
            db_name: Some("db".to_string()),
            dest_folder: Some(PathBuf::from("/tmp/tabula")),
            ..RequestFlags::default()
        };

        let first = RequestDescriptor::build(&raw).unwrap();
        let second = RequestDescriptor::build(&raw).unwrap();
        prop_assert_eq!(first, second);
    }
}
