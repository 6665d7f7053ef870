use crate::base::error::CookieLensError;

#[test]
fn test_error_codes_are_distinct() {
    let errors = [
        CookieLensError::invalid_json("x"),
        CookieLensError::Io {
            path: "a".into(),
            message: "b".into(),
        },
        CookieLensError::CsvUnterminatedQuote { line: 1 },
        CookieLensError::CsvColumnCount {
            row: 1,
            expected: 2,
            found: 3,
        },
        CookieLensError::csv_invalid_field("secure", "maybe"),
    ];

    let mut codes: Vec<i32> = errors.iter().map(|e| e.as_i32()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
    assert!(codes.iter().all(|c| *c < 0));
}

#[test]
fn test_json_error_conversion() {
    let err: CookieLensError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, CookieLensError::InvalidJson { .. }));
    assert!(!err.is_csv_error());
}

#[test]
fn test_error_display() {
    let err = CookieLensError::CsvColumnCount {
        row: 3,
        expected: 9,
        found: 8,
    };
    assert_eq!(err.to_string(), "CSV row 3 has 8 columns, expected 9");
    assert!(err.is_csv_error());
}

#[test]
fn test_io_error_context() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = CookieLensError::io("/tmp/vendors.json", &io);
    match err {
        CookieLensError::Io { path, message } => {
            assert_eq!(path, "/tmp/vendors.json");
            assert!(message.contains("missing"));
        }
        _ => panic!("Expected Io"),
    }
}
