//! Record export/import tests against real .xlsx files

use pretty_assertions::assert_eq;
use sheetbind::{
    export, import, Cell, CellValue, ColumnDescriptor, Decimal, RecordExporter, RecordImporter,
    ScalarKind, SheetError, Style, Workbook,
};
use std::path::PathBuf;
use tempfile::TempDir;

sheetbind::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Person {
        pub name: String => "Name",
        pub age: i32 => "Age",
    }
}

sheetbind::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Ledger {
        pub id: i64 => "Id",
        pub label: String => "Label",
        pub active: bool => "Active",
        pub ratio: f32 => "Ratio",
        pub amount: f64 => "Amount",
        pub balance: Decimal => "Balance",
        pub count: i32 => "Count",
    }
}

sheetbind::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Optional {
        pub name: Option<String> => "Name",
        pub age: Option<i32> => "Age",
        pub score: Option<f64> => "Score",
        pub member: Option<bool> => "Member",
        pub total: Option<Decimal> => "Total",
    }
}

sheetbind::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Account {
        pub user: String => "User",
        pub secret: String => "Secret",
        pub level: i32 => "Level",
    }
}

fn people() -> Vec<Person> {
    vec![
        Person {
            name: "Ana".into(),
            age: 30,
        },
        Person {
            name: "Bo".into(),
            age: 41,
        },
    ]
}

fn ledger() -> Vec<Ledger> {
    (0..5)
        .map(|i| Ledger {
            id: 9_000_000_000 + i,
            label: format!("entry {}", i),
            active: i % 2 == 0,
            ratio: 0.1 + i as f32 * 0.2,
            amount: 1234.5678 * (i as f64 + 1.0),
            balance: Decimal::new(12_345 + i * 101, 2),
            count: -(i as i32),
        })
        .collect()
}

fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn row_texts(workbook: &Workbook, sheet: usize, row: usize) -> Vec<String> {
    workbook.sheets()[sheet].rows()[row]
        .cells
        .iter()
        .map(Cell::canonical_text)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_people_without_descriptors() {
    let workbook = export(&people(), "People", None).unwrap();

    assert_eq!(workbook.sheet_count(), 1);
    assert_eq!(row_texts(&workbook, 0, 0), vec!["Name", "Age"]);

    let sheet = &workbook.sheets()[0];
    assert_eq!(
        sheet.rows()[1].cells.iter().map(|c| c.value.clone()).collect::<Vec<_>>(),
        vec![CellValue::Text("Ana".into()), CellValue::Numeric(30.0)]
    );
    assert_eq!(
        sheet.rows()[2].cells.iter().map(|c| c.value.clone()).collect::<Vec<_>>(),
        vec![CellValue::Text("Bo".into()), CellValue::Numeric(41.0)]
    );
}

#[test]
fn test_export_excluded_column_never_appears() {
    let body = Style::body();
    let columns = vec![
        ColumnDescriptor::<Account>::new("User", &body, "", None).unwrap(),
        ColumnDescriptor::<Account>::new("Secret", &body, "", Some(false)).unwrap(),
        ColumnDescriptor::<Account>::new("Level", &body, "", None).unwrap(),
    ];
    let accounts = vec![Account {
        user: "ana".into(),
        secret: "hunter2".into(),
        level: 3,
    }];

    let workbook = export(&accounts, "Accounts", Some(columns)).unwrap();

    assert_eq!(row_texts(&workbook, 0, 0), vec!["User", "Level"]);
    assert_eq!(row_texts(&workbook, 0, 1), vec!["ana", "3"]);
    for row in workbook.sheets()[0].rows() {
        assert!(row.cells.iter().all(|c| c.canonical_text() != "hunter2"));
        assert!(row.cells.iter().all(|c| c.canonical_text() != "Secret"));
    }
}

#[test]
fn test_export_header_follows_descriptor_order() {
    let body = Style::body();
    let orders: Vec<Vec<(&str, bool)>> = vec![
        vec![("Level", true), ("User", true), ("Secret", true)],
        vec![("Secret", false), ("Level", true), ("User", false)],
        vec![("User", false), ("Secret", false), ("Level", false)],
        vec![("Secret", true), ("User", true)],
    ];

    for order in orders {
        let columns: Vec<_> = order
            .iter()
            .map(|(field, included)| {
                ColumnDescriptor::<Account>::new(field, &body, "", Some(*included)).unwrap()
            })
            .collect();
        let expected: Vec<String> = order
            .iter()
            .filter(|(_, included)| *included)
            .map(|(field, _)| field.to_string())
            .collect();

        let account = Account {
            user: "ana".into(),
            secret: "s".into(),
            level: 1,
        };
        let workbook = export(&[account], "Order", Some(columns)).unwrap();
        let header: Vec<String> = workbook.sheets()[0]
            .header()
            .map(|row| row.cells.iter().map(Cell::canonical_text).collect())
            .unwrap_or_default();
        assert_eq!(header, expected);
    }
}

#[test]
fn test_export_custom_titles() {
    let body = Style::body();
    let columns = vec![
        ColumnDescriptor::<Person>::new("Name", &body, "Full name", None).unwrap(),
        ColumnDescriptor::<Person>::new("Age", &body, "", None).unwrap(),
    ];
    let workbook = export(&people(), "People", Some(columns)).unwrap();
    assert_eq!(row_texts(&workbook, 0, 0), vec!["Full name", "Age"]);
}

#[test]
fn test_export_row_count_matches_records() {
    for n in [0usize, 1, 7, 250] {
        let records: Vec<Person> = (0..n)
            .map(|i| Person {
                name: format!("p{}", i),
                age: i as i32,
            })
            .collect();
        let workbook = export(&records, "Rows", None).unwrap();
        let sheet = &workbook.sheets()[0];
        assert_eq!(sheet.body().len(), n);
        assert_eq!(sheet.row_count(), n + 1);
    }
}

#[test]
fn test_export_display_formats_stay_in_their_column() {
    let body = Style::body();
    let columns = vec![
        ColumnDescriptor::<Ledger>::new("Ratio", &body, "", None)
            .unwrap()
            .with_display_hint(1),
        ColumnDescriptor::<Ledger>::new("Balance", &body, "", None)
            .unwrap()
            .with_display_hint(2),
        ColumnDescriptor::<Ledger>::new("Amount", &body, "", None).unwrap(),
    ];
    let workbook = export(&ledger(), "Ledger", Some(columns)).unwrap();
    let row = &workbook.sheets()[0].rows()[1];

    assert_eq!(row.cells[0].style.number_format, sheetbind::NumberFormat::BuiltIn(9));
    assert_eq!(row.cells[1].style.number_format, sheetbind::NumberFormat::BuiltIn(7));
    assert_eq!(row.cells[2].style.number_format, sheetbind::NumberFormat::General);
    assert_eq!(body.number_format, sheetbind::NumberFormat::General);
}

#[test]
fn test_export_never_writes_files() {
    let dir = TempDir::new().unwrap();
    let before = std::fs::read_dir(dir.path()).unwrap().count();
    let _ = export(&people(), "People", None).unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), before);
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUND TRIP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_round_trip_people() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "people.xlsx");

    export(&people(), "People", None).unwrap().save(&path).unwrap();
    let sheets: Vec<Vec<Person>> = import(&path).unwrap();

    assert_eq!(sheets, vec![people()]);
}

#[test]
fn test_round_trip_all_scalar_kinds() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "ledger.xlsx");
    let original = ledger();

    export(&original, "Ledger", None).unwrap().save(&path).unwrap();
    let sheets = RecordImporter::new(&path).import::<Ledger>().unwrap();

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].len(), original.len());
    for (got, want) in sheets[0].iter().zip(&original) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.label, want.label);
        assert_eq!(got.active, want.active);
        assert_eq!(got.count, want.count);
        assert!((got.ratio - want.ratio).abs() < 1e-6);
        assert!((got.amount - want.amount).abs() < 1e-9);
        assert_eq!(got.balance, want.balance);
    }
}

#[test]
fn test_round_trip_in_memory_buffer() {
    let bytes = export(&people(), "People", None)
        .unwrap()
        .save_to_buffer()
        .unwrap();
    let workbook = Workbook::from_bytes(bytes).unwrap();
    let sheets = sheetbind::import_workbook::<Person>(&workbook).unwrap();
    assert_eq!(sheets, vec![people()]);
}

#[test]
fn test_round_trip_header_only() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "empty.xlsx");

    export::<Person>(&[], "People", None).unwrap().save(&path).unwrap();
    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.sheets()[0].row_count(), 1);

    let sheets: Vec<Vec<Person>> = import(&path).unwrap();
    assert_eq!(sheets, vec![Vec::new()]);
}

sheetbind::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Note {
        pub title: String => "Title",
        pub body: Option<String> => "Body",
    }
}

#[test]
fn test_export_rejects_empty_text() {
    let dir = TempDir::new().unwrap();
    let cases = vec![
        (
            Note {
                title: "a".into(),
                body: Some(String::new()),
            },
            "Body",
        ),
        (
            Note {
                title: String::new(),
                body: Some("b".into()),
            },
            "Title",
        ),
    ];

    for (note, column) in cases {
        let path = temp_path(&dir, "notes.xlsx");
        let err = export(&[note], "Notes", None).unwrap_err();
        match err.root_cause() {
            SheetError::ArgumentNull { element, context } => {
                assert_eq!(*element, "value");
                assert!(context.contains("row 2"), "context: {}", context);
                assert!(context.contains(column), "context: {}", context);
            }
            other => panic!("Expected ArgumentNull, got {:?}", other),
        }
        assert!(!path.exists());
    }
}

#[test]
fn test_round_trip_whitespace_text_is_exact() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "notes.xlsx");
    let notes = vec![
        Note {
            title: " ".into(),
            body: Some("  padded  ".into()),
        },
        Note {
            title: "x".into(),
            body: None,
        },
    ];
    let columns = vec![
        ColumnDescriptor::<Note>::new("Title", &Style::body(), "", None).unwrap(),
        ColumnDescriptor::<Note>::new("Body", &Style::body(), "", None).unwrap(),
    ];

    // A None body cannot be exported, so the second note goes out without it
    let exporter = RecordExporter::new();
    let mut workbook = exporter
        .export(&notes[..1], "Padded", Some(columns))
        .unwrap();
    let title_only =
        vec![ColumnDescriptor::<Note>::new("Title", &Style::body(), "", None).unwrap()];
    exporter
        .append_sheet(&mut workbook, &notes[1..], "Bare", Some(title_only))
        .unwrap();
    workbook.save(&path).unwrap();

    let sheets: Vec<Vec<Note>> = import(&path).unwrap();
    assert_eq!(sheets, vec![notes[..1].to_vec(), notes[1..].to_vec()]);
}

#[test]
fn test_import_one_list_per_sheet_in_order() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "multi.xlsx");

    let exporter = RecordExporter::new();
    let mut workbook = exporter.export(&people(), "First", None).unwrap();
    let second = vec![Person {
        name: "Cy".into(),
        age: 52,
    }];
    exporter
        .append_sheet(&mut workbook, &second, "Second", None)
        .unwrap();
    workbook.save(&path).unwrap();

    let sheets: Vec<Vec<Person>> = import(&path).unwrap();
    assert_eq!(sheets, vec![people(), second]);
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT FAILURES
// ═══════════════════════════════════════════════════════════════════════════

fn save_grid(dir: &TempDir, name: &str, rows: Vec<Vec<CellValue>>) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.create_sheet("Sheet1").unwrap();
    for values in rows {
        let row = sheet.create_row();
        for (col, value) in values.into_iter().enumerate() {
            row.set_cell(col as u16, Cell::new(value, Style::body()));
        }
    }
    let path = temp_path(dir, name);
    workbook.save(&path).unwrap();
    path
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

#[test]
fn test_import_invalid_number_names_row_column_and_text() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "bad.xlsx",
        vec![
            vec![text("Name"), text("Age")],
            vec![text("Ana"), text("not-a-number")],
        ],
    );

    let err = import::<Person, _>(&path).unwrap_err();
    match err {
        SheetError::InvalidCast {
            row,
            column,
            text,
            target,
        } => {
            assert_eq!(row, 2);
            assert_eq!(column, "Age");
            assert_eq!(text, "not-a-number");
            assert_eq!(target, ScalarKind::Integer);
        }
        other => panic!("Expected InvalidCast, got {:?}", other),
    }
}

#[test]
fn test_import_unmatched_header_is_missing_member() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "extra.xlsx",
        vec![
            vec![text("Name"), text("Age"), text("Email")],
            vec![text("Ana"), CellValue::Numeric(30.0), text("ana@example.com")],
        ],
    );

    let err = import::<Person, _>(&path).unwrap_err();
    assert!(matches!(
        err,
        SheetError::MissingMember { record: "Person", ref header, row: 2 } if header == "Email"
    ));
}

#[test]
fn test_import_header_match_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "case.xlsx",
        vec![vec![text("name")], vec![text("Ana")]],
    );

    let err = import::<Person, _>(&path).unwrap_err();
    assert!(matches!(err, SheetError::MissingMember { .. }));
}

#[test]
fn test_import_blank_cells_become_none() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "blanks.xlsx",
        vec![
            vec![text("Name"), text("Age"), text("Score"), text("Member"), text("Total")],
            vec![
                text("Ana"),
                CellValue::Blank,
                CellValue::Blank,
                CellValue::Blank,
                CellValue::Blank,
            ],
            vec![
                CellValue::Blank,
                CellValue::Numeric(0.0),
                CellValue::Numeric(0.0),
                CellValue::Boolean(false),
                CellValue::Numeric(0.0),
            ],
        ],
    );

    let sheets: Vec<Vec<Optional>> = import(&path).unwrap();
    assert_eq!(
        sheets[0],
        vec![
            Optional {
                name: Some("Ana".into()),
                ..Optional::default()
            },
            Optional {
                name: None,
                age: Some(0),
                score: Some(0.0),
                member: Some(false),
                total: Some(Decimal::ZERO),
            },
        ]
    );
}

#[test]
fn test_import_missing_field_header_keeps_default() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(&dir, "partial.xlsx", vec![vec![text("Name")], vec![text("Bo")]]);

    let sheets: Vec<Vec<Person>> = import(&path).unwrap();
    assert_eq!(
        sheets[0],
        vec![Person {
            name: "Bo".into(),
            age: 0
        }]
    );
}

#[test]
fn test_import_text_numbers_are_coerced() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "textnums.xlsx",
        vec![
            vec![text("Name"), text("Age")],
            vec![CellValue::Numeric(7.0), text(" 41 ")],
        ],
    );

    let sheets: Vec<Vec<Person>> = import(&path).unwrap();
    assert_eq!(
        sheets[0],
        vec![Person {
            name: "7".into(),
            age: 41
        }]
    );
}

#[test]
fn test_import_gap_row_from_file_is_argument_null() {
    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "gap.xlsx",
        vec![
            vec![text("Name"), text("Age")],
            vec![text("Ana"), CellValue::Numeric(30.0)],
            vec![],
            vec![text("Bo"), CellValue::Numeric(41.0)],
        ],
    );

    // The backend still reports the skipped row inside the used range
    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.sheets()[0].row_count(), 4);
    assert!(workbook.sheets()[0].rows()[2].is_empty());

    let err = import::<Person, _>(&path).unwrap_err();
    match err {
        SheetError::ArgumentNull { element, context } => {
            assert_eq!(element, "row");
            assert!(context.contains("row 3"), "context: {}", context);
        }
        other => panic!("Expected ArgumentNull, got {:?}", other),
    }
}

#[test]
fn test_import_oversized_float_is_invalid_cast() {
    sheetbind::record! {
        #[derive(Debug, Default)]
        struct Ratio {
            value: f32 => "Value",
        }
    }

    let dir = TempDir::new().unwrap();
    let path = save_grid(
        &dir,
        "huge.xlsx",
        vec![vec![text("Value")], vec![CellValue::Numeric(1e40)]],
    );

    let err = import::<Ratio, _>(&path).unwrap_err();
    assert!(matches!(
        err,
        SheetError::InvalidCast { row: 2, target: ScalarKind::Float, .. }
    ));
}

#[test]
fn test_export_long_beyond_exact_range_fails() {
    let mut rows = ledger();
    rows[3].id = i64::MAX;

    let err = export(&rows, "Ledger", None).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        SheetError::NotRepresentable { value } if *value == i64::MAX.to_string()
    ));
}

#[test]
fn test_import_missing_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let err = import::<Person, _>(temp_path(&dir, "missing.xlsx")).unwrap_err();
    assert!(matches!(err, SheetError::Open { .. }));
}

#[test]
fn test_import_non_xlsx_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "notes.xlsx");
    std::fs::write(&path, "just text").unwrap();

    let err = import::<Person, _>(&path).unwrap_err();
    assert!(matches!(err, SheetError::Open { .. }));
}
