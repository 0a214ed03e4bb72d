use crate::column::ColumnDescriptor;
use crate::error::SheetResult;
use crate::excel::RecordExporter;
use crate::grid::Workbook;
use crate::style::StylePreset;
use clap::ValueEnum;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format for `dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
struct SheetDump<'a> {
    name: &'a str,
    rows: Vec<Vec<String>>,
}

crate::record! {
    /// Sample record written by `demo`
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct DemoEntry {
        pub name: String => "Name",
        pub age: i32 => "Age",
        pub share: f64 => "Share",
        pub balance: Decimal => "Balance",
        pub active: bool => "Active",
        pub secret: String => "Secret",
    }
}

/// Sample rows for `demo`
pub fn demo_entries(count: usize) -> Vec<DemoEntry> {
    const NAMES: [&str; 5] = ["Ana", "Bo", "Chen", "Dara", "Eli"];
    (0..count)
        .map(|i| DemoEntry {
            name: format!("{} {}", NAMES[i % NAMES.len()], i + 1),
            age: 20 + (i as i32 * 7) % 45,
            share: ((i % 10) as f64 + 1.0) / 10.0,
            balance: Decimal::new(100_000 + (i as i64) * 2_550, 2),
            active: i % 3 != 0,
            secret: format!("token-{:04}", i),
        })
        .collect()
}

fn load_styles(path: &Path) -> SheetResult<StylePreset> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        Ok(StylePreset::from_json(&content)?)
    } else {
        Ok(StylePreset::from_yaml(&content)?)
    }
}

/// Execute the inspect command
pub fn inspect(file: PathBuf) -> SheetResult<()> {
    println!("{}", "📊 sheetbind - Inspect".bold().green());
    println!("   File: {}\n", file.display());

    let workbook = Workbook::open(&file)?;

    for sheet in workbook.sheets() {
        println!("   📄 Sheet: {}", sheet.name().bright_blue());
        match sheet.header() {
            Some(header) => {
                let titles: Vec<String> = header
                    .cells
                    .iter()
                    .map(|c| c.canonical_text())
                    .collect();
                println!("      Header: {}", titles.join(" | "));
                println!("      {} body rows", sheet.body().len());
            }
            None => println!("      {}", "(empty)".dimmed()),
        }
    }
    println!();

    println!(
        "{}",
        format!("✅ {} sheet(s) found", workbook.sheet_count())
            .bold()
            .green()
    );
    Ok(())
}

/// Execute the dump command
pub fn dump(file: PathBuf, format: DumpFormat) -> SheetResult<()> {
    let workbook = Workbook::open(&file)?;
    let sheets: Vec<SheetDump> = workbook
        .sheets()
        .iter()
        .map(|sheet| SheetDump {
            name: sheet.name(),
            rows: sheet
                .rows()
                .iter()
                .map(|row| row.cells.iter().map(|c| c.canonical_text()).collect())
                .collect(),
        })
        .collect();

    let output = match format {
        DumpFormat::Json => serde_json::to_string_pretty(&sheets)?,
        DumpFormat::Yaml => serde_yaml::to_string(&sheets)?,
    };
    println!("{}", output);
    Ok(())
}

/// Execute the demo command
pub fn demo(output: PathBuf, rows: usize, styles: Option<PathBuf>, verbose: bool) -> SheetResult<()> {
    println!("{}", "📊 sheetbind - Demo export".bold().green());
    println!("   Output: {}\n", output.display());

    let preset = match styles {
        Some(ref path) => {
            if verbose {
                println!("{}", format!("🎨 Loading styles from {}", path.display()).cyan());
            }
            load_styles(path)?
        }
        None => StylePreset::default(),
    };

    let exporter = RecordExporter::with_styles(preset);
    let body = &exporter.styles().body;
    let columns = vec![
        ColumnDescriptor::new("Name", body, "", None)?,
        ColumnDescriptor::new("Age", body, "", None)?,
        ColumnDescriptor::new("Share", body, "", None)?.with_display_hint(1),
        ColumnDescriptor::new("Balance", body, "", None)?.with_display_hint(2),
        ColumnDescriptor::new("Active", body, "", None)?,
        ColumnDescriptor::new("Secret", body, "", Some(false))?,
    ];

    let entries = demo_entries(rows);
    if verbose {
        println!("{}", format!("📝 Exporting {} records...", entries.len()).cyan());
    }

    let workbook = exporter.export(&entries, "Demo", Some(columns))?;
    workbook.save(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}
