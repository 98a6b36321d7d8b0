//! CLI tool for xlreport - renders JSON records into an XLSX report
//!
//! Usage:
//!   xlreport_cli <report.json> <records.json>                # Writes report.xlsx
//!   xlreport_cli <report.json> <records.json> -o out.xlsx    # Writes out.xlsx
//!   xlreport_cli <report.json> <records.json> --ops          # Also dumps surface ops as JSON
//!
//! `records.json` must hold a JSON array; each element is one data row.
//! Set `RUST_LOG=debug` to see render progress.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use log::info;
use serde_json::Value;
use xlreport::{MemoryWorkbook, ReportSpec};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut positional = Vec::new();
    let mut output_path = "report.xlsx".to_string();
    let mut dump_ops = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" => match iter.next() {
                Some(path) => output_path.clone_from(path),
                None => usage(),
            },
            "--ops" => dump_ops = true,
            _ => positional.push(arg.as_str()),
        }
    }

    let (spec_path, records_path) = match positional.as_slice() {
        [spec, records] => (*spec, *records),
        _ => usage(),
    };

    // Read and parse the report definition
    let spec_json = read_or_exit(spec_path);
    let spec = match ReportSpec::from_json(&spec_json) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error parsing {spec_path}: {e}")),
    };
    let report = match spec.build() {
        Ok(r) => r,
        Err(e) => fail(&format!("Error building report: {e}")),
    };

    // Read records
    let records_json = read_or_exit(records_path);
    let records: Vec<Value> = match serde_json::from_str(&records_json) {
        Ok(r) => r,
        Err(e) => fail(&format!("Error parsing {records_path}: {e}")),
    };

    // Render
    let mut workbook = MemoryWorkbook::new();
    if let Err(e) = report.render(&mut workbook, &spec.sheet, &records) {
        fail(&format!("Error rendering report: {e}"));
    }
    info!("rendered {} records into {:?}", records.len(), spec.sheet);

    if dump_ops {
        let ops = match serde_json::to_string_pretty(workbook.ops()) {
            Ok(j) => j,
            Err(e) => fail(&format!("Error serializing ops: {e}")),
        };
        let mut stdout = io::stdout();
        if let Err(e) = writeln!(stdout, "{ops}") {
            fail(&format!("Error writing ops: {e}"));
        }
    }

    // Output
    if let Err(e) = workbook.save(&output_path) {
        fail(&format!("Error writing {output_path}: {e}"));
    }
    eprintln!("Written: {output_path}");
}

fn read_or_exit(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error reading {path}: {e}")),
    }
}

fn usage() -> ! {
    fail("Usage: xlreport_cli <report.json> <records.json> [-o output.xlsx] [--ops]")
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
