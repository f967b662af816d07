use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const INVOICE: &str = "\
ORIGINAL
FACTURA
A
Cód. 01
DISTRIBUIDORA DEL SUR S.A.
C.U.I.T.: 30-71234567-8
Punto de Venta: 0003 Comp. Nro: 0003-00001234
Fecha de Emisión: 05.03.2024
Señor(es):
PATAGONIA BEVERAGE SA
CUIT: 30-98765432-1
Descripción Cant. P. Unit. Subtotal
Cajas de cartón 100 12,50 1.250,00
IVA 21% $ 262,50
Total $ 1.512,50
CAE N°: 74123456789012
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        let config = serde_json::json!({
            "batch": {
                "input_dir": ws.path("invoices"),
                "output": ws.path("output/facturas.csv"),
                "tracking_file": ws.path("output/.processed_ids.json"),
                "jobs": 2
            }
        });
        fs::write(ws.config(), config.to_string()).unwrap();
        ws
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn config(&self) -> PathBuf {
        self.path("config.json")
    }

    fn add_invoice(&self, name: &str, content: &[u8]) {
        let dir = self.path("invoices");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("facturas").unwrap();
        cmd.arg("--config").arg(self.config());
        cmd
    }
}

fn read_report(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

#[test]
fn test_process_prints_json_record() {
    let ws = Workspace::new();
    ws.add_invoice("factura.txt", INVOICE.as_bytes());

    ws.cmd()
        .args(["process", "-f", "json"])
        .arg(ws.path("invoices/factura.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"OK\""))
        .stdout(predicate::str::contains("30-71234567-8"));
}

#[test]
fn test_process_missing_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("process")
        .arg(ws.path("nope.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_reports_every_file() {
    let ws = Workspace::new();
    ws.add_invoice("a-factura.txt", INVOICE.as_bytes());
    ws.add_invoice("b-roto.pdf", b"%PDF-1.4 not really a pdf");
    ws.add_invoice("notas.doc", b"ignored");

    ws.cmd().arg("batch").assert().success();

    let rows = read_report(&ws.path("output/facturas.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][16], "a-factura.txt");
    assert_eq!(&rows[0][14], "OK");
    assert_eq!(&rows[1][16], "b-roto.pdf");
    assert_eq!(&rows[1][14], "ERROR");
}

#[test]
fn test_batch_creates_missing_input_dir() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("batch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created input directory"));

    assert!(ws.path("invoices").is_dir());
    assert!(!ws.path("output/facturas.csv").exists());
}

#[test]
fn test_batch_json_output_override() {
    let ws = Workspace::new();
    ws.add_invoice("factura.txt", INVOICE.as_bytes());
    let output = ws.path("custom/report.json");

    ws.cmd()
        .arg("batch")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value[0]["file_name"], "factura.txt");
    assert_eq!(value[0]["status"], "OK");
}

#[test]
fn test_watch_once_skips_processed() {
    let ws = Workspace::new();
    ws.add_invoice("factura.txt", INVOICE.as_bytes());

    ws.cmd()
        .args(["watch", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 new invoices found"));

    let tracking = fs::read_to_string(ws.path("output/.processed_ids.json")).unwrap();
    assert!(tracking.contains("factura.txt"));

    ws.cmd()
        .args(["watch", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No new invoices"));
}

#[test]
fn test_config_path_and_get() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("exists"));

    ws.cmd()
        .args(["config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn test_config_set_rejects_zero_jobs() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["config", "set", "batch.jobs", "0"])
        .assert()
        .failure();

    ws.cmd()
        .args(["config", "set", "extraction.counterparty_tokens", r#"["ACME"]"#])
        .assert()
        .success();

    let saved = fs::read_to_string(ws.config()).unwrap();
    assert!(saved.contains("ACME"));
}
