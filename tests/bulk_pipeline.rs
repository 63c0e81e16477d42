use email_verdict_core::batch::export::{self, write_csv};
use email_verdict_core::core::config::DEFAULT_EMAIL_PATTERN;
use email_verdict_core::validation::deliverability::DeliverabilityResult;
use email_verdict_core::{
    AppError, BatchRunner, DeliverabilityCheck, DeliverabilityFailure, DomainListChecker,
    EmailTable, ExportFormat, Progress, Validator,
};
use regex::Regex;
use std::collections::HashSet;
use std::fs;

/// Accepts addresses whose domain is in a fixed set.
struct KnownDomains(HashSet<&'static str>);

impl DeliverabilityCheck for KnownDomains {
    async fn check(&self, email: &str) -> DeliverabilityResult {
        match email.rsplit_once('@') {
            Some((_, domain)) if self.0.contains(domain) => Ok(()),
            Some((_, domain)) => Err(DeliverabilityFailure::Undeliverable(format!(
                "The domain name {} does not exist.",
                domain
            ))),
            None => Err(DeliverabilityFailure::Syntax(
                "An email address must have an @-sign.".to_string(),
            )),
        }
    }
}

fn runner() -> BatchRunner<DomainListChecker, KnownDomains> {
    BatchRunner::new(Validator::new(
        Regex::new(DEFAULT_EMAIL_PATTERN).unwrap(),
        DomainListChecker::new(),
        KnownDomains(["b.com", "d.org", "mailinator.com"].into_iter().collect()),
    ))
}

#[tokio::test]
async fn csv_in_csv_out_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contacts.csv");
    fs::write(
        &input,
        "Name,Email,Company\nAda,a@b.com,X\nBob,bad,Y\nCy,c@d.org,Z\nDee,temp@mailinator.com,W\nEve,e@nowhere.example,V\n",
    )
    .unwrap();

    let table = EmailTable::from_path(&input, b',').unwrap();
    let mut fractions = Vec::new();
    let mut sink = |p: Progress| fractions.push(p.fraction());
    let result = runner().run_table(&table, "Email", &mut sink).await.unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(fractions.len(), 5);
    assert_eq!(fractions.last().copied(), Some(1.0));

    let bad = result.get(1).unwrap();
    assert_eq!(bad.email(), "bad");
    assert_eq!(bad.domain().as_str(), "invalid");
    assert!(!bad.syntax_valid());
    assert!(!bad.deliverable());

    let disposable = result.get(3).unwrap();
    assert!(disposable.disposable());
    assert!(disposable.deliverable());

    let unknown = result.get(4).unwrap();
    assert!(unknown.syntax_valid());
    assert!(!unknown.deliverable());
    assert_eq!(
        unknown.failure_reason(),
        Some("The domain name nowhere.example does not exist.")
    );

    let output = dir.path().join("verified.csv");
    export::export(&result, &output, ExportFormat::Csv, "Sheet1").unwrap();

    let exported = EmailTable::from_path(&output, b',').unwrap();
    assert_eq!(
        exported.headers(),
        [
            "Email",
            "Valid Email",
            "Domain Address",
            "Disposable Email",
            "Deliverable Email",
            "Reason"
        ]
    );
    assert_eq!(
        exported.column("Email").unwrap(),
        vec![
            "a@b.com",
            "bad",
            "c@d.org",
            "temp@mailinator.com",
            "e@nowhere.example"
        ]
    );
    assert_eq!(
        exported.column("Valid Email").unwrap(),
        vec![
            "Valid Email",
            "Invalid Email",
            "Valid Email",
            "Valid Email",
            "Valid Email"
        ]
    );
    assert_eq!(
        exported.column("Disposable Email").unwrap(),
        vec!["No", "No", "No", "Yes", "No"]
    );
    assert_eq!(
        exported.column("Reason").unwrap()[0],
        "-",
        "successful rows carry the placeholder reason"
    );
    assert!(!exported.has_column("Company"));
}

#[tokio::test]
async fn spreadsheet_export_for_sample_batch() {
    let dir = tempfile::tempdir().unwrap();
    let emails = ["a@b.com", "bad", "c@d.org"];
    let result = runner().run(&emails, &mut |_: Progress| {}).await;

    assert_eq!(result.len(), 3);
    assert_eq!(result.get(1).unwrap().domain().as_str(), "invalid");

    let output = dir.path().join("verified_emails.xlsx");
    export::write_xlsx(&result, &output, "Sheet1").unwrap();
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn missing_email_column_aborts_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contacts.csv");
    fs::write(&input, "Name,Mail\nAda,a@b.com\n").unwrap();

    let table = EmailTable::from_path(&input, b',').unwrap();
    let mut reports = 0usize;
    let mut sink = |_: Progress| reports += 1;
    let err = runner()
        .run_table(&table, "Email", &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingColumn { ref column, .. } if column == "Email"));
    assert_eq!(reports, 0);
}

#[tokio::test]
async fn empty_table_produces_header_only_output() {
    let table = EmailTable::from_reader("Email\n".as_bytes(), b',').unwrap();
    let result = runner()
        .run_table(&table, "Email", &mut |_: Progress| {})
        .await
        .unwrap();
    assert!(result.is_empty());

    let mut buf = Vec::new();
    write_csv(&result, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap().trim_end(),
        "Email,Valid Email,Domain Address,Disposable Email,Deliverable Email,Reason"
    );
}
