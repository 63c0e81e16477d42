use super::progress::BarSink;
use super::BulkArgs;
use anyhow::{Context, Result};
use email_verdict_core::batch::export;
use email_verdict_core::{BatchRunner, Config, DefaultValidator, EmailTable, ExportFormat};
use std::path::{Path, PathBuf};

/// Single-address path: one JSON record per address on stdout.
pub async fn check(config: &Config, emails: &[String], compact: bool) -> Result<()> {
    let validator = DefaultValidator::from_config(config)?;

    for email in emails {
        let record = validator.verify(email).await.to_record();
        let rendered = if compact {
            serde_json::to_string(&record)?
        } else {
            serde_json::to_string_pretty(&record)?
        };
        println!("{}", rendered);
    }
    Ok(())
}

/// Picks the export format from the flag, then the output extension, then xlsx.
fn resolve_format(args: &BulkArgs, config: &Config) -> ExportFormat {
    if let Some(format) = args.format {
        return format.into();
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_file_name));
    ExportFormat::from_path(&output).unwrap_or_default()
}

fn resolve_output_path(args: &BulkArgs, config: &Config, format: ExportFormat) -> PathBuf {
    match args.output {
        Some(ref path) => path.clone(),
        None => Path::new(&config.output_file_name).with_extension(format.extension()),
    }
}

/// Bulk path: read the table, verify each row in order, export the results.
pub async fn bulk(config: &Config, args: &BulkArgs) -> Result<()> {
    let table = EmailTable::from_path(&args.input, config.input_delimiter)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;

    // Fail on a missing column before building resolvers or touching any row.
    table.column(&config.email_column)?;

    let format = resolve_format(args, config);
    if args.stdout && format == ExportFormat::Xlsx {
        anyhow::bail!("--stdout needs --format csv or --format json");
    }

    let runner = BatchRunner::new(DefaultValidator::from_config(config)?);
    let mut sink = BarSink::new(table.len(), args.no_progress || args.stdout);

    let result = match runner
        .run_table(&table, &config.email_column, &mut sink)
        .await
    {
        Ok(result) => {
            sink.finish();
            result
        }
        Err(e) => {
            sink.abandon();
            return Err(e.into());
        }
    };
    let summary = result.summary();

    if args.stdout {
        export::export_stdout(&result, format)?;
        eprintln!("Verification complete! {}", summary);
        return Ok(());
    }

    let output = resolve_output_path(args, config, format);
    export::export(&result, &output, format, &config.sheet_name)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    println!("Verification complete! {}", summary);
    println!("Results written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;

    fn args(output: Option<&str>, format: Option<FormatArg>) -> BulkArgs {
        BulkArgs {
            input: PathBuf::from("in.csv"),
            output: output.map(PathBuf::from),
            format,
            column: None,
            stdout: false,
            no_progress: true,
        }
    }

    #[test]
    fn format_defaults_to_xlsx() {
        let config = Config::default();
        assert_eq!(resolve_format(&args(None, None), &config), ExportFormat::Xlsx);
        assert_eq!(
            resolve_output_path(&args(None, None), &config, ExportFormat::Xlsx),
            PathBuf::from("verified_emails.xlsx")
        );
    }

    #[test]
    fn format_follows_output_extension() {
        let config = Config::default();
        assert_eq!(
            resolve_format(&args(Some("out.json"), None), &config),
            ExportFormat::Json
        );
        assert_eq!(
            resolve_format(&args(Some("out.unknown"), None), &config),
            ExportFormat::Xlsx
        );
    }

    #[test]
    fn explicit_format_renames_default_output() {
        let config = Config::default();
        let a = args(None, Some(FormatArg::Csv));
        let format = resolve_format(&a, &config);
        assert_eq!(format, ExportFormat::Csv);
        assert_eq!(
            resolve_output_path(&a, &config, format),
            PathBuf::from("verified_emails.csv")
        );
    }
}
