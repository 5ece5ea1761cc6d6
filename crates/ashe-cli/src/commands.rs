use anyhow::{Context, Result};
use ashe_core::{AssemblyOptions, TableAssembler};
use ashe_ingest::SourceCatalog;
use ashe_output::{FOOTNOTE_WORKBOOK, XlsxFootnotes, XlsxSink, XlsxTemplates};
use comfy_table::Table;
use tracing::{error, info, info_span};

use crate::cli::RunArgs;
use crate::config::{FileConfig, RunSettings};
use crate::summary::apply_table_style;
use crate::types::{JobOutcome, RunResult};

pub fn run_tables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Sources", "Template"]);
    apply_table_style(&mut table);
    for spec in ashe_model::tables() {
        table.add_row(vec![
            spec.name.to_string(),
            spec.sources.join(", "),
            spec.template.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_variables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Variable", "Code", "Sub-table", "Hourly", "Footnotes"]);
    apply_table_style(&mut table);
    for spec in ashe_model::variables() {
        table.add_row(vec![
            spec.name.to_string(),
            spec.code.to_string(),
            spec.sub_number.to_string(),
            if spec.hourly { "yes" } else { "no" }.to_string(),
            format!("FootNotes{}", spec.footnote_group),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = RunSettings::resolve(file, args)?;
    let run_span = info_span!("run", year = settings.year, dry_run = settings.dry_run);
    let _run_guard = run_span.enter();

    // =========================================================================
    // Stage 0: Scan inputs and load shared templates
    // =========================================================================
    let current = SourceCatalog::scan(&settings.csv_dir)
        .with_context(|| format!("scan extracts in {}", settings.csv_dir.display()))?;
    let previous = settings
        .previous_csv_dir
        .as_deref()
        .map(|dir| {
            SourceCatalog::scan(dir)
                .with_context(|| format!("scan previous-year extracts in {}", dir.display()))
        })
        .transpose()?;
    let templates = XlsxTemplates::new(&settings.template_dir);
    let footnote_path = settings.template_dir.join(FOOTNOTE_WORKBOOK);
    let footnotes = XlsxFootnotes::open(&footnote_path)
        .with_context(|| format!("load footnotes from {}", footnote_path.display()))?;
    info!(
        extracts = current.len(),
        previous_extracts = previous.as_ref().map_or(0, SourceCatalog::len),
        tables = settings.tables.len(),
        variables = settings.variables.len(),
        "inputs ready"
    );

    // =========================================================================
    // Stage 1: One job per table x variable
    // =========================================================================
    let assembler = TableAssembler::new(
        &current,
        previous.as_ref(),
        &templates,
        &footnotes,
        AssemblyOptions {
            year: settings.year,
            output_dir: settings.output_dir.clone(),
            dry_run: settings.dry_run,
        },
    );
    let mut sink = XlsxSink;
    let mut jobs = Vec::new();
    for table in &settings.tables {
        match assembler.run_table(table, &settings.variables, &mut sink) {
            Ok(results) => {
                for (variable, result) in results {
                    if let Err(err) = &result {
                        error!(table = table.name, variable = variable.name, error = %err, "job failed");
                    }
                    jobs.push(JobOutcome {
                        table: table.name,
                        variable: variable.name,
                        report: result.map_err(|err| err.to_string()),
                    });
                }
            }
            Err(err) => {
                error!(table = table.name, error = %err, "table template failed");
                for variable in &settings.variables {
                    jobs.push(JobOutcome {
                        table: table.name,
                        variable: variable.name,
                        report: Err(err.to_string()),
                    });
                }
            }
        }
    }

    Ok(RunResult {
        year: settings.year,
        output_dir: settings.output_dir,
        dry_run: settings.dry_run,
        jobs,
    })
}
