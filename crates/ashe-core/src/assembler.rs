//! Table assembly: one job per table x variable.
//!
//! A job loads this year's point estimates and reliability scores and last
//! year's point estimates for every category, renders the six variants in
//! memory and only then writes them, so a failure part way through a job
//! leaves no partial output behind.

use std::path::PathBuf;
use std::time::Instant;

use ashe_ingest::{ExtractAggregator, IngestError, SourceCatalog};
use ashe_model::{
    Category, NormalizedRecord, PerCategory, TableSpec, ValueKind, VariableSpec, VariantKind,
};
use ashe_output::{
    FootnoteSource, PendingWorkbook, Template, TemplateSource, WorkbookSink, commit, output_dir,
    output_file_name, workbook_title,
};
use ashe_transform::normalize_dataset;
use tracing::{info, info_span, warn};

use crate::error::Result;
use crate::render::{CategoryData, CategoryTables, render_category};
use crate::report::{JobReport, JobWarning};

/// Settings shared by every job of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub year: i32,
    pub output_dir: PathBuf,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// Workbooks of one job, rendered but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledJob {
    pub workbooks: Vec<PendingWorkbook>,
    pub categories: Vec<CategoryTables>,
    pub warnings: Vec<JobWarning>,
}

/// Drives the ingest, transform and output stages for one table at a time.
pub struct TableAssembler<'a> {
    current: ExtractAggregator<'a>,
    previous: Option<ExtractAggregator<'a>>,
    templates: &'a dyn TemplateSource,
    footnotes: &'a dyn FootnoteSource,
    options: AssemblyOptions,
}

impl<'a> TableAssembler<'a> {
    pub fn new(
        current: &'a SourceCatalog,
        previous: Option<&'a SourceCatalog>,
        templates: &'a dyn TemplateSource,
        footnotes: &'a dyn FootnoteSource,
        options: AssemblyOptions,
    ) -> Self {
        Self {
            current: ExtractAggregator::new(current),
            previous: previous.map(ExtractAggregator::new),
            templates,
            footnotes,
            options,
        }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Runs one job per variable. The template is read once; a failing job
    /// does not stop the others.
    pub fn run_table(
        &self,
        table: &TableSpec,
        variables: &[&'static VariableSpec],
        sink: &mut dyn WorkbookSink,
    ) -> Result<Vec<(&'static VariableSpec, Result<JobReport>)>> {
        let span = info_span!("table", table = table.name);
        let _guard = span.enter();

        let template = self.templates.load(table)?;
        Ok(variables
            .iter()
            .map(|&variable| (variable, self.run(table, &template, variable, sink)))
            .collect())
    }

    /// Assembles one job and commits its workbooks unless this is a dry run.
    pub fn run(
        &self,
        table: &TableSpec,
        template: &Template,
        variable: &VariableSpec,
        sink: &mut dyn WorkbookSink,
    ) -> Result<JobReport> {
        let started = Instant::now();
        let span = info_span!(
            "job",
            table = table.name,
            variable = variable.name,
            year = self.options.year
        );
        let _guard = span.enter();

        let job = self.assemble(table, template, variable)?;
        let files = if self.options.dry_run {
            job.workbooks.iter().map(|item| item.path.clone()).collect()
        } else {
            commit(sink, &job.workbooks)?
        };

        let duration = started.elapsed();
        info!(
            files = files.len(),
            warnings = job.warnings.len(),
            dry_run = self.options.dry_run,
            duration_ms = duration.as_millis() as u64,
            "job finished"
        );
        Ok(JobReport {
            table: table.name,
            variable: variable.name,
            year: self.options.year,
            files,
            dry_run: self.options.dry_run,
            warnings: job.warnings,
            duration,
        })
    }

    /// Loads, transforms and renders one job without writing anything.
    pub fn assemble(
        &self,
        table: &TableSpec,
        template: &Template,
        variable: &VariableSpec,
    ) -> Result<AssembledJob> {
        let year = self.options.year;
        let mut warnings = Vec::new();

        let cv = self.load(&self.current, table, variable, ValueKind::ReliabilityScore, year)?;
        let value = self.load(&self.current, table, variable, ValueKind::PointEstimate, year)?;
        let previous = self.load_previous(table, variable, &mut warnings)?;

        let categories: Vec<CategoryTables> = Category::ALL
            .into_iter()
            .map(|category| {
                let _guard = info_span!("category", category = %category).entered();
                let data = CategoryData {
                    cv: &cv[category],
                    value: &value[category],
                    previous: previous.as_ref().map(|previous| previous[category].as_slice()),
                };
                render_category(category, &template.order, data, &mut warnings)
            })
            .collect();

        let footnotes = self.footnotes.footnotes(variable)?;
        let dir = output_dir(&self.options.output_dir, table);
        let workbooks = VariantKind::ALL
            .into_iter()
            .map(|variant| PendingWorkbook {
                path: dir.join(output_file_name(table, variable, variant, year)),
                workbook: build_workbook(table, variable, template, variant, &categories, &footnotes),
            })
            .collect();

        Ok(AssembledJob {
            workbooks,
            categories,
            warnings,
        })
    }

    fn load(
        &self,
        aggregator: &ExtractAggregator<'_>,
        table: &TableSpec,
        variable: &VariableSpec,
        kind: ValueKind,
        year: i32,
    ) -> Result<PerCategory<Vec<NormalizedRecord>>> {
        let raw = aggregator.aggregate(table, variable, kind, year)?;
        Ok(raw.map(|_, records| normalize_dataset(records, kind, variable)))
    }

    /// Last year's point estimates, or `None` with a warning when there are
    /// no extracts for that year.
    fn load_previous(
        &self,
        table: &TableSpec,
        variable: &VariableSpec,
        warnings: &mut Vec<JobWarning>,
    ) -> Result<Option<PerCategory<Vec<NormalizedRecord>>>> {
        let year = self.options.year - 1;
        let Some(previous) = &self.previous else {
            warn!(year, "no previous-year extract directory configured");
            warnings.push(JobWarning::NoPreviousYear { year });
            return Ok(None);
        };

        match self.load(previous, table, variable, ValueKind::PointEstimate, year) {
            Ok(data) => Ok(Some(data)),
            Err(crate::error::AssembleError::Ingest(IngestError::MissingSource {
                source_code,
                ..
            })) => {
                warn!(year, source = %source_code, "previous-year extract missing");
                warnings.push(JobWarning::NoPreviousYear { year });
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}

/// One variant's workbook: the template tabs with every category filled in
/// and the source tabs removed.
fn build_workbook(
    table: &TableSpec,
    variable: &VariableSpec,
    template: &Template,
    variant: VariantKind,
    categories: &[CategoryTables],
    footnotes: &[String],
) -> ashe_output::Workbook {
    let title = workbook_title(table, variable, variant.value_kind());
    let max_order = template.max_order();
    let mut workbook = template.seed();
    for tables in categories {
        let sheet = workbook.sheet_or_insert(tables.category.sheet_name());
        sheet.write_title(&title);
        sheet.write_rows(tables.rows(variant));
        sheet.write_footnotes(footnotes, max_order);
    }
    workbook.remove_sheets(table.sources);
    workbook
}
