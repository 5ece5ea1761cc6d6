//! Output naming.

use std::path::{Path, PathBuf};

use ashe_model::{TableSpec, ValueKind, VariableSpec, VariantKind};

/// Title written to A1, e.g. `Table 2.3a Basic Pay - Including other pay`.
pub fn workbook_title(table: &TableSpec, variable: &VariableSpec, kind: ValueKind) -> String {
    format!(
        "{}{}{} {}",
        table.label(),
        variable.sub_number,
        kind.table_suffix(),
        variable.name
    )
}

/// File name of one rendered variant.
pub fn output_file_name(
    table: &TableSpec,
    variable: &VariableSpec,
    variant: VariantKind,
    year: i32,
) -> String {
    format!(
        "{} {} {year}{}.xlsx",
        table.template_name(),
        workbook_title(table, variable, variant.value_kind()),
        variant.file_tag()
    )
}

/// Per-table output directory.
pub fn output_dir(root: &Path, table: &TableSpec) -> PathBuf {
    root.join(table.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_the_publication_scheme() {
        let table = ashe_model::table("Table 2 - Occupation (2)").unwrap();
        let variable = ashe_model::variable("Basic Pay - Including other pay").unwrap();

        assert_eq!(
            workbook_title(table, variable, ValueKind::PointEstimate),
            "Table 2.3a Basic Pay - Including other pay"
        );
        assert_eq!(
            output_file_name(table, variable, VariantKind::CvUnsafe, 2024),
            "Occupation SOC20 (2) Table 2.3b Basic Pay - Including other pay 2024 CV Unsafe.xlsx"
        );
        assert_eq!(
            output_file_name(table, variable, VariantKind::ValueMain, 2024),
            "Occupation SOC20 (2) Table 2.3a Basic Pay - Including other pay 2024.xlsx"
        );
        assert_eq!(
            output_dir(Path::new("out"), table),
            Path::new("out").join("Table 2 - Occupation (2)")
        );
    }
}
