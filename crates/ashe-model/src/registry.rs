//! Static registry of published tables and survey variables.
//!
//! Tables map to the ordered list of source extracts that feed them and to
//! their publication template. Variables map to the shorthand code used in
//! extract file names and to the sub-table number they publish under.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    /// Source shorthands, in concatenation order. Each is also a tab on the
    /// template.
    pub sources: &'static [&'static str],
    /// Template workbook file name.
    pub template: &'static str,
}

impl TableSpec {
    /// The part of the name before the first ` - `, e.g. `Table 2`.
    pub fn label(&self) -> &'static str {
        self.name.split(" - ").next().unwrap_or(self.name)
    }

    /// Template file name without the ` template.xlsx` tail.
    pub fn template_name(&self) -> &'static str {
        self.template.split(" template").next().unwrap_or(self.template)
    }

    pub fn is_northern_ireland(&self) -> bool {
        self.name.ends_with(" NI")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: &'static str,
    /// Shorthand used in extract file names, e.g. `BPAYinc`.
    pub code: &'static str,
    /// Sub-table number, e.g. `.3`.
    pub sub_number: &'static str,
    /// Measured in pence per hour in the extracts.
    pub hourly: bool,
    /// Which `FootNotes<n>` sheet applies.
    pub footnote_group: u8,
}

const fn table_spec(
    name: &'static str,
    sources: &'static [&'static str],
    template: &'static str,
) -> TableSpec {
    TableSpec {
        name,
        sources,
        template,
    }
}

const fn variable_spec(
    name: &'static str,
    code: &'static str,
    sub_number: &'static str,
    hourly: bool,
    footnote_group: u8,
) -> VariableSpec {
    VariableSpec {
        name,
        code,
        sub_number,
        hourly,
        footnote_group,
    }
}

static TABLES: &[TableSpec] = &[
    table_spec("Table test - Test data", &["testtable"], "Testtable template.xlsx"),
    table_spec("Table 1 - All Employees", &["total"], "Total template.xlsx"),
    table_spec(
        "Table 2 - Occupation (2)",
        &["occ1", "occ2"],
        "Occupation SOC20 (2) template.xlsx",
    ),
    table_spec(
        "Table 3 - Gor by Occ (2)",
        &["gro", "goc", "wgor", "occ1", "occ2"],
        "Work Region Occupation SOC20 (2) template.xlsx",
    ),
    table_spec(
        "Table 4 - Industry (2)",
        &["iau", "ibe", "isc", "igu", "sc207", "scd07"],
        "sic07 Industry (2) template.xlsx",
    ),
    table_spec(
        "Table 5 - Gor by Ind",
        &[
            "gau", "gbe", "ggu", "gsc", "gi207", "gri07", "sc207", "scd07", "iau", "ibe", "isc",
            "igu", "wgor", "wgb", "weng", "wew",
        ],
        "sic07 Work Region Industry (2) template.xlsx",
    ),
    table_spec(
        "Table 6 - Age",
        &["agegroup", "total", "agenoadr"],
        "Age Group template.xlsx",
    ),
    table_spec(
        "Table 7 - Work Geography",
        &["warea", "weng", "wew", "wgb", "wgor", "wlanew5"],
        "Work Geography template.xlsx",
    ),
    table_spec(
        "Table 8 - Home Geography",
        &["harea", "heng", "hew", "hgb", "hgor", "hlanew5"],
        "Home Geography template.xlsx",
    ),
    table_spec(
        "Table 9 - Work PC",
        &["wpcnew5", "weng", "wew", "wgor", "wgb"],
        "Work Parliamentary Constituency template.xlsx",
    ),
    table_spec(
        "Table 10 - Home PC",
        &["hpcnew5", "heng", "hew", "hgb", "hgor"],
        "Home Parliamentary Constituency template.xlsx",
    ),
    table_spec(
        "Table 11 - Place of work Travel To Work",
        &["wttwnew5", "weng", "wew", "wgb", "wgor"],
        "Work Travel To Work Area template.xlsx",
    ),
    table_spec(
        "Table 12 - Place of residence Travel To Work",
        &["httwnew5", "heng", "hew", "hgb", "hgor"],
        "Home Travel To Work Area template.xlsx",
    ),
    table_spec("Table 13 - PubPriv", &["ppr"], "Pubpriv template.xlsx"),
    table_spec(
        "Table 14 - Occ (4)",
        &["occ1", "occ2", "occ3", "occ4"],
        "Occupation SOC20 (4) template.xlsx",
    ),
    table_spec(
        "Table 15 - Gor by Occ (3)",
        &["go3"],
        "Test Work Region Occupation SOC20 (3) template.xlsx",
    ),
    table_spec(
        "Table 15 - Gor by Occ (4)",
        &["go4"],
        "Test Work Region Occupation SOC20 (4) template.xlsx",
    ),
    table_spec(
        "Table 16 - Industry (4)",
        &["iau", "ibe", "isc", "igu", "sc207", "scd07", "sc307", "sc407"],
        "sic07 Industry (4) template.xlsx",
    ),
    table_spec(
        "Table 20 - Age by Occ (2)",
        &["agegroup", "ag1", "ag2"],
        "Age by Occupation SOC20 (2) template.xlsx",
    ),
    table_spec(
        "Table 21 - Age by Ind (2)",
        &["agegroup", "ai207", "ad207", "aau", "abe", "asc", "agu"],
        "sic07 Age by Industry (2) template.xlsx",
    ),
    table_spec(
        "Table 25 - WGOR by PUB PRIV",
        &["wgor", "ppr", "A85o"],
        "Work Region PubPriv template.xlsx",
    ),
    table_spec(
        "Table 26 - Care Workers (SOC 2000 code 6115)",
        &["hc"],
        "Care Workers SOC20 6135 & 6136 (Equiv. to SOC10 6145 & 6146, SOC 2000 6115) template.xlsx",
    ),
    table_spec("Table 27 - WLEPS", &["wl1", "wl2"], "Work LEPS template.xlsx"),
    table_spec("Table 28 - HLEPS", &["hl1", "hl2"], "Home LEPS template.xlsx"),
    table_spec(
        "Table 32 - WITL",
        &["wi2", "wi3", "wgor"],
        "Work ITL (3) template.xlsx",
    ),
    table_spec(
        "Table 33 - HITL",
        &["hi2", "hi3", "hgor"],
        "Home ITL (3) template.xlsx",
    ),
    // Northern Ireland
    table_spec(
        "Table 3 - Gor by Occ (2) NI",
        &["gro", "goc", "wgor"],
        "Work Region Occupation SOC20 (2) NI template.xlsx",
    ),
    table_spec(
        "Table 5 - Gor by Ind NI",
        &["gau", "gbe", "ggu", "gsc", "gi207", "gri07", "wgor"],
        "sic07 Work Region Industry (2) NI template.xlsx",
    ),
    table_spec(
        "Table 6 - Age NI",
        &["gag", "wgor"],
        "Work Region Age NI template.xlsx",
    ),
    table_spec(
        "Table 7 - Work Geography NI",
        &["warea"],
        "NI WAREA template.xlsx",
    ),
    table_spec(
        "Table 8 - Home Geography NI",
        &["harea"],
        "NI HAREA template.xlsx",
    ),
    table_spec("Table 9 - Work PC NI", &["wpcnew5"], "NI WPC template.xlsx"),
    table_spec("Table 10 - Home PC NI", &["hpcnew5"], "NI HPC template.xlsx"),
    table_spec(
        "Table 13 - PubPriv NI",
        &["wgor", "A85o"],
        "Work Region PubPriv NI template.xlsx",
    ),
    table_spec(
        "Table 15 - Gor by Occ (4) NI",
        &["gro", "goc", "go3", "go4", "wgor"],
        "Work Region Occupation SOC20 (4) NI template.xlsx",
    ),
];

static VARIABLES: &[VariableSpec] = &[
    variable_spec("Weekly pay - Gross", "GPAY", ".1", false, 1),
    variable_spec("Weekly pay - Excluding overtime", "GPOX", ".2", false, 1),
    variable_spec("Basic Pay - Including other pay", "BPAYinc", ".3", false, 1),
    variable_spec("Overtime pay", "OVPAY", ".4", false, 3),
    variable_spec("Hourly Pay", "HE", ".5", true, 1),
    variable_spec("Hourly pay - Excluding overtime", "HEXO", ".6", true, 1),
    variable_spec("Annual pay - Gross", "AGP", ".7", false, 2),
    variable_spec("Annual pay - Incentive", "ANIPAY", ".8", false, 4),
    variable_spec("Paid hour worked - Total", "THRS", ".9", false, 1),
    variable_spec("Paid hours worked - Basic", "BHR", ".10", false, 1),
    variable_spec("Paid hours worked - Overtime", "OVHRS", ".11", false, 1),
];

static TABLE_INDEX: LazyLock<HashMap<&'static str, &'static TableSpec>> =
    LazyLock::new(|| TABLES.iter().map(|spec| (spec.name, spec)).collect());

static VARIABLE_INDEX: LazyLock<HashMap<&'static str, &'static VariableSpec>> =
    LazyLock::new(|| {
        VARIABLES
            .iter()
            .flat_map(|spec| [(spec.name, spec), (spec.code, spec)])
            .collect()
    });

/// All published tables, in registry order.
pub fn tables() -> &'static [TableSpec] {
    TABLES
}

/// All variables, in sub-table order.
pub fn variables() -> &'static [VariableSpec] {
    VARIABLES
}

pub fn table(name: &str) -> Result<&'static TableSpec> {
    TABLE_INDEX
        .get(name.trim())
        .copied()
        .ok_or_else(|| ModelError::UnknownTable {
            name: name.to_string(),
        })
}

/// Looks a variable up by full name or by shorthand code.
pub fn variable(name: &str) -> Result<&'static VariableSpec> {
    VARIABLE_INDEX
        .get(name.trim())
        .copied()
        .ok_or_else(|| ModelError::UnknownVariable {
            name: name.to_string(),
        })
}
