//! Tests for the static table and variable registry.

use std::collections::HashSet;

use ashe_model::{ModelError, table, tables, variable, variables};

#[test]
fn every_table_has_sources_and_a_template() {
    for spec in tables() {
        assert!(!spec.sources.is_empty(), "{} has no sources", spec.name);
        assert!(
            spec.template.ends_with(" template.xlsx"),
            "{} template {}",
            spec.name,
            spec.template
        );
        let unique: HashSet<_> = spec.sources.iter().collect();
        assert_eq!(unique.len(), spec.sources.len(), "{} repeats a source", spec.name);
    }
}

#[test]
fn table_names_are_unique() {
    let names: HashSet<_> = tables().iter().map(|spec| spec.name).collect();
    assert_eq!(names.len(), tables().len());
}

#[test]
fn table_lookup_and_derived_names() {
    let spec = table("Table 2 - Occupation (2)").expect("table 2 registered");
    assert_eq!(spec.sources, &["occ1", "occ2"]);
    assert_eq!(spec.label(), "Table 2");
    assert_eq!(spec.template_name(), "Occupation SOC20 (2)");
    assert!(!spec.is_northern_ireland());

    let ni = table("Table 6 - Age NI").expect("NI table registered");
    assert!(ni.is_northern_ireland());
    assert_eq!(ni.template_name(), "Work Region Age NI");
}

#[test]
fn unknown_table_is_an_error() {
    let err = table("Table 99 - Nothing").unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownTable {
            name: "Table 99 - Nothing".to_string()
        }
    );
}

#[test]
fn variables_are_numbered_in_order() {
    for (position, spec) in variables().iter().enumerate() {
        assert_eq!(spec.sub_number, format!(".{}", position + 1));
    }
    let hourly: Vec<_> = variables()
        .iter()
        .filter(|spec| spec.hourly)
        .map(|spec| spec.name)
        .collect();
    assert_eq!(hourly, vec!["Hourly Pay", "Hourly pay - Excluding overtime"]);
}

#[test]
fn variable_lookup_by_name_or_code() {
    let by_name = variable("Basic Pay - Including other pay").expect("by name");
    let by_code = variable("BPAYinc").expect("by code");
    assert_eq!(by_name, by_code);
    assert_eq!(by_name.sub_number, ".3");
    assert!(variable("NOPE").is_err());
}

#[test]
fn footnote_groups() {
    let group = |name: &str| variable(name).expect("registered").footnote_group;
    assert_eq!(group("Annual pay - Gross"), 2);
    assert_eq!(group("Overtime pay"), 3);
    assert_eq!(group("Annual pay - Incentive"), 4);
    assert_eq!(group("Hourly Pay"), 1);
}
