//! Markdown rendering of the engineering report

use crate::cli::table::TableOutput;
use crate::engineering::output::EngineeringOutput;
use crate::engineering::TestConfiguration;
use crate::entities::regulation::LABEL_DATE_FORMAT;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render a full report
pub fn render_report(output: &EngineeringOutput) -> String {
    let mut out = String::new();

    out.push_str("# Child Restraint Engineering Parameters\n");
    if !output.metadata.regulations.is_empty() {
        out.push_str(&format!(
            "## Based on {}\n",
            output.metadata.regulations.join(" / ")
        ));
    }
    out.push('\n');

    out.push_str("> **Generation info**\n");
    out.push_str(&format!(
        "> - Generated: {}\n",
        output.metadata.generated_at.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!("> - Tool version: {}\n", output.metadata.tool_version));
    out.push_str(&format!("> - Data source: {}\n", output.metadata.data_source));
    for label in &output.metadata.regulations {
        out.push_str(&format!("> - {}\n", label));
    }
    out.push('\n');

    render_basic_info(output, &mut out);
    render_mappings(output, &mut out);
    render_advisories(output, &mut out);
    render_anthropometry(output, &mut out);
    render_thresholds(output, &mut out);

    out.push_str("## Test Matrix\n");
    if output.test_matrix.is_empty() {
        out.push_str("_No test configurations for the selected regulations._\n");
    }
    for config in &output.test_matrix {
        out.push_str(&format!("- {}\n", matrix_line(config)));
    }
    out.push('\n');

    render_compliance(output, &mut out);
    out
}

fn render_basic_info(output: &EngineeringOutput, out: &mut String) {
    let info = &output.basic_info;
    let dummies = if info.dummy_codes.is_empty() {
        "-".to_string()
    } else {
        info.dummy_codes.join(", ")
    };

    let mut table = TableOutput::new(&["Parameter", "Value"]);
    table.push_row(vec!["Product type".to_string(), info.product_type.clone()]);
    table.push_row(vec!["Height range".to_string(), info.height_cm.display_with_unit("cm")]);
    table.push_row(vec!["Weight range".to_string(), info.weight_kg.display_with_unit("kg")]);
    table.push_row(vec!["Age range".to_string(), info.age_range.clone()]);
    table.push_row(vec!["Dummies".to_string(), dummies]);
    table.push_row(vec!["Install method".to_string(), info.install_method.clone()]);

    out.push_str("## Basic Information\n\n");
    out.push_str(&table.to_markdown());
    out.push('\n');
}

fn render_mappings(output: &EngineeringOutput, out: &mut String) {
    if output.standard_mappings.is_empty() {
        return;
    }
    out.push_str("## Standard Mapping\n\n");

    for section in &output.standard_mappings {
        out.push_str(&format!("### {}\n\n", section.regulation));
        if section.dummies.is_empty() {
            out.push_str("_No catalog dummy for this regulation matches the envelope._\n\n");
            continue;
        }

        let mut table =
            TableOutput::new(&["Height Range", "Dummy", "Age Range", "Install Direction", "Clause"]);
        for mapping in &section.dummies {
            table.push_row(vec![
                mapping.height_cm.display_with_unit("cm"),
                mapping.dummy_code.clone(),
                mapping.age_range.clone(),
                mapping.install_direction.to_string(),
                mapping.clause.clone(),
            ]);
        }
        out.push_str(&table.to_markdown());
        out.push('\n');
    }
}

fn render_advisories(output: &EngineeringOutput, out: &mut String) {
    for advisory in &output.advisories {
        out.push_str(&format!(
            "> **{} requirements** (compliance date {}):\n",
            advisory.regulation,
            advisory.compliance_date.format(LABEL_DATE_FORMAT)
        ));
        for note in &advisory.notes {
            out.push_str(&format!("> - {}\n", note));
        }
        out.push('\n');
    }
}

fn render_anthropometry(output: &EngineeringOutput, out: &mut String) {
    let params = &output.anthropometry;

    let mut table = TableOutput::new(&["Parameter", "Minimum", "Recommended", "Maximum", "Basis"]);
    table.push_row(vec![
        "Seat width".to_string(),
        mm(params.seat_width_min_mm),
        mm(params.seat_width_ideal_mm),
        mm(params.seat_width_max_mm),
        "Hip breadth x 1.1-1.25".to_string(),
    ]);
    table.push_row(vec![
        "Shoulder belt height".to_string(),
        mm(params.shoulder_belt_height_min_mm),
        "-".to_string(),
        mm(params.shoulder_belt_height_max_mm),
        "Shoulder breadth x 0.6-0.7".to_string(),
    ]);

    out.push_str(&format!(
        "## Anthropometric Design Parameters ({})\n\n",
        params.data_source
    ));
    out.push_str(&table.to_markdown());
    out.push('\n');
}

fn render_thresholds(output: &EngineeringOutput, out: &mut String) {
    for section in &output.safety_thresholds {
        out.push_str(&format!("## Safety Thresholds ({})\n\n", section.regulation));
        if section.thresholds.is_empty() {
            out.push_str("_No thresholds catalogued for this regulation._\n\n");
            continue;
        }

        let mut table = TableOutput::new(&[
            "Test Item",
            "Parameter",
            "Applicable Dummy",
            "Limit",
            "Unit",
            "Clause",
        ]);
        for threshold in &section.thresholds {
            table.push_row(vec![
                threshold.test_item.clone(),
                threshold.parameter.clone(),
                threshold.applicable_dummy.clone(),
                threshold.limit_display(),
                threshold.unit.clone(),
                threshold.clause.clone(),
            ]);
        }
        out.push_str(&table.to_markdown());
        out.push('\n');
    }
}

fn render_compliance(output: &EngineeringOutput, out: &mut String) {
    out.push_str("## Compliance Statement\n");
    if output.metadata.regulations.is_empty() {
        out.push_str("No regulation was selected for this design.\n");
    } else {
        out.push_str("This design targets the following regulations:\n");
        for label in &output.metadata.regulations {
            out.push_str(&format!("- {}\n", label));
        }
    }
    out.push('\n');

    out.push_str("> **Engineering notes**\n");
    out.push_str(
        "> 1. UN R129 and FMVSS 213 parameters are kept separate and are not interchangeable\n",
    );
    let upcoming = output.advisories.iter().filter(|a| a.future);
    for (n, advisory) in upcoming.enumerate() {
        out.push_str(&format!(
            "> {}. {} becomes mandatory on {}; plan the design ahead\n",
            n + 2,
            advisory.regulation,
            advisory.compliance_date.format(LABEL_DATE_FORMAT)
        ));
    }
}

/// "R129_FRONTAL | UN R129 | Frontal | Q10 | Rearward | ISOFIX 3 pts + Top-tether | 50 km/h"
pub fn matrix_line(config: &TestConfiguration) -> String {
    format!(
        "{} | {} | {} | {} | {} | {} | {} km/h",
        config.config_id,
        config.regulation_number,
        config.pulse,
        config.dummy_code,
        config.facing,
        config.install_method,
        config.speed_kmh
    )
}

/// Test matrix as a table, shared by `crsc matrix`
pub fn matrix_table(configs: &[TestConfiguration]) -> TableOutput {
    let mut table = TableOutput::new(&[
        "Config",
        "Regulation",
        "Pulse",
        "Dummy",
        "Facing",
        "Install",
        "Speed (km/h)",
    ]);
    for config in configs {
        table.push_row(vec![
            config.config_id.clone(),
            config.regulation_number.clone(),
            config.pulse.to_string(),
            config.dummy_code.clone(),
            config.facing.to_string(),
            config.install_method.clone(),
            config.speed_kmh.to_string(),
        ]);
    }
    table
}

fn mm(value: f64) -> String {
    format!("{}mm", value.round() as i64)
}
