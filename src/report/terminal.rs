use std::collections::BTreeMap;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{ProjectProfile, ProjectTypeMatch, SetupStep};

/// Render a colored terminal report.
pub fn render(profile: &ProjectProfile, quiet: bool) -> Result<()> {
    if quiet {
        println!("{}", summary_line(profile));
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "project-profiler".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Analyzed: {}\n", profile.root_path.display());

    if profile.is_inconclusive() {
        println!(
            " {} No marker files or setup instructions found.\n",
            "[INCONCLUSIVE]".yellow().bold()
        );
        return Ok(());
    }

    let primary = match (&profile.primary_language, &profile.primary_package_manager) {
        (Some(lang), Some(pm)) => format!("{} ({})", lang, pm),
        _ => "unknown".to_string(),
    };

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Primary type       : {}", primary));
    println!(
        " │  {:<48} │",
        format!("Markers detected   : {}", profile.matches.len())
    );
    println!(
        " │  {:<48} │",
        format!("Setup steps        : {}", profile.setup_steps.len())
    );
    println!(
        " │  {:<48} │",
        format!("Env variables      : {}", profile.environment_variables.len())
    );
    println!(
        " │  {:<48} │",
        format!("Version constraints: {}", profile.version_constraints.len())
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if !profile.matches.is_empty() {
        println!(" {} Detected project types:\n", "[TYPE]".cyan().bold());
        println!("{}\n", matches_table(&profile.matches));
    }

    if !profile.system_dependencies.is_empty() {
        println!(
            " {} {}\n",
            "[SYSTEM]".magenta().bold(),
            profile.system_dependencies.join(", ")
        );
    }

    if !profile.setup_steps.is_empty() {
        println!(" {} Setup steps:\n", "[STEPS]".green().bold());
        println!("{}\n", steps_table(&profile.setup_steps));
    }

    if !profile.environment_variables.is_empty() {
        println!(" {} Environment variables:\n", "[ENV]".yellow().bold());
        println!(
            "{}\n",
            key_value_table("Variable", "Example", &profile.environment_variables)
        );
    }

    if !profile.version_constraints.is_empty() {
        println!(" {} Version constraints:\n", "[VERSIONS]".blue().bold());
        println!(
            "{}\n",
            key_value_table("Dependency", "Constraint", &profile.version_constraints)
        );
    }

    if !profile.has_plan() {
        println!(
            " {} No setup plan could be extracted from the documentation.\n",
            "[NOTE]".dimmed()
        );
    }

    Ok(())
}

fn summary_line(profile: &ProjectProfile) -> String {
    let detected = profile.primary_language.as_deref().unwrap_or("unknown");
    let pm = profile.primary_package_manager.as_deref().unwrap_or("-");
    format!(
        "Type: {}  PM: {}  Steps: {}  Env: {}  Versions: {}",
        detected,
        pm,
        profile.setup_steps.len(),
        profile.environment_variables.len(),
        profile.version_constraints.len(),
    )
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(titles));
    table
}

fn matches_table(matches: &[ProjectTypeMatch]) -> Table {
    let mut table = new_table(&["", "Language", "Package manager", "Marker"]);
    for (i, m) in matches.iter().enumerate() {
        let marker = if i == 0 {
            Cell::new("★").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker.set_alignment(CellAlignment::Center),
            Cell::new(&m.language),
            Cell::new(&m.package_manager),
            Cell::new(&m.detected_marker_file).fg(Color::DarkGrey),
        ]);
    }
    table
}

fn steps_table(steps: &[SetupStep]) -> Table {
    let mut table = new_table(&["#", "Action", "Command"]);
    for step in steps {
        let order = step.order.map(|o| o.to_string()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(order).set_alignment(CellAlignment::Right),
            Cell::new(&step.action),
            Cell::new(&step.command).fg(Color::Cyan),
        ]);
    }
    table
}

fn key_value_table(key_title: &str, value_title: &str, map: &BTreeMap<String, String>) -> Table {
    let mut table = new_table(&[key_title, value_title]);
    for (k, v) in map {
        table.add_row(vec![Cell::new(k), Cell::new(v)]);
    }
    table
}
