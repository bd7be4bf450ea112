//! Run a scripted scenario

use crate::scenario::{Scenario, Simulation};
use crate::util;
use anyhow::{Context, Result};
use navigator::NavigationContainer;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(config: &Path, scenario_path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;

    let options = if scenario.no_linking {
        None
    } else {
        Some(util::load_options(config)?)
    };
    let container = NavigationContainer::new(options);

    let reports = Simulation::new(&container).run(&scenario)?;
    let failed = reports.iter().filter(|r| !r.passed).count();

    if json {
        let state = container.root_state();
        let output = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
        println!("{}", output);
    } else {
        let title = scenario
            .name
            .clone()
            .unwrap_or_else(|| scenario_path.display().to_string());
        println!("{}", title.bold());
        println!();

        for report in &reports {
            let mark = if report.passed {
                "✓".green().to_string()
            } else {
                "✗".red().to_string()
            };
            println!(
                "{:>3}. {} {}  {}",
                report.index,
                mark,
                report.description,
                report.outcome.dimmed()
            );
        }

        println!();
        println!("Active: {}", container.active_route_names().join(" > ").cyan());
    }

    if failed > 0 {
        anyhow::bail!("{} expectation(s) failed", failed);
    }
    Ok(())
}
