// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use evidence_report::{cli, console_format, input, report, ui};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    let layout = match args.layout_config() {
        Ok(layout) => layout,
        Err(e) => {
            ui::print_error(&format!("Layout error: {}", e));
            std::process::exit(1);
        }
    };

    let report_input = match input::load_report(&args.input) {
        Ok(input) => input,
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(1);
        }
    };

    // Missing fields leave empty cells; the report is still generated
    let missing = report_input.general.missing_required();
    if !missing.is_empty() && !args.quiet {
        ui::print_warning(&format!("Missing required fields: {}", missing.join(", ")));
    }

    let summary = report_input.summary();
    if !args.quiet {
        ui::status(&format!(
            "Generating report for {} with {} test cases",
            display_product(&report_input.general.product),
            report_input.test_cases.len()
        ));
    }

    let stats = match report::save_pdf(
        &report_input.general,
        &report_input.test_cases,
        &summary,
        &layout,
        &args.output,
    ) {
        Ok(stats) => stats,
        Err(e) => {
            ui::print_error(&format!("Failed to write {}: {}", args.output.display(), e));
            std::process::exit(1);
        }
    };

    if let Some(ref json_path) = args.json_summary {
        match report::export_json_summary(&summary, json_path) {
            Ok(_) => {
                if !args.quiet {
                    ui::status(&format!("Summary saved to: {}", json_path.display()));
                }
            }
            Err(e) => {
                ui::print_error(&format!("Failed to write {}: {}", json_path.display(), e));
                std::process::exit(1);
            }
        }
    }

    if stats.images_skipped > 0 && !args.quiet {
        ui::print_warning(&format!("{} evidence files could not be decoded and were left out", stats.images_skipped));
    }

    if !args.quiet {
        console_format::print_report_overview(
            &summary,
            &report_input.test_cases,
            &args.output.display().to_string(),
            &stats,
        );
    }
}

fn display_product(product: &str) -> &str {
    if product.trim().is_empty() { "(unnamed product)" } else { product }
}
