//! `fixit export` command - dump store records as CSV
//!
//! Column order matches the import templates, so an export can be
//! re-imported as-is (round trip through the same alias tables).

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::import::{parse_resource_type, template, ResourceType};
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Resource type to export (parts, equipment, locations, users)
    #[arg(value_parser = parse_resource_type)]
    pub resource: ResourceType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let project = super::open_project(global)?;
    let store = Store::open(&project).map_err(|e| miette::miette!("{}", e))?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path).into_diagnostic()?),
        None => Box::new(std::io::stdout()),
    };
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(template::headers(args.resource))
        .into_diagnostic()?;

    let count = match args.resource {
        ResourceType::Parts => {
            let parts = store.list_parts().map_err(|e| miette::miette!("{}", e))?;
            for p in &parts {
                let quantity = fmt_number(Some(p.quantity));
                let min_stock = fmt_number(Some(p.min_stock));
                let unit_cost = fmt_number(p.unit_cost);
                csv.write_record([
                    p.part_number.as_str(),
                    p.name.as_str(),
                    p.description.as_deref().unwrap_or(""),
                    quantity.as_str(),
                    min_stock.as_str(),
                    unit_cost.as_str(),
                    p.location.as_deref().unwrap_or(""),
                    p.manufacturer.as_deref().unwrap_or(""),
                ])
                .into_diagnostic()?;
            }
            parts.len()
        }
        ResourceType::Equipment => {
            let equipment = store.list_equipment().map_err(|e| miette::miette!("{}", e))?;
            for e in &equipment {
                csv.write_record([
                    e.code.as_str(),
                    e.name.as_str(),
                    e.location_code.as_str(),
                    e.model_name.as_deref().unwrap_or(""),
                    e.type_code.as_deref().unwrap_or(""),
                    e.owner_employee_id.as_deref().unwrap_or(""),
                    e.status.as_str(),
                ])
                .into_diagnostic()?;
            }
            equipment.len()
        }
        ResourceType::Locations => {
            let locations = store.list_locations().map_err(|e| miette::miette!("{}", e))?;
            for l in &locations {
                csv.write_record([
                    l.code.as_str(),
                    l.name.as_str(),
                    l.description.as_deref().unwrap_or(""),
                    l.parent_code.as_deref().unwrap_or(""),
                ])
                .into_diagnostic()?;
            }
            locations.len()
        }
        ResourceType::Users => {
            let users = store.list_users().map_err(|e| miette::miette!("{}", e))?;
            for u in &users {
                let hourly_rate = fmt_number(u.hourly_rate);
                csv.write_record([
                    u.employee_id.as_str(),
                    u.name.as_str(),
                    u.email.as_deref().unwrap_or(""),
                    u.pin.as_str(),
                    u.role_name.as_str(),
                    hourly_rate.as_str(),
                ])
                .into_diagnostic()?;
            }
            users.len()
        }
    };

    csv.flush().into_diagnostic()?;

    if let Some(path) = &args.output {
        if !global.quiet {
            eprintln!(
                "{} Exported {} {} to {}",
                style("✓").green(),
                count,
                args.resource,
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}

/// Print numbers the way spreadsheets expect: no trailing ".0"
fn fmt_number(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(n) => format!("{}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_number;

    #[test]
    fn whole_numbers_print_without_fraction() {
        assert_eq!(fmt_number(Some(5.0)), "5");
        assert_eq!(fmt_number(Some(25.5)), "25.5");
        assert_eq!(fmt_number(None), "");
    }
}
