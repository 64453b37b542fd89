//! `fixit list` command - show store records as a table

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::import::{parse_resource_type, ResourceType};
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Resource type to list (parts, equipment, locations, users)
    #[arg(value_parser = parse_resource_type)]
    pub resource: ResourceType,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = super::open_project(global)?;
    let config = Config::load(Some(project.root()));
    let format = super::effective_format(global, &config);

    if format == OutputFormat::Csv {
        // Same output as export, kept here so `list -f csv` works too
        return super::export::run(
            super::export::ExportArgs {
                resource: args.resource,
                output: None,
            },
            global,
        );
    }

    let store = Store::open(&project).map_err(|e| miette::miette!("{}", e))?;

    match args.resource {
        ResourceType::Parts => {
            let parts = store.list_parts().map_err(|e| miette::miette!("{}", e))?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&parts).into_diagnostic()?);
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Part Number", "Name", "Qty", "Min", "Unit Cost", "Location"]);
            for p in &parts {
                builder.push_record([
                    p.part_number.clone(),
                    p.name.clone(),
                    trim_num(p.quantity),
                    trim_num(p.min_stock),
                    p.unit_cost.map(trim_num).unwrap_or_default(),
                    p.location.clone().unwrap_or_default(),
                ]);
            }
            print_table(builder, parts.len(), args.resource, global.quiet);
        }
        ResourceType::Equipment => {
            let equipment = store.list_equipment().map_err(|e| miette::miette!("{}", e))?;
            if format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&equipment).into_diagnostic()?
                );
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Code", "Name", "Location", "Model", "Status"]);
            for e in &equipment {
                builder.push_record([
                    e.code.clone(),
                    e.name.clone(),
                    e.location_code.clone(),
                    e.model_name.clone().unwrap_or_default(),
                    e.status.clone(),
                ]);
            }
            print_table(builder, equipment.len(), args.resource, global.quiet);
        }
        ResourceType::Locations => {
            let locations = store.list_locations().map_err(|e| miette::miette!("{}", e))?;
            if format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&locations).into_diagnostic()?
                );
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Code", "Name", "Parent", "Description"]);
            for l in &locations {
                builder.push_record([
                    l.code.clone(),
                    l.name.clone(),
                    l.parent_code.clone().unwrap_or_default(),
                    l.description.clone().unwrap_or_default(),
                ]);
            }
            print_table(builder, locations.len(), args.resource, global.quiet);
        }
        ResourceType::Users => {
            let users = store.list_users().map_err(|e| miette::miette!("{}", e))?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&users).into_diagnostic()?);
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Employee ID", "Name", "Email", "Role", "Rate"]);
            for u in &users {
                builder.push_record([
                    u.employee_id.clone(),
                    u.name.clone(),
                    u.email.clone().unwrap_or_default(),
                    u.role_name.clone(),
                    u.hourly_rate.map(trim_num).unwrap_or_default(),
                ]);
            }
            print_table(builder, users.len(), args.resource, global.quiet);
        }
    }

    Ok(())
}

fn print_table(builder: Builder, count: usize, resource: ResourceType, quiet: bool) {
    if count == 0 {
        println!(
            "No {} in the store. Import some: fixit import {} <file.csv>",
            resource,
            resource.as_str()
        );
        return;
    }
    println!("{}", builder.build().with(Style::markdown()));
    if !quiet {
        println!();
        println!("{}", style(format!("{} {}", count, resource)).dim());
    }
}

fn trim_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
