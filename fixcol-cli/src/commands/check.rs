use crate::record::{json_layout, layout_config, load_layout};
use anyhow::{bail, Result};
use colored::*;
use tracing::{info, warn};

pub fn execute(layout: &str, delimiter: Option<&str>) -> Result<()> {
    info!("Checking layout: {}", layout);

    let spec = load_layout(layout)?;
    let record_layout = json_layout(&spec);
    let config = layout_config(&spec, delimiter);

    println!("\n=== Layout Check ===");
    println!("Fields:             {}", record_layout.len());
    println!("Delimiter:          {:?}", config.delimiter());
    println!("Formatters:         {}", config.formatters().names().join(", "));
    println!();

    let mut failures = 0;

    for field in record_layout.fields() {
        let Some(range) = field.range() else {
            println!("{} {:<20} untagged, never decoded", "-".dimmed(), field.name());
            continue;
        };

        match field.check(&config) {
            Ok(()) if !field.kind().is_supported() => {
                println!(
                    "{} {:<20} {:<12} type {} has no coercion, skipped",
                    "!".yellow(),
                    field.name(),
                    range,
                    field.kind()
                );
            }
            Ok(()) => {
                println!(
                    "{} {:<20} {:<12} {}",
                    "✓".green(),
                    field.name(),
                    range,
                    field.kind()
                );
            }
            Err(e) => {
                failures += 1;
                warn!("Field {} failed validation: {}", field.name(), e);
                println!(
                    "{} {:<20} {:<12} {}",
                    "✗".red(),
                    field.name(),
                    range,
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if failures > 0 {
        bail!(
            "{} of {} fields failed validation",
            failures,
            record_layout.len()
        );
    }

    println!("{} Layout is valid", "✓".green());
    Ok(())
}
