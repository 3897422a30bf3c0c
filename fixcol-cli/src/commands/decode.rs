use crate::record::{empty_record, json_layout, layout_config, load_layout};
use crate::OutputFormat;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use tracing::{info, warn};

/// Line counts from one `decode` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Non-empty lines read from the input
    pub lines_read: usize,
    /// Lines decoded into a record
    pub decoded: usize,
    /// Lines skipped under `keep_going`
    pub failed: usize,
}

pub fn execute(
    layout: &str,
    input: &str,
    output: Option<&str>,
    format: OutputFormat,
    delimiter: Option<&str>,
    keep_going: bool,
) -> Result<DecodeSummary> {
    info!("Decoding {} with layout {}", input, layout);

    let spec = load_layout(layout)?;
    let record_layout = json_layout(&spec);
    let config = layout_config(&spec, delimiter);

    info!(
        "Layout has {} fields, delimiter {:?}",
        record_layout.len(),
        config.delimiter()
    );

    // Read input file or stdin
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input))?
    };

    let mut summary = DecodeSummary::default();
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        summary.lines_read += 1;

        let mut record = empty_record();
        match record_layout.decode(line, &mut record, &config) {
            Ok(()) => {
                summary.decoded += 1;
                records.push(record);
            }
            Err(e) if keep_going => {
                summary.failed += 1;
                warn!("Skipping line {}: {}", index + 1, e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to decode line {}", index + 1));
            }
        }
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)
            .with_context(|| "Failed to serialize records")?,
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for record in &records {
                out.push_str(
                    &serde_json::to_string(record).with_context(|| "Failed to serialize record")?,
                );
                out.push('\n');
            }
            out
        }
    };

    if let Some(output_path) = output {
        fs::write(output_path, &rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Records written to: {}", output_path);
    } else {
        println!("{}", rendered.trim_end());
    }

    eprintln!("\n=== Decode Results ===");
    eprintln!("Lines read:        {}", summary.lines_read);
    eprintln!("Records decoded:   {}", summary.decoded);
    eprintln!("Lines failed:      {}", summary.failed);

    Ok(summary)
}
