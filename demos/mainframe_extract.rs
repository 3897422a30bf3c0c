//! Decoding a padded mainframe extract with formatters and a custom delimiter

use fixcol_core::{DecodeConfig, RecordLayout};

#[derive(Debug, Default)]
struct Employee {
    last: String,
    first: String,
    department: String,
    salary: u32,
    manager_id: Option<u32>,
}

const EXTRACT: &str = "\
SMITH   JOHN      SALES     00050000000017
DOE     JANE      RESEARCH  00072500000000
BROWN   ALEX      SUPPORT   0004X000000003
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fixcol Mainframe Extract Example\n");

    let layout = RecordLayout::<Employee>::builder()
        .formatted_field("last", "0:8", "trim", |e: &mut Employee, v: String| e.last = v)
        .formatted_field("first", "8:18", "trim", |e: &mut Employee, v: String| e.first = v)
        .formatted_field("department", "18:28", "lower", |e: &mut Employee, v: String| {
            e.department = v.trim_end().to_string()
        })
        .formatted_field("salary", "28:36", "strip-zeros", |e: &mut Employee, v: u32| {
            e.salary = v
        })
        .formatted_field("manager_id", "36", "strip-zeros", |e: &mut Employee, v: Option<u32>| {
            e.manager_id = v.filter(|id| *id != 0)
        })
        .build();

    let config = DecodeConfig::new()
        .with_delimiter(":")
        .with_standard_formatters();

    layout.check(&config)?;

    for (number, line) in EXTRACT.lines().enumerate() {
        match layout.decode_new(line, &config) {
            Ok(employee) => println!("line {}: {:?}", number + 1, employee),
            Err(e) => println!("line {}: {}", number + 1, e),
        }
    }

    Ok(())
}
