//! Basic decoding example

use fixcol_core::{DecodeConfig, RecordLayout};

#[derive(Debug, Default)]
struct Contact {
    first_name: String,
    last_name: String,
    email: String,
    street_number: u32,
    street_name: String,
    unit: String,
    city: String,
    province: String,
    postal_code: String,
    active: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fixcol Contact Decoding Example\n");

    let layout = RecordLayout::<Contact>::builder()
        .field("first_name", "0,3", |c: &mut Contact, v: String| c.first_name = v)
        .field("last_name", "3,7", |c: &mut Contact, v: String| c.last_name = v)
        .field("email", "7,27", |c: &mut Contact, v: String| c.email = v)
        .field("street_number", "27,30", |c: &mut Contact, v: u32| {
            c.street_number = v
        })
        .field("street_name", "30,42", |c: &mut Contact, v: String| c.street_name = v)
        .field("unit", "42,50", |c: &mut Contact, v: String| c.unit = v)
        .field("city", "50,57", |c: &mut Contact, v: String| c.city = v)
        .field("province", "57,64", |c: &mut Contact, v: String| c.province = v)
        .field("postal_code", "64,70", |c: &mut Contact, v: String| c.postal_code = v)
        .field("active", "70", |c: &mut Contact, v: bool| c.active = v)
        .build();

    let line = "BobDolebob.dole@example.com123Grace StreetUnit 123TorontoOntarioM5A1A1true";
    let contact = layout.decode_new(line, &DecodeConfig::new())?;

    println!("{:#?}", contact);

    // A line that is too short fails on the first field that does not fit
    if let Err(e) = layout.decode_new(&line[..40], &DecodeConfig::new()) {
        println!("\nTruncated line rejected: {}", e);
    }

    Ok(())
}
