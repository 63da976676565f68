use anyhow::Result;

use abstutil::prettyprint_usize;
use kml::{GeometryCollection, Options};

pub fn run(collection: GeometryCollection, json: bool, opts: &Options) -> Result<()> {
    if json {
        let details = kml::feature_details(&collection, opts).unwrap();
        println!("{}", abstutil::to_json(&details));
        return Ok(());
    }

    let (details, warnings) = kml::feature_details(&collection, opts).into_parts();
    for err in &warnings {
        warn!("{}", err);
    }

    if collection.single_root().is_some() {
        println!("The document has a single root record and no top-level features");
        return Ok(());
    }

    println!("{:>6}  {:<32} {:<20} {:>12}", "ID", "Name", "Type", "Length");
    for d in &details {
        println!(
            "{:>6}  {:<32} {:<20} {:>12}",
            d.id,
            d.name,
            d.geometry_kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string()),
            d.length
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    println!();
    let kinds = kml::kind_counts(&details);
    for (kind, count) in kinds.iter() {
        println!("{}: {}", kind, prettyprint_usize(count));
    }
    println!(
        "{} of {} features have geometry",
        prettyprint_usize(kinds.sum()),
        prettyprint_usize(details.len())
    );
    if !warnings.is_empty() {
        println!(
            "{} features have unusable coordinates; see the warnings above",
            prettyprint_usize(warnings.len())
        );
    }
    Ok(())
}
