//! Inspects KML files that've already been converted to GeoJSON: counts every kind of element,
//! lists the top-level features with their lengths, and reports the area covered.

#[macro_use]
extern crate log;

mod details;

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use structopt::StructOpt;

use abstutil::{plain_list_names, prettyprint_usize};
use kml::{GeometryCollection, Options, TOTAL};

#[derive(StructOpt)]
#[structopt(
    name = "kml-inspect",
    about = "Summarizes KML files that've been converted to GeoJSON"
)]
struct Args {
    /// A JSON file with loading and analysis options. Flags below override it.
    #[structopt(long)]
    options: Option<String>,
    /// Reject documents with records nested deeper than this
    #[structopt(long)]
    max_depth: Option<usize>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Count every kind of element, including nested Documents, Folders, and Placemarks
    Summary {
        /// The path to a GeoJSON file
        #[structopt()]
        input: String,
        /// Print the counts as JSON instead of a table
        #[structopt(long)]
        json: bool,
    },
    /// List the top-level features, with the length of any paths
    Details {
        /// The path to a GeoJSON file
        #[structopt()]
        input: String,
        /// Print the list as JSON instead of a table
        #[structopt(long)]
        json: bool,
        /// Round each part of a MultiLineString before summing, matching older tools
        #[structopt(long)]
        legacy_rounding: bool,
    },
    /// Print the area covered by the top-level features
    Bounds {
        /// The path to a GeoJSON file
        #[structopt()]
        input: String,
    },
}

fn main() -> Result<()> {
    let args = Args::from_args();
    abstutil::logger::setup();

    let mut opts: Options = match args.options {
        Some(ref path) => abstutil::read_json(path)?,
        None => Options::default(),
    };
    if let Some(max_depth) = args.max_depth {
        opts.max_depth = max_depth;
    }

    match args.cmd {
        Command::Summary { input, json } => summary(input, json, &opts)?,
        Command::Details {
            input,
            json,
            legacy_rounding,
        } => {
            if legacy_rounding {
                opts.length_rounding = kml::LengthRounding::RoundEachPart;
            }
            details::run(load(&input, &opts)?, json, &opts)?
        }
        Command::Bounds { input } => bounds(input, &opts)?,
    }
    Ok(())
}

fn load(path: &str, opts: &Options) -> Result<GeometryCollection> {
    let bytes = abstutil::slurp_file(path)?;
    let raw_string = std::str::from_utf8(&bytes).with_context(|| format!("{} isn't UTF-8", path))?;
    let collection = GeometryCollection::from_json_str(raw_string, opts)
        .with_context(|| format!("loading {}", path))?;
    info!(
        "Loaded {} with {} top-level features",
        path,
        prettyprint_usize(collection.features().len())
    );
    Ok(collection)
}

fn summary(path: String, json: bool, opts: &Options) -> Result<()> {
    let collection = load(&path, opts)?;
    let counts = kml::summarize(&collection, opts)?;

    if json {
        println!("{}", abstutil::to_json(&counts));
        return Ok(());
    }

    let kinds: BTreeSet<String> = counts
        .iter()
        .filter(|(kind, _)| *kind != TOTAL)
        .map(|(kind, _)| kind.to_string())
        .collect();
    if !kinds.is_empty() {
        info!("Found {}", plain_list_names(kinds));
    }

    println!("{:<24} {:>10}", "Element Type", "Count");
    // Total goes last, after every kind in alphabetical order
    for (kind, count) in counts.iter().filter(|(kind, _)| *kind != TOTAL) {
        println!("{:<24} {:>10}", kind, prettyprint_usize(count));
    }
    println!("{:<24} {:>10}", TOTAL, prettyprint_usize(counts.total()));
    Ok(())
}

fn bounds(path: String, opts: &Options) -> Result<()> {
    let collection = load(&path, opts)?;
    match collection.gps_bounds() {
        Some(b) => {
            println!("Longitude: {} to {}", b.min_lon, b.max_lon);
            println!("Latitude: {} to {}", b.min_lat, b.max_lat);
            println!("Center: {}", b.center());
            let width = geom::LonLat::new(b.min_lon, b.min_lat)
                .gps_dist_meters(geom::LonLat::new(b.max_lon, b.min_lat));
            let height = geom::LonLat::new(b.min_lon, b.min_lat)
                .gps_dist_meters(geom::LonLat::new(b.min_lon, b.max_lat));
            println!("Roughly {} wide and {} tall", width, height);
        }
        None => println!("{} has no valid coordinates on its top-level features", path),
    }
    Ok(())
}
