//! Binary entrypoint: interactive incident menu on stdin/stdout.
//!
//! Logs go to stderr. Addresses resolve through Nominatim unless a
//! `--gazetteer` file is given.

use clap::Parser;
use std::io::{self, Write};
use tracing::info;

use incident_map::config::Args;
use incident_map::menu::Menu;
use incident_map::{logging, Config, GeocodingResolver, IncidentStore, NominatimResolver, TableResolver};

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "incident-map error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from(Args::parse());
  config.validate()?;
  logging::init(&config.log_level);

  let resolver: Box<dyn GeocodingResolver> = match &config.gazetteer {
    Some(path) => {
      let table = TableResolver::from_json_file(path)?;
      info!(path = %path.display(), entries = table.len(), "using offline gazetteer");
      Box::new(table)
    }
    None => {
      let nominatim = NominatimResolver::new(&config)?;
      info!(url = %nominatim.search_url(), "using nominatim");
      Box::new(nominatim)
    }
  };

  let mut store = IncidentStore::new(resolver);
  let stdin = io::stdin();
  let stdout = io::stdout();
  Menu::new(&mut store, stdin.lock(), io::BufWriter::new(stdout.lock())).run()?;
  Ok(())
}
