use hidroweb::{CsvOptions, DataKind, Hidroweb, HidrowebError};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), HidrowebError> {
    let mut args = std::env::args().skip(1);
    let geometry = PathBuf::from(args.next().unwrap_or_else(|| "area.geojson".to_string()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let client = Hidroweb::builder().build()?;
    let written = client
        .export_by_geometry()
        .geometry(&geometry)
        .kind(DataKind::Flow)
        .output_dir(&output_dir)
        .options(CsvOptions::builder().separator(b',').decimal_separator('.').build())
        .call()
        .await?;

    for path in written {
        println!("{}", path.display());
    }

    Ok(())
}
