use bike_weather::{print_frequencies, BikeWeather};
use std::env;
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "bikes.db".to_string());
    let start = args.next().unwrap_or_else(|| "2021-01-01".to_string());
    let end = args.next().unwrap_or_else(|| "2021-01-07 23:55:00".to_string());
    let station = args.next().and_then(|s| s.parse::<i64>().ok());

    let client = BikeWeather::open(&path)?;
    let merged = client
        .required_data()
        .start(start)
        .end(end)
        .maybe_station(station)
        .call()?;

    println!("{} merged rows, join report: {:?}", merged.len(), merged.report);
    let df = merged.to_dataframe()?;
    print_frequencies(&df, &mut io::stdout().lock())?;

    client.close()?;
    Ok(())
}
