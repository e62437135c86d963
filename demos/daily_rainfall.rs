use chrono::NaiveDate;
use hidroweb::{DailyFrame, DataKind, Hidroweb, HidrowebError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), HidrowebError> {
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
    let client = Hidroweb::builder().build()?;

    let observations = client
        .daily()
        .station("02045012")
        .kind(DataKind::Rainfall)
        .start(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap())
        .call()
        .await?;

    let frame = DailyFrame::from_observations(&observations, "Chuva")?;
    let february = frame
        .get_range(
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
        )
        .frame
        .collect()?;

    println!("{:#?}", february);

    Ok(())
}
