use ecovision::{
    AnalysisType, ChartConfigBuilder, EcoVision, EcoVisionError, NormalizedData, QualityCode,
};

#[tokio::main]
async fn main() -> Result<(), EcoVisionError> {
    env_logger::init();
    let client = EcoVision::new()?;

    let options = client.load_options().await;
    for choice in options.location_choices() {
        println!("location: {} ({})", choice.label, choice.value);
    }

    let data = client
        .analysis()
        .analysis_type(AnalysisType::Weighted)
        .location_id("Irvine")
        .metric("temperature")
        .minimum_quality(QualityCode::Good)
        .call()
        .await?;

    if let NormalizedData::Weighted(summary) = &data {
        for row in &summary.table_rows {
            println!("{:#?}", row);
        }
    }
    for chart in ChartConfigBuilder::build(&data) {
        println!("{}", serde_json::to_string_pretty(&chart).unwrap_or_default());
    }

    Ok(())
}
