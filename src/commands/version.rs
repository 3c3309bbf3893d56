use clap::Args;

use super::OutputFormat;
use geosync::sync::GeoserverClient;

#[derive(Args)]
pub struct VersionCommand {
    /// Server component to report (geoserver, geotools, geowebcache)
    #[arg(long, default_value = "geoserver")]
    pub product: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl VersionCommand {
    pub async fn run(&self, client: &GeoserverClient) -> Result<(), Box<dyn std::error::Error>> {
        let version = client.version(&self.product).await?;
        match self.format {
            OutputFormat::Json => {
                let doc = serde_json::json!({ "product": self.product, "version": version });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            OutputFormat::Text => println!("{} {}", self.product, version),
        }
        Ok(())
    }
}
