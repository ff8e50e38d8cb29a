use anyhow::Context;
use camino::Utf8PathBuf;
use config::Config;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::pricing::{FeeConfig, PaymentMethod, TipSelection};

use super::ClientError;

#[derive(Clone, Deserialize, Debug)]
pub struct Settings {
    pub environment: String,
    pub application: ApplicationSettings,
    pub fees: FeeConfig,
    pub checkout: CheckoutSettings,
}

#[derive(Clone, Deserialize, Debug)]
pub struct ApplicationSettings {
    pub logs_directory: Utf8PathBuf,
    /// Where the cart and address documents are kept.
    pub storage_directory: Utf8PathBuf,
}

#[derive(Clone, Deserialize, Debug)]
pub struct CheckoutSettings {
    #[serde(default = "default_tip_options")]
    pub tip_options: Vec<Decimal>,
    /// Preselected on the cart screen.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutSettings {
    /// Only the preset amounts can be tipped.
    pub fn tip_selection(&self, tip: Option<Decimal>) -> Result<TipSelection, ClientError> {
        match tip {
            None => Ok(TipSelection::none()),
            Some(amount) if self.tip_options.contains(&amount) => Ok(TipSelection::of(amount)),
            Some(amount) => Err(ClientError::Validation(format!(
                "A tip of {amount} is not offered. Choose one of {:?}.",
                self.tip_options
            ))),
        }
    }
}

fn default_tip_options() -> Vec<Decimal> {
    [10, 20, 30, 40].into_iter().map(Decimal::from).collect()
}

fn find_config_dir() -> anyhow::Result<Utf8PathBuf> {
    let current_dir =
        std::env::current_dir().context("Failed to determine the current directory.")?;
    let current_dir =
        Utf8PathBuf::try_from(current_dir).context("Could not convert PathBuf to Utf8PathBuf")?;

    let config_dir = current_dir
        .ancestors()
        .map(|p| p.join("config"))
        .find(|p| {
            let base_path = p.join("base.yaml");
            p.is_dir() && base_path.is_file()
        })
        .ok_or_else(|| anyhow::anyhow!("Cannot find config directory!"))?;

    config_dir
        .canonicalize_utf8()
        .with_context(|| format!("Could not resolve config directory {config_dir}."))
}

pub fn get_config_settings() -> anyhow::Result<Settings> {
    let config_directory = find_config_dir()?;

    // Detect the running environment - default to `development` if unspecified.
    let environment: String =
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_owned());

    let base_source = config::File::from(config_directory.join("base").into_std_path_buf())
        .required(true);
    let env_source =
        config::File::from(config_directory.join(environment.as_str()).into_std_path_buf())
            .required(true);

    // e.g. `APP_FEES__DISCOUNT=15` sets `Settings.fees.discount`.
    let overrides_source = config::Environment::with_prefix("app")
        .prefix_separator("_")
        .separator("__");

    let config = Config::builder()
        .add_source(base_source)
        .add_source(env_source)
        .add_source(overrides_source)
        .build()?;

    let settings: Settings = config
        .try_deserialize()
        .context("Could not deserialise config settings.")?;
    validate_fees(&settings.fees)?;
    Ok(settings)
}

/// No fee, discount or tax rate may be negative.
fn validate_fees(fees: &FeeConfig) -> anyhow::Result<()> {
    let amounts = [
        ("packaging_charge", fees.packaging_charge),
        ("platform_fee", fees.platform_fee),
        ("service_charge", fees.service_charge),
        ("delivery_charge", fees.delivery_charge),
        ("discount", fees.discount),
        ("item_tax_slab_percent", fees.item_tax_slab_percent),
        ("packaging_tax_rate", fees.packaging_tax_rate),
        ("platform_fee_tax_rate", fees.platform_fee_tax_rate),
    ];
    if let Some((name, value)) = amounts.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
        anyhow::bail!("Invalid configuration: fees.{name} must not be negative, got {value}.");
    }
    Ok(())
}
