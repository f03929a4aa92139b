use crate::core::{ConfigProvider, Currency, RateProvider, Storage};
use crate::utils::error::{FinError, Result};
use crate::utils::validation;
use async_trait::async_trait;

/// Built-in fallback table, rates to the ruble.
pub const STATIC_RATES: [(&str, f64); 3] = [("RUB", 1.0), ("USD", 79.74), ("EUR", 90.2)];

pub fn static_rates() -> Vec<Currency> {
    STATIC_RATES
        .iter()
        .map(|(name, rate)| Currency {
            name: (*name).to_string(),
            rate: *rate,
        })
        .collect()
}

/// Rate source backed by the built-in table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRates;

#[async_trait]
impl RateProvider for StaticRates {
    async fn rate(&self, currency: &str) -> Result<f64> {
        let code = validation::validate_currency_code("currency", currency)?;
        STATIC_RATES
            .iter()
            .find(|(name, _)| *name == code)
            .map(|(_, rate)| *rate)
            .ok_or(FinError::CurrencyNotFound { name: code })
    }
}

/// CRUD over the persisted currency table. Names are normalized to
/// uppercase before any lookup, so "usd" and "USD" are the same row.
pub struct RateService<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RateService<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Creates an empty table file if none exists yet. Idempotent.
    pub async fn ensure_table(&self) -> Result<()> {
        if self.read_table().await?.is_none() {
            tracing::info!("Creating empty currency table");
            self.write_table(&[]).await?;
        }
        Ok(())
    }

    /// Inserts the built-in static rates, skipping rows that already exist.
    /// Returns the number of inserted rows.
    pub async fn seed_static(&self) -> Result<usize> {
        let mut table = self.load().await?;
        let mut inserted = 0;

        for currency in static_rates() {
            if !table.iter().any(|c| c.name == currency.name) {
                tracing::debug!("Seeding {} at rate {}", currency.name, currency.rate);
                table.push(currency);
                inserted += 1;
            }
        }

        if inserted > 0 {
            table.sort_by(|a, b| a.name.cmp(&b.name));
            self.write_table(&table).await?;
        }
        Ok(inserted)
    }

    pub async fn add(&self, name: &str, rate: f64) -> Result<Currency> {
        let code = validation::validate_currency_code("currency", name)?;
        validation::validate_positive_amount("rate", rate)?;

        let mut table = self.load().await?;
        if table.iter().any(|c| c.name == code) {
            return Err(FinError::CurrencyExists { name: code });
        }

        let currency = Currency { name: code, rate };
        table.push(currency.clone());
        table.sort_by(|a, b| a.name.cmp(&b.name));
        self.write_table(&table).await?;

        tracing::info!("Added currency {} at rate {}", currency.name, currency.rate);
        Ok(currency)
    }

    pub async fn update(&self, name: &str, rate: f64) -> Result<Currency> {
        let code = validation::validate_currency_code("currency", name)?;
        validation::validate_positive_amount("rate", rate)?;

        let mut table = self.load().await?;
        let row = table
            .iter_mut()
            .find(|c| c.name == code)
            .ok_or(FinError::CurrencyNotFound { name: code })?;

        row.rate = rate;
        let updated = row.clone();
        self.write_table(&table).await?;

        tracing::info!("Updated currency {} to rate {}", updated.name, updated.rate);
        Ok(updated)
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let code = validation::validate_currency_code("currency", name)?;

        let mut table = self.load().await?;
        let before = table.len();
        table.retain(|c| c.name != code);
        if table.len() == before {
            return Err(FinError::CurrencyNotFound { name: code });
        }

        self.write_table(&table).await?;
        tracing::info!("Removed currency {}", code);
        Ok(())
    }

    /// All rows, sorted by name for stable output.
    pub async fn list(&self) -> Result<Vec<Currency>> {
        let mut table = self.load().await?;
        table.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(table)
    }

    /// Converts an amount of the named currency into rubles.
    pub async fn convert_to_rub(&self, name: &str, amount: f64) -> Result<f64> {
        let code = validation::validate_currency_code("currency", name)?;
        validation::validate_positive_amount("amount", amount)?;

        let table = self.load().await?;
        let currency = table
            .iter()
            .find(|c| c.name == code)
            .ok_or(FinError::CurrencyNotFound { name: code })?;

        Ok(amount * currency.rate)
    }

    async fn read_table(&self) -> Result<Option<Vec<Currency>>> {
        match self.storage.read_file(self.config.currencies_file()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(FinError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load(&self) -> Result<Vec<Currency>> {
        Ok(self.read_table().await?.unwrap_or_default())
    }

    async fn write_table(&self, table: &[Currency]) -> Result<()> {
        let data = serde_json::to_vec_pretty(table)?;
        self.storage
            .write_file(self.config.currencies_file(), &data)
            .await
    }
}
