use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn currencies_file(&self) -> &str;
    fn ledger_file(&self) -> &str;
}

/// Source of display-currency rates for ledger reports.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn rate(&self, currency: &str) -> Result<f64>;
}
