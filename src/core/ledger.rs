use crate::core::{
    Category, ConfigProvider, LedgerData, LedgerReport, Operation, OperationKind, RateProvider,
    ReportLine, Storage, UserProfile,
};
use crate::utils::error::{FinError, Result};
use crate::utils::validation;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Personal finance ledger over the storage port: users, their categories,
/// and income/expense operations. Every call except `register` requires an
/// already registered chat.
pub struct LedgerService<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LedgerService<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Creates an empty ledger file if none exists yet. Idempotent.
    pub async fn ensure_table(&self) -> Result<()> {
        if self.read_data().await?.is_none() {
            tracing::info!("Creating empty ledger");
            self.write_data(&LedgerData::default()).await?;
        }
        Ok(())
    }

    pub async fn register(&self, chat_id: i64, login: &str) -> Result<UserProfile> {
        validation::validate_non_empty_string("login", login)?;

        let mut data = self.load().await?;
        if data.users.iter().any(|u| u.chat_id == chat_id) {
            return Err(FinError::AlreadyRegistered { chat_id });
        }

        let user = UserProfile {
            chat_id,
            login: login.trim().to_string(),
        };
        data.users.push(user.clone());
        self.write_data(&data).await?;

        tracing::info!("Registered chat {} as {}", user.chat_id, user.login);
        Ok(user)
    }

    pub async fn add_category(&self, chat_id: i64, name: &str) -> Result<Category> {
        validation::validate_non_empty_string("category", name)?;

        let mut data = self.load().await?;
        Self::require_registered(&data, chat_id)?;

        let name = name.trim().to_string();
        if data
            .categories
            .iter()
            .any(|c| c.chat_id == chat_id && c.name == name)
        {
            return Err(FinError::CategoryExists { name });
        }

        let category = Category { chat_id, name };
        data.categories.push(category.clone());
        self.write_data(&data).await?;

        tracing::info!("Added category {} for chat {}", category.name, chat_id);
        Ok(category)
    }

    /// Records an operation. The category must already exist for this chat
    /// and the date must be a YYYY-MM-DD calendar date.
    pub async fn add_operation(
        &self,
        chat_id: i64,
        kind: OperationKind,
        amount: f64,
        date: &str,
        category: &str,
    ) -> Result<Operation> {
        validation::validate_positive_amount("amount", amount)?;
        let date = validation::validate_date("date", date)?;

        let mut data = self.load().await?;
        Self::require_registered(&data, chat_id)?;

        let category = category.trim().to_string();
        if !data
            .categories
            .iter()
            .any(|c| c.chat_id == chat_id && c.name == category)
        {
            return Err(FinError::CategoryNotFound { name: category });
        }

        let operation = Operation {
            chat_id,
            date,
            amount,
            kind,
            category,
        };
        data.operations.push(operation.clone());
        self.write_data(&data).await?;

        tracing::info!(
            "Recorded {} of {} RUB on {} for chat {}",
            operation.kind,
            operation.amount,
            operation.date,
            chat_id
        );
        Ok(operation)
    }

    pub async fn operations(&self, chat_id: i64) -> Result<Vec<Operation>> {
        let data = self.load().await?;
        Self::require_registered(&data, chat_id)?;
        Ok(data
            .operations
            .into_iter()
            .filter(|op| op.chat_id == chat_id)
            .collect())
    }

    /// Renders the chat's operations in a display currency. Stored ruble
    /// amounts are divided by the currency rate and rounded to 2 decimal
    /// places; totals are converted from the raw ruble sums.
    pub async fn report<R: RateProvider>(
        &self,
        chat_id: i64,
        currency: &str,
        rates: &R,
    ) -> Result<LedgerReport> {
        let code = validation::validate_currency_code("currency", currency)?;
        let rate = rates.rate(&code).await?;

        let operations = self.operations(chat_id).await?;

        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut lines = Vec::with_capacity(operations.len());

        for op in &operations {
            match op.kind {
                OperationKind::Income => total_income += op.amount,
                OperationKind::Expense => total_expense += op.amount,
            }
            lines.push(ReportLine {
                date: op.date,
                amount: round2(op.amount / rate),
                kind: op.kind,
            });
        }

        Ok(LedgerReport {
            currency: code,
            lines,
            income: round2(total_income / rate),
            expense: round2(total_expense / rate),
            balance: round2((total_income - total_expense) / rate),
        })
    }

    fn require_registered(data: &LedgerData, chat_id: i64) -> Result<()> {
        if data.users.iter().any(|u| u.chat_id == chat_id) {
            Ok(())
        } else {
            Err(FinError::NotRegistered { chat_id })
        }
    }

    async fn read_data(&self) -> Result<Option<LedgerData>> {
        match self.storage.read_file(self.config.ledger_file()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(FinError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load(&self) -> Result<LedgerData> {
        Ok(self.read_data().await?.unwrap_or_default())
    }

    async fn write_data(&self, data: &LedgerData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        self.storage
            .write_file(self.config.ledger_file(), &bytes)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::StaticRates;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                FinError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn data_dir(&self) -> &str {
            "test_data"
        }

        fn currencies_file(&self) -> &str {
            "currencies.json"
        }

        fn ledger_file(&self) -> &str {
            "ledger.json"
        }
    }

    fn service() -> LedgerService<MockStorage, MockConfig> {
        LedgerService::new(MockStorage::new(), MockConfig)
    }

    #[tokio::test]
    async fn test_register_and_duplicate() {
        let service = service();

        let user = service.register(1, "alice").await.unwrap();
        assert_eq!(user.login, "alice");

        let err = service.register(1, "alice").await.unwrap_err();
        assert!(matches!(err, FinError::AlreadyRegistered { chat_id: 1 }));
    }

    #[tokio::test]
    async fn test_category_requires_registration() {
        let service = service();

        let err = service.add_category(1, "food").await.unwrap_err();
        assert!(matches!(err, FinError::NotRegistered { chat_id: 1 }));
    }

    #[tokio::test]
    async fn test_duplicate_category_per_user() {
        let service = service();

        service.register(1, "alice").await.unwrap();
        service.register(2, "bob").await.unwrap();

        service.add_category(1, "food").await.unwrap();
        let err = service.add_category(1, "food").await.unwrap_err();
        assert!(matches!(err, FinError::CategoryExists { .. }));

        // Same name under a different chat is a different category.
        service.add_category(2, "food").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_operation_validations() {
        let service = service();
        service.register(1, "alice").await.unwrap();
        service.add_category(1, "food").await.unwrap();

        let err = service
            .add_operation(1, OperationKind::Expense, -5.0, "2025-05-01", "food")
            .await
            .unwrap_err();
        assert!(matches!(err, FinError::ValidationError { .. }));

        let err = service
            .add_operation(1, OperationKind::Expense, 5.0, "01.05.2025", "food")
            .await
            .unwrap_err();
        assert!(matches!(err, FinError::ValidationError { .. }));

        let err = service
            .add_operation(1, OperationKind::Expense, 5.0, "2025-05-01", "travel")
            .await
            .unwrap_err();
        assert!(matches!(err, FinError::CategoryNotFound { .. }));

        let err = service
            .add_operation(9, OperationKind::Expense, 5.0, "2025-05-01", "food")
            .await
            .unwrap_err();
        assert!(matches!(err, FinError::NotRegistered { chat_id: 9 }));
    }

    #[tokio::test]
    async fn test_operations_are_per_chat() {
        let service = service();
        service.register(1, "alice").await.unwrap();
        service.register(2, "bob").await.unwrap();
        service.add_category(1, "food").await.unwrap();
        service.add_category(2, "rent").await.unwrap();

        service
            .add_operation(1, OperationKind::Expense, 100.0, "2025-05-01", "food")
            .await
            .unwrap();
        service
            .add_operation(2, OperationKind::Expense, 900.0, "2025-05-01", "rent")
            .await
            .unwrap();

        let ops = service.operations(1).await.unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].amount, 100.0);
    }

    #[tokio::test]
    async fn test_report_in_rubles() {
        let service = service();
        service.register(1, "alice").await.unwrap();
        service.add_category(1, "salary").await.unwrap();
        service.add_category(1, "food").await.unwrap();

        service
            .add_operation(1, OperationKind::Income, 1000.0, "2025-05-01", "salary")
            .await
            .unwrap();
        service
            .add_operation(1, OperationKind::Expense, 300.0, "2025-05-02", "food")
            .await
            .unwrap();

        let report = service.report(1, "RUB", &StaticRates).await.unwrap();
        assert_eq!(report.currency, "RUB");
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.income, 1000.0);
        assert_eq!(report.expense, 300.0);
        assert_eq!(report.balance, 700.0);
    }

    #[tokio::test]
    async fn test_report_converts_to_usd() {
        let service = service();
        service.register(1, "alice").await.unwrap();
        service.add_category(1, "salary").await.unwrap();
        service.add_category(1, "food").await.unwrap();

        service
            .add_operation(1, OperationKind::Income, 1000.0, "2025-05-01", "salary")
            .await
            .unwrap();
        service
            .add_operation(1, OperationKind::Expense, 500.0, "2025-05-02", "food")
            .await
            .unwrap();

        let report = service.report(1, "usd", &StaticRates).await.unwrap();
        assert_eq!(report.currency, "USD");
        assert_eq!(report.lines[0].amount, 12.54); // 1000 / 79.74
        assert_eq!(report.lines[1].amount, 6.27); // 500 / 79.74
        assert_eq!(report.income, 12.54);
        assert_eq!(report.expense, 6.27);
        assert_eq!(report.balance, 6.27);
    }

    #[tokio::test]
    async fn test_report_unknown_currency() {
        let service = service();
        service.register(1, "alice").await.unwrap();

        let err = service.report(1, "GBP", &StaticRates).await.unwrap_err();
        assert!(matches!(err, FinError::CurrencyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_report_is_not_an_error() {
        let service = service();
        service.register(1, "alice").await.unwrap();

        let report = service.report(1, "RUB", &StaticRates).await.unwrap();
        assert!(report.lines.is_empty());
        assert_eq!(report.balance, 0.0);
    }

    #[tokio::test]
    async fn test_ledger_survives_service_restart() {
        let storage = MockStorage::new();

        let service = LedgerService::new(storage.clone(), MockConfig);
        service.register(1, "alice").await.unwrap();
        service.add_category(1, "food").await.unwrap();

        let reopened = LedgerService::new(storage, MockConfig);
        let err = reopened.register(1, "alice").await.unwrap_err();
        assert!(matches!(err, FinError::AlreadyRegistered { .. }));
    }
}
