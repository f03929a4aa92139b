use clap::Parser;
use small_fin::config::{Command, CurrencyCommand, LedgerCommand, Settings};
use small_fin::core::rates::StaticRates;
use small_fin::core::triangle::Triangle;
use small_fin::domain::model::OperationKind;
use small_fin::utils::error::ErrorSeverity;
use small_fin::utils::{logger, validation::Validate};
use small_fin::{CliConfig, FileConfig, LedgerService, LocalStorage, RateService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().map(FileConfig::verbose).unwrap_or(false);
    logger::init_cli_logger(verbose);

    tracing::info!("Starting small-fin CLI");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Some(config) = &file_config {
        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    let settings = Settings::resolve(cli.data_dir.clone(), file_config.as_ref());
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(cli.command, settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: Command, settings: Settings) -> small_fin::Result<()> {
    match command {
        Command::Init { seed } => {
            std::fs::create_dir_all(&settings.data_dir)?;

            let rates = RateService::new(
                LocalStorage::new(settings.data_dir.clone()),
                settings.clone(),
            );
            let ledger = LedgerService::new(
                LocalStorage::new(settings.data_dir.clone()),
                settings.clone(),
            );

            rates.ensure_table().await?;
            ledger.ensure_table().await?;

            if seed {
                let inserted = rates.seed_static().await?;
                println!("✅ Seeded {} static rates", inserted);
            }
            println!("✅ Data directory initialized at {}", settings.data_dir);
        }
        Command::Currency(command) => {
            let service = RateService::new(
                LocalStorage::new(settings.data_dir.clone()),
                settings.clone(),
            );
            run_currency(command, &service).await?;
        }
        Command::Ledger(command) => {
            let service = LedgerService::new(
                LocalStorage::new(settings.data_dir.clone()),
                settings.clone(),
            );
            run_ledger(command, &service).await?;
        }
        Command::Triangle { a, b, c } => {
            let triangle = Triangle::new(a, b, c)?;
            println!(
                "✅ {} triangle, perimeter {}",
                triangle.kind(),
                triangle.perimeter()
            );
        }
    }
    Ok(())
}

async fn run_currency(
    command: CurrencyCommand,
    service: &RateService<LocalStorage, Settings>,
) -> small_fin::Result<()> {
    match command {
        CurrencyCommand::Add { name, rate } => {
            let currency = service.add(&name, rate).await?;
            println!("✅ Currency {} added at rate {}", currency.name, currency.rate);
        }
        CurrencyCommand::Update { name, rate } => {
            let currency = service.update(&name, rate).await?;
            println!("✅ Currency {} updated to rate {}", currency.name, currency.rate);
        }
        CurrencyCommand::Remove { name } => {
            service.remove(&name).await?;
            println!("✅ Currency {} deleted", name.trim().to_uppercase());
        }
        CurrencyCommand::List => {
            let table = service.list().await?;
            if table.is_empty() {
                println!("No currencies found");
            } else {
                for currency in table {
                    println!("{}: {}", currency.name, currency.rate);
                }
            }
        }
        CurrencyCommand::Convert { name, amount } => {
            let converted = service.convert_to_rub(&name, amount).await?;
            println!("✅ {} {} = {} RUB", amount, name.trim().to_uppercase(), converted);
        }
    }
    Ok(())
}

async fn run_ledger(
    command: LedgerCommand,
    service: &LedgerService<LocalStorage, Settings>,
) -> small_fin::Result<()> {
    match command {
        LedgerCommand::Register { chat_id, login } => {
            let user = service.register(chat_id, &login).await?;
            println!("✅ Registered {} (chat {})", user.login, user.chat_id);
        }
        LedgerCommand::AddCategory { chat_id, name } => {
            let category = service.add_category(chat_id, &name).await?;
            println!("✅ Category {} added", category.name);
        }
        LedgerCommand::AddOperation {
            chat_id,
            kind,
            amount,
            date,
            category,
        } => {
            let kind: OperationKind = kind.parse()?;
            let operation = service
                .add_operation(chat_id, kind, amount, &date, &category)
                .await?;
            println!(
                "✅ Recorded {} of {} RUB on {} ({})",
                operation.kind, operation.amount, operation.date, operation.category
            );
        }
        LedgerCommand::Report { chat_id, currency } => {
            let report = service.report(chat_id, &currency, &StaticRates).await?;
            if report.lines.is_empty() {
                println!("No operations recorded yet");
            } else {
                println!("Operations in {}:", report.currency);
                for line in &report.lines {
                    println!(
                        "{} | {} {} | {}",
                        line.date, line.amount, report.currency, line.kind
                    );
                }
                println!();
                println!("Income: {} {}", report.income, report.currency);
                println!("Expense: {} {}", report.expense, report.currency);
                println!("Balance: {} {}", report.balance, report.currency);
            }
        }
    }
    Ok(())
}
