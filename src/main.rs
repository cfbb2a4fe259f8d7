use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use storefront_domain::config::{AppConfig, DEFAULT_LOG_FILTER};
use storefront_domain::domain::DomainError;
use storefront_domain::domain::ledger::LedgerOrder;
use storefront_domain::domain::order::{Order, OrderCommand, OrderEvent};
use storefront_domain::domain::payment::PaymentService;
use storefront_domain::domain::product::{Product, ProductCommand, ProductEvent};
use storefront_domain::domain::student::{GradingSystem, Student};
use storefront_domain::event_sourcing::{CommandHandler, EventStore};
use storefront_domain::metrics::Metrics;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Structured logging; RUST_LOG (folded into the config) overrides the default filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
        )
        .init();

    tracing::info!(
        enforce_terminal_status = config.payment.enforce_terminal_status,
        "Starting storefront domain demo"
    );

    let metrics = Arc::new(Metrics::new()?);

    // Domain rule violations are reported and the demo moves on
    for step in [grade_students as fn() -> Result<(), DomainError>, adjust_inventory, build_ledger] {
        if let Err(e) = step() {
            tracing::warn!(entity = e.entity(), error = %e, "Demo step stopped");
            println!("Error: {}", e);
        }
    }

    record_inventory(metrics.clone())?;
    settle_orders(&config, metrics.clone())?;

    println!("{}", metrics.render()?);
    tracing::info!("Demo complete");

    Ok(())
}

fn grade_students() -> Result<(), DomainError> {
    let grading = GradingSystem::new();

    let students = [
        Student::new("Jane", 100)?,
        Student::new("Jack", 76)?,
        Student::new("Alice", 50)?,
    ];
    for student in &students {
        println!("{}", grading.evaluate_student(student));
    }

    // Rejected on construction
    Student::new("Mallory", 101)?;
    Ok(())
}

fn adjust_inventory() -> Result<(), DomainError> {
    let mut laptop = Product::new(1, "Laptop", 1000.0, 50)?;
    laptop.increase_stock(20)?;
    laptop.apply_discount(100.0)?;
    laptop.reduce_stock(5)?;
    println!("{}: price {:.2}, stock {}", laptop.name(), laptop.price(), laptop.stock());

    // Pushes stock past capacity
    laptop.increase_stock(40)?;
    Ok(())
}

fn build_ledger() -> Result<(), DomainError> {
    let mut ledger = LedgerOrder::new(1, 1000.0)?;
    ledger.apply_tax(0.1)?;
    ledger.add_item(250.0)?;
    ledger.apply_discount(200.0)?;
    ledger.remove_item(150.0)?;
    println!("Ledger {}: total {:.2}", ledger.id(), ledger.total_amount());
    Ok(())
}

fn record_inventory(metrics: Arc<Metrics>) -> anyhow::Result<()> {
    let store: Arc<EventStore<u32, ProductEvent>> = Arc::new(EventStore::new("Product"));
    let handler = CommandHandler::<Product>::new(store.clone()).with_metrics(metrics);
    let correlation_id = Uuid::new_v4();

    handler.create(
        7,
        ProductCommand::Register { name: "Monitor".to_string(), price: 250.0, stock: 10 },
        correlation_id,
    )?;
    handler.handle(7, ProductCommand::IncreaseStock { amount: 15 }, correlation_id)?;

    if let Err(e) = handler.handle(7, ProductCommand::ReduceStock { quantity: 30 }, correlation_id) {
        println!("Error: {}", e);
    }

    let monitor = handler.load(&7)?;
    println!("{}: stock {} after replay", monitor.name(), monitor.stock());
    println!("{}", store.export_stream(&7)?);
    Ok(())
}

fn settle_orders(config: &AppConfig, metrics: Arc<Metrics>) -> anyhow::Result<()> {
    let payments = PaymentService::new(config.payment.clone()).with_metrics(metrics.clone());

    // In-place orders
    let mut exact = Order::new("O1", 100.0)?;
    let mut short = Order::new("O2", 100.0)?;
    payments.process_payment(&mut exact, 100.0)?;
    payments.process_payment(&mut short, 50.0)?;
    println!("{}: {}", exact.id(), exact.status());
    println!("{}: {}", short.id(), short.status());

    if let Err(e) = payments.process_payment(&mut Order::new("O3", 100.0)?, 0.0) {
        println!("Error: {}", e);
    }

    // Orders kept in the event store
    let store: Arc<EventStore<String, OrderEvent>> = Arc::new(EventStore::new("Order"));
    let handler = CommandHandler::<Order>::new(store).with_metrics(metrics);
    let correlation_id = Uuid::new_v4();

    handler.create("O4".to_string(), OrderCommand::Place { amount: 75.0 }, correlation_id)?;
    let status = payments.process_stored(&handler, "O4", 80.0, correlation_id)?;
    println!("O4: {}", status);

    Ok(())
}
