/// dues, excess and ledger reports with a controlled clock
use chrono::{TimeZone, Utc};
use plot_installments::{
    Booking, BookingStore, CustomerLedger, DuesFilter, DuesKind, DuesReport, EventStore, Money,
    PaymentDetails, PaymentLedger, PaymentMode, SafeTimeProvider, ScheduleConfig, TimeSource,
};
use plot_installments::dates::{format_date_in, parse_date_in};
use plot_installments::reports::excess_report;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScheduleConfig::standard();
    let mut store = BookingStore::new();
    let mut ledger = PaymentLedger::new();
    let mut events = EventStore::new();

    store.create(
        Booking::new(
            "PG-2025-000020",
            "12A",
            "CUST-4",
            "K. Menon",
            parse_date_in("01/01/2024"),
            Money::from_rupees(500_000),
            Money::from_rupees(300_000),
            Money::from_rupees(25_000),
            PaymentMode::NeftRtgs,
        )?,
        &mut events,
    )?;

    // over-pay the CR side so the excess report has something to say
    ledger.record(
        store.get("PG-2025-000020")?,
        Money::from_rupees(250_000),
        &PaymentDetails {
            date: parse_date_in("10/01/2024").ok_or("bad date")?,
            mode: PaymentMode::Cash,
            reference: None,
            recorded_by: None,
        },
        &mut events,
    )?;

    // run the dues report "on" 1 March 2024
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().ok_or("bad clock")?,
    ));
    let report = DuesReport::build(store.bookings(), &ledger, &config, &time);
    let overdue = report.filtered(&DuesFilter {
        kind: DuesKind::Overdue,
        ..DuesFilter::default()
    });
    println!("overdue installments: {}", overdue.len());
    for row in &overdue {
        println!(
            "  {} plot {} {} due {}  BR {}",
            row.receipt_no,
            row.plot_no,
            row.part.label(),
            format_date_in(row.due_date),
            row.total_due()
        );
    }

    for rec in excess_report(store.bookings(), &ledger) {
        println!("excess on {}: {:?}", rec.receipt_no, rec.remediations);
    }

    let view = CustomerLedger::build(
        "K. Menon",
        &store.for_customer("CUST-4"),
        &ledger,
        &config,
    );
    println!(
        "customer total: {} paid {} balance {}",
        view.totals.br_amount, view.totals.br_paid, view.totals.br_balance
    );
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
