/// spread one lump payment across a customer's plots by due-date priority
use plot_installments::{
    AllocationRequest, Booking, BookingStore, EventStore, Money, PaymentDetails, PaymentLedger,
    PaymentMode, ScheduleConfig,
};
use plot_installments::allocation::propose_allocation;
use plot_installments::dates::parse_date_in;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScheduleConfig::standard();
    let mut store = BookingStore::new();
    let mut ledger = PaymentLedger::new();
    let mut events = EventStore::new();

    // two plots for the same customer, booked seven weeks apart
    store.create(
        Booking::new(
            "PG-2025-000010",
            "5A",
            "CUST-7",
            "N. Iyer",
            parse_date_in("01/01/2024"),
            Money::from_rupees(100_000),
            Money::ZERO,
            Money::ZERO,
            PaymentMode::Cash,
        )?,
        &mut events,
    )?;
    store.create(
        Booking::new(
            "PG-2025-000011",
            "5B",
            "CUST-7",
            "N. Iyer",
            parse_date_in("20/02/2024"),
            Money::from_rupees(100_000),
            Money::ZERO,
            Money::ZERO,
            PaymentMode::Cash,
        )?,
        &mut events,
    )?;

    // one cash cheque for both plots
    let request = AllocationRequest::new(Money::from_rupees(50_000), PaymentMode::Cash)?;
    let bookings = store.for_customer("CUST-7");
    let proposal = propose_allocation(&request, &bookings, &ledger, &config, &mut events);

    for line in &proposal {
        println!("plot {}  ({})  {}", line.plot_no, line.receipt_no, line.amount);
    }

    // accept the proposal: one ledger row per plot
    let ids = ledger.persist_allocation(
        store.bookings(),
        &proposal,
        &PaymentDetails {
            date: parse_date_in("01/03/2024").ok_or("bad date")?,
            mode: PaymentMode::Cash,
            reference: Some("CHQ-4411".to_string()),
            recorded_by: Some("ops1".to_string()),
        },
        &mut events,
    )?;
    println!("recorded {} payments", ids.len());

    for event in events.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
