/// quick start - one booking, its schedule and a first payment
use plot_installments::{
    Booking, EventStore, Money, PaymentDetails, PaymentLedger, PaymentMode, ScheduleConfig,
};
use plot_installments::dates::parse_date_in;
use plot_installments::schedule::InstallmentSchedule;
use plot_installments::types::Category;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // book plot 2A for Rs 1,00,000 with Rs 60,000 on the registry side
    let booking = Booking::new(
        "PG-2025-000001",
        "2A",
        "CUST-1",
        "S. Rao",
        parse_date_in("01/01/2024"),
        Money::from_rupees(100_000),
        Money::from_rupees(60_000),
        Money::ZERO,
        PaymentMode::Cash,
    )?;

    let config = ScheduleConfig::standard();

    // 35 / 35 / 30 split with due dates at +10 / +75 / +165 days
    let schedule = InstallmentSchedule::for_booking(&booking, Category::BR, &config);
    for slot in &schedule.slots {
        println!(
            "{}  {}  due {}",
            slot.part.label(),
            slot.gross,
            plot_installments::dates::format_date_in(slot.due_date)
        );
    }

    // record a cash payment; cash always lands on the CR side
    let mut ledger = PaymentLedger::new();
    let mut events = EventStore::new();
    ledger.record(
        &booking,
        Money::from_rupees(15_000),
        &PaymentDetails {
            date: parse_date_in("08/01/2024").ok_or("bad date")?,
            mode: PaymentMode::Cash,
            reference: None,
            recorded_by: Some("ops1".to_string()),
        },
        &mut events,
    )?;

    let paid = ledger.paid_snapshot(&booking);
    println!("paid so far: {}", paid.br_paid());
    println!("CR balance:  {}", paid.balance(&booking, Category::CR));

    for event in events.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
