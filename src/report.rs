use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::payment::Payment;
use crate::simulation::{DailyBalance, SimulationEvent, SimulationResult};

pub fn write_balance(out: &mut impl Write, balance: &DailyBalance, currency_symbol: &str) -> Result<()> {
    writeln!(
        out,
        "{date} {symbol}{v:.2}",
        date = balance.date,
        symbol = currency_symbol,
        v = balance.balance
    )?;
    Ok(())
}

pub fn write_event(out: &mut impl Write, event: &SimulationEvent, currency_symbol: &str) -> Result<()> {
    writeln!(
        out,
        "{date} {symbol}{before:.2} {amount:.2} {description} {color}",
        date = event.event_date,
        symbol = currency_symbol,
        before = event.balance_before,
        amount = event.amount,
        description = event.description,
        color = event.color,
    )?;
    Ok(())
}

/// First date at or after `from` on which each payment is due, soonest first.
pub fn upcoming_payments(payments: &[Payment], from: NaiveDate) -> Vec<(NaiveDate, &Payment)> {
    let mut upcoming: Vec<_> = payments
        .iter()
        .filter_map(|p| {
            let due = if p.occurs_on_day(from) {
                Some(from)
            } else {
                p.next_occurrence_after(from)
            };
            due.map(|d| (d, p))
        })
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);
    upcoming
}

pub fn write_summary(
    out: &mut impl Write,
    result: &SimulationResult,
    start_balance: Decimal,
    currency_symbol: &str,
) -> Result<()> {
    writeln!(out, "starting balance: {currency_symbol}{start_balance:.2}")?;
    writeln!(out, "payments applied: {}", result.events.len())?;
    if let Some(last) = result.balances.last() {
        writeln!(out, "final balance:    {currency_symbol}{:.2} on {}", last.balance, last.date)?;
    }
    if let Some(lowest) = result.lowest_balance() {
        writeln!(out, "lowest balance:   {currency_symbol}{:.2} on {}", lowest.balance, lowest.date)?;
    }
    Ok(())
}

/// Daily balances followed by the summary.
pub fn write_table(
    out: &mut impl Write,
    result: &SimulationResult,
    start_balance: Decimal,
    currency_symbol: &str,
) -> Result<()> {
    for balance in &result.balances {
        write_balance(out, balance, currency_symbol)?;
    }
    writeln!(out)?;
    write_summary(out, result, start_balance, currency_symbol)
}

/// Upcoming payments, the event log, then the summary.
pub fn write_events(
    out: &mut impl Write,
    payments: &[Payment],
    result: &SimulationResult,
    start_balance: Decimal,
    currency_symbol: &str,
) -> Result<()> {
    if let Some(first) = result.balances.first() {
        writeln!(out, "upcoming:")?;
        for (date, payment) in upcoming_payments(payments, first.date) {
            writeln!(out, "  {date} {} {:.2}", payment.description(), payment.amount())?;
        }
        writeln!(out)?;
    }
    for event in &result.events {
        write_event(out, event, currency_symbol)?;
    }
    writeln!(out)?;
    write_summary(out, result, start_balance, currency_symbol)
}
