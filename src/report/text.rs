//! Fixed-width text reports.
//!
//! Two reports share one detail layout: the clients report groups by
//! entity and carries both rank columns; the dates report groups by
//! adjusted settlement date and shows the day of week instead.

use crate::core::bucket::Bucket;
use crate::core::calendar::DATE_FORMAT;
use crate::core::register::TradeRegister;
use chrono::NaiveDate;
use std::io::{self, Write};

/// Write the per-client report: one block per client in first-seen
/// order with totals and both ranks, then a detail line per
/// transaction. Refreshes ranks before rendering.
pub fn write_clients_report<W: Write>(
    register: &mut TradeRegister,
    out: &mut W,
) -> io::Result<()> {
    let mut id = 0;
    for bucket in register.clients() {
        id += 1;
        writeln!(
            out,
            " {:<4} {:<20} {:<20} {:<20} {:<16} {:<16}",
            "Id", "Entity", "Outgoing USD Amount", "Incoming USD Amount", "Rank (Outgoing)",
            "Rank (Incoming)"
        )?;
        writeln!(
            out,
            " {:<4} {:<20} {:<20} {:<20} {:<16} {:<16}",
            "---", "------", "-------------------", "-------------------", "---------------",
            "---------------"
        )?;
        writeln!(
            out,
            " {:<4} {:<20} {:<20} {:<20} {:<16} {:<16}",
            id,
            bucket.key(),
            bucket.buy_total_usd().normalize(),
            bucket.sell_total_usd().normalize(),
            bucket.buy_rank(),
            bucket.sell_rank()
        )?;
        write_detail_block(bucket, out)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write the per-date report: one block per adjusted settlement date in
/// first-seen order. Date buckets carry no ranks; the summary row shows
/// the day of week next to the date instead.
pub fn write_dates_report<W: Write>(register: &mut TradeRegister, out: &mut W) -> io::Result<()> {
    let mut id = 0;
    for bucket in register.dates() {
        id += 1;
        let day = NaiveDate::parse_from_str(bucket.key(), DATE_FORMAT)
            .map(|d| d.format("%A").to_string())
            .unwrap_or_default();
        writeln!(
            out,
            " {:<4} {:<25} {:<20} {:<20}",
            "Id", "SettlementDate (Expected)", "Outgoing USD Amount", "Incoming USD Amount"
        )?;
        writeln!(
            out,
            " {:<4} {:<25} {:<20} {:<20}",
            "---", "-------------------------", "-------------------", "-------------------"
        )?;
        writeln!(
            out,
            " {:<4} {:<25} {:<20} {:<20}",
            id,
            format!("{} {}", bucket.key(), day),
            bucket.buy_total_usd().normalize(),
            bucket.sell_total_usd().normalize()
        )?;
        write_detail_block(bucket, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_detail_block<W: Write>(bucket: &Bucket, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        " {:<10} {:<10} {:>12} {:<6} {:>9} {:<9} {:<16} {:<15} {:>6} {:>13}",
        "", "Entity", "USD Amount", "Type", "AgreedFx", "Currency", "InstructionDate",
        "SettlementDate", "Units", "PricePerUnit"
    )?;
    writeln!(
        out,
        " {:<10} {:<10} {:>12} {:<6} {:>9} {:<9} {:<16} {:<15} {:>6} {:>13}",
        "", "------", "----------", "----", "--------", "--------", "---------------",
        "--------------", "-----", "------------"
    )?;
    for tx in bucket.transactions() {
        writeln!(
            out,
            " {:<10} {:<10} {:>12} {:<6} {:>9} {:<9} {:<16} {:<15} {:>6} {:>13}",
            "",
            tx.entity(),
            tx.trade_amount_usd().normalize(),
            tx.side(),
            tx.agreed_fx(),
            tx.currency(),
            tx.instruction_date().format(DATE_FORMAT).to_string(),
            tx.settlement_date().format(DATE_FORMAT).to_string(),
            tx.units(),
            tx.price_per_unit()
        )?;
    }
    Ok(())
}
