//! Weekend rollover example.
//!
//! Demonstrates how the settlement calendar shifts dates that fall on
//! a closed day, and how the rule differs for AED/SAR markets.

use chrono::{Datelike, NaiveDate};
use trade_register::core::calendar;
use trade_register::core::currency::CurrencyCode;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  trade-register: Weekend Rollover             ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let sgp = CurrencyCode::new("SGP");
    let sar = CurrencyCode::new("SAR");

    println!("SGP settles Monday–Friday; SAR settles Sunday–Thursday.\n");

    // One full week of January 2016: Friday the 15th through Monday
    // the 18th covers every interesting day of the rule table.
    println!("━━━ Rule Table in Action ━━━\n");
    println!("  {:<22} {:<24} {:<24}", "Raw date", "SGP settles", "SAR settles");
    println!("  {:<22} {:<24} {:<24}", "--------", "-----------", "-----------");
    for day in 15..=18 {
        let raw = NaiveDate::from_ymd_opt(2016, 1, day).unwrap();
        let for_sgp = calendar::adjust(raw, &sgp);
        let for_sar = calendar::adjust(raw, &sar);
        println!(
            "  {:<22} {:<24} {:<24}",
            label(raw),
            label(for_sgp),
            label(for_sar)
        );
    }

    println!("\n━━━ Why It Matters ━━━\n");
    println!("A Friday instruction in SAR cannot settle until Sunday:");
    let friday = NaiveDate::from_ymd_opt(2016, 1, 15).unwrap();
    println!("  {} → {}", label(friday), label(calendar::adjust(friday, &sar)));
    println!("\nWhile the same Friday in SGP settles same-day:");
    println!("  {} → {}", label(friday), label(calendar::adjust(friday, &sgp)));
}

fn label(date: NaiveDate) -> String {
    format!("{} ({})", date.format(calendar::DATE_FORMAT), date.weekday())
}
