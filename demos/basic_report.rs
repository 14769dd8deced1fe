//! Full market day walkthrough.
//!
//! Ingests a day of trade instructions and renders both ranked
//! reports, the register's two aggregation views side by side.

use std::io;
use trade_register::core::register::TradeRegister;
use trade_register::report::text::{write_clients_report, write_dates_report};

fn main() -> io::Result<()> {
    println!("╔══════════════════════════════════════════╗");
    println!("║  trade-register: Market Day Reports      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut register = TradeRegister::new();
    let instructions = [
        ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        ["foo", "S", "0.22", "AED", "05 Jan 2016", "07 Jan 2016", "450", "150.5"],
        ["bar", "B", "0.21", "AED", "05 Jan 2016", "09 Jan 2016", "50", "300.5"],
        ["foo", "S", "0.45", "SAR", "01 Jan 2016", "09 Jan 2016", "210", "600.25"],
        ["foo", "S", "0.51", "SGP", "05 Jan 2016", "15 Jan 2016", "400", "450.5"],
        ["bar", "S", "0.10", "BGA", "05 Jan 2016", "15 Jan 2016", "100", "550.5"],
        ["cag", "B", "0.15", "SAR", "01 Jan 2016", "15 Jan 2016", "150", "733.25"],
        ["def", "S", "0.23", "AED", "05 Jan 2016", "15 Jan 2016", "320", "256.5"],
        ["gem", "B", "0.23", "USD", "05 Jan 2017", "07 Jan 2016", "290", "222.5"],
    ];

    for row in &instructions {
        register.ingest(row).expect("demo instructions are well formed");
    }

    println!(
        "Ingested {} instructions across {} clients and {} settlement dates.\n",
        instructions.len(),
        register.client_count(),
        register.date_count()
    );

    println!("━━━ Entities Report ━━━\n");
    write_clients_report(&mut register, &mut io::stdout())?;

    println!("━━━ Market Report by Dates ━━━\n");
    write_dates_report(&mut register, &mut io::stdout())?;

    Ok(())
}
