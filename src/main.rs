//! trade-register CLI
//!
//! Ingest trade instructions and render ranked reports from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # Render both reports from a JSON instruction file
//! trade-register report --input instructions.json
//!
//! # Write the reports to files instead of stdout
//! trade-register report --input instructions.json \
//!     --clients-out EntitiesReport.txt --dates-out DatesReport.txt
//!
//! # Output summaries as JSON
//! trade-register report --input instructions.json --format json
//!
//! # Generate a random instruction file for testing
//! trade-register generate --clients 10 --instructions 30
//! ```

use std::fs;
use std::io::Write;
use std::process;
use trade_register::core::currency::CurrencyCode;
use trade_register::core::register::TradeRegister;
use trade_register::report::text::{write_clients_report, write_dates_report};
use trade_register::simulation::stress_test::{generate_random_instructions, StreamConfig};

fn print_usage() {
    eprintln!(
        r#"trade-register — securities trade register with ranked settlement reports

USAGE:
    trade-register <COMMAND> [OPTIONS]

COMMANDS:
    report      Ingest an instruction file and render the client and date reports
    generate    Generate a random instruction file (for testing)
    help        Show this message

OPTIONS (report):
    --input <FILE>        Path to JSON instructions file
    --format <FORMAT>     Output format: text (default) or json
    --clients-out <FILE>  Write the clients report here instead of stdout (text only)
    --dates-out <FILE>    Write the dates report here instead of stdout (text only)

OPTIONS (generate):
    --clients <N>         Number of distinct clients (default: 10)
    --instructions <N>    Number of instructions (default: 30)
    --currencies <LIST>   Comma-separated currency codes (default: USD)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    trade-register report --input instructions.json
    trade-register report --input instructions.json --format json
    trade-register report --input instructions.json --clients-out EntitiesReport.txt
    trade-register generate --clients 5 --currencies USD,AED,SAR --output test.json"#
    );
}

/// JSON schema for input instructions. Every field stays a string
/// because the wire form is positional text; parsing happens in the
/// register.
#[derive(serde::Deserialize)]
struct InstructionInput {
    entity: String,
    side: String,
    agreed_fx: String,
    currency: String,
    instruction_date: String,
    settlement_date: String,
    units: String,
    price_per_unit: String,
}

#[derive(serde::Deserialize)]
struct InstructionsFile {
    instructions: Vec<InstructionInput>,
}

/// JSON output schema for report summaries.
#[derive(serde::Serialize)]
struct ReportOutput {
    clients: Vec<ClientRowOutput>,
    settlement_dates: Vec<DateRowOutput>,
}

#[derive(serde::Serialize)]
struct ClientRowOutput {
    entity: String,
    outgoing_usd: String,
    incoming_usd: String,
    outgoing_rank: usize,
    incoming_rank: usize,
    transactions: usize,
}

#[derive(serde::Serialize)]
struct DateRowOutput {
    settlement_date: String,
    outgoing_usd: String,
    incoming_usd: String,
    transactions: usize,
}

fn load_register(path: &str) -> TradeRegister {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: InstructionsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "instructions": [
    {{ "entity": "foo", "side": "B", "agreed_fx": "0.50", "currency": "SGP",
      "instruction_date": "01 Jan 2016", "settlement_date": "02 Jan 2016",
      "units": "200", "price_per_unit": "100.25" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut register = TradeRegister::new();
    for (i, ins) in file.instructions.into_iter().enumerate() {
        let row = [
            ins.entity,
            ins.side,
            ins.agreed_fx,
            ins.currency,
            ins.instruction_date,
            ins.settlement_date,
            ins.units,
            ins.price_per_unit,
        ];
        register.ingest(&row).unwrap_or_else(|e| {
            eprintln!("Malformed instruction #{}: {}", i + 1, e);
            process::exit(1);
        });
    }
    register
}

fn write_report_to<F>(path: Option<&str>, heading: &str, render: F)
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    render(&mut buf).unwrap_or_else(|e| {
        eprintln!("Error rendering report: {}", e);
        process::exit(1);
    });

    match path {
        Some(path) => fs::write(path, &buf).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        }),
        None => {
            println!("{}\n", heading);
            std::io::stdout().write_all(&buf).unwrap_or_else(|e| {
                eprintln!("Error writing report: {}", e);
                process::exit(1);
            });
        }
    }
}

fn cmd_report(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut clients_out: Option<String> = None;
    let mut dates_out: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--clients-out" => {
                i += 1;
                clients_out = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--clients-out requires a file path");
                    process::exit(1);
                }));
            }
            "--dates-out" => {
                i += 1;
                dates_out = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--dates-out requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let mut register = load_register(&path);

    if format == "json" {
        let clients = register
            .clients()
            .map(|bucket| ClientRowOutput {
                entity: bucket.key().to_string(),
                outgoing_usd: bucket.buy_total_usd().normalize().to_string(),
                incoming_usd: bucket.sell_total_usd().normalize().to_string(),
                outgoing_rank: bucket.buy_rank(),
                incoming_rank: bucket.sell_rank(),
                transactions: bucket.transaction_count(),
            })
            .collect();
        let settlement_dates = register
            .dates()
            .map(|bucket| DateRowOutput {
                settlement_date: bucket.key().to_string(),
                outgoing_usd: bucket.buy_total_usd().normalize().to_string(),
                incoming_usd: bucket.sell_total_usd().normalize().to_string(),
                transactions: bucket.transaction_count(),
            })
            .collect();

        let output = ReportOutput {
            clients,
            settlement_dates,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        write_report_to(clients_out.as_deref(), "Entities report:", |buf| {
            write_clients_report(&mut register, buf)
        });
        write_report_to(dates_out.as_deref(), "Market report by dates:", |buf| {
            write_dates_report(&mut register, buf)
        });
    }
}

fn cmd_generate(args: &[String]) {
    let mut clients = 10usize;
    let mut instruction_count = 30usize;
    let mut currencies_str = "USD".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--clients" => {
                i += 1;
                clients = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--clients requires a number");
                        process::exit(1);
                    });
            }
            "--instructions" => {
                i += 1;
                instruction_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--instructions requires a number");
                        process::exit(1);
                    });
            }
            "--currencies" => {
                i += 1;
                currencies_str = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--currencies requires a comma-separated list");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let currencies: Vec<CurrencyCode> = currencies_str
        .split(',')
        .map(|s| CurrencyCode::new(s.trim()))
        .collect();

    let config = StreamConfig {
        client_count: clients,
        currencies,
        avg_instructions_per_client: instruction_count / clients.max(1),
        ..Default::default()
    };

    let stream = generate_random_instructions(&config);

    #[derive(serde::Serialize)]
    struct OutputInstruction {
        entity: String,
        side: String,
        agreed_fx: String,
        currency: String,
        instruction_date: String,
        settlement_date: String,
        units: String,
        price_per_unit: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        instructions: Vec<OutputInstruction>,
    }

    let count = stream.len();
    let output = OutputFile {
        instructions: stream
            .into_iter()
            .map(
                |[entity, side, agreed_fx, currency, instruction_date, settlement_date, units, price_per_unit]| {
                    OutputInstruction {
                        entity,
                        side,
                        agreed_fx,
                        currency,
                        instruction_date,
                        settlement_date,
                        units,
                        price_per_unit,
                    }
                },
            )
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} instructions across {} clients → {}",
            count, clients, path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
