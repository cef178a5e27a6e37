//! Kaithari CLI - Command-line interface
//!
//! Commands:
//!   quote    - Price one shipment
//!   options  - Compare all service tiers, cheapest first
//!   zone     - Classify a destination pincode
//!   district - Look up the district listing a pincode
//!   validate - Check a rate table's invariants
//!   schema   - Print the JSON Schema for rate tables
//!   hash     - Fingerprint a rate table

use kaithari::*;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "quote" => cmd_quote(&args[2..]),
        "options" => cmd_options(&args[2..]),
        "zone" => cmd_zone(&args[2..]),
        "district" => cmd_district(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "schema" => cmd_schema(),
        "hash" => cmd_hash(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("kaithari {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
Kaithari - shipping rate estimation

USAGE:
    kaithari <COMMAND> [OPTIONS]

COMMANDS:
    quote <grams> [pincode]      Price one shipment
    options <grams> [pincode]    Compare all service tiers, cheapest first
    zone <pincode>               Classify a destination pincode
    district <pincode>           Look up the district listing a pincode
    validate [table.yaml]        Check a rate table's invariants
    schema                       Print the JSON Schema for rate tables
    hash [table.yaml]            Fingerprint a rate table
    version                      Print version

OPTIONS:
    --service <code>             Service tier: parcel|speed_post|parcel_contractual
                                 (default: parcel)
    --table <file>               Load a table from YAML/JSON instead of the
                                 builtin tariff
    --json                       JSON output (quote, options)
    --strict                     Treat warnings as errors (validate)

EXAMPLES:
    kaithari quote 1200 680001
    kaithari quote 0 --service speed_post --json
    kaithari options 2500 400001
    kaithari validate data/rates.yaml --strict
"#
    );
}

/// Value following a `--flag`, if present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// Positional arguments, with flags and their values stripped
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--table" || arg == "--service" {
            skip = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn load_table(args: &[String]) -> Result<RateTable> {
    match flag_value(args, "--table") {
        Some(path) => RateTable::from_path(Path::new(path)),
        None => Ok(RateTable::builtin().clone()),
    }
}

fn parse_weight(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| format!("Weight '{}' is not a whole number of grams", s).into())
}

fn cmd_quote(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let grams = parse_weight(
        pos.first()
            .ok_or("Usage: kaithari quote <grams> [pincode] [--service code]")?,
    )?;
    let pincode = pos.get(1).copied();
    let code: ServiceCode = flag_value(args, "--service").unwrap_or("parcel").parse()?;
    let json_output = args.contains(&"--json".to_string());

    let table = load_table(args)?;
    let quote = estimate(&table, grams, pincode, code)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("{} ({})", quote.service_name, quote.service_code);
        println!("  Zone:      {} ({})", quote.zone, quote.zone_label);
        println!("  Band:      {}", quote.label);
        println!("  Tariff:    {}", quote.total);
        println!("  Displayed: {}", display_price(quote.total));
        println!("  Delivery:  {}", quote.delivery_time);
    }
    Ok(())
}

fn cmd_options(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let grams = parse_weight(
        pos.first()
            .ok_or("Usage: kaithari options <grams> [pincode]")?,
    )?;
    let pincode = pos.get(1).copied();
    let json_output = args.contains(&"--json".to_string());

    let table = load_table(args)?;
    let options = all_service_options(&table, grams, pincode)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        for option in &options {
            println!(
                "{:<20} {:>6} (displayed {:>6})  {}  [{}]",
                option.name,
                option.total,
                display_price(option.total),
                option.delivery_time,
                option.code
            );
        }
    }
    Ok(())
}

fn cmd_zone(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let pincode = *pos.first().ok_or("Usage: kaithari zone <pincode>")?;

    if !is_valid_pincode(pincode) {
        return Err(format!("'{}' is not a 6-digit pincode", pincode).into());
    }

    let table = load_table(args)?;
    let zone = zone_for_pincode(&table, pincode);
    println!("{} ({})", zone, zone.label());
    Ok(())
}

fn cmd_district(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let pincode = *pos.first().ok_or("Usage: kaithari district <pincode>")?;

    if !is_valid_pincode(pincode) {
        return Err(format!("'{}' is not a 6-digit pincode", pincode).into());
    }

    let table = load_table(args)?;
    match district_for_pincode(&table, pincode) {
        Some(name) => println!("{}", name),
        None => println!("(not listed in any district)"),
    }
    Ok(())
}

fn cmd_validate(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let strict = args.contains(&"--strict".to_string());

    let table = match pos.first() {
        Some(path) => RateTable::from_path(Path::new(path))?,
        None => load_table(args)?,
    };

    let result = validate_table(&table);
    for issue in &result.issues {
        let tag = match issue.severity {
            table_validate::Severity::Error => "ERROR",
            table_validate::Severity::Warning => "WARN ",
        };
        println!("{} {} [{}] {}", tag, issue.code, issue.context, issue.message);
    }
    println!(
        "{} service(s) checked, {} error(s), {} warning(s)",
        result.services_checked,
        result.error_count(),
        result.warning_count()
    );

    if result.has_errors() || (strict && result.has_warnings()) {
        Err("Rate table validation failed".into())
    } else {
        Ok(())
    }
}

fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(RateTable);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn cmd_hash(args: &[String]) -> Result<()> {
    let pos = positionals(args);
    let table = match pos.first() {
        Some(path) => RateTable::from_path(Path::new(path))?,
        None => load_table(args)?,
    };
    println!("{}", table.hash());
    Ok(())
}
