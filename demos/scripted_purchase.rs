//! Scripted Purchase
//!
//! This example drives the vending machine the way an interactive front end
//! would, but with a fixed list of menu choices instead of keyboard input.
//!
//! Key concepts:
//! - Numbered menus built from `available_moves`
//! - Invalid choices are reported and the session is left untouched
//! - Batch validation of the finished transaction string
//! - Receipt and JSON snapshot of the completed session
//!
//! Run with: RUST_LOG=vending_fsa=debug cargo run --example scripted_purchase

use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vending_fsa::catalog;
use vending_fsa::validator::BatchValidator;
use vending_fsa::walker::Session;

// Menu picks (1-based), one per prompt. The 9 is deliberately out of range.
const CHOICES: &[usize] = &[1, 1, 1, 2, 9, 2, 1, 1, 1, 1, 1];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = Arc::new(catalog::vending_machine()?);
    let ledger = Arc::new(catalog::vending_ledger());
    let mut session = Session::new(Arc::clone(&table), ledger);

    println!("=== Vending Machine ===");
    println!("Price: {}\n", session.price());

    for &choice in CHOICES {
        if !session.is_active() {
            break;
        }

        let moves = session.available_moves();
        println!(
            "[{}] {} | balance {}",
            session.current_state(),
            session
                .current_state_info()
                .map(|s| s.description.as_str())
                .unwrap_or("?"),
            session.balance()
        );
        for (i, m) in moves.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, m.description, m.symbol);
        }

        let Some(picked) = choice.checked_sub(1).and_then(|i| moves.get(i)) else {
            println!("> {choice}: not on the menu, try again\n");
            continue;
        };

        println!("> {choice}");
        let outcome = session.step(picked.symbol.clone())?;
        if outcome.balance_before != outcome.balance_after {
            println!(
                "  balance {} -> {}",
                outcome.balance_before, outcome.balance_after
            );
        }
        println!();
    }

    if session.is_dead_end() {
        session.abort()?;
    }

    match session.receipt() {
        Some(receipt) => {
            println!("=== Receipt ===");
            println!("Symbols: {}", receipt.symbols);
            let path: Vec<String> = receipt.path.iter().map(ToString::to_string).collect();
            println!("Path:    {}", path.join(" -> "));
            println!("Paid:    {} of {}", receipt.balance, receipt.price);
            if let Some(change) = receipt.change_due {
                println!("Change:  {change}");
            }

            let check = BatchValidator::new(&table).process_str(&receipt.symbols);
            println!("Replayed in batch: accepted = {}", check.accepted);
        }
        None => println!("Session ended as {}", session.status()),
    }

    println!("\n=== Snapshot ===");
    println!("{}", session.snapshot().to_json()?);

    Ok(())
}
