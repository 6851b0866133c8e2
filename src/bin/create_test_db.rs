use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use finance_tracker::{
    form::TransactionForm,
    initialize_db,
    transaction::{create_transaction, get_transaction_summary},
};

/// A utility for creating a test database for finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating test transactions...");

    let forms = [
        TransactionForm {
            date: "2024-01-05",
            amount: "150.00",
            category: "Groceries",
            transaction_type: "expense",
            description: "weekly shop",
        },
        TransactionForm {
            date: "2024-01-08",
            amount: "50.00",
            category: "Fuel",
            transaction_type: "expense",
            description: "",
        },
        TransactionForm {
            date: "2024-01-25",
            amount: "2000.00",
            category: "Salary",
            transaction_type: "income",
            description: "january pay",
        },
        TransactionForm {
            date: "2024-02-01",
            amount: "500.00",
            category: "Freelance",
            transaction_type: "income",
            description: "website build",
        },
        TransactionForm {
            date: "2024-02-03",
            amount: "95.50",
            category: "Groceries",
            transaction_type: "expense",
            description: "",
        },
    ];

    for form in forms {
        create_transaction(form.validate()?, &connection)?;
    }

    let summary = get_transaction_summary(&connection)?;
    println!(
        "Success! Created {} transactions with a balance of {:.2}.",
        forms.len(),
        summary.balance()
    );

    Ok(())
}
