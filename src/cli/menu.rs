use anyhow::{Context, Result};
use log::debug;

use crate::bank::Bank;
use crate::cli::utils::{
    print_error, print_header, print_info, print_success, read_account_number, read_amount,
    read_line, read_password,
};

/// Run the interactive menu loop until the user chooses to exit.
///
/// Every operation handles its own errors by printing a message and
/// returning to the menu; only a failure to read the menu choice
/// itself is fatal.
pub fn run(bank: &Bank) -> Result<()> {
    loop {
        print_header("Welcome to Boyz Bank");
        print_info("1. Create Account");
        print_info("2. View Account");
        print_info("3. Deposit");
        print_info("4. Withdraw");
        print_info("5. Transfer");
        print_info("6. View Transactions");
        print_info("7. Exit");

        let choice = read_line("Enter choice: ").context("Failed to read menu choice")?;
        debug!("Menu choice: {}", choice);

        let result = match choice.as_str() {
            "1" => create_account(bank),
            "2" => view_account(bank),
            "3" => deposit(bank),
            "4" => withdraw(bank),
            "5" => transfer(bank),
            "6" => view_transactions(bank),
            "7" => {
                print_info("Thanks for banking with us.");
                print_info("Exiting...");
                return Ok(());
            }
            _ => {
                print_error("Invalid choice.");
                Ok(())
            }
        };

        if let Err(e) = result {
            print_error(&e.to_string());
        }
    }
}

fn create_account(bank: &Bank) -> Result<()> {
    print_header("Create Account");

    let name = read_line("Enter full name: ")?;
    let password = read_password("Enter password: ")?;

    // The balance prompt retries until a non-negative value is supplied.
    let initial_balance = loop {
        match read_amount("Enter initial balance: ") {
            Ok(balance) if balance >= 0.0 => break balance,
            Ok(_) => print_error("Initial balance must not be negative."),
            Err(e) => print_error(&e.to_string()),
        }
    };

    let account = bank.create_account(&name, &password, initial_balance)?;
    print_success(&format!(
        "Account created successfully. Account number (auto-generated): {}",
        account.number
    ));
    Ok(())
}

fn view_account(bank: &Bank) -> Result<()> {
    print_header("View Account");

    let number = read_account_number("Enter account number: ")?;
    let password = read_password("Enter password: ")?;

    let account = bank.view_account(number, &password)?;
    print_info(&format!("Account Number: {}", account.number));
    print_info(&format!("Name: {}", account.name));
    print_info(&format!("Balance: {:.2}", account.balance));
    Ok(())
}

fn deposit(bank: &Bank) -> Result<()> {
    print_header("Deposit");

    let number = read_account_number("Enter account number: ")?;
    let password = read_password("Enter password: ")?;
    let amount = read_amount("Enter deposit amount: ")?;

    let balance = bank.deposit(number, &password, amount)?;
    print_success(&format!("Deposit successful. New balance: {:.2}", balance));
    Ok(())
}

fn withdraw(bank: &Bank) -> Result<()> {
    print_header("Withdraw");

    let number = read_account_number("Enter account number: ")?;
    let password = read_password("Enter password: ")?;
    let amount = read_amount("Enter withdrawal amount: ")?;

    let balance = bank.withdraw(number, &password, amount)?;
    print_success(&format!(
        "Withdrawal successful. New balance: {:.2}",
        balance
    ));
    Ok(())
}

fn transfer(bank: &Bank) -> Result<()> {
    print_header("Transfer");

    let from = read_account_number("Enter account number: ")?;
    let password = read_password("Enter password: ")?;
    let to = read_account_number("Enter destination account number: ")?;
    let amount = read_amount("Enter transfer amount: ")?;

    let balance = bank.transfer(from, &password, to, amount)?;
    print_success(&format!(
        "Transfer successful. New balance: {:.2}",
        balance
    ));
    Ok(())
}

fn view_transactions(bank: &Bank) -> Result<()> {
    print_header("View Transactions");

    let number = read_account_number("Enter account number: ")?;
    let lines = bank.transactions(number)?;

    if lines.is_empty() {
        print_info("No transactions found.");
        return Ok(());
    }

    print_info(&format!("Transactions for account {}:", number));
    for line in lines {
        print_info(&line);
    }
    Ok(())
}
