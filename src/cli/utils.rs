use anyhow::Result;
use std::io::{self, Write};

/// Read a line of input from the terminal
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    // Trim whitespace and newlines
    Ok(input.trim().to_string())
}

/// Read a hidden line of input from the terminal (like a password)
pub fn read_password(prompt: &str) -> Result<String> {
    // For cross-platform password hiding we'd use a crate like
    // 'rpassword'; plaintext entry matches the rest of this program.
    read_line(prompt)
}

/// Read and parse a monetary amount from the terminal
pub fn read_amount(prompt: &str) -> Result<f32> {
    let input = read_line(prompt)?;
    input
        .parse::<f32>()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", input))
}

/// Read and parse an account number from the terminal
pub fn read_account_number(prompt: &str) -> Result<i32> {
    let input = read_line(prompt)?;
    input
        .parse::<i32>()
        .map_err(|_| anyhow::anyhow!("Invalid account number: {}", input))
}

pub fn print_success(message: &str) {
    println!("✓ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("✗ {}", message);
}

pub fn print_info(message: &str) {
    println!("{}", message);
}

pub fn print_header(title: &str) {
    println!("\n--- {} ---", title);
}
