use chrono::Local;
use log::{debug, warn};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::BankError;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    AccountCreated,
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::AccountCreated => "Account Created",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::TransferOut => "Transfer Out",
            TransactionKind::TransferIn => "Transfer In",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "Account Created" => Ok(TransactionKind::AccountCreated),
            "Deposit" => Ok(TransactionKind::Deposit),
            "Withdrawal" => Ok(TransactionKind::Withdrawal),
            "Transfer Out" => Ok(TransactionKind::TransferOut),
            "Transfer In" => Ok(TransactionKind::TransferIn),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

/// Append-only textual audit trail of banking operations.
///
/// Writes are best-effort: a ledger that cannot be opened or written
/// must never block the banking operation that triggered the entry, so
/// failures are reported on the warning channel and swallowed.
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Create a ledger over the given log file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Create a ledger from the global configuration.
    pub fn from_config() -> Self {
        Self::new(config::get_config().ledger.log_path)
    }

    /// Append one entry to the ledger.
    ///
    /// Failures are logged and dropped; the caller never sees them.
    pub fn append(&self, number: i32, kind: TransactionKind, amount: f32) {
        if let Err(e) = self.try_append(number, kind, amount) {
            warn!(
                "Dropping ledger entry for account {} ({}): {}",
                number,
                kind.as_str(),
                e
            );
        }
    }

    fn try_append(&self, number: i32, kind: TransactionKind, amount: f32) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let line = format!(
            "Account: {} | Type: {} | Amount: {:.2} | Date: {}\n",
            number,
            kind.as_str(),
            amount,
            Local::now().format("%a %b %e %H:%M:%S %Y")
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!("Ledger entry: account {} {}", number, kind.as_str());
        Ok(())
    }

    /// Return the raw log lines mentioning the given account number.
    ///
    /// The filter is a plain substring match on the decimal digits, so
    /// an account number contained in another (100 inside 1000) also
    /// matches. That imprecision is inherited behavior and covered by a
    /// test below. Each call re-scans the file from the start; lines
    /// come back in append order. A missing log file yields no lines.
    pub fn query_by_account(&self, number: i32) -> Result<Vec<String>, BankError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BankError::FileUnavailable {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        let needle = number.to_string();
        let mut matches = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.contains(&needle) {
                matches.push(line);
            }
        }
        Ok(matches)
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    fn setup_log() -> (tempfile::TempDir, TransactionLog) {
        let dir = tempdir().unwrap();
        let log = TransactionLog::new(dir.path().join("transactions.log"));
        (dir, log)
    }

    #[test_case(TransactionKind::AccountCreated, "Account Created")]
    #[test_case(TransactionKind::Deposit, "Deposit")]
    #[test_case(TransactionKind::Withdrawal, "Withdrawal")]
    #[test_case(TransactionKind::TransferOut, "Transfer Out")]
    #[test_case(TransactionKind::TransferIn, "Transfer In")]
    fn kind_round_trips_through_text(kind: TransactionKind, text: &str) {
        assert_eq!(kind.as_str(), text);
        assert_eq!(TransactionKind::from_str(text).unwrap(), kind);
    }

    #[test]
    fn append_then_query_returns_entries_in_order() {
        let (_dir, log) = setup_log();

        log.append(1000, TransactionKind::AccountCreated, 100.0);
        log.append(1000, TransactionKind::Deposit, 50.0);
        log.append(2000, TransactionKind::Deposit, 5.0);

        let lines = log.query_by_account(1000).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Type: Account Created"));
        assert!(lines[0].contains("Amount: 100.00"));
        assert!(lines[1].contains("Type: Deposit"));
        assert!(lines[1].contains("Amount: 50.00"));
    }

    #[test]
    fn query_without_log_file_is_empty() {
        let (_dir, log) = setup_log();
        assert!(log.query_by_account(1000).unwrap().is_empty());
    }

    #[test]
    fn query_matches_substrings_of_longer_numbers() {
        // Inherited imprecision: the digits of account 100 appear in
        // every line for account 1000, so querying 100 sees both.
        let (_dir, log) = setup_log();

        log.append(100, TransactionKind::Deposit, 1.0);
        log.append(1000, TransactionKind::Deposit, 2.0);

        let lines = log.query_by_account(100).unwrap();
        assert_eq!(lines.len(), 2);

        // Equal-length numbers with no containment stay precise.
        let lines = log.query_by_account(1000).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn append_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // A directory at the log path makes the open fail.
        let log = TransactionLog::new(dir.path());

        // Must not panic or surface an error.
        log.append(1000, TransactionKind::Deposit, 1.0);
    }
}
