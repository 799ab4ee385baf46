use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::BankError;

pub mod record;

pub use record::{Account, RECORD_SIZE};

/// Durable storage for account records in a single flat file.
///
/// The file is a contiguous sequence of fixed-size records (see
/// [`record`]). Every operation opens the file, does its work, and
/// closes it again; no handle or cache survives across operations.
/// Records are located by scanning for their account number rather
/// than by deriving an offset from it, so the store stays correct even
/// if numbering ever became non-contiguous.
pub struct AccountStore {
    path: PathBuf,
    max_accounts: usize,
}

impl AccountStore {
    /// Create a store over the given record file.
    pub fn new<P: Into<PathBuf>>(path: P, max_accounts: usize) -> Self {
        Self {
            path: path.into(),
            max_accounts,
        }
    }

    /// Create a store from the global configuration.
    pub fn from_config() -> Self {
        let config = config::get_config();
        Self::new(config.store.accounts_path, config.store.max_accounts)
    }

    /// Number of records currently stored, computed from the file size.
    ///
    /// Returns 0 if the file does not exist. A file whose length is not
    /// a whole number of records indicates a torn write and is rejected
    /// rather than silently rounded down.
    pub fn count(&self) -> Result<usize, BankError> {
        let len = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() as usize,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.unavailable(e)),
        };

        if len % RECORD_SIZE != 0 {
            return Err(BankError::InvalidInput(format!(
                "account file length {} is not a whole number of {}-byte records",
                len, RECORD_SIZE
            )));
        }
        Ok(len / RECORD_SIZE)
    }

    /// Read every record from the file, in file order.
    pub fn records(&self) -> Result<Vec<Account>, BankError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.unavailable(e)),
        };

        let mut reader = BufReader::new(file);
        let mut accounts = Vec::new();
        let mut buf = [0u8; RECORD_SIZE];
        loop {
            match reader.read_exact(&mut buf) {
                Ok(()) => accounts.push(Account::decode(&buf)),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(accounts)
    }

    /// Append a new account with the next sequential number.
    ///
    /// Numbers start at 1000 and are assigned from the record count at
    /// the moment of creation.
    pub fn create(
        &self,
        name: &str,
        password: &str,
        initial_balance: f32,
    ) -> Result<Account, BankError> {
        let count = self.count()?;
        if count >= self.max_accounts {
            return Err(BankError::CapacityExceeded);
        }

        let account = Account::new(1000 + count as i32, name, password, initial_balance)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;
        file.write_all(&account.encode())?;
        file.flush()?;

        info!("Created account {} for {}", account.number, account.name);
        Ok(account)
    }

    /// Find the first record matching both account number and password.
    ///
    /// The password comparison is exact and case-sensitive. A miss
    /// returns [`BankError::NotFound`] without revealing whether the
    /// account exists at all.
    pub fn authenticate(&self, number: i32, password: &str) -> Result<Account, BankError> {
        self.records()?
            .into_iter()
            .find(|account| account.number == number && account.password == password)
            .ok_or(BankError::NotFound)
    }

    /// Find a record by account number alone.
    pub fn find(&self, number: i32) -> Result<Account, BankError> {
        Ok(self.locate(number)?.1)
    }

    /// Rewrite the balance of a single record in place.
    pub fn update_balance(&self, number: i32, new_balance: f32) -> Result<(), BankError> {
        let (offset, mut account) = self.locate(number)?;
        account.balance = new_balance;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BankError::NotFound,
                _ => self.unavailable(e),
            })?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&account.encode())?;
        file.flush()?;

        debug!("Updated balance of account {} to {:.2}", number, new_balance);
        Ok(())
    }

    /// Scan for a record by number, returning its byte offset and contents.
    fn locate(&self, number: i32) -> Result<(u64, Account), BankError> {
        for (index, account) in self.records()?.into_iter().enumerate() {
            if account.number == number {
                return Ok(((index * RECORD_SIZE) as u64, account));
            }
        }
        Err(BankError::NotFound)
    }

    fn unavailable(&self, source: std::io::Error) -> BankError {
        BankError::FileUnavailable {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Path of the underlying record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_store(max_accounts: usize) -> (tempfile::TempDir, AccountStore) {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("accounts.dat"), max_accounts);
        (dir, store)
    }

    #[test]
    fn count_is_zero_without_file() {
        let (_dir, store) = setup_store(100);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn create_assigns_sequential_numbers_from_1000() {
        let (_dir, store) = setup_store(100);

        let first = store.create("Alice", "pw1", 100.0).unwrap();
        let second = store.create("Bob", "pw2", 0.0).unwrap();

        assert_eq!(first.number, 1000);
        assert_eq!(second.number, 1001);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn create_rejects_negative_initial_balance() {
        let (_dir, store) = setup_store(100);

        let result = store.create("Alice", "pw1", -5.0);
        assert!(matches!(result, Err(BankError::InvalidInput(_))));
        assert_eq!(store.count().unwrap(), 0, "no record may be persisted");
    }

    #[test]
    fn create_fails_at_capacity_without_touching_file() {
        let (_dir, store) = setup_store(2);
        store.create("Alice", "pw1", 10.0).unwrap();
        store.create("Bob", "pw2", 20.0).unwrap();

        let size_before = std::fs::metadata(store.path()).unwrap().len();
        let result = store.create("Carol", "pw3", 30.0);

        assert!(matches!(result, Err(BankError::CapacityExceeded)));
        let size_after = std::fs::metadata(store.path()).unwrap().len();
        assert_eq!(size_before, size_after, "file must not grow");
    }

    #[test]
    fn authenticate_matches_number_and_password_exactly() {
        let (_dir, store) = setup_store(100);
        store.create("Alice", "Secret", 10.0).unwrap();

        assert!(store.authenticate(1000, "Secret").is_ok());
        assert!(matches!(
            store.authenticate(1000, "secret"),
            Err(BankError::NotFound)
        ));
        assert!(matches!(
            store.authenticate(9999, "Secret"),
            Err(BankError::NotFound)
        ));
    }

    #[test]
    fn update_balance_rewrites_only_the_target_record() {
        let (_dir, store) = setup_store(100);
        store.create("Alice", "pw1", 10.0).unwrap();
        store.create("Bob", "pw2", 20.0).unwrap();

        store.update_balance(1000, 75.5).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records[0].balance, 75.5);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[1].balance, 20.0);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn update_balance_unknown_account_returns_not_found() {
        let (_dir, store) = setup_store(100);
        store.create("Alice", "pw1", 10.0).unwrap();

        assert!(matches!(
            store.update_balance(4242, 1.0),
            Err(BankError::NotFound)
        ));
    }

    #[test]
    fn count_rejects_torn_file() {
        let (dir, store) = setup_store(100);
        // A file that is not a whole number of records.
        std::fs::write(dir.path().join("accounts.dat"), [0u8; RECORD_SIZE + 3]).unwrap();

        assert!(matches!(store.count(), Err(BankError::InvalidInput(_))));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.dat");

        {
            let store = AccountStore::new(&path, 100);
            store.create("Alice", "pw1", 12.5).unwrap();
        }

        // A fresh store over the same file sees the same data.
        let store = AccountStore::new(&path, 100);
        let records = store.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number, 1000);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].balance, 12.5);
    }
}
