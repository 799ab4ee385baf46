use log::{debug, info};

use crate::error::BankError;
use crate::ledger::{TransactionKind, TransactionLog};
use crate::store::AccountStore;

/// Read-only view of an account, returned to the caller instead of any
/// process-wide "current account" state.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub number: i32,
    pub name: String,
    pub balance: f32,
}

/// Banking operations composed from the account store and the ledger.
///
/// Every mutating operation authenticates against the store, applies
/// the balance change, persists it, and then emits a ledger entry.
/// Ledger writes are best-effort and never affect the outcome of the
/// banking operation itself.
pub struct Bank {
    store: AccountStore,
    ledger: TransactionLog,
}

impl Bank {
    pub fn new(store: AccountStore, ledger: TransactionLog) -> Self {
        Self { store, ledger }
    }

    /// Build a bank from the global configuration.
    pub fn from_config() -> Self {
        Self::new(AccountStore::from_config(), TransactionLog::from_config())
    }

    /// Create a new account and log the opening balance.
    pub fn create_account(
        &self,
        name: &str,
        password: &str,
        initial_balance: f32,
    ) -> Result<AccountSummary, BankError> {
        let account = self.store.create(name, password, initial_balance)?;
        self.ledger.append(
            account.number,
            TransactionKind::AccountCreated,
            account.balance,
        );
        Ok(AccountSummary {
            number: account.number,
            name: account.name,
            balance: account.balance,
        })
    }

    /// Authenticate and return the account details read-only.
    pub fn view_account(&self, number: i32, password: &str) -> Result<AccountSummary, BankError> {
        let account = self.store.authenticate(number, password)?;
        Ok(AccountSummary {
            number: account.number,
            name: account.name,
            balance: account.balance,
        })
    }

    /// Deposit an amount and return the new balance.
    pub fn deposit(&self, number: i32, password: &str, amount: f32) -> Result<f32, BankError> {
        validate_amount(amount)?;
        let account = self.store.authenticate(number, password)?;

        let new_balance = account.balance + amount;
        self.store.update_balance(number, new_balance)?;
        self.ledger.append(number, TransactionKind::Deposit, amount);

        info!("Deposit of {:.2} on account {}", amount, number);
        Ok(new_balance)
    }

    /// Withdraw an amount and return the new balance.
    ///
    /// Fails with [`BankError::InsufficientFunds`] before any write
    /// when the balance does not cover the amount.
    pub fn withdraw(&self, number: i32, password: &str, amount: f32) -> Result<f32, BankError> {
        validate_amount(amount)?;
        let account = self.store.authenticate(number, password)?;

        if account.balance < amount {
            debug!(
                "Rejected withdrawal of {:.2} from account {} (balance {:.2})",
                amount, number, account.balance
            );
            return Err(BankError::InsufficientFunds);
        }

        let new_balance = account.balance - amount;
        self.store.update_balance(number, new_balance)?;
        self.ledger.append(number, TransactionKind::Withdrawal, amount);

        info!("Withdrawal of {:.2} from account {}", amount, number);
        Ok(new_balance)
    }

    /// Move an amount between two accounts.
    ///
    /// The destination is resolved before anything is written, so a
    /// missing destination fails with [`BankError::DestinationNotFound`]
    /// and leaves the source balance untouched. Returns the new source
    /// balance.
    pub fn transfer(
        &self,
        from: i32,
        password: &str,
        to: i32,
        amount: f32,
    ) -> Result<f32, BankError> {
        validate_amount(amount)?;
        if from == to {
            return Err(BankError::InvalidInput(
                "cannot transfer to the same account".to_string(),
            ));
        }

        let source = self.store.authenticate(from, password)?;
        if source.balance < amount {
            return Err(BankError::InsufficientFunds);
        }

        // Resolve the destination before the debit is persisted. Both
        // sides of the transfer are only written once both records are
        // known to exist.
        let destination = match self.store.find(to) {
            Ok(account) => account,
            Err(BankError::NotFound) => return Err(BankError::DestinationNotFound),
            Err(e) => return Err(e),
        };

        let new_source_balance = source.balance - amount;
        self.store.update_balance(from, new_source_balance)?;
        self.store.update_balance(to, destination.balance + amount)?;

        self.ledger.append(from, TransactionKind::TransferOut, amount);
        self.ledger.append(to, TransactionKind::TransferIn, amount);

        info!(
            "Transfer of {:.2} from account {} to account {}",
            amount, from, to
        );
        Ok(new_source_balance)
    }

    /// Ledger lines mentioning the given account number, in append order.
    pub fn transactions(&self, number: i32) -> Result<Vec<String>, BankError> {
        self.ledger.query_by_account(number)
    }
}

fn validate_amount(amount: f32) -> Result<(), BankError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BankError::InvalidInput(
            "amount must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
