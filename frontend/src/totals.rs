use crate::models::{Transaction, TransactionType};

/// Income, expenses and balance over a list of transactions, in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: i64,
    pub expenses: i64,
    pub balance: i64,
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = 0i64;
        let mut expenses = 0i64;
        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => income = income.saturating_add(transaction.amount),
                TransactionType::Expense => expenses = expenses.saturating_add(transaction.amount),
            }
        }

        Totals {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(id: &str, amount: i64, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: None,
            transaction_type,
            date: "2025-01-01".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn empty_list_has_zero_totals() {
        assert_eq!(Totals::from_transactions(&[]), Totals::default());
    }

    #[test]
    fn sums_by_type() {
        let transactions = vec![
            transaction("1", 500, TransactionType::Income),
            transaction("2", 1200, TransactionType::Income),
            transaction("3", 300, TransactionType::Expense),
            transaction("4", 2500, TransactionType::Expense),
        ];

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(totals.income, 1700);
        assert_eq!(totals.expenses, 2800);
        assert_eq!(totals.balance, -1100);
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let amounts = [0, 1, 99, 1234, 50_000, 7];
        for split in 0..amounts.len() {
            let transactions: Vec<_> = amounts
                .iter()
                .enumerate()
                .map(|(i, &amount)| {
                    let kind = if i < split {
                        TransactionType::Income
                    } else {
                        TransactionType::Expense
                    };
                    transaction(&i.to_string(), amount, kind)
                })
                .collect();

            let totals = Totals::from_transactions(&transactions);

            assert_eq!(totals.balance, totals.income - totals.expenses);
            assert!(totals.income >= 0);
            assert!(totals.expenses >= 0);
        }
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let transactions = vec![
            transaction("1", i64::MAX, TransactionType::Income),
            transaction("2", 1, TransactionType::Income),
        ];

        assert_eq!(Totals::from_transactions(&transactions).income, i64::MAX);
    }
}
