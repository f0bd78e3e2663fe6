//! Invoice Calculator
//!
//! Nets each customer's transactions per currency, converts every currency
//! subtotal once into the output currency, and sums the results. Netting
//! before converting keeps the number of conversions (and so of truncations)
//! to one per currency.

use std::collections::HashMap;

use invoice_types::{
    Currency, CurrencyConvertor, CustomerInvoiceSummary, DomainError, ExchangeError, Money,
    RateSnapshot, Transaction,
};

/// Computes customer balances against a single rate snapshot.
pub struct InvoiceCalculator<'a> {
    convertor: CurrencyConvertor<'a>,
}

impl<'a> InvoiceCalculator<'a> {
    pub fn new(rates: &'a RateSnapshot) -> Self {
        Self {
            convertor: CurrencyConvertor::new(rates),
        }
    }

    /// One summary per distinct customer, in order of first appearance.
    pub fn sum_all_invoices(
        &self,
        transactions: &[Transaction],
        output_currency: &Currency,
    ) -> Result<Vec<CustomerInvoiceSummary>, DomainError> {
        segregate_by_customer(transactions)
            .into_iter()
            .map(|(customer, customer_transactions)| {
                let total = self.sum_invoices(&customer_transactions, output_currency)?;
                Ok(CustomerInvoiceSummary::new(customer, total))
            })
            .collect()
    }

    /// Summarises transactions already filtered down to `tax_id`.
    ///
    /// The summary carries the customer name of the first transaction.
    pub fn sum_invoices_for_client(
        &self,
        tax_id: &str,
        transactions: &[Transaction],
        output_currency: &Currency,
    ) -> Result<CustomerInvoiceSummary, DomainError> {
        let first = transactions
            .first()
            .ok_or_else(|| DomainError::NoTransactionsFoundForTaxId(tax_id.to_string()))?;

        let refs: Vec<&Transaction> = transactions.iter().collect();
        let total = self.sum_invoices(&refs, output_currency)?;
        Ok(CustomerInvoiceSummary::new(first.customer.clone(), total))
    }

    /// Net total of one customer's transactions in `output_currency`.
    pub fn sum_invoices(
        &self,
        transactions: &[&Transaction],
        output_currency: &Currency,
    ) -> Result<Money, ExchangeError> {
        let mut total = Money::zero(output_currency.clone());
        for subtotal in net_by_currency(transactions)? {
            let converted = if subtotal.currency() == output_currency {
                subtotal
            } else {
                self.convertor.convert_to(&subtotal, output_currency)?
            };
            total = total.checked_add(&converted)?;
        }
        Ok(total)
    }
}

fn segregate_by_customer(transactions: &[Transaction]) -> Vec<(&str, Vec<&Transaction>)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Transaction>)> = Vec::new();

    for transaction in transactions {
        let customer = transaction.customer.as_str();
        let slot = *slots.entry(customer).or_insert_with(|| {
            groups.push((customer, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(transaction);
    }

    groups
}

/// INVOICE and DEBIT add, CREDIT subtracts; one subtotal per currency present.
fn net_by_currency(transactions: &[&Transaction]) -> Result<Vec<Money>, ExchangeError> {
    let mut slots: HashMap<&Currency, usize> = HashMap::new();
    let mut subtotals: Vec<Money> = Vec::new();

    for transaction in transactions {
        let currency = transaction.total.currency();
        let slot = *slots.entry(currency).or_insert_with(|| {
            subtotals.push(Money::zero(currency.clone()));
            subtotals.len() - 1
        });

        let running = &subtotals[slot];
        let next = if transaction.transaction_type.reduces_balance() {
            running.checked_sub(&transaction.total)?
        } else {
            running.checked_add(&transaction.total)?
        };
        subtotals[slot] = next;
    }

    Ok(subtotals)
}

#[cfg(test)]
mod tests {
    use invoice_types::ExchangeRate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn currency(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn money(amount: Decimal, code: &str) -> Money {
        Money::new(amount, currency(code))
    }

    fn rates() -> RateSnapshot {
        RateSnapshot::import(vec![
            ExchangeRate::new(currency("USD"), dec!(1)),
            ExchangeRate::new(currency("EUR"), dec!(2)),
            ExchangeRate::new(currency("GBP"), dec!(0.5)),
        ])
        .unwrap()
    }

    fn vendor_one() -> Vec<Transaction> {
        vec![
            Transaction::invoice("Vendor 1", "123456789", "1000000257", money(dec!(400), "USD")),
            Transaction::invoice("Vendor 1", "123456789", "1000000264", money(dec!(1600), "EUR")),
            Transaction::credit(
                "Vendor 1",
                "123456789",
                "1000000260",
                "1000000257",
                money(dec!(200), "USD"),
            ),
            Transaction::debit(
                "Vendor 1",
                "123456789",
                "1000000261",
                "1000000264",
                money(dec!(100), "EUR"),
            ),
        ]
    }

    #[test]
    fn test_mixed_currency_customer_total() {
        let rates = rates();
        let summaries = InvoiceCalculator::new(&rates)
            .sum_all_invoices(&vendor_one(), &currency("USD"))
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].customer, "Vendor 1");
        assert_eq!(summaries[0].total.amount().to_string(), "1050.000000");
        assert_eq!(summaries[0].total.currency().code(), "USD");
    }

    #[test]
    fn test_netting_is_order_independent() {
        let rates = rates();
        let calculator = InvoiceCalculator::new(&rates);
        let output = currency("GBP");

        let forward = calculator.sum_all_invoices(&vendor_one(), &output).unwrap();
        let mut reversed = vendor_one();
        reversed.reverse();
        let backward = calculator.sum_all_invoices(&reversed, &output).unwrap();
        let mut rotated = vendor_one();
        rotated.rotate_left(2);
        let shifted = calculator.sum_all_invoices(&rotated, &output).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward, shifted);
    }

    #[test]
    fn test_netting_beyond_scale_six_is_order_independent() {
        let transactions = vec![
            Transaction::invoice("Vendor 1", "123456789", "1", money(dec!(1.0000007), "USD")),
            Transaction::credit("Vendor 1", "123456789", "2", "1", money(dec!(0.0000004), "USD")),
            Transaction::debit("Vendor 1", "123456789", "3", "1", money(dec!(2.4999999), "EUR")),
        ];
        let rates = rates();
        let calculator = InvoiceCalculator::new(&rates);
        let output = currency("USD");

        let forward = calculator.sum_all_invoices(&transactions, &output).unwrap();
        let mut reversed = transactions.clone();
        reversed.reverse();
        let backward = calculator.sum_all_invoices(&reversed, &output).unwrap();

        assert_eq!(forward, backward);
        // 1.000000 USD plus 2.499999 EUR / 2 = 1.249999 USD.
        assert_eq!(forward[0].total.amount().to_string(), "2.249999");
    }

    #[test]
    fn test_groups_by_customer_in_first_seen_order() {
        let transactions = vec![
            Transaction::invoice("Vendor 2", "987654321", "1", money(dec!(900), "EUR")),
            Transaction::invoice("Vendor 1", "123456789", "2", money(dec!(400), "USD")),
            Transaction::credit("Vendor 2", "987654321", "3", "1", money(dec!(200), "USD")),
        ];
        let rates = rates();

        let summaries = InvoiceCalculator::new(&rates)
            .sum_all_invoices(&transactions, &currency("USD"))
            .unwrap();

        let names: Vec<_> = summaries.iter().map(|s| s.customer.as_str()).collect();
        assert_eq!(names, ["Vendor 2", "Vendor 1"]);
        // 900 EUR / 2 = 450 USD, minus 200 USD.
        assert_eq!(summaries[0].total.amount(), dec!(250));
        assert_eq!(summaries[1].total.amount(), dec!(400));
    }

    #[test]
    fn test_output_currency_subtotal_is_not_converted() {
        // CHF has no rate, but nothing needs converting.
        let transactions = vec![
            Transaction::invoice("Vendor 1", "123456789", "1", money(dec!(10.5), "CHF")),
            Transaction::invoice("Vendor 1", "123456789", "2", money(dec!(4.5), "CHF")),
        ];
        let rates = rates();

        let summaries = InvoiceCalculator::new(&rates)
            .sum_all_invoices(&transactions, &currency("CHF"))
            .unwrap();

        assert_eq!(summaries[0].total.amount().to_string(), "15.000000");
    }

    #[test]
    fn test_credits_can_produce_negative_balance() {
        let transactions = vec![
            Transaction::invoice("Vendor 1", "123456789", "1", money(dec!(100), "EUR")),
            Transaction::credit("Vendor 1", "123456789", "2", "1", money(dec!(300), "EUR")),
        ];
        let rates = rates();

        let summaries = InvoiceCalculator::new(&rates)
            .sum_all_invoices(&transactions, &currency("USD"))
            .unwrap();

        assert_eq!(summaries[0].total.amount(), dec!(-100));
        assert!(summaries[0].total.is_negative());
    }

    #[test]
    fn test_unknown_currency_fails_whole_aggregation() {
        let mut transactions = vendor_one();
        transactions.push(Transaction::invoice(
            "Vendor 3",
            "123465123",
            "9",
            money(dec!(1000), "JPY"),
        ));
        let rates = rates();

        let result = InvoiceCalculator::new(&rates).sum_all_invoices(&transactions, &currency("USD"));

        assert_eq!(
            result,
            Err(DomainError::Exchange(ExchangeError::NoExchangeRateForCurrency(
                currency("JPY")
            )))
        );
    }

    #[test]
    fn test_client_summary_uses_first_customer_name() {
        let rates = rates();
        let summary = InvoiceCalculator::new(&rates)
            .sum_invoices_for_client("123456789", &vendor_one(), &currency("EUR"))
            .unwrap();

        assert_eq!(summary.customer, "Vendor 1");
        // 200 USD * 2 = 400 EUR, plus 1700 EUR.
        assert_eq!(summary.total.amount(), dec!(2100));
    }

    #[test]
    fn test_client_summary_without_transactions() {
        let rates = rates();
        let result =
            InvoiceCalculator::new(&rates).sum_invoices_for_client("000", &[], &currency("EUR"));

        assert_eq!(
            result,
            Err(DomainError::NoTransactionsFoundForTaxId("000".into()))
        );
    }

    #[test]
    fn test_empty_input_yields_no_summaries() {
        let rates = rates();
        let summaries = InvoiceCalculator::new(&rates)
            .sum_all_invoices(&[], &currency("USD"))
            .unwrap();

        assert!(summaries.is_empty());
    }

    #[test]
    fn test_net_by_currency_subtotals() {
        let transactions = vendor_one();
        let refs: Vec<&Transaction> = transactions.iter().collect();

        let subtotals = net_by_currency(&refs).unwrap();

        assert_eq!(
            subtotals,
            vec![money(dec!(200), "USD"), money(dec!(1700), "EUR")]
        );
    }
}
