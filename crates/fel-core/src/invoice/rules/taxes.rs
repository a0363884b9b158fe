//! Tax total reconciliation against the fixed SAT categories.

use tracing::debug;

use crate::models::record::{TaxAmounts, TaxCategory};

/// Fold `(short name, amount)` pairs into a [`TaxAmounts`] table.
///
/// Categories that never appear stay at `"0"`. Unknown short names are
/// dropped. A repeated category keeps the last amount seen.
pub fn reconcile_taxes<'a, I>(entries: I) -> TaxAmounts
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut amounts = TaxAmounts::new();

    for (short_name, amount) in entries {
        match TaxCategory::from_short_name(short_name) {
            Some(category) => amounts.set(category, amount),
            None => debug!("Ignoring tax total for unknown category {:?}", short_name),
        }
    }

    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_entries_yields_zeros() {
        let amounts = reconcile_taxes(std::iter::empty());
        assert_eq!(amounts, TaxAmounts::new());
    }

    #[test]
    fn test_known_and_unknown_categories() {
        let amounts = reconcile_taxes([
            ("IVA", "17.36"),
            ("ISR", "99.00"),
            ("TIMBRE DE PRENSA", "0.50"),
            ("iva", "1.00"),
        ]);

        assert_eq!(amounts.len(), 7);
        assert_eq!(amounts.get(TaxCategory::Iva), "17.36");
        assert_eq!(amounts.get(TaxCategory::TimbreDePrensa), "0.50");
        assert_eq!(amounts.get(TaxCategory::Bomberos), "0");
    }

    #[test]
    fn test_last_entry_wins() {
        let amounts = reconcile_taxes([("PETROLEO", "4.70"), ("PETROLEO", "9.40")]);
        assert_eq!(amounts.get(TaxCategory::Petroleo), "9.40");
    }
}
