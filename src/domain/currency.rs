//! Country-to-currency mapping and price formatting.
//!
//! The static tables cover the markets the platform launched in; anything
//! unknown falls back to RUB, matching how prices were quoted originally.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::DEFAULT_CURRENCY;

/// ISO 3166 alpha-2 country code to ISO 4217 currency code.
pub static COUNTRY_TO_CURRENCY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("RU", "RUB"),
        ("BY", "BYN"),
        ("KZ", "KZT"),
        ("UA", "UAH"),
        ("UZ", "UZS"),
        ("KG", "KGS"),
        ("AM", "AMD"),
        ("AZ", "AZN"),
        ("GE", "GEL"),
        ("MD", "MDL"),
        ("TJ", "TJS"),
        ("TM", "TMT"),
        ("TR", "TRY"),
        ("RS", "RSD"),
        ("IL", "ILS"),
        ("AE", "AED"),
        ("TH", "THB"),
        ("ID", "IDR"),
        ("VN", "VND"),
        ("US", "USD"),
        ("GB", "GBP"),
        ("DE", "EUR"),
        ("FR", "EUR"),
        ("ES", "EUR"),
        ("IT", "EUR"),
        ("PT", "EUR"),
        ("NL", "EUR"),
        ("AT", "EUR"),
        ("FI", "EUR"),
        ("GR", "EUR"),
        ("LV", "EUR"),
        ("LT", "EUR"),
        ("EE", "EUR"),
        ("PL", "PLN"),
        ("CZ", "CZK"),
        ("HU", "HUF"),
        ("RO", "RON"),
        ("BG", "BGN"),
    ])
});

/// Currency code to display symbol.
pub static CURRENCY_SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("RUB", "₽"),
        ("BYN", "Br"),
        ("KZT", "₸"),
        ("UAH", "₴"),
        ("UZS", "so'm"),
        ("KGS", "с"),
        ("AMD", "֏"),
        ("AZN", "₼"),
        ("GEL", "₾"),
        ("TRY", "₺"),
        ("ILS", "₪"),
        ("AED", "د.إ"),
        ("THB", "฿"),
        ("USD", "$"),
        ("GBP", "£"),
        ("EUR", "€"),
        ("PLN", "zł"),
        ("CZK", "Kč"),
    ])
});

/// Resolve the currency for a country code, falling back to RUB.
pub fn currency_for_country(country_code: &str) -> &'static str {
    COUNTRY_TO_CURRENCY
        .get(country_code.to_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_CURRENCY)
}

/// Symbol for a currency code, falling back to the code itself.
pub fn currency_symbol(currency: &str) -> &str {
    CURRENCY_SYMBOLS.get(currency).copied().unwrap_or(currency)
}

/// Format a price for display: integers lose the decimal part.
pub fn format_price(amount: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    if amount.fract() == 0.0 {
        format!("{} {}", amount as i64, symbol)
    } else {
        format!("{:.2} {}", amount, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_for_country() {
        assert_eq!(currency_for_country("RU"), "RUB");
        assert_eq!(currency_for_country("de"), "EUR");
        assert_eq!(currency_for_country("ZZ"), "RUB");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1500.0, "RUB"), "1500 ₽");
        assert_eq!(format_price(19.5, "EUR"), "19.50 €");
        assert_eq!(format_price(100.0, "XXX"), "100 XXX");
    }
}
