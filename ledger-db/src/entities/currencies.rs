use super::{Amount, CurrencyId};
use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolFormat {
    Left,
    LeftSpaced,
    Right,
    #[default]
    RightSpaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub symbol_format: SymbolFormat,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
}

fn default_decimals() -> u32 {
    2
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_group_separator() -> String {
    ",".to_string()
}

impl Currency {
    pub fn new(id: CurrencyId, code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            symbol: symbol.into(),
            symbol_format: SymbolFormat::default(),
            decimals: default_decimals(),
            decimal_separator: default_decimal_separator(),
            group_separator: default_group_separator(),
        }
    }

    /// Placeholder used when a currency id cannot be resolved: no symbol,
    /// two decimals.
    pub fn empty() -> Self {
        Self::new(0, "", "")
    }

    pub fn with_symbol_format(mut self, symbol_format: SymbolFormat) -> Self {
        self.symbol_format = symbol_format;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_separators(
        mut self,
        decimal_separator: impl Into<String>,
        group_separator: impl Into<String>,
    ) -> Self {
        self.decimal_separator = decimal_separator.into();
        self.group_separator = group_separator.into();
        self
    }

    /// Format an amount. Negative amounts always carry `-`; `add_plus`
    /// prefixes strictly positive amounts with `+`.
    pub fn format_amount(&self, amount: Amount, add_plus: bool) -> String {
        let value = amount.inner();
        let sign = if value < 0 {
            "-"
        } else if add_plus && value > 0 {
            "+"
        } else {
            ""
        };
        let number = self.format_number(value.unsigned_abs());

        if self.symbol.is_empty() {
            return format!("{}{}", sign, number);
        }

        match self.symbol_format {
            SymbolFormat::Left => format!("{}{}{}", sign, self.symbol, number),
            SymbolFormat::LeftSpaced => format!("{}{} {}", sign, self.symbol, number),
            SymbolFormat::Right => format!("{}{}{}", sign, number, self.symbol),
            SymbolFormat::RightSpaced => format!("{}{} {}", sign, number, self.symbol),
        }
    }

    fn format_number(&self, hundredths: u64) -> String {
        // Amounts are stored in hundredths, so at most two digits are meaningful
        let decimals = self.decimals.min(2);
        let scale = 10_u64.pow(2 - decimals);
        let rounded = (hundredths + scale / 2) / scale;
        let divisor = 10_u64.pow(decimals);

        let integer = group_digits(rounded / divisor, &self.group_separator);
        if decimals > 0 {
            format!(
                "{}{}{:0width$}",
                integer,
                self.decimal_separator,
                rounded % divisor,
                width = decimals as usize
            )
        } else {
            integer
        }
    }
}

fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency::new(1, "USD", "$").with_symbol_format(SymbolFormat::Left)
    }

    #[test]
    fn test_format_with_plus() {
        assert_eq!(usd().format_amount(Amount::new(123456), true), "+$1,234.56");
        assert_eq!(usd().format_amount(Amount::new(123456), false), "$1,234.56");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(usd().format_amount(Amount::new(-5), true), "-$0.05");
    }

    #[test]
    fn test_format_zero_has_no_sign() {
        assert_eq!(usd().format_amount(Amount::ZERO, true), "$0.00");
    }

    #[test]
    fn test_symbol_placement() {
        let eur = Currency::new(2, "EUR", "€").with_separators(",", ".");
        assert_eq!(eur.format_amount(Amount::new(-1234567), false), "-12.345,67 €");

        let eur_right = eur.clone().with_symbol_format(SymbolFormat::Right);
        assert_eq!(eur_right.format_amount(Amount::new(100), true), "+1,00€");

        let left_spaced = Currency::new(3, "CHF", "CHF").with_symbol_format(SymbolFormat::LeftSpaced);
        assert_eq!(left_spaced.format_amount(Amount::new(2500), false), "CHF 25.00");
    }

    #[test]
    fn test_zero_decimals_rounds() {
        let jpy = Currency::new(4, "JPY", "¥")
            .with_symbol_format(SymbolFormat::Left)
            .with_decimals(0);
        assert_eq!(jpy.format_amount(Amount::new(123450), false), "¥1,235");
        assert_eq!(jpy.format_amount(Amount::new(149), false), "¥1");
    }

    #[test]
    fn test_empty_currency() {
        assert_eq!(Currency::empty().format_amount(Amount::new(-1000), true), "-10.00");
    }
}
