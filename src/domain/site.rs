//! Site presentation settings.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::DEFAULT_EXCHANGE_RATE;

/// The single settings row that themes the storefront.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub dark_bg: Option<String>,
    pub card_bg: Option<String>,
    pub primary_blue: Option<String>,
    pub accent_green: Option<String>,
    pub text_color: Option<String>,
    pub secondary_text: Option<String>,
    pub input_bg: Option<String>,
    pub button_gradient: Option<String>,
    pub hover_blue: Option<String>,
    pub selected_item_gradient: Option<String>,
    pub shadow_dark: Option<String>,
    pub border_color: Option<String>,
    pub shadow_light: Option<String>,
    pub button_text_color: Option<String>,
    /// Bolívares per US dollar
    pub exchange_rate: Option<Decimal>,
}

impl SiteConfig {
    /// Map settings to the CSS custom properties the storefront applies.
    ///
    /// Unset values are omitted so the stylesheet defaults stay in effect.
    pub fn css_variables(&self) -> BTreeMap<String, Value> {
        let colors = [
            ("--bg-color", &self.dark_bg),
            ("--card-bg", &self.card_bg),
            ("--primary-blue", &self.primary_blue),
            ("--accent-green", &self.accent_green),
            ("--text-color", &self.text_color),
            ("--secondary-text", &self.secondary_text),
            ("--input-bg", &self.input_bg),
            ("--button-gradient", &self.button_gradient),
            ("--hover-blue", &self.hover_blue),
            ("--selected-item-gradient", &self.selected_item_gradient),
            ("--shadow-dark", &self.shadow_dark),
            ("--border-color", &self.border_color),
            ("--shadow-light", &self.shadow_light),
            ("--button-text-color", &self.button_text_color),
        ];

        let mut vars: BTreeMap<String, Value> = colors
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .map(|v| (name.to_string(), Value::String(v.clone())))
            })
            .collect();

        if let Some(rate) = self.exchange_rate {
            vars.insert("--tasa-dolar".to_string(), Value::String(rate.to_string()));
        }

        vars
    }

    /// Configured exchange rate, or the storefront's historical fallback.
    pub fn exchange_rate_or_default(&self) -> Decimal {
        self.exchange_rate.unwrap_or_else(default_exchange_rate)
    }
}

/// Fallback VES/USD rate.
pub fn default_exchange_rate() -> Decimal {
    Decimal::from_str(DEFAULT_EXCHANGE_RATE).unwrap_or(Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_values_are_mapped() {
        let config = SiteConfig {
            dark_bg: Some("#000".into()),
            button_text_color: Some("#fff".into()),
            exchange_rate: Some(Decimal::new(3650, 2)),
            ..Default::default()
        };

        let vars = config.css_variables();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["--bg-color"], "#000");
        assert_eq!(vars["--button-text-color"], "#fff");
        assert_eq!(vars["--tasa-dolar"], "36.50");
        assert!(!vars.contains_key("--card-bg"));
    }

    #[test]
    fn exchange_rate_falls_back() {
        assert_eq!(
            SiteConfig::default().exchange_rate_or_default(),
            Decimal::new(38, 0)
        );
    }
}
