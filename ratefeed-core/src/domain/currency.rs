use serde::{Deserialize, Serialize};

/// Placeholder substituted with the currency code in a fallback template.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// A configured currency: its ISO code and the primary ticker symbol used
/// to look it up (e.g. `NGN` → `NGN=X`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub code: String,
    pub symbol: String,
}

impl CurrencyEntry {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
        }
    }

    /// Alternate symbol derived from `template` (e.g. `USD{code}=X` → `USDNGN=X`).
    pub fn fallback_symbol(&self, template: &str) -> String {
        template.replace(CODE_PLACEHOLDER, &self.code)
    }
}
