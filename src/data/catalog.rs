use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub ticker: String,
}

/// Which group of symbols the viewer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    /// Tabs over the individual stocks.
    #[default]
    TopStocks,
    /// The market index alone.
    Index,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::TopStocks => Self::Index,
            Self::Index => Self::TopStocks,
        }
    }
}

/// Ordered symbol table keyed by exchange-qualified symbol (`MYX:MAYBANK`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    symbols: IndexMap<String, SymbolInfo>,
    index_symbol: String,
    default_symbol: String,
}

impl SymbolCatalog {
    /// Builds a catalog; both the index and default symbol must be present.
    pub fn new(
        symbols: IndexMap<String, SymbolInfo>,
        index_symbol: impl Into<String>,
        default_symbol: impl Into<String>,
    ) -> ChartResult<Self> {
        let index_symbol = index_symbol.into();
        let default_symbol = default_symbol.into();
        for symbol in [&index_symbol, &default_symbol] {
            if !symbols.contains_key(symbol) {
                return Err(ChartError::UnknownSymbol(symbol.clone()));
            }
        }
        if index_symbol == default_symbol {
            return Err(ChartError::Config(
                "default symbol must not be the index symbol".to_owned(),
            ));
        }
        Ok(Self {
            symbols,
            index_symbol,
            default_symbol,
        })
    }

    /// Five Bursa Malaysia blue chips plus the FBM KLCI index.
    #[must_use]
    pub fn bursa_malaysia() -> Self {
        let entries = [
            ("MYX:MAYBANK", "Malayan Banking Berhad", "1155.KL"),
            ("MYX:PBBANK", "Public Bank Berhad", "1295.KL"),
            ("MYX:CIMB", "CIMB Group Holdings", "1023.KL"),
            ("MYX:TENAGA", "Tenaga Nasional Berhad", "5347.KL"),
            ("MYX:PCHEM", "Petronas Chemicals Group", "5183.KL"),
            ("FTSEMYX:FBMKLCI", "FBM KLCI Index", "^KLSE"),
        ];
        let symbols = entries
            .into_iter()
            .map(|(symbol, name, ticker)| {
                (
                    symbol.to_owned(),
                    SymbolInfo {
                        name: name.to_owned(),
                        ticker: ticker.to_owned(),
                    },
                )
            })
            .collect();
        Self {
            symbols,
            index_symbol: "FTSEMYX:FBMKLCI".to_owned(),
            default_symbol: "MYX:MAYBANK".to_owned(),
        }
    }

    pub fn get(&self, symbol: &str) -> ChartResult<&SymbolInfo> {
        self.symbols
            .get(symbol)
            .ok_or_else(|| ChartError::UnknownSymbol(symbol.to_owned()))
    }

    #[must_use]
    pub fn index_symbol(&self) -> &str {
        &self.index_symbol
    }

    #[must_use]
    pub fn default_symbol(&self) -> &str {
        &self.default_symbol
    }

    /// Stocks in catalog order, index excluded.
    pub fn stocks(&self) -> impl Iterator<Item = (&str, &SymbolInfo)> {
        self.symbols
            .iter()
            .filter(|(symbol, _)| **symbol != self.index_symbol)
            .map(|(symbol, info)| (symbol.as_str(), info))
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::bursa_malaysia()
    }
}
