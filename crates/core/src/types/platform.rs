//! Shopping platforms orders can be placed on.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A supported affiliate shopping platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Walmart,
    AliExpress,
    #[serde(rename = "eBay")]
    Ebay,
    Temu,
    Etsy,
    Target,
    Wayfair,
    #[serde(rename = "Lowe's")]
    Lowes,
    Shein,
    Alibaba,
    Ikea,
    #[serde(rename = "H&M")]
    HAndM,
    Zara,
    Alo,
    Uniqlo,
}

impl Platform {
    /// All platforms, in the order the order form lists them.
    pub const ALL: [Self; 16] = [
        Self::Amazon,
        Self::Walmart,
        Self::AliExpress,
        Self::Ebay,
        Self::Temu,
        Self::Etsy,
        Self::Target,
        Self::Wayfair,
        Self::Lowes,
        Self::Shein,
        Self::Alibaba,
        Self::Ikea,
        Self::HAndM,
        Self::Zara,
        Self::Alo,
        Self::Uniqlo,
    ];

    /// Display name, exactly as the shop brands itself.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Walmart => "Walmart",
            Self::AliExpress => "AliExpress",
            Self::Ebay => "eBay",
            Self::Temu => "Temu",
            Self::Etsy => "Etsy",
            Self::Target => "Target",
            Self::Wayfair => "Wayfair",
            Self::Lowes => "Lowe's",
            Self::Shein => "Shein",
            Self::Alibaba => "Alibaba",
            Self::Ikea => "Ikea",
            Self::HAndM => "H&M",
            Self::Zara => "Zara",
            Self::Alo => "Alo",
            Self::Uniqlo => "Uniqlo",
        }
    }

    /// Short code used in affiliate links: the first three ASCII letters of
    /// the name, lower-cased (`H&M` → `hm`, `Lowe's` → `low`).
    #[must_use]
    pub fn code(self) -> String {
        self.name()
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .take(3)
            .collect()
    }

    /// Look a platform up by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
