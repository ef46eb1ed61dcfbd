//! Static option catalog offered to consumers.
//!
//! The catalog is read-only configuration. Actions accept the typed values
//! directly; turning user input into them (and rejecting unknown names) is
//! the caller's job via [`FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    Unknown {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $default:ident => $default_str:literal,
            $($variant:ident => $str:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            #[default]
            $default,
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$default, $($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$default => $default_str,
                    $($name::$variant => $str),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == wanted)
                    .ok_or_else(|| CatalogError::Unknown {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|candidate| candidate.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

catalog_enum! {
    /// Product the options apply to. Offered as a choice, never stored.
    Product, "product" {
        Firefox => "firefox",
        Thunderbird => "thunderbird",
        Fenix => "fenix",
    }
}

catalog_enum! {
    /// Release channel.
    Channel, "channel" {
        Release => "release",
        Beta => "beta",
        Nightly => "nightly",
    }
}

catalog_enum! {
    /// Operating system.
    Os, "os" {
        Windows => "windows",
        Mac => "mac",
        Linux => "linux",
    }
}

/// All option lists, in display order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptionCatalog {
    pub products: &'static [Product],
    pub channels: &'static [Channel],
    pub oses: &'static [Os],
}

pub const CATALOG: OptionCatalog = OptionCatalog {
    products: Product::ALL,
    channels: Channel::ALL,
    oses: Os::ALL,
};
