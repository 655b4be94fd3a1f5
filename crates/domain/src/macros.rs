//! Macro for implementing label conversions on fixed-vocabulary enums
//!
//! Several columns in the billing store hold one of a small set of labels
//! (`"1-Year"`, `"Month to Month"`, `"One-Off"`, ...). This macro maps each
//! enum variant to the exact label the store uses and generates `as_str`,
//! `Display` and a case-insensitive `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use mspdash_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tier {
//!     Basic,
//!     Premium,
//! }
//!
//! impl_label_conversions!(Tier {
//!     Basic => "Basic",
//!     Premium => "Premium Plus",
//! });
//!
//! assert_eq!(Tier::Premium.to_string(), "Premium Plus");
//! assert_eq!("premium plus".parse::<Tier>(), Ok(Tier::Premium));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for label enums
///
/// Parsing trims surrounding whitespace and ignores ASCII case. The error
/// message names the enum so callers can surface it directly.
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// The label stored for this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
