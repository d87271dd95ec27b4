//! ISO 3166-1 alpha-2 country code table.
//!
//! # Responsibility
//! - Hold the officially assigned alpha-2 codes used for passenger validation.
//!
//! # Invariants
//! - `ISO_3166_ALPHA2` is sorted ascending so lookups can binary search.
//! - Codes are matched exactly: uppercase only, no trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[rustfmt::skip]
const ISO_3166_ALPHA2: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ",
    "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW",
    "CX", "CY", "CZ",
    "DE", "DJ", "DK", "DM", "DO", "DZ",
    "EC", "EE", "EG", "EH", "ER", "ES", "ET",
    "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT",
    "GU", "GW", "GY",
    "HK", "HM", "HN", "HR", "HT", "HU",
    "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT",
    "JE", "JM", "JO", "JP",
    "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ",
    "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY",
    "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS",
    "MT", "MU", "MV", "MW", "MX", "MY", "MZ",
    "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ",
    "OM",
    "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY",
    "QA",
    "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ",
    "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR", "TT", "TV", "TW", "TZ",
    "UA", "UG", "UM", "US", "UY", "UZ",
    "VA", "VC", "VE", "VG", "VI", "VN", "VU",
    "WF", "WS",
    "YE", "YT",
    "ZA", "ZM", "ZW",
];

/// Returns every recognized alpha-2 code in ascending order.
pub fn iso_country_codes() -> &'static [&'static str] {
    ISO_3166_ALPHA2
}

/// Returns whether `value` is an assigned ISO 3166-1 alpha-2 code.
pub fn is_iso_country_code(value: &str) -> bool {
    ISO_3166_ALPHA2.binary_search(&value).is_ok()
}

/// Validated ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parses a country code, rejecting anything outside the ISO table.
    pub fn parse(value: &str) -> Result<Self, CountryCodeError> {
        if !is_iso_country_code(value) {
            return Err(CountryCodeError(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Two-letter code as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !is_iso_country_code(&value) {
            return Err(CountryCodeError(value));
        }
        Ok(Self(value))
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

/// Rejected country code input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCodeError(pub String);

impl Display for CountryCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid country code: `{}`", self.0)
    }
}

impl Error for CountryCodeError {}

#[cfg(test)]
mod tests {
    use super::{is_iso_country_code, iso_country_codes, CountryCode, CountryCodeError};

    #[test]
    fn table_is_sorted_and_unique() {
        let codes = iso_country_codes();
        assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(codes.len(), 249);
    }

    #[test]
    fn accepts_assigned_codes() {
        for code in ["US", "ES", "GB", "AX", "ZW", "SS"] {
            assert!(is_iso_country_code(code), "{code} should be recognized");
        }
    }

    #[test]
    fn rejects_unassigned_and_malformed_codes() {
        for code in ["XX", "UK", "us", "USA", "", " US", "U"] {
            assert!(!is_iso_country_code(code), "{code:?} should be rejected");
        }
    }

    #[test]
    fn parse_keeps_input_verbatim() {
        let code = CountryCode::parse("JP").expect("JP parse");
        assert_eq!(code.as_str(), "JP");
        assert_eq!(code.to_string(), "JP");

        let err = CountryCode::parse("EU").expect_err("EU is not a country");
        assert_eq!(err, CountryCodeError("EU".to_string()));
    }
}
