//! Card Brands - Brand definitions and the default ordered brand table
//!
//! This crate describes the shape of each supported card brand: the leading
//! digits that identify it, the number and CVC lengths it accepts, whether
//! its numbers carry a Luhn check digit, and how it is grouped for display.
//! Brands can also be loaded from a JSON document for callers that need a
//! custom table.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors raised while building brand definitions from configuration
#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("brand type must not be empty")]
    EmptyType,

    #[error("invalid pattern for brand '{card_type}': {source}")]
    InvalidPattern {
        card_type: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid format for brand '{card_type}': {source}")]
    InvalidFormat {
        card_type: String,
        #[source]
        source: regex::Error,
    },

    #[error("brand '{0}' declares no valid number lengths")]
    EmptyLengths(String),

    #[error("brand '{0}' declares no valid CVC lengths")]
    EmptyCvcLengths(String),

    #[error("brand '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("malformed brand configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable description of a brand, as found in configuration files
///
/// Field names follow the camelCase keys used by web front ends
/// (`type`, `cvcLength`), so a table exported from a browser form library
/// can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSpec {
    #[serde(rename = "type")]
    pub card_type: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub length: Vec<usize>,
    pub cvc_length: Vec<usize>,
    #[serde(default = "default_luhn")]
    pub luhn: bool,
}

fn default_luhn() -> bool {
    true
}

/// A single card brand
///
/// Definitions are immutable once built. `pattern` is matched against the
/// digit-only form of a card number; `format`, when present, is applied to
/// the same digits to produce the grouped display form.
#[derive(Debug, Clone)]
pub struct BrandDefinition {
    card_type: String,
    pattern: Regex,
    format: Option<Regex>,
    length: Vec<usize>,
    cvc_length: Vec<usize>,
    luhn: bool,
}

impl BrandDefinition {
    /// Build a definition from its configuration form
    pub fn from_spec(spec: BrandSpec) -> Result<Self, BrandError> {
        if spec.card_type.trim().is_empty() {
            return Err(BrandError::EmptyType);
        }
        if spec.length.is_empty() {
            return Err(BrandError::EmptyLengths(spec.card_type));
        }
        if spec.cvc_length.is_empty() {
            return Err(BrandError::EmptyCvcLengths(spec.card_type));
        }

        let pattern = match Regex::new(&spec.pattern) {
            Ok(re) => re,
            Err(source) => {
                return Err(BrandError::InvalidPattern {
                    card_type: spec.card_type,
                    source,
                })
            }
        };

        let format = match spec.format.as_deref().map(Regex::new).transpose() {
            Ok(re) => re,
            Err(source) => {
                return Err(BrandError::InvalidFormat {
                    card_type: spec.card_type,
                    source,
                })
            }
        };

        Ok(Self {
            card_type: spec.card_type,
            pattern,
            format,
            length: spec.length,
            cvc_length: spec.cvc_length,
            luhn: spec.luhn,
        })
    }

    /// Configuration form of this definition
    pub fn to_spec(&self) -> BrandSpec {
        BrandSpec {
            card_type: self.card_type.clone(),
            pattern: self.pattern.as_str().to_string(),
            format: self.format.as_ref().map(|re| re.as_str().to_string()),
            length: self.length.clone(),
            cvc_length: self.cvc_length.clone(),
            luhn: self.luhn,
        }
    }

    /// Brand identifier, e.g. "visa"
    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Display format, or `None` for the default 4-digit grouping
    pub fn format(&self) -> Option<&Regex> {
        self.format.as_ref()
    }

    pub fn lengths(&self) -> &[usize] {
        &self.length
    }

    pub fn cvc_lengths(&self) -> &[usize] {
        &self.cvc_length
    }

    /// Whether numbers of this brand must pass the Luhn checksum
    pub fn luhn(&self) -> bool {
        self.luhn
    }

    /// Longest accepted number length
    pub fn max_length(&self) -> usize {
        self.length.iter().copied().max().unwrap_or(0)
    }

    /// Check whether a digit-only card number starts like this brand
    pub fn matches(&self, digits: &str) -> bool {
        self.pattern.is_match(digits)
    }

    pub fn accepts_length(&self, length: usize) -> bool {
        self.length.contains(&length)
    }

    pub fn accepts_cvc_length(&self, length: usize) -> bool {
        self.cvc_length.contains(&length)
    }
}

impl TryFrom<BrandSpec> for BrandDefinition {
    type Error = BrandError;

    fn try_from(spec: BrandSpec) -> Result<Self, Self::Error> {
        Self::from_spec(spec)
    }
}

/// Brand identifiers of the default table
pub mod types {
    pub const VISA_ELECTRON: &str = "visaelectron";
    pub const MAESTRO: &str = "maestro";
    pub const FORBRUGSFORENINGEN: &str = "forbrugsforeningen";
    pub const DANKORT: &str = "dankort";
    pub const VISA: &str = "visa";
    pub const MASTERCARD: &str = "mastercard";
    pub const AMEX: &str = "amex";
    pub const DINERS_CLUB: &str = "dinersclub";
    pub const DISCOVER: &str = "discover";
    pub const UNIONPAY: &str = "unionpay";
    pub const JCB: &str = "jcb";
}

struct DefaultBrand {
    card_type: &'static str,
    pattern: &'static str,
    format: Option<&'static str>,
    length: &'static [usize],
    cvc_length: &'static [usize],
    luhn: bool,
}

// Order matters: classification is first match, so sub-brands sit above the
// broader brand that shares their prefix.
const DEFAULT_BRANDS: &[DefaultBrand] = &[
    DefaultBrand {
        card_type: types::VISA_ELECTRON,
        pattern: r"^4(026|17500|405|508|844|91[37])",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::MAESTRO,
        pattern: r"^(5(018|0[23]|[68])|6(39|7))",
        format: None,
        length: &[12, 13, 14, 15, 16, 17, 18, 19],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::FORBRUGSFORENINGEN,
        pattern: r"^600",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::DANKORT,
        pattern: r"^5019",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::VISA,
        pattern: r"^4",
        format: None,
        length: &[13, 16, 19],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::MASTERCARD,
        pattern: r"^(5[1-5]|2[2-7])",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::AMEX,
        pattern: r"^3[47]",
        format: Some(r"(\d{1,4})(\d{1,6})?(\d{1,5})?"),
        length: &[15],
        cvc_length: &[3, 4],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::DINERS_CLUB,
        pattern: r"^3[0689]",
        format: Some(r"(\d{1,4})(\d{1,6})?(\d{1,4})?"),
        length: &[14],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::DISCOVER,
        pattern: r"^6([045]|22)",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
    DefaultBrand {
        card_type: types::UNIONPAY,
        pattern: r"^(62|88)",
        format: None,
        length: &[16, 17, 18, 19],
        cvc_length: &[3],
        luhn: false,
    },
    DefaultBrand {
        card_type: types::JCB,
        pattern: r"^35",
        format: None,
        length: &[16],
        cvc_length: &[3],
        luhn: true,
    },
];

/// Build the default brand table, in classification order
pub fn default_definitions() -> Vec<BrandDefinition> {
    DEFAULT_BRANDS
        .iter()
        .map(|brand| {
            let spec = BrandSpec {
                card_type: brand.card_type.to_string(),
                pattern: brand.pattern.to_string(),
                format: brand.format.map(str::to_string),
                length: brand.length.to_vec(),
                cvc_length: brand.cvc_length.to_vec(),
                luhn: brand.luhn,
            };
            BrandDefinition::from_spec(spec).expect("built-in brand definitions are valid")
        })
        .collect()
}

/// Parse an ordered list of brand definitions from a JSON array
///
/// # Example
/// ```
/// use card_brands::definitions_from_json;
///
/// let json = r#"[
///     {"type": "troy", "pattern": "^9792", "length": [16], "cvcLength": [3]}
/// ]"#;
///
/// let brands = definitions_from_json(json).unwrap();
/// assert_eq!(brands[0].card_type(), "troy");
/// assert!(brands[0].luhn());
/// ```
pub fn definitions_from_json(json: &str) -> Result<Vec<BrandDefinition>, BrandError> {
    let specs: Vec<BrandSpec> = serde_json::from_str(json)?;
    debug!("Loaded {} brand spec(s) from configuration", specs.len());

    let definitions = specs
        .into_iter()
        .map(BrandDefinition::from_spec)
        .collect::<Result<Vec<_>, _>>()?;

    ensure_unique_types(&definitions)?;
    Ok(definitions)
}

/// Reject tables that define the same brand type twice
pub fn ensure_unique_types(definitions: &[BrandDefinition]) -> Result<(), BrandError> {
    for (i, definition) in definitions.iter().enumerate() {
        let duplicate = definitions[..i]
            .iter()
            .any(|earlier| earlier.card_type() == definition.card_type());
        if duplicate {
            warn!("Duplicate brand type '{}' in table", definition.card_type());
            return Err(BrandError::DuplicateType(definition.card_type().to_string()));
        }
    }
    Ok(())
}

/// Look up a brand by its exact type identifier
pub fn find_brand<'a>(definitions: &'a [BrandDefinition], card_type: &str) -> Option<&'a BrandDefinition> {
    definitions.iter().find(|definition| definition.card_type() == card_type)
}
