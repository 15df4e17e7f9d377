//! Equipment recommendation
//!
//! Maps the selected use-case to a type filter and an optional minimum SPL
//! through [`POLICY_TABLE`], then filters the catalog, truncates to the
//! number of speaker positions and compares the total price with the
//! budget.
//!
//! SPL filtering only runs when the catalog carries a `Max SPL (dB)` column
//! and the policy defines a threshold. In that case rows whose SPL cell is
//! missing or not a number are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{display_columns, Catalog, ProductRecord};

/// Type filter of the custom selection when no speaker type was chosen
pub const DEFAULT_CUSTOM_TYPE: &str = "Full-range";

/// Operational purpose of the audio system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseCase {
    #[serde(rename = "General purpose")]
    GeneralPurpose,
    #[serde(rename = "Background music")]
    BackgroundMusic,
    #[serde(rename = "Speech")]
    Speech,
    #[serde(rename = "Live music")]
    LiveMusic,
    #[serde(rename = "DJ / party")]
    DjParty,
    #[serde(rename = "Multi-zone paging")]
    MultiZonePaging,
}

impl UseCase {
    pub fn display_name(&self) -> &'static str {
        match self {
            UseCase::GeneralPurpose => "General purpose",
            UseCase::BackgroundMusic => "Background music",
            UseCase::Speech => "Speech",
            UseCase::LiveMusic => "Live music",
            UseCase::DjParty => "DJ / party",
            UseCase::MultiZonePaging => "Multi-zone paging",
        }
    }

    /// Parse a use-case name
    ///
    /// Accepts the display name and a few spellings seen in form posts
    /// ("background_music", "dj", "paging"). Case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();

        match normalized.as_str() {
            "general purpose" | "general" => Some(UseCase::GeneralPurpose),
            "background music" | "background" | "bgm" => Some(UseCase::BackgroundMusic),
            "speech" => Some(UseCase::Speech),
            "live music" | "live" => Some(UseCase::LiveMusic),
            "dj / party" | "dj/party" | "dj party" | "dj" | "party" => Some(UseCase::DjParty),
            "multi zone paging" | "paging" => Some(UseCase::MultiZonePaging),
            _ => None,
        }
    }

    /// All use-cases, in form order
    pub fn all_variants() -> &'static [UseCase] {
        &[
            UseCase::GeneralPurpose,
            UseCase::BackgroundMusic,
            UseCase::Speech,
            UseCase::LiveMusic,
            UseCase::DjParty,
            UseCase::MultiZonePaging,
        ]
    }
}

impl Default for UseCase {
    fn default() -> Self {
        UseCase::GeneralPurpose
    }
}

impl std::fmt::Display for UseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the speakers are mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    Ceiling,
    Wall,
}

impl MountType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ceiling" => Some(MountType::Ceiling),
            "wall" => Some(MountType::Wall),
            _ => None,
        }
    }

    pub fn all_variants() -> &'static [MountType] {
        &[MountType::Ceiling, MountType::Wall]
    }
}

/// Use-case chosen on the form
///
/// `Custom` is the explicit fallback for anything outside the policy table:
/// the user's own speaker type, or [`DEFAULT_CUSTOM_TYPE`] when none was
/// given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UseCaseSelection {
    Known { use_case: UseCase },
    Custom { speaker_type: Option<String> },
}

impl UseCaseSelection {
    /// Resolve a free-form use-case name
    ///
    /// Unrecognized names become `Custom` carrying `speaker_type`.
    pub fn resolve(use_case: &str, speaker_type: Option<String>) -> Self {
        match UseCase::from_str(use_case) {
            Some(use_case) => UseCaseSelection::Known { use_case },
            None => UseCaseSelection::Custom {
                speaker_type: speaker_type
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
            },
        }
    }

    /// Display label ("Speech", "Custom (Subwoofer)")
    pub fn label(&self) -> String {
        match self {
            UseCaseSelection::Known { use_case } => use_case.display_name().to_string(),
            UseCaseSelection::Custom { speaker_type } => format!(
                "Custom ({})",
                speaker_type.as_deref().unwrap_or(DEFAULT_CUSTOM_TYPE)
            ),
        }
    }
}

impl Default for UseCaseSelection {
    fn default() -> Self {
        UseCaseSelection::Known {
            use_case: UseCase::default(),
        }
    }
}

/// One row of the use-case policy table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyEntry {
    pub use_case: UseCase,
    /// Type substrings, OR-combined
    pub type_patterns: &'static [&'static str],
    /// Replacement patterns when the selected mount type matches
    pub mount_override: Option<(MountType, &'static [&'static str])>,
    pub min_spl_db: Option<f64>,
}

const CEILING_ONLY: &[&str] = &["Ceiling"];

/// Use-case to filter policy
pub const POLICY_TABLE: &[PolicyEntry] = &[
    PolicyEntry {
        use_case: UseCase::GeneralPurpose,
        type_patterns: &["Full-range", "Ceiling", "Line Array"],
        mount_override: None,
        min_spl_db: None,
    },
    PolicyEntry {
        use_case: UseCase::BackgroundMusic,
        type_patterns: &["Wall"],
        mount_override: Some((MountType::Ceiling, CEILING_ONLY)),
        min_spl_db: Some(85.0),
    },
    PolicyEntry {
        use_case: UseCase::Speech,
        type_patterns: &["Full-range"],
        mount_override: None,
        min_spl_db: Some(90.0),
    },
    PolicyEntry {
        use_case: UseCase::LiveMusic,
        type_patterns: &["Full-range", "Line Array"],
        mount_override: None,
        min_spl_db: Some(100.0),
    },
    PolicyEntry {
        use_case: UseCase::DjParty,
        type_patterns: &["Line Array", "Subwoofer"],
        mount_override: None,
        min_spl_db: Some(105.0),
    },
    PolicyEntry {
        use_case: UseCase::MultiZonePaging,
        type_patterns: &["Ceiling", "Paging"],
        mount_override: None,
        min_spl_db: Some(85.0),
    },
];

/// Look up the policy table entry for `use_case`
pub fn policy_entry(use_case: UseCase) -> Option<&'static PolicyEntry> {
    POLICY_TABLE.iter().find(|entry| entry.use_case == use_case)
}

/// Filter derived from a selection: patterns plus optional SPL threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPolicy {
    pub type_patterns: Vec<String>,
    pub min_spl_db: Option<f64>,
}

impl FilterPolicy {
    /// Derive the filter for a selection and optional mount type
    pub fn for_selection(selection: &UseCaseSelection, mount: Option<MountType>) -> Self {
        match selection {
            UseCaseSelection::Known { use_case } => match policy_entry(*use_case) {
                Some(entry) => {
                    let patterns = match entry.mount_override {
                        Some((override_mount, patterns)) if mount == Some(override_mount) => {
                            patterns
                        }
                        _ => entry.type_patterns,
                    };
                    Self {
                        type_patterns: patterns.iter().map(|p| p.to_string()).collect(),
                        min_spl_db: entry.min_spl_db,
                    }
                }
                None => Self::custom(None),
            },
            UseCaseSelection::Custom { speaker_type } => Self::custom(speaker_type.as_deref()),
        }
    }

    fn custom(speaker_type: Option<&str>) -> Self {
        Self {
            type_patterns: vec![speaker_type.unwrap_or(DEFAULT_CUSTOM_TYPE).to_string()],
            min_spl_db: None,
        }
    }

    /// Whether `record`'s Type contains any of the patterns
    pub fn matches_type(&self, record: &ProductRecord) -> bool {
        self.type_patterns.iter().any(|p| record.type_contains(p))
    }
}

/// One recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub selection: UseCaseSelection,
    pub mount: Option<MountType>,
    /// Maximum number of products to retain (the speaker count)
    pub item_count: usize,
}

/// Filtered, budget-compared catalog subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub products: Vec<ProductRecord>,
    pub total_cost: f64,
    pub budget: u64,
    pub within_budget: bool,
    pub filter: FilterPolicy,
    /// True when the SPL threshold was actually applied
    pub spl_filter_applied: bool,
    /// Whether the source catalog had an SPL column (drives display columns)
    pub has_spl_column: bool,
}

impl RecommendationResult {
    pub fn columns(&self) -> Vec<String> {
        display_columns(self.has_spl_column)
    }

    /// Product rows in [`Self::columns`] order
    pub fn rows(&self) -> Vec<Vec<serde_json::Value>> {
        self.products
            .iter()
            .map(|p| p.to_row(self.has_spl_column))
            .collect()
    }

    /// Budget verdict line
    pub fn budget_message(&self) -> &'static str {
        if self.within_budget {
            "Estimated cost is within budget."
        } else {
            "Your estimated cost is higher than your budget."
        }
    }
}

/// Whether `total_cost` fits in `budget` (boundary inclusive)
pub fn is_within_budget(total_cost: f64, budget: u64) -> bool {
    total_cost <= budget as f64
}

/// Recommend products from `catalog`
///
/// Rows keep their catalog order. The result is truncated once, to
/// `query.item_count` rows, after type and SPL filtering.
pub fn recommend(catalog: &Catalog, query: &RecommendationQuery, budget: u64) -> RecommendationResult {
    let filter = FilterPolicy::for_selection(&query.selection, query.mount);
    let spl_threshold = filter.min_spl_db.filter(|_| catalog.has_spl_column());

    let products: Vec<ProductRecord> = catalog
        .records()
        .iter()
        .filter(|record| filter.matches_type(record))
        .filter(|record| match spl_threshold {
            Some(min) => record.max_spl().map_or(false, |spl| spl >= min),
            None => true,
        })
        .take(query.item_count)
        .cloned()
        .collect();

    let total_cost = products.iter().fold(0.0, |acc, p| acc + p.price_thb);
    let within_budget = is_within_budget(total_cost, budget);

    debug!(
        "Recommendation: patterns {:?}, min SPL {:?} (applied: {}), {} of {} rows kept, total {} vs budget {}",
        filter.type_patterns,
        filter.min_spl_db,
        spl_threshold.is_some(),
        products.len(),
        catalog.len(),
        total_cost,
        budget
    );

    RecommendationResult {
        products,
        total_cost,
        budget,
        within_budget,
        filter,
        spl_filter_applied: spl_threshold.is_some(),
        has_spl_column: catalog.has_spl_column(),
    }
}

/// Format an amount with thousands separators and no decimals
///
/// # Examples
/// ```
/// use aasd_common::recommend::format_thb;
///
/// assert_eq!(format_thb(100000.0), "100,000 THB");
/// assert_eq!(format_thb(0.0), "0 THB");
/// ```
pub fn format_thb(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{} THB", grouped)
    } else {
        format!("{} THB", grouped)
    }
}
