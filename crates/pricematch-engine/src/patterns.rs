//! Ordered pattern tables used by [`crate::extract`].
//!
//! All patterns run against the lowercased title. Order is significant:
//! within each table the first matching entry wins, so adding a brand or
//! product line means adding a row, never a new branch.

use pricematch_core::{Brand, CpuFamily};

/// Brand name or well-known sub-brand / product-line alias.
pub(crate) const BRAND_PATTERNS: &[(Brand, &str)] = &[
    (Brand::Hp, r"\bhp\b|hewlett"),
    (Brand::Dell, r"\bdell\b"),
    (Brand::Lenovo, r"\blenovo\b|thinkpad|ideapad|\byoga\b"),
    (Brand::Apple, r"\bapple\b|macbook|imac"),
    (Brand::Microsoft, r"\bmicrosoft\b|surface"),
    (Brand::Asus, r"\basus\b|zenbook|vivobook|\brog\b"),
    (Brand::Acer, r"\bacer\b|aspire|predator"),
    (Brand::Samsung, r"\bsamsung\b|galaxy\s?book"),
    (Brand::Toshiba, r"\btoshiba\b|portege|satellite"),
];

/// CPU families in priority order. Titles often carry several CPU-looking
/// tokens ("Intel Celeron ... dual-core"); the first row that matches decides.
pub(crate) const CPU_PATTERNS: &[(CpuFamily, &str)] = &[
    (CpuFamily::IntelCore, r"\bi[3579](?:\b|-\d)|core"),
    (CpuFamily::AmdRyzen, r"ryzen"),
    (CpuFamily::AppleSilicon, r"\bm[1-5]\b|apple silicon"),
    (CpuFamily::IntelCeleron, r"celeron"),
    (CpuFamily::IntelPentium, r"pentium"),
];

/// Product-line keyword followed by the model code, per brand. The last
/// non-empty capture group is the model token.
pub(crate) const MODEL_PATTERNS: &[(Brand, &[&str])] = &[
    (
        Brand::Hp,
        &[
            r"elitebook\s*([a-z0-9]+)",
            r"probook\s*([a-z0-9]+)",
            r"pavilion\s*([a-z0-9]+)",
            r"envy\s*([a-z0-9]+)",
            r"zbook\s*([a-z0-9]+)",
        ],
    ),
    (
        Brand::Dell,
        &[
            r"latitude\s*([a-z0-9]+)",
            r"inspiron\s*([a-z0-9]+)",
            r"xps\s*([a-z0-9]+)",
            r"vostro\s*([a-z0-9]+)",
            r"precision\s*([a-z0-9]+)",
        ],
    ),
    (
        Brand::Lenovo,
        &[
            r"thinkpad\s*([a-z]+\d+[a-z0-9]*)",
            r"ideapad\s*([a-z]+\d+[a-z0-9]*)",
            r"yoga\s*([a-z]+\d+[a-z0-9]*)",
            r"thinkbook\s*([a-z0-9]+)",
        ],
    ),
    (
        Brand::Asus,
        &[
            r"zenbook\s*([a-z0-9-]+)",
            r"vivobook\s*([a-z0-9-]+)",
            r"rog\s*([a-z0-9-]+)",
        ],
    ),
    (
        Brand::Apple,
        &[r"macbook\s*(air|pro)?\s*(\d+(?:\.\d+)?)?"],
    ),
    (
        Brand::Microsoft,
        &[r"surface\s*(pro|laptop|go)?\s*(\d+)?"],
    ),
    (
        Brand::Acer,
        &[
            r"aspire\s*([a-z0-9]+)",
            r"swift\s*([a-z0-9]+)",
            r"nitro\s*([a-z0-9]+)",
            r"predator\s*([a-z0-9]+)",
        ],
    ),
];

/// Letters followed by 2–6 digits and optional trailing alphanumerics,
/// e.g. `t480`, `a515`, `x1390s`.
pub(crate) const GENERIC_MODEL_PATTERN: &str = r"\b[a-z]{1,6}\d{2,6}[a-z0-9]{0,4}\b";

/// A GB mention explicitly qualified as memory.
pub(crate) const RAM_QUALIFIED_PATTERN: &str =
    r"\b(\d+)\s*(?:gb|g\s*b|gigabytes?)\s*(?:of\s+)?(?:ram|memory|unified\s+memory|(?:lp)?ddr\d?x?)\b";

/// Any GB mention; group 2 is set when the mention is qualified as storage.
pub(crate) const RAM_ANY_PATTERN: &str =
    r"\b(\d+)\s*(?:gb|g\s*b|gigabytes?)\b(\s*(?:ssd|hdd|emmc|nvme|storage|rom))?";

/// A GB/TB mention explicitly qualified as storage.
pub(crate) const STORAGE_QUALIFIED_PATTERN: &str =
    r"\b(\d+)\s*(tb|gb)\s*(?:ssd|hdd|emmc|nvme|storage)";

/// Any GB/TB mention; group 3 is set when the mention is qualified as memory.
pub(crate) const STORAGE_ANY_PATTERN: &str =
    r"\b(\d+)\s*(tb|gb)\b(\s*(?:ram|memory|(?:lp)?ddr\d?x?)\b)?";

pub(crate) const SCREEN_PATTERN: &str =
    r#"\b(\d+(?:\.\d+)?)\s*-?\s*(?:"|”|''|inch(?:es)?\b)"#;

pub(crate) const SSD_PATTERN: &str = r"\bssd\b";

pub(crate) const BUSINESS_LINE_PATTERN: &str = r"elitebook|thinkpad|latitude|probook";
