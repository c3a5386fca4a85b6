//! Structured attributes derived from a free-text listing title.
//!
//! Every field has a sentinel meaning "not determined": `UNKNOWN` for the
//! categorical fields and `0` for the numeric ones. Extraction never fails;
//! a title with no recognizable signal yields [`ExtractedSpec::default`].

use serde::{Deserialize, Serialize};

/// Sentinel label for categorical fields that could not be determined.
pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Brand {
    Hp,
    Dell,
    Lenovo,
    Apple,
    Microsoft,
    Asus,
    Acer,
    Samsung,
    Toshiba,
    #[default]
    Unknown,
}

impl Brand {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Brand::Hp => "HP",
            Brand::Dell => "DELL",
            Brand::Lenovo => "LENOVO",
            Brand::Apple => "APPLE",
            Brand::Microsoft => "MICROSOFT",
            Brand::Asus => "ASUS",
            Brand::Acer => "ACER",
            Brand::Samsung => "SAMSUNG",
            Brand::Toshiba => "TOSHIBA",
            Brand::Unknown => UNKNOWN,
        }
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == Brand::Unknown
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CpuFamily {
    IntelCore,
    AmdRyzen,
    AppleSilicon,
    IntelCeleron,
    IntelPentium,
    #[default]
    Unknown,
}

impl CpuFamily {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CpuFamily::IntelCore => "INTEL_CORE",
            CpuFamily::AmdRyzen => "AMD_RYZEN",
            CpuFamily::AppleSilicon => "APPLE_SILICON",
            CpuFamily::IntelCeleron => "INTEL_CELERON",
            CpuFamily::IntelPentium => "INTEL_PENTIUM",
            CpuFamily::Unknown => UNKNOWN,
        }
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == CpuFamily::Unknown
    }
}

impl std::fmt::Display for CpuFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes extracted from a listing title.
///
/// Serialized field names follow the standardized dataset columns
/// (`model`, `cpu_type`, `screen_size_inches`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSpec {
    pub brand: Brand,
    #[serde(rename = "cpu_type")]
    pub cpu_family: CpuFamily,
    /// Memory size in GB; `0` when the title does not state it.
    pub ram_gb: u32,
    /// Storage size normalized to GB (`1TB` → `1024`); `0` when undetermined.
    pub storage_value: u32,
    /// Screen diagonal in inches; `0.0` when undetermined.
    #[serde(rename = "screen_size_inches")]
    pub screen_inches: f64,
    /// Uppercase alphanumeric product-line token, or `UNKNOWN`.
    #[serde(rename = "model")]
    pub model_token: String,
}

impl Default for ExtractedSpec {
    fn default() -> Self {
        Self {
            brand: Brand::Unknown,
            cpu_family: CpuFamily::Unknown,
            ram_gb: 0,
            storage_value: 0,
            screen_inches: 0.0,
            model_token: UNKNOWN.to_string(),
        }
    }
}

impl ExtractedSpec {
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model_token != UNKNOWN
    }

    /// `true` when the title yielded neither a memory size nor a CPU family,
    /// so brand and model alone are too thin to trust for exact matching.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.ram_gb == 0 && self.cpu_family.is_unknown()
    }

    /// `false` when every field is still at its sentinel.
    #[must_use]
    pub fn has_signal(&self) -> bool {
        !self.brand.is_unknown()
            || !self.cpu_family.is_unknown()
            || self.has_model()
            || self.ram_gb > 0
            || self.storage_value > 0
            || self.screen_inches > 0.0
    }

    /// `"BRAND MODEL"`, e.g. `"DELL 5420"`.
    #[must_use]
    pub fn normalized_model(&self) -> String {
        format!("{} {}", self.brand, self.model_token.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_uses_sentinels() {
        let spec = ExtractedSpec::default();
        assert_eq!(spec.brand, Brand::Unknown);
        assert_eq!(spec.cpu_family, CpuFamily::Unknown);
        assert_eq!(spec.ram_gb, 0);
        assert_eq!(spec.storage_value, 0);
        assert!(spec.screen_inches.abs() < f64::EPSILON);
        assert_eq!(spec.model_token, "UNKNOWN");
        assert!(!spec.has_model());
        assert!(spec.is_weak());
        assert!(!spec.has_signal());
    }

    #[test]
    fn any_single_attribute_is_a_signal() {
        let storage_only = ExtractedSpec {
            storage_value: 256,
            ..ExtractedSpec::default()
        };
        assert!(storage_only.has_signal());

        let screen_only = ExtractedSpec {
            screen_inches: 15.6,
            ..ExtractedSpec::default()
        };
        assert!(screen_only.has_signal());
    }

    #[test]
    fn brand_serializes_as_screaming_label() {
        let json = serde_json::to_string(&Brand::Microsoft).unwrap();
        assert_eq!(json, "\"MICROSOFT\"");
        assert_eq!(Brand::Microsoft.as_str(), "MICROSOFT");
    }

    #[test]
    fn cpu_family_serializes_as_screaming_label() {
        let json = serde_json::to_string(&CpuFamily::AppleSilicon).unwrap();
        assert_eq!(json, "\"APPLE_SILICON\"");
        assert_eq!(CpuFamily::AppleSilicon.to_string(), "APPLE_SILICON");
    }

    #[test]
    fn spec_serializes_with_dataset_column_names() {
        let spec = ExtractedSpec {
            brand: Brand::Dell,
            cpu_family: CpuFamily::IntelCore,
            ram_gb: 16,
            storage_value: 512,
            screen_inches: 14.0,
            model_token: "5420".to_string(),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["brand"], "DELL");
        assert_eq!(value["cpu_type"], "INTEL_CORE");
        assert_eq!(value["model"], "5420");
        assert_eq!(value["storage_value"], 512);
        assert_eq!(value["screen_size_inches"], 14.0);
    }

    #[test]
    fn normalized_model_joins_brand_and_model() {
        let spec = ExtractedSpec {
            brand: Brand::Hp,
            model_token: "840".to_string(),
            ..ExtractedSpec::default()
        };
        assert_eq!(spec.normalized_model(), "HP 840");
    }

    #[test]
    fn spec_with_ram_is_not_weak() {
        let spec = ExtractedSpec {
            ram_gb: 8,
            ..ExtractedSpec::default()
        };
        assert!(!spec.is_weak());
    }
}
