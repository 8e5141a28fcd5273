use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Endangered,
    Vulnerable,
    Threatened,
    Stable,
}

impl Badge {
    pub fn classify(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("endangered") {
            Self::Endangered
        } else if lower.contains("vulnerable") {
            Self::Vulnerable
        } else if lower.contains("threatened") {
            Self::Threatened
        } else {
            Self::Stable
        }
    }

    pub fn is_at_risk(self) -> bool {
        self != Self::Stable
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Endangered => "Endangered",
            Self::Vulnerable => "Vulnerable",
            Self::Threatened => "Threatened",
            Self::Stable => "Stable",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
