// src/app/types.rs
use super::data::MovieRecord;
use super::utils::decade_of;

// ---- runtime buckets ----
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuntimeBucket {
    Short,
    Medium,
    Long,
    Unknown,
}

impl RuntimeBucket {
    /// <90 short, 90..=120 medium, >120 long.
    pub const fn of(runtime_minutes: Option<u32>) -> Self {
        match runtime_minutes {
            None => Self::Unknown,
            Some(m) if m < 90 => Self::Short,
            Some(m) if m <= 120 => Self::Medium,
            Some(_) => Self::Long,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "Short (<90 min)",
            Self::Medium => "Medium (90–120)",
            Self::Long => "Long (>120)",
            Self::Unknown => "Unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" | "short (<90 min)" => Some(Self::Short),
            "medium" | "medium (90–120)" | "medium (90-120)" => Some(Self::Medium),
            "long" | "long (>120)" => Some(Self::Long),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

// ---- filter controls ----
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecadeFilter {
    #[default]
    All,
    /// Start year of the decade, e.g. 1990 for "1990s".
    Decade(i32),
    Unknown,
}

impl DecadeFilter {
    /// Choices offered to the user.
    pub const CHOICES: [&'static str; 7] =
        ["All", "1980s", "1990s", "2000s", "2010s", "2020s", "Unknown"];

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        if s.eq_ignore_ascii_case("unknown") {
            return Some(Self::Unknown);
        }
        let digits = s.strip_suffix('s')?;
        let start = digits.parse::<i32>().ok()?;
        (digits.len() == 4 && start % 10 == 0).then_some(Self::Decade(start))
    }

    pub fn as_label(self) -> String {
        match self {
            Self::All => "All".into(),
            Self::Decade(start) => format!("{start}s"),
            Self::Unknown => "Unknown".into(),
        }
    }

    pub fn matches(self, movie: &MovieRecord) -> bool {
        match self {
            Self::All => true,
            Self::Decade(start) => decade_of(&movie.release_year) == Some(start),
            Self::Unknown => decade_of(&movie.release_year).is_none(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuntimeFilter {
    #[default]
    All,
    Only(RuntimeBucket),
}

impl RuntimeFilter {
    pub const CHOICES: [&'static str; 5] = ["All", "Short", "Medium", "Long", "Unknown"];

    pub fn from_str(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        RuntimeBucket::from_str(s).map(Self::Only)
    }

    pub fn matches(self, movie: &MovieRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(bucket) => RuntimeBucket::of(movie.runtime_minutes) == bucket,
        }
    }
}

/// Everything the presentation side can ask for in one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub decade: DecadeFilter,
    pub runtime: RuntimeFilter,
    pub recent_only: bool,
    pub surprise: bool,
}

/// Output of one render pass.
#[derive(Clone, Debug, Default)]
pub struct RenderPass {
    /// Every catalog title that resolved, in catalog order.
    pub enriched: Vec<MovieRecord>,
    /// Filtered (and possibly recency-truncated) view.
    pub shown: Vec<MovieRecord>,
    /// Random picks drawn from `shown` when a surprise was requested.
    pub surprise: Option<Vec<MovieRecord>>,
    /// Catalog titles that produced no record.
    pub not_found: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_boundaries() {
        assert_eq!(RuntimeBucket::of(Some(89)), RuntimeBucket::Short);
        assert_eq!(RuntimeBucket::of(Some(90)), RuntimeBucket::Medium);
        assert_eq!(RuntimeBucket::of(Some(120)), RuntimeBucket::Medium);
        assert_eq!(RuntimeBucket::of(Some(121)), RuntimeBucket::Long);
        assert_eq!(RuntimeBucket::of(None), RuntimeBucket::Unknown);
    }

    #[test]
    fn decade_filter_parsing() {
        assert_eq!(DecadeFilter::from_str("All"), Some(DecadeFilter::All));
        assert_eq!(DecadeFilter::from_str("1990s"), Some(DecadeFilter::Decade(1990)));
        assert_eq!(DecadeFilter::from_str("Unknown"), Some(DecadeFilter::Unknown));
        assert_eq!(DecadeFilter::from_str("1995s"), None);
        assert_eq!(DecadeFilter::from_str("90s"), None);
        for label in DecadeFilter::CHOICES {
            let parsed = DecadeFilter::from_str(label).unwrap();
            assert_eq!(parsed.as_label(), label);
        }
    }

    #[test]
    fn runtime_filter_accepts_ui_labels() {
        assert_eq!(RuntimeFilter::from_str("All"), Some(RuntimeFilter::All));
        assert_eq!(
            RuntimeFilter::from_str("Short (<90 min)"),
            Some(RuntimeFilter::Only(RuntimeBucket::Short))
        );
        assert_eq!(
            RuntimeFilter::from_str("medium"),
            Some(RuntimeFilter::Only(RuntimeBucket::Medium))
        );
        assert_eq!(RuntimeFilter::from_str("epic"), None);
    }

    #[test]
    fn every_runtime_choice_parses() {
        let parsed: Vec<_> = RuntimeFilter::CHOICES
            .iter()
            .map(|c| RuntimeFilter::from_str(c))
            .collect();
        assert_eq!(
            parsed,
            [
                Some(RuntimeFilter::All),
                Some(RuntimeFilter::Only(RuntimeBucket::Short)),
                Some(RuntimeFilter::Only(RuntimeBucket::Medium)),
                Some(RuntimeFilter::Only(RuntimeBucket::Long)),
                Some(RuntimeFilter::Only(RuntimeBucket::Unknown)),
            ]
        );
    }
}
