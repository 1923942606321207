use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The crude-oil benchmarks the dashboard can plot.
///
/// Ordered so it can key a `BTreeMap` and give reports a stable instrument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Benchmark {
    #[serde(rename = "WTI")]
    Wti,
    Brent,
}

impl Benchmark {
    pub const ALL: [Benchmark; 2] = [Benchmark::Wti, Benchmark::Brent];

    /// The futures ticker the price history is usually exported under.
    pub fn ticker(&self) -> &'static str {
        match self {
            Benchmark::Wti => "CL=F",
            Benchmark::Brent => "BZ=F",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Benchmark::Wti => "WTI Crude",
            Benchmark::Brent => "Brent Crude",
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Benchmark::Wti => f.write_str("WTI"),
            Benchmark::Brent => f.write_str("Brent"),
        }
    }
}

impl FromStr for Benchmark {
    type Err = CoreError;

    /// Accepts the short name, the display name or the ticker, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Benchmark::ALL
            .into_iter()
            .find(|b| {
                needle.eq_ignore_ascii_case(&b.to_string())
                    || needle.eq_ignore_ascii_case(b.display_name())
                    || needle.eq_ignore_ascii_case(b.ticker())
            })
            .ok_or_else(|| CoreError::UnknownBenchmark(s.to_string()))
    }
}

/// The tag attached to every annotated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventCategory {
    Conflict,
    Economic,
    #[serde(rename = "Policy/OPEC")]
    PolicyOpec,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [
        EventCategory::Conflict,
        EventCategory::Economic,
        EventCategory::PolicyOpec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Conflict => "Conflict",
            EventCategory::Economic => "Economic",
            EventCategory::PolicyOpec => "Policy/OPEC",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EventCategory::ALL
            .into_iter()
            .find(|c| {
                needle.eq_ignore_ascii_case(c.as_str())
                    || (*c == EventCategory::PolicyOpec
                        && (needle.eq_ignore_ascii_case("policy-opec")
                            || needle.eq_ignore_ascii_case("opec")))
            })
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_parses_names_and_tickers() {
        assert_eq!("wti".parse::<Benchmark>().unwrap(), Benchmark::Wti);
        assert_eq!("Brent Crude".parse::<Benchmark>().unwrap(), Benchmark::Brent);
        assert_eq!("bz=f".parse::<Benchmark>().unwrap(), Benchmark::Brent);
        assert!(matches!(
            "dubai".parse::<Benchmark>(),
            Err(CoreError::UnknownBenchmark(_))
        ));
    }

    #[test]
    fn category_round_trips_through_its_label() {
        for category in EventCategory::ALL {
            assert_eq!(category.as_str().parse::<EventCategory>().unwrap(), category);
        }
        assert_eq!("opec".parse::<EventCategory>().unwrap(), EventCategory::PolicyOpec);
    }

    #[test]
    fn serde_uses_dashboard_labels() {
        let json = serde_json::to_string(&EventCategory::PolicyOpec).unwrap();
        assert_eq!(json, "\"Policy/OPEC\"");
        let json = serde_json::to_string(&Benchmark::Wti).unwrap();
        assert_eq!(json, "\"WTI\"");
    }
}
