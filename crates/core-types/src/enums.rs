use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The logged outcome of a trade. Stored in the journal as `Win`, `Loss` or `BE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeResult {
    Win,
    Loss,
    #[serde(rename = "BE")]
    Breakeven,
}

impl TradeResult {
    pub fn is_win(&self) -> bool {
        matches!(self, TradeResult::Win)
    }

    pub fn is_loss(&self) -> bool {
        matches!(self, TradeResult::Loss)
    }
}

impl FromStr for TradeResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Win" => Ok(TradeResult::Win),
            "Loss" => Ok(TradeResult::Loss),
            "BE" => Ok(TradeResult::Breakeven),
            other => Err(CoreError::InvalidInput(
                "result".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeResult::Win => "Win",
            TradeResult::Loss => "Loss",
            TradeResult::Breakeven => "BE",
        };
        f.write_str(label)
    }
}

/// Whether a trade was taken on a live account or logged from a backtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Live,
    Backtest,
}

impl FromStr for TradeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Live" => Ok(TradeType::Live),
            "Backtest" => Ok(TradeType::Backtest),
            other => Err(CoreError::InvalidInput(
                "trade_type".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeType::Live => "Live",
            TradeType::Backtest => "Backtest",
        };
        f.write_str(label)
    }
}

/// Qualitative rating of a trade's entry quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
}

impl SetupGrade {
    /// The journal's display label for the grade.
    pub fn label(&self) -> &'static str {
        match self {
            SetupGrade::APlus => "A+",
            SetupGrade::A => "A",
            SetupGrade::B => "B",
            SetupGrade::C => "C",
        }
    }
}

impl FromStr for SetupGrade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(SetupGrade::APlus),
            "A" => Ok(SetupGrade::A),
            "B" => Ok(SetupGrade::B),
            "C" => Ok(SetupGrade::C),
            other => Err(CoreError::InvalidInput(
                "setup_grade".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for SetupGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_round_trips_wire_labels() {
        for label in ["Win", "Loss", "BE"] {
            let parsed: TradeResult = label.parse().unwrap();
            assert_eq!(parsed.to_string(), label);
        }
        assert!("win".parse::<TradeResult>().is_err());
    }

    #[test]
    fn grade_parses_plus_label() {
        assert_eq!("A+".parse::<SetupGrade>().unwrap(), SetupGrade::APlus);
        assert_eq!(SetupGrade::APlus.label(), "A+");
        assert_eq!(
            serde_json::to_string(&SetupGrade::APlus).unwrap(),
            "\"A+\""
        );
    }
}
