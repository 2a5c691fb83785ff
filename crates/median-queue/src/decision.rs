use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The call made for one observation: the window median measured against
/// the value that just arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    /// `Hold` when the median equals the latest value, `Sell` when the
    /// median is strictly above it, `Buy` otherwise.
    pub fn classify<T: Ord>(median: &T, last: &T) -> Self {
        match median.cmp(last) {
            std::cmp::Ordering::Equal => Decision::Hold,
            std::cmp::Ordering::Greater => Decision::Sell,
            std::cmp::Ordering::Less => Decision::Buy,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Decision::Buy => "buy",
            Decision::Sell => "sell",
            Decision::Hold => "hold",
        };
        write!(f, "{token}")
    }
}

#[cfg(test)]
mod tests {
    use super::Decision;

    #[test]
    fn test_classify() {
        assert_eq!(Decision::classify(&2, &3), Decision::Buy);
        assert_eq!(Decision::classify(&4, &3), Decision::Sell);
        assert_eq!(Decision::classify(&3, &3), Decision::Hold);
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Decision::Buy.to_string(), "buy");
        assert_eq!(Decision::Sell.to_string(), "sell");
        assert_eq!(Decision::Hold.to_string(), "hold");
    }
}
