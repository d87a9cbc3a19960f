//! Aggregators and binary operators used by the tensor functions

use std::fmt;
use std::str::FromStr;
use tensa_core::{TensorError, TensorResult};

/// Reduction combinator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aggregator {
    /// Sum of the values, 0 when empty
    Sum,
    /// Product of the values, 1 when empty
    Prod,
    /// Number of contributing cells
    Count,
    /// Largest value, undefined when empty
    Max,
    /// Smallest value, undefined when empty
    Min,
    /// Mean value, undefined when empty
    Avg,
}

impl Aggregator {
    pub const ALL: [Aggregator; 6] = [
        Aggregator::Sum,
        Aggregator::Prod,
        Aggregator::Count,
        Aggregator::Max,
        Aggregator::Min,
        Aggregator::Avg,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Sum => "sum",
            Aggregator::Prod => "prod",
            Aggregator::Count => "count",
            Aggregator::Max => "max",
            Aggregator::Min => "min",
            Aggregator::Avg => "avg",
        }
    }

    /// A fresh accumulator for this aggregator
    pub fn accumulator(self) -> Accumulator {
        Accumulator::new(self)
    }

    /// Aggregate a sequence of values
    pub fn aggregate<I: IntoIterator<Item = f64>>(self, values: I) -> Option<f64> {
        let mut accumulator = self.accumulator();
        for value in values {
            accumulator.add(value);
        }
        accumulator.finish()
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregator {
    type Err = TensorError;

    fn from_str(s: &str) -> TensorResult<Self> {
        Aggregator::ALL
            .into_iter()
            .find(|a| a.name() == s.trim())
            .ok_or_else(|| TensorError::invalid_argument(format!("unknown aggregator '{}'", s)))
    }
}

/// Running state of one aggregation
#[derive(Clone, Debug)]
pub struct Accumulator {
    aggregator: Aggregator,
    value: f64,
    count: usize,
}

impl Accumulator {
    pub fn new(aggregator: Aggregator) -> Self {
        let value = match aggregator {
            Aggregator::Prod => 1.0,
            Aggregator::Max => f64::NEG_INFINITY,
            Aggregator::Min => f64::INFINITY,
            _ => 0.0,
        };
        Self {
            aggregator,
            value,
            count: 0,
        }
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        match self.aggregator {
            Aggregator::Sum | Aggregator::Avg => self.value += value,
            Aggregator::Prod => self.value *= value,
            Aggregator::Count => {}
            Aggregator::Max => self.value = self.value.max(value),
            Aggregator::Min => self.value = self.value.min(value),
        }
    }

    /// Number of values added so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// The aggregate, `None` when it is undefined for no values
    pub fn finish(&self) -> Option<f64> {
        match self.aggregator {
            Aggregator::Sum | Aggregator::Prod => Some(self.value),
            Aggregator::Count => Some(self.count as f64),
            Aggregator::Max | Aggregator::Min if self.count == 0 => None,
            Aggregator::Max | Aggregator::Min => Some(self.value),
            Aggregator::Avg if self.count == 0 => None,
            Aggregator::Avg => Some(self.value / self.count as f64),
        }
    }
}

/// Binary cell operators offered as join shortcuts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// x + y
    Add,
    /// x - y
    Sub,
    /// x * y
    Mul,
    /// x / y
    Div,
    /// x if x > y else y; NaN in x yields y, NaN in y yields NaN
    Maximum,
    /// x if x < y else y; NaN in x yields y, NaN in y yields NaN
    Minimum,
    /// atan2(x, y)
    Atan2,
    /// 1 if x > y else 0
    Larger,
    /// 1 if x >= y else 0
    LargerOrEqual,
    /// 1 if x < y else 0
    Smaller,
    /// 1 if x <= y else 0
    SmallerOrEqual,
    /// 1 if x == y else 0
    Equal,
    /// 1 if x != y else 0
    NotEqual,
}

impl BinaryOp {
    #[inline]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        let truth = |b: bool| if b { 1.0 } else { 0.0 };
        match self {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            BinaryOp::Mul => x * y,
            BinaryOp::Div => x / y,
            BinaryOp::Maximum => {
                if x > y {
                    x
                } else {
                    y
                }
            }
            BinaryOp::Minimum => {
                if x < y {
                    x
                } else {
                    y
                }
            }
            BinaryOp::Atan2 => x.atan2(y),
            BinaryOp::Larger => truth(x > y),
            BinaryOp::LargerOrEqual => truth(x >= y),
            BinaryOp::Smaller => truth(x < y),
            BinaryOp::SmallerOrEqual => truth(x <= y),
            BinaryOp::Equal => truth(x == y),
            BinaryOp::NotEqual => truth(x != y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregator_names_roundtrip() {
        for aggregator in Aggregator::ALL {
            assert_eq!(aggregator.to_string().parse::<Aggregator>().unwrap(), aggregator);
        }
        assert!(matches!(
            "median".parse::<Aggregator>(),
            Err(TensorError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_aggregates() {
        let none = std::iter::empty::<f64>;
        assert_eq!(Aggregator::Sum.aggregate(none()), Some(0.0));
        assert_eq!(Aggregator::Prod.aggregate(none()), Some(1.0));
        assert_eq!(Aggregator::Count.aggregate(none()), Some(0.0));
        assert_eq!(Aggregator::Max.aggregate(none()), None);
        assert_eq!(Aggregator::Min.aggregate(none()), None);
        assert_eq!(Aggregator::Avg.aggregate(none()), None);
    }

    #[test]
    fn test_aggregates() {
        let values = [2.0, -1.0, 5.0];
        assert_eq!(Aggregator::Sum.aggregate(values), Some(6.0));
        assert_eq!(Aggregator::Prod.aggregate(values), Some(-10.0));
        assert_eq!(Aggregator::Count.aggregate(values), Some(3.0));
        assert_eq!(Aggregator::Max.aggregate(values), Some(5.0));
        assert_eq!(Aggregator::Min.aggregate(values), Some(-1.0));
        assert_eq!(Aggregator::Avg.aggregate(values), Some(2.0));
    }

    #[test]
    fn test_maximum_and_minimum_with_nan() {
        assert_eq!(BinaryOp::Maximum.apply(3.0, 2.0), 3.0);
        assert_eq!(BinaryOp::Minimum.apply(3.0, 2.0), 2.0);
        assert_eq!(BinaryOp::Maximum.apply(f64::NAN, 2.0), 2.0);
        assert!(BinaryOp::Maximum.apply(2.0, f64::NAN).is_nan());
        assert_eq!(BinaryOp::Minimum.apply(f64::NAN, 2.0), 2.0);
        assert!(BinaryOp::Minimum.apply(2.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_comparison_ops_yield_indicators() {
        assert_eq!(BinaryOp::Larger.apply(2.0, 1.0), 1.0);
        assert_eq!(BinaryOp::Larger.apply(1.0, 1.0), 0.0);
        assert_eq!(BinaryOp::LargerOrEqual.apply(1.0, 1.0), 1.0);
        assert_eq!(BinaryOp::Smaller.apply(1.0, 2.0), 1.0);
        assert_eq!(BinaryOp::SmallerOrEqual.apply(3.0, 2.0), 0.0);
        assert_eq!(BinaryOp::Equal.apply(2.0, 2.0), 1.0);
        assert_eq!(BinaryOp::NotEqual.apply(2.0, 2.0), 0.0);
        assert_eq!(BinaryOp::Atan2.apply(0.0, 1.0), 0.0);
    }
}
