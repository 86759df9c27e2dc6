use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::WINDOW_SEPARATOR;
use crate::error::VmError;

/// Inclusive `[low, high]` bound on the program counter and on memory accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionWindow {
    low: usize,
    high: usize,
}

impl ExecutionWindow {
    pub fn new(low: usize, high: usize) -> Result<Self, VmError> {
        if low > high {
            return Err(VmError::InvalidWindow { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    pub fn contains(&self, address: i64) -> bool {
        usize::try_from(address).is_ok_and(|address| (self.low..=self.high).contains(&address))
    }
}

impl fmt::Display for ExecutionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

impl FromStr for ExecutionWindow {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VmError::InvalidWindowSpec(s.to_string());

        let (low, high) = s.split_once(WINDOW_SEPARATOR).ok_or_else(invalid)?;
        let low = low.trim().parse::<usize>().map_err(|_| invalid())?;
        let high = high.trim().parse::<usize>().map_err(|_| invalid())?;

        Self::new(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        let window: ExecutionWindow = "0,1023".parse().unwrap();
        assert_eq!(window.low(), 0);
        assert_eq!(window.high(), 1023);

        let window: ExecutionWindow = " 4 , 9 ".parse().unwrap();
        assert_eq!((window.low(), window.high()), (4, 9));
    }

    #[test]
    fn test_parse_window_errors() {
        assert!(matches!(
            "10".parse::<ExecutionWindow>(),
            Err(VmError::InvalidWindowSpec(_))
        ));
        assert!(matches!(
            "a,b".parse::<ExecutionWindow>(),
            Err(VmError::InvalidWindowSpec(_))
        ));
        assert!(matches!(
            "-1,5".parse::<ExecutionWindow>(),
            Err(VmError::InvalidWindowSpec(_))
        ));
        assert_eq!(
            "9,3".parse::<ExecutionWindow>(),
            Err(VmError::InvalidWindow { low: 9, high: 3 })
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = ExecutionWindow::new(2, 5).unwrap();
        assert!(window.contains(2));
        assert!(window.contains(5));
        assert!(!window.contains(1));
        assert!(!window.contains(6));
        assert!(!window.contains(-1));
    }

    #[test]
    fn test_contains_with_unbounded_high() {
        let window: ExecutionWindow = format!("0,{}", usize::MAX).parse().unwrap();
        assert_eq!(window.high(), usize::MAX);
        assert!(window.contains(0));
        assert!(window.contains(3));
        assert!(window.contains(i64::MAX));
        assert!(!window.contains(-1));

        let window = ExecutionWindow::new(usize::MAX - 1, usize::MAX).unwrap();
        assert!(!window.contains(i64::MAX));
    }
}
