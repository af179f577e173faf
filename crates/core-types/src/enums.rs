use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of work the engine knows how to decompose and aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Fraud,
    Risk,
    Portfolio,
    Primes,
    #[serde(rename = "prime-account")]
    PrimeAccount,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 5] = [
        WorkloadKind::Fraud,
        WorkloadKind::Risk,
        WorkloadKind::Portfolio,
        WorkloadKind::Primes,
        WorkloadKind::PrimeAccount,
    ];

    /// Number of sub-tasks a single request of this kind fans out to.
    pub fn fan_out(&self) -> usize {
        match self {
            WorkloadKind::Fraud => 11,
            WorkloadKind::Risk => 16,
            WorkloadKind::Portfolio => 8,
            WorkloadKind::Primes => 12,
            WorkloadKind::PrimeAccount => 1,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkloadKind::Fraud => "fraud",
            WorkloadKind::Risk => "risk",
            WorkloadKind::Portfolio => "portfolio",
            WorkloadKind::Primes => "primes",
            WorkloadKind::PrimeAccount => "prime-account",
        };
        f.write_str(name)
    }
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fraud" => Ok(WorkloadKind::Fraud),
            "risk" => Ok(WorkloadKind::Risk),
            "portfolio" => Ok(WorkloadKind::Portfolio),
            "primes" => Ok(WorkloadKind::Primes),
            "prime-account" => Ok(WorkloadKind::PrimeAccount),
            other => Err(format!("unknown workload kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_consistently() {
        for kind in WorkloadKind::ALL {
            assert_eq!(kind.to_string().parse::<WorkloadKind>(), Ok(kind));
        }
        assert!("options".parse::<WorkloadKind>().is_err());
    }

    #[test]
    fn fan_out_matches_decomposition() {
        assert_eq!(WorkloadKind::Fraud.fan_out(), 8 + 3);
        assert_eq!(WorkloadKind::Risk.fan_out(), 16);
        assert_eq!(WorkloadKind::PrimeAccount.fan_out(), 1);
    }
}
