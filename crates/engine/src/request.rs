use core_types::{
    DistributedPrimeResult, FraudCheckResult, PortfolioOptimization, PrimeAccountCheck,
    RiskAssessment, WorkloadKind,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// A unified enum that represents any unit of work the engine accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadRequest {
    Fraud { account_id: u64, amount: Decimal },
    Risk { account_id: u64, balance: Decimal },
    Portfolio { account_id: u64, balance: Decimal },
    Primes { account_id: u64, range_size: usize },
    PrimeAccount { account_id: u64 },
}

impl WorkloadRequest {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            WorkloadRequest::Fraud { .. } => WorkloadKind::Fraud,
            WorkloadRequest::Risk { .. } => WorkloadKind::Risk,
            WorkloadRequest::Portfolio { .. } => WorkloadKind::Portfolio,
            WorkloadRequest::Primes { .. } => WorkloadKind::Primes,
            WorkloadRequest::PrimeAccount { .. } => WorkloadKind::PrimeAccount,
        }
    }

    pub fn account_id(&self) -> u64 {
        match self {
            WorkloadRequest::Fraud { account_id, .. }
            | WorkloadRequest::Risk { account_id, .. }
            | WorkloadRequest::Portfolio { account_id, .. }
            | WorkloadRequest::Primes { account_id, .. }
            | WorkloadRequest::PrimeAccount { account_id } => *account_id,
        }
    }
}

/// The typed result of a `WorkloadRequest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "workload", rename_all = "lowercase")]
pub enum WorkloadOutcome {
    Fraud(FraudCheckResult),
    Risk(RiskAssessment),
    Portfolio(PortfolioOptimization),
    Primes(DistributedPrimeResult),
    #[serde(rename = "prime-account")]
    PrimeAccount(PrimeAccountCheck),
}

impl WorkloadOutcome {
    pub fn computation_time_nanos(&self) -> u64 {
        match self {
            WorkloadOutcome::Fraud(r) => r.computation_time_nanos,
            WorkloadOutcome::Risk(r) => r.computation_time_nanos,
            WorkloadOutcome::Portfolio(r) => r.computation_time_nanos,
            WorkloadOutcome::Primes(r) => r.computation_time_nanos,
            WorkloadOutcome::PrimeAccount(r) => r.computation_time_nanos,
        }
    }
}
