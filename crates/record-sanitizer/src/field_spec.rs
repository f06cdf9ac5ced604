//! Static field-kind table: the single source of truth for how every
//! numeric field in the payload schema is scaled.
//!
//! Paths use `.` to descend into objects and a `[]` suffix to apply the
//! rule to each element of an array. Every numeric field the typed record
//! declares must appear here; normalization is driven entirely by this
//! table rather than per-field code.

use scalar_normalizer::NumericKind;
use scalar_normalizer::NumericKind::{LargePercentage, PlainNumber, SmallPercentage};

/// Blocks that are legitimately absent from a payload. Entries under these
/// roots are skipped (not defaulted) when the block is missing, so the
/// output omits the section entirely.
pub const OPTIONAL_BLOCKS: &[&str] = &["deepDiveMetrics", "investmentThesis"];

pub const FIELD_KINDS: &[(&str, NumericKind)] = &[
    // Top level
    ("currentPrice", PlainNumber),
    ("riskFreeRate", SmallPercentage),
    ("beta", PlainNumber),
    ("lastRevenue", PlainNumber),
    // Scenarios
    ("scenarios[].intrinsicValue", PlainNumber),
    ("scenarios[].relativeValue", PlainNumber),
    ("scenarios[].upsideDownside", LargePercentage),
    ("scenarios[].assumptions.revenueGrowth", LargePercentage),
    ("scenarios[].assumptions.operatingMargin", LargePercentage),
    ("scenarios[].assumptions.taxRate", LargePercentage),
    ("scenarios[].assumptions.wacc", LargePercentage),
    ("scenarios[].assumptions.terminalGrowthRate", SmallPercentage),
    // Deep dive (optional block)
    ("deepDiveMetrics.equityRiskPremium", SmallPercentage),
    ("deepDiveMetrics.costOfEquity", LargePercentage),
    ("deepDiveMetrics.costOfDebt", SmallPercentage),
    ("deepDiveMetrics.roic", LargePercentage),
    ("deepDiveMetrics.reinvestmentRate", LargePercentage),
    ("deepDiveMetrics.pvTerminalValuePct", LargePercentage),
    ("deepDiveMetrics.interestCoverageRatio", PlainNumber),
    ("deepDiveMetrics.defaultSpread", SmallPercentage),
    ("deepDiveMetrics.debtToEquityRatio", LargePercentage),
    ("deepDiveMetrics.salesToCapitalRatio", PlainNumber),
    ("deepDiveMetrics.roe", LargePercentage),
    ("deepDiveMetrics.peRatio", PlainNumber),
    ("deepDiveMetrics.sectorPeRatio", PlainNumber),
    ("deepDiveMetrics.netDebtToEbitda", PlainNumber),
    ("deepDiveMetrics.marketCap", PlainNumber),
    ("deepDiveMetrics.enterpriseValue", PlainNumber),
    ("deepDiveMetrics.cashAndEquivalents", PlainNumber),
    ("deepDiveMetrics.preTaxOperatingMargin", LargePercentage),
    ("deepDiveMetrics.effectiveTaxRate", LargePercentage),
    ("deepDiveMetrics.dividendYield", SmallPercentage),
    ("deepDiveMetrics.fcfToFirm", PlainNumber),
    ("deepDiveMetrics.grossMargin", LargePercentage),
    ("deepDiveMetrics.pegRatio", PlainNumber),
    ("deepDiveMetrics.bookValuePerShare", PlainNumber),
    ("deepDiveMetrics.quarterlyHistory[].revenue", PlainNumber),
    ("deepDiveMetrics.quarterlyHistory[].netIncome", PlainNumber),
    ("deepDiveMetrics.quarterlyHistory[].eps", PlainNumber),
    ("deepDiveMetrics.lastFiscalYearRevenue", PlainNumber),
    ("deepDiveMetrics.lastFiscalYearNetIncome", PlainNumber),
    // Investment thesis (optional block)
    ("investmentThesis.marginOfSafety", LargePercentage),
    ("investmentThesis.evSalesTTM", PlainNumber),
    ("investmentThesis.evSalesFwd", PlainNumber),
    ("investmentThesis.justifiedEvSales", PlainNumber),
    ("investmentThesis.fwdPeg", PlainNumber),
    ("investmentThesis.justifiedPeg", PlainNumber),
    ("investmentThesis.fairValue", PlainNumber),
];
