use std::fmt;

/// One step of an encrypt/decrypt run, kept for explanatory display.
///
/// Records are appended in processing order, one per unit (a letter pair for
/// the digraph cipher, a byte or a number for the public-key cipher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    /// The unit being transformed, e.g. `"HE"` or `"'A'"`.
    pub unit: String,
    pub first: String,
    pub second: Option<String>,
    /// Name of the rule or formula that was applied.
    pub rule: &'static str,
    pub result: String,
}

impl TraceRecord {
    pub fn new(
        unit: impl Into<String>,
        first: impl Into<String>,
        second: Option<String>,
        rule: &'static str,
        result: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            first: first.into(),
            second,
            rule,
            result: result.into(),
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.unit, self.first)?;
        if let Some(second) = &self.second {
            write!(f, " | {second}")?;
        }
        write!(f, " | {} | {}", self.rule, self.result)
    }
}

/// Appends `record` when a trace is being collected.
pub fn push(trace: &mut Option<&mut Vec<TraceRecord>>, record: impl FnOnce() -> TraceRecord) {
    if let Some(records) = trace.as_deref_mut() {
        records.push(record());
    }
}
