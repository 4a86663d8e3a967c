use std::fmt;

/// Outcome class of a single finding, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Warn => write!(f, "WARN"),
            Verdict::Fail => write!(f, "FAIL"),
            Verdict::Error => write!(f, "ERROR"),
        }
    }
}

/// Leading symbol of a printed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Pass,
    AllClear,
    Warn,
    Fail,
    Error,
    Timing,
    Size,
    Responsive,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Pass => "✅",
            Symbol::AllClear => "🟢",
            Symbol::Warn => "⚠️",
            Symbol::Fail => "🔴",
            Symbol::Error => "❌",
            Symbol::Timing => "⏱️",
            Symbol::Size => "📏",
            Symbol::Responsive => "📱",
        }
    }
}

/// One printed verdict with an optional list of offending items
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub verdict: Verdict,
    pub symbol: Symbol,
    pub message: String,
    pub details: Vec<String>,
}

impl Finding {
    fn new(verdict: Verdict, symbol: Symbol, message: impl Into<String>) -> Self {
        Self {
            verdict,
            symbol,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(Verdict::Pass, Symbol::Pass, message)
    }

    /// Aggregate pass: nothing broken among the inspected items
    pub fn all_clear(message: impl Into<String>) -> Self {
        Self::new(Verdict::Pass, Symbol::AllClear, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Verdict::Warn, Symbol::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Verdict::Fail, Symbol::Fail, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Verdict::Error, Symbol::Error, message)
    }

    pub fn timing(message: impl Into<String>) -> Self {
        Self::new(Verdict::Pass, Symbol::Timing, message)
    }

    pub fn size(message: impl Into<String>) -> Self {
        Self::new(Verdict::Pass, Symbol::Size, message)
    }

    pub fn responsive(message: impl Into<String>) -> Self {
        Self::new(Verdict::Pass, Symbol::Responsive, message)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// The checks a run can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Content,
    Images,
    Links,
    LoadTime,
    Ssl,
    PageSize,
    Responsiveness,
    Console,
    Validation,
}

impl CheckKind {
    /// Whether the check needs a headless browser session
    pub fn needs_browser(&self) -> bool {
        matches!(self, CheckKind::Responsiveness | CheckKind::Console)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::Content => "content",
            CheckKind::Images => "images",
            CheckKind::Links => "links",
            CheckKind::LoadTime => "load-time",
            CheckKind::Ssl => "ssl",
            CheckKind::PageSize => "page-size",
            CheckKind::Responsiveness => "responsiveness",
            CheckKind::Console => "console",
            CheckKind::Validation => "validation",
        };
        write!(f, "{}", name)
    }
}

/// Findings of one check against one target, in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub check: CheckKind,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn new(check: CheckKind, findings: Vec<Finding>) -> Self {
        Self { check, findings }
    }

    /// Worst verdict among the findings; an empty report passes
    pub fn verdict(&self) -> Verdict {
        self.findings
            .iter()
            .map(|f| f.verdict)
            .max()
            .unwrap_or(Verdict::Pass)
    }

    pub fn is_failure(&self) -> bool {
        self.verdict() >= Verdict::Fail
    }
}
