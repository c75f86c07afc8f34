pub mod output;
pub mod parameter;
pub mod resource;
pub mod template;

use std::fmt;

/// The three declaration sections of a template document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Parameters,
    Resources,
    Outputs,
}

impl Section {
    /// Hard limits on the number of declarations per section.
    pub const fn limit(self) -> usize {
        match self {
            Self::Parameters => 200,
            Self::Resources => 500,
            Self::Outputs => 200,
        }
    }

    /// Top-level key in the rendered document.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Parameters => "Parameters",
            Self::Resources => "Resources",
            Self::Outputs => "Outputs",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Parameters => "parameter",
            Self::Resources => "resource",
            Self::Outputs => "output",
        };
        write!(f, "{}", s)
    }
}
