//! Abstract syntax tree for GMakefile programs.

use serde::Serialize;

/// Every directive closed by one parse pass, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Program {
    pub directives: Vec<Directive>,
}

impl Program {
    /// Find a directive by name.
    ///
    /// Names are not unique; the first match in source order wins and later
    /// duplicates are unreachable.
    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// A named block of commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub name: String,
    pub commands: Vec<Command>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }
}

/// One semicolon-terminated command: a program followed by its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Command {
    pub parts: Vec<String>,
}

impl Command {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.parts.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.parts.join(" "))
    }
}
