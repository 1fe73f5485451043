use modfix_module::ModuleVersion;

/// Byte span of a statement in the manifest text.
///
/// `start` is the first byte of the first token, `end` one past the last token;
/// trailing comments are not included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    pub module: ModuleVersion,
    pub syntax: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclude {
    pub module: ModuleVersion,
    pub syntax: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    /// Version may be empty (replaces every version).
    pub old: ModuleVersion,
    /// Version is empty for a local directory replacement.
    pub new: ModuleVersion,
    pub syntax: Span,
}

/// A statement that references modules, as the locator walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    Require(&'a Require),
    Exclude(&'a Exclude),
    Replace(&'a Replace),
}

impl Statement<'_> {
    pub fn syntax(&self) -> Span {
        match self {
            Statement::Require(r) => r.syntax,
            Statement::Exclude(e) => e.syntax,
            Statement::Replace(r) => r.syntax,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Require(_) => "require",
            Statement::Exclude(_) => "exclude",
            Statement::Replace(_) => "replace",
        }
    }
}

/// Module-referencing statements of a parsed manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFile {
    pub require: Vec<Require>,
    pub exclude: Vec<Exclude>,
    pub replace: Vec<Replace>,
}
