use heck::ToKebabCase;

/// The branch a release is cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>) -> Self {
        BranchContext { name: name.into() }
    }

    /// Tag suffix for feature-stage releases (e.g. "story/1190" -> "story-1190")
    pub fn stage_suffix(&self) -> String {
        self.name.to_kebab_case()
    }
}
