use crate::pass::{Category, Requirement};

#[derive(Debug, Default)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub clipboard: bool,
    pub saved: bool,
    pub default: bool,
    pub save: bool,
    pub quiet: bool,
    pub length: Option<usize>,
    pub number: Option<usize>,
    pub seed: Option<u64>,
    pub output: Option<String>,
    /// Per-category overrides, indexed by [`Category::index`].
    pub requirements: [Option<Requirement>; Category::COUNT],
}

impl CliFlags {
    pub fn requirement(&self, cat: Category) -> Option<Requirement> {
        self.requirements[cat.index()]
    }

    pub fn set_requirement(&mut self, cat: Category, req: Requirement) {
        self.requirements[cat.index()] = Some(req);
    }
}
