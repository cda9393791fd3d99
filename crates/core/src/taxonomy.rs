#![forbid(unsafe_code)]

//! Static tag vocabulary shared by every board.
//!
//! Classification never fails: a tag outside the catalog is `FreeForm` and
//! the caller decides policy (the store accepts it but reports it).

pub const WORK_TYPE_TAGS: &[&str] = &[
    "feature",
    "bug",
    "chore",
    "refactor",
    "testing",
    "documentation",
    "research",
    "design",
    "planning",
    "spike",
];

pub const DOMAIN_TAGS: &[&str] = &[
    "frontend",
    "backend",
    "database",
    "api",
    "infrastructure",
    "ci-cd",
    "security",
    "performance",
    "accessibility",
    "ui-ux",
    "algorithm",
    "devtools",
    "config",
    "logging",
];

pub const MANAGEMENT_TAGS: &[&str] = &[
    "communication",
    "training",
    "review",
    "devops",
    "maintenance",
    "meta",
    "support",
];

pub const PRIORITY_TAGS: &[&str] = &[
    "urgent",
    "high-priority",
    "medium-priority",
    "low-priority",
    "not-planned",
    "blocked",
];

const CATEGORIES: &[(&str, &[&str])] = &[
    ("work-type", WORK_TYPE_TAGS),
    ("domain", DOMAIN_TAGS),
    ("management", MANAGEMENT_TAGS),
    ("priority", PRIORITY_TAGS),
];

/// Workload sizing tags. Stored on tasks as plain tags; the weight feeds
/// reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Workload {
    Nothing,
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl Workload {
    pub const ALL: &[Workload] = &[
        Workload::Nothing,
        Workload::Tiny,
        Workload::Small,
        Workload::Medium,
        Workload::Large,
        Workload::Huge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Workload::Nothing => "Nothing",
            Workload::Tiny => "Tiny",
            Workload::Small => "Small",
            Workload::Medium => "Medium",
            Workload::Large => "Large",
            Workload::Huge => "Huge",
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Workload::Nothing => 0,
            Workload::Tiny => 1,
            Workload::Small => 2,
            Workload::Medium => 3,
            Workload::Large => 5,
            Workload::Huge => 8,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Workload> {
        Workload::ALL
            .iter()
            .copied()
            .find(|workload| workload.as_str() == tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagClass {
    /// Member of a named taxonomy category.
    Category(&'static str),
    /// Workload sizing value with its numeric weight.
    Workload(Workload),
    /// Not in the catalog; permitted, surfaced as advisory.
    FreeForm,
}

/// Immutable tag catalog. Constructed once and injected into the store so
/// nothing reaches for global state.
#[derive(Clone, Copy, Debug)]
pub struct Taxonomy {
    categories: &'static [(&'static str, &'static [&'static str])],
}

impl Taxonomy {
    pub fn builtin() -> Self {
        Self {
            categories: CATEGORIES,
        }
    }

    pub fn categories(&self) -> &'static [(&'static str, &'static [&'static str])] {
        self.categories
    }

    pub fn classify(&self, tag: &str) -> TagClass {
        if let Some(workload) = Workload::from_tag(tag) {
            return TagClass::Workload(workload);
        }
        for (category, members) in self.categories {
            if members.contains(&tag) {
                return TagClass::Category(category);
            }
        }
        TagClass::FreeForm
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}
