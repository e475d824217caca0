//! Skill taxonomy: ordered categories of canonical skill phrases.
//!
//! Phrase order matters. The taxonomy policy reports found/missing skills in
//! the order they appear here, so `react` is listed before `sql` and `python`
//! before `sql`.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::normalize::normalize;
use crate::matching::MatchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Immutable after construction. Every phrase is stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
}

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "tech",
        &[
            "javascript",
            "typescript",
            "python",
            "java",
            "c++",
            "c#",
            "golang",
            "rust",
            "ruby",
            "php",
            "react",
            "angular",
            "vue",
            "node",
            "node.js",
            "django",
            "flask",
            "spring boot",
            "html",
            "css",
            "sql",
            "graphql",
            "rest api",
            "microservices",
        ],
    ),
    (
        "design",
        &[
            "figma",
            "sketch",
            "adobe xd",
            "photoshop",
            "illustrator",
            "ui design",
            "ux design",
            "user research",
            "wireframing",
            "prototyping",
            "typography",
        ],
    ),
    (
        "data",
        &[
            "machine learning",
            "deep learning",
            "data analysis",
            "data visualization",
            "statistics",
            "pandas",
            "numpy",
            "tableau",
            "power bi",
            "excel",
            "tensorflow",
            "pytorch",
            "big data",
        ],
    ),
    (
        "marketing",
        &[
            "seo",
            "content marketing",
            "social media",
            "email marketing",
            "google analytics",
            "copywriting",
            "branding",
            "market research",
            "campaign management",
        ],
    ),
    (
        "management",
        &[
            "project management",
            "product management",
            "agile",
            "scrum",
            "kanban",
            "stakeholder management",
            "budgeting",
            "operations",
            "supply chain",
            "risk management",
        ],
    ),
    (
        "soft",
        &[
            "communication",
            "leadership",
            "teamwork",
            "problem solving",
            "collaboration",
            "time management",
            "critical thinking",
            "adaptability",
        ],
    ),
    (
        "tools",
        &[
            "git",
            "github",
            "docker",
            "kubernetes",
            "jenkins",
            "jira",
            "confluence",
            "aws",
            "azure",
            "gcp",
            "linux",
            "terraform",
        ],
    ),
];

static BUILTIN: Lazy<SkillTaxonomy> = Lazy::new(|| {
    SkillTaxonomy::new(
        BUILTIN_CATEGORIES
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: (*name).to_string(),
                skills: skills.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect(),
    )
});

impl SkillTaxonomy {
    /// Normalizes every phrase and drops the ones that normalize to nothing.
    /// Duplicate phrases within a category are kept once.
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        let categories = categories
            .into_iter()
            .map(|category| {
                let mut skills: Vec<String> = Vec::with_capacity(category.skills.len());
                for skill in category.skills {
                    let phrase = normalize(&skill).into_inner();
                    if !phrase.is_empty() && !skills.contains(&phrase) {
                        skills.push(phrase);
                    }
                }
                SkillCategory {
                    name: category.name.trim().to_lowercase(),
                    skills,
                }
            })
            .collect();

        Self { categories }
    }

    /// The taxonomy compiled into the binary.
    pub fn builtin() -> &'static SkillTaxonomy {
        &BUILTIN
    }

    /// Parses a JSON array of `{"name": .., "skills": [..]}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, MatchError> {
        let categories: Vec<SkillCategory> = serde_json::from_str(json).map_err(|e| {
            MatchError::ConfigurationMissing(format!("skill taxonomy is not valid JSON: {e}"))
        })?;

        let taxonomy = Self::new(categories);
        if taxonomy.is_empty() {
            return Err(MatchError::ConfigurationMissing(
                "skill taxonomy contains no skill phrases".to_string(),
            ));
        }
        Ok(taxonomy)
    }

    pub fn from_path(path: &Path) -> Result<Self, MatchError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MatchError::ConfigurationMissing(format!(
                "failed to read skill taxonomy {}: {e}",
                path.display()
            ))
        })?;

        let taxonomy = Self::from_json_str(&json)?;
        info!(
            "Loaded skill taxonomy from {} ({} categories, {} phrases)",
            path.display(),
            taxonomy.categories.len(),
            taxonomy.phrase_count()
        );
        Ok(taxonomy)
    }

    /// Categories in configuration order.
    pub fn lookup_categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Every phrase across every category, in taxonomy order. A phrase listed
    /// under two categories is yielded twice.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
    }

    pub fn phrase_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    /// True when there is no phrase to match against.
    pub fn is_empty(&self) -> bool {
        self.phrase_count() == 0
    }
}
