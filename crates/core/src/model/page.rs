use std::collections::HashSet;

use thiserror::Error;

use super::intro::Intro;
use super::section::Section;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
    #[error("section at position {0} has an empty id")]
    EmptySectionId(usize),
}

/// The whole document: intro block plus the ordered sections.
///
/// Built once; the section sequence is never reordered or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    intro: Intro,
    sections: Vec<Section>,
}

impl Page {
    pub fn new(intro: Intro, sections: Vec<Section>) -> Result<Self, PageError> {
        let mut seen = HashSet::with_capacity(sections.len());
        for (idx, section) in sections.iter().enumerate() {
            if section.id().is_empty() {
                return Err(PageError::EmptySectionId(idx));
            }
            if !seen.insert(section.id()) {
                return Err(PageError::DuplicateSection(section.id().to_string()));
            }
        }
        Ok(Self { intro, sections })
    }

    pub fn intro(&self) -> &Intro {
        &self.intro
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Position of section `id` in page order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
