//! Course catalog: loading, category filtering and enrollment teasers.

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub title: String,
    pub category: String,
    pub level: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug)]
pub enum CatalogError {
    /// The header row could not be read.
    Header(String),
    /// No usable course rows.
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Header(e) => write!(f, "Invalid catalog header: {}", e),
            CatalogError::Empty => write!(f, "Catalog contains no courses"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Category selected by the filter buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a button's `data-category` value; `"all"` selects everything.
    pub fn from_data_category(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn data_category(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(c) => c,
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => course.category == *c,
        }
    }
}

/// Parse the catalog CSV. Rows that fail to parse or repeat a title are skipped.
pub fn read_courses_from_csv_string(csv_content: &str) -> Result<Vec<Course>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());
    reader
        .headers()
        .map_err(|e| CatalogError::Header(e.to_string()))?;

    let mut courses = Vec::new();
    let mut seen_titles = HashSet::new();
    for (i, row) in reader.deserialize::<Course>().enumerate() {
        let course = match row {
            Ok(c) => c,
            Err(e) => {
                debug!("Warning: skipping catalog row {}: {}", i + 2, e);
                continue;
            }
        };
        if !seen_titles.insert(course.title.clone()) {
            debug!("Warning: duplicate course '{}' on row {}, skipping", course.title, i + 2);
            continue;
        }
        courses.push(course);
    }

    if courses.is_empty() {
        return Err(CatalogError::Empty);
    }
    info!("Loaded {} courses from catalog", courses.len());
    Ok(courses)
}

/// Categories in first-seen order.
pub fn categories(courses: &[Course]) -> Vec<&str> {
    let mut seen = HashSet::new();
    courses
        .iter()
        .map(|c| c.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

pub fn filter_courses<'a>(courses: &'a [Course], filter: &CategoryFilter) -> Vec<&'a Course> {
    courses.iter().filter(|c| filter.matches(c)).collect()
}

pub fn enrollment_message(title: &str) -> String {
    format!("Enrollment for \"{}\" coming soon!", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,category,level,duration,description
Rust Basics,programming,Beginner,4 weeks,\"Ownership, borrowing\"
Logo Design,design,Beginner,2 weeks,Shapes and type
Rust Basics,programming,Beginner,4 weeks,duplicate
Broken Row,design
SQL Deep Dive,programming,Advanced,6 weeks,Indexes and plans
";

    #[test]
    fn skips_malformed_and_duplicate_rows() {
        let courses = read_courses_from_csv_string(SAMPLE).unwrap();
        let titles: Vec<_> = courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Rust Basics", "Logo Design", "SQL Deep Dive"]);
        assert_eq!(courses[0].description, "Ownership, borrowing");
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let err = read_courses_from_csv_string("title,category,level,duration,description\n");
        assert!(matches!(err, Err(CatalogError::Empty)));
    }

    #[test]
    fn all_filter_shows_everything() {
        let courses = read_courses_from_csv_string(SAMPLE).unwrap();
        assert_eq!(filter_courses(&courses, &CategoryFilter::All).len(), 3);
        let design = CategoryFilter::from_data_category("design");
        let shown = filter_courses(&courses, &design);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Logo Design");
        assert_eq!(CategoryFilter::from_data_category("all"), CategoryFilter::All);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let courses = read_courses_from_csv_string(SAMPLE).unwrap();
        assert_eq!(categories(&courses), ["programming", "design"]);
    }

    #[test]
    fn bundled_catalog_parses() {
        let courses = read_courses_from_csv_string(include_str!("courses.csv")).unwrap();
        assert_eq!(courses.len(), 9);
        assert_eq!(categories(&courses), ["programming", "design", "marketing", "business"]);
    }

    #[test]
    fn enrollment_teaser_quotes_title() {
        assert_eq!(
            enrollment_message("Startup Finance"),
            "Enrollment for \"Startup Finance\" coming soon!"
        );
    }
}
