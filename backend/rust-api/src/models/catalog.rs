use serde::Serialize;

pub const LEVELS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

/// Subjects offered in menus, each with a handful of suggested topics.
/// Topics stay free text; the suggestions only seed placeholders.
pub const SUBJECTS: [(&str, [&str; 5]); 5] = [
    (
        "Math",
        ["Algebra", "Geometry", "Calculus", "Statistics", "Trigonometry"],
    ),
    (
        "Science",
        ["Physics", "Chemistry", "Biology", "Astronomy", "Earth Science"],
    ),
    (
        "History",
        [
            "Ancient History",
            "World Wars",
            "American History",
            "European History",
            "Asian History",
        ],
    ),
    (
        "English",
        ["Grammar", "Literature", "Writing Skills", "Poetry", "Shakespeare"],
    ),
    (
        "Computer Science",
        [
            "Programming Basics",
            "Algorithms",
            "Web Development",
            "Data Science",
            "Artificial Intelligence",
        ],
    ),
];

#[derive(Debug, Serialize)]
pub struct SubjectEntry {
    pub name: &'static str,
    pub topics: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub subjects: Vec<SubjectEntry>,
    pub levels: Vec<&'static str>,
}

pub fn subject_names() -> Vec<&'static str> {
    SUBJECTS.iter().map(|(name, _)| *name).collect()
}

pub fn topics_for(subject: &str) -> Option<&'static [&'static str]> {
    SUBJECTS
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, topics)| topics.as_slice())
}

pub fn catalog() -> CatalogResponse {
    CatalogResponse {
        subjects: SUBJECTS
            .iter()
            .map(|(name, topics)| SubjectEntry {
                name: *name,
                topics: topics.to_vec(),
            })
            .collect(),
        levels: LEVELS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_lookup() {
        assert_eq!(topics_for("Math").map(|t| t[0]), Some("Algebra"));
        assert!(topics_for("Cooking").is_none());
    }

    #[test]
    fn catalog_lists_every_subject() {
        let catalog = catalog();
        assert_eq!(catalog.subjects.len(), 5);
        assert_eq!(catalog.levels, vec!["Beginner", "Intermediate", "Advanced"]);
        assert_eq!(subject_names()[4], "Computer Science");
    }
}
