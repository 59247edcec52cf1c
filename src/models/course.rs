//! Course catalogue data structures.

use serde::{Deserialize, Serialize};

/// A faculty (top level of the catalogue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Server-assigned identifier
    pub id: String,

    /// Faculty display name
    pub name: String,
}

/// A department within a faculty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Server-assigned identifier
    pub id: String,

    /// Department display name
    pub name: String,

    /// Owning faculty
    pub faculty_id: String,
}

/// A course offered by a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Server-assigned identifier
    pub id: String,

    /// Course code (e.g. "CS-201")
    pub code: String,

    /// Course title
    pub title: String,

    /// Owning department
    pub department_id: String,

    /// Semester label, if the course is term-bound
    #[serde(default)]
    pub semester: Option<String>,
}
