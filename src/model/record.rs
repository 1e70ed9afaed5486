use serde::{Deserialize, Serialize};

/// Column names of the output file, in record field order
pub const RECORD_HEADERS: [&str; 9] = [
    "Name",
    "Gender and Age",
    "Contact",
    "Email",
    "Education",
    "Experience",
    "City",
    "Teaching Location",
    "About Me",
];

/// One tutor profile as scraped from its profile page
///
/// Records are compared by value: two profiles reached through different
/// links but carrying identical fields are the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Gender and Age")]
    pub gender_age: String,

    #[serde(rename = "Contact")]
    pub contact: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Education")]
    pub education: String,

    #[serde(rename = "Experience")]
    pub experience: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "Teaching Location")]
    pub teaching_location: String,

    #[serde(rename = "About Me")]
    pub about_me: String,
}
