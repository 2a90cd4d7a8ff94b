use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ApplicationStatus;

/// One submitted application under review.
///
/// Profile fields are free-form text. Only `full_name` is required, and the
/// server never validates it beyond what the store enforces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub university_name: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
    /// Messaging contact (`WhatsApp` number).
    pub whatsapp: Option<String>,
    pub nationality: Option<String>,
    pub current_country: Option<String>,
    pub degree: Option<String>,
    /// Current major.
    pub majors: Option<String>,
    pub china_major_1: Option<String>,
    pub china_major_2: Option<String>,
    pub china_major_3: Option<String>,
}

impl Application {
    /// Every textual field a reviewer can search on, status included.
    #[must_use]
    pub fn text_fields(&self) -> [Option<&str>; 12] {
        [
            Some(self.full_name.as_str()),
            self.email.as_deref(),
            self.whatsapp.as_deref(),
            self.university_name.as_deref(),
            self.nationality.as_deref(),
            self.current_country.as_deref(),
            self.degree.as_deref(),
            self.majors.as_deref(),
            self.china_major_1.as_deref(),
            self.china_major_2.as_deref(),
            self.china_major_3.as_deref(),
            Some(self.status.as_str()),
        ]
    }
}

/// Fields accepted by the public submission intake.
///
/// The public form posts `university` and `major`; both are accepted as
/// aliases. `status` stays raw here and is checked by the workflow engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewApplication {
    #[serde(default, alias = "university")]
    pub university_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub current_country: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default, alias = "major")]
    pub majors: Option<String>,
    #[serde(default)]
    pub china_major_1: Option<String>,
    #[serde(default)]
    pub china_major_2: Option<String>,
    #[serde(default)]
    pub china_major_3: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewApplication {
    /// Turn empty optional fields into `None` so they read back as absent.
    ///
    /// `full_name` is left untouched; the store decides whether it is acceptable.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn blank_to_none(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        Self {
            university_name: blank_to_none(self.university_name),
            full_name: self.full_name,
            email: blank_to_none(self.email),
            whatsapp: blank_to_none(self.whatsapp),
            nationality: blank_to_none(self.nationality),
            current_country: blank_to_none(self.current_country),
            degree: blank_to_none(self.degree),
            majors: blank_to_none(self.majors),
            china_major_1: blank_to_none(self.china_major_1),
            china_major_2: blank_to_none(self.china_major_2),
            china_major_3: blank_to_none(self.china_major_3),
            status: blank_to_none(self.status),
        }
    }
}
