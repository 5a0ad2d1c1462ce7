/// The submitted registration form
///
/// Field names are the form's `name` attributes. All nine are required;
/// their contents are not format-checked. The only limits enforced are the
/// column widths of the `user` and `patient` tables, so an over-long value is
/// reported as a validation failure instead of a database error.

use crate::sanitize::sanitize_owned;
use serde::Deserialize;
use std::fmt;
use validator::Validate;

#[derive(Clone, Deserialize, Validate)]
pub struct PatientRegistration {
    #[validate(length(max = 64, message = "Health insurance number must be at most 64 characters"))]
    pub health_insurance_number: String,

    #[validate(length(max = 100, message = "Area must be at most 100 characters"))]
    pub area: String,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: String,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub firstname: String,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub lastname: String,

    #[validate(length(max = 16, message = "Sex must be at most 16 characters"))]
    pub sex: String,

    #[validate(length(max = 32, message = "Phone number must be at most 32 characters"))]
    pub phonenumber: String,

    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    pub password: String,
}

impl PatientRegistration {
    /// Strips control characters from every field
    ///
    /// This includes the password, so the stored hash is of the stripped
    /// value. A password check against that hash has to strip the candidate
    /// with [`crate::sanitize::sanitize_owned`] before verifying.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            health_insurance_number: sanitize_owned(self.health_insurance_number),
            area: sanitize_owned(self.area),
            address: sanitize_owned(self.address),
            firstname: sanitize_owned(self.firstname),
            lastname: sanitize_owned(self.lastname),
            sex: sanitize_owned(self.sex),
            phonenumber: sanitize_owned(self.phonenumber),
            email: sanitize_owned(self.email),
            password: sanitize_owned(self.password),
        }
    }
}

// Submissions end up in logs on failure paths; keep the password out.
impl fmt::Debug for PatientRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatientRegistration")
            .field("health_insurance_number", &self.health_insurance_number)
            .field("area", &self.area)
            .field("address", &self.address)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("sex", &self.sex)
            .field("phonenumber", &self.phonenumber)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn jane_doe() -> PatientRegistration {
    PatientRegistration {
        health_insurance_number: "HI123".to_string(),
        area: "North".to_string(),
        address: "1 Main St".to_string(),
        firstname: "Jane".to_string(),
        lastname: "Doe".to_string(),
        sex: "F".to_string(),
        phonenumber: "555-0100".to_string(),
        email: "jane@example.com".to_string(),
        password: "secret".to_string(),
    }
}
