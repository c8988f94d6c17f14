use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::{Validate, ValidateEmail};

use crate::common::{is_blank, string_or_empty};
use crate::crud::Resource;
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::role::{Role, ALL_ROLES};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Credentials {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `POST /login` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

/// The signed-in user as returned by `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    /// Raw role string; may be a role this client does not know.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub role: String,
    #[serde(rename = "specialite", default)]
    pub specialty: Option<String>,
}

impl UserProfile {
    pub fn known_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// A live authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Staff account managed from the admin staff directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffUser {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub role: String,
    #[serde(rename = "specialite", default)]
    pub specialty: Option<String>,
}

impl StaffUser {
    pub fn role_label(&self) -> &str {
        Role::parse(&self.role)
            .map(|r| r.display_name())
            .unwrap_or(self.role.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    /// Blank on edit keeps the current password.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[serde(rename = "specialite", skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl UserForm {
    /// Change the role and drop a specialty the new role does not offer.
    pub fn set_role(&mut self, role: &str) {
        self.role = role.to_string();
        let allowed = Role::parse(role).map(|r| r.specialties()).unwrap_or(&[]);
        if let Some(current) = &self.specialty {
            if !allowed.contains(&current.as_str()) {
                self.specialty = None;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaffColumn {
    Name,
    Email,
    Role,
}

impl Searchable for StaffUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.specialty.as_deref().unwrap_or(""),
        ]
    }
}

impl Sortable for StaffUser {
    type Column = StaffColumn;

    fn compare_by(&self, other: &Self, column: StaffColumn) -> Ordering {
        match column {
            StaffColumn::Name => compare_text(&self.name, &other.name),
            StaffColumn::Email => compare_text(&self.email, &other.email),
            StaffColumn::Role => compare_text(self.role_label(), other.role_label()),
        }
    }
}

impl Resource for StaffUser {
    type Form = UserForm;
    const PATH: &'static str = "users";
    const NOUN: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> UserForm {
        UserForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: String::new(),
            role: self.role.clone(),
            specialty: self.specialty.clone().filter(|s| !is_blank(s)),
        }
    }

    fn validate(form: &UserForm, existing: &[Self], editing: Option<i64>) -> Result<(), AppError> {
        form.validate()?;

        let Some(role) = Role::parse(&form.role) else {
            return Err(AppError::invalid_field("role", "Unknown role"));
        };
        if editing.is_none() && form.password.chars().count() < 6 {
            return Err(AppError::invalid_field(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if let Some(specialty) = &form.specialty {
            if !role.specialties().contains(&specialty.as_str()) {
                return Err(AppError::invalid_field(
                    "specialite",
                    format!("{specialty} is not a specialty for {}", role.display_name()),
                ));
            }
        }
        let email = form.email.trim().to_lowercase();
        let taken = existing
            .iter()
            .any(|u| Some(u.id) != editing && u.email.trim().to_lowercase() == email);
        if taken {
            return Err(AppError::invalid_field("email", "This email is already in use"));
        }
        Ok(())
    }
}

/// Head count per known role, in [`ALL_ROLES`] order. Unknown roles are
/// left out.
pub fn head_counts<'a>(users: impl IntoIterator<Item = &'a StaffUser>) -> Vec<(Role, usize)> {
    let mut counts: Vec<(Role, usize)> = ALL_ROLES.iter().map(|r| (*r, 0)).collect();
    for user in users {
        let Some(role) = Role::parse(&user.role) else { continue };
        if let Some((_, n)) = counts.iter_mut().find(|(r, _)| *r == role) {
            *n += 1;
        }
    }
    counts
}

/// Employee choice for leave requests (`GET /users/conge`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Whether `email` looks like an address; used for optional email fields.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}
