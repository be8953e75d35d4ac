//! Domain and wire types.

pub mod auth;
pub mod registration;
pub mod user;

pub use auth::{AuthPayload, AuthRequest, OAuthProvider, OAuthRequest};
pub use registration::{CreateStudentRequest, MentorApplication, MentorRegistrationRequest, PhotoUpload, ProfilePhoto};
pub use user::{MentorProfile, Role, StudentProfile, UserCommon, UserId, UserRecord};
