pub mod user;

pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, Role, SanitizedUser, TokenResponse, User,
    UserPatch,
};
