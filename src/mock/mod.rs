//! Mock data backend
//!
//! Generated collections used by the CLI when no data file is given, and by
//! tests that need a realistic entity type with typed field names.

mod users;

pub use users::{
    generate_user_documents, generate_users, mock_user, mock_users_source, User, UserField,
    UserType,
};
