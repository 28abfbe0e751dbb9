pub mod user;

pub(crate) use user::UserDocument;
