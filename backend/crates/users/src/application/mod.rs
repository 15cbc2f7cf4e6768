pub mod config;

#[cfg(test)]
mod tests;

pub mod login;
pub mod logout;
pub mod register;
pub mod update_profile;
pub mod user_image;
pub mod validation;
pub mod view_profile;
