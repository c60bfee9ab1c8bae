pub mod invite;
pub mod merchant;
