mod dialogs;
mod login;
mod posts;
mod roster;
