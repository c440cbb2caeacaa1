//! Slash command definitions and dispatch.
//!
//! The command surface stays thin: it parses options, calls the lifecycle
//! managers and turns their typed errors into user-facing replies. All
//! semantics live in the managers.

pub mod giveaway;
pub mod poll;

use serenity::all::CommandDataOption;

pub(crate) fn str_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

pub(crate) fn int_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

pub(crate) fn bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_bool())
}
