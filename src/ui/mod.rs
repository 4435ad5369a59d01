pub(crate) mod app;
pub(crate) mod form;
pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod screens;
pub(crate) mod theme;
pub(crate) mod util;


#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;

#[cfg(test)]
#[path = "list_tests.rs"]
mod list_tests;
