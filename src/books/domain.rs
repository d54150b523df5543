use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    // attribute returns the string form of a named attribute, used to match filters
    fn attribute(&self, name: &str) -> Option<String>;
}
