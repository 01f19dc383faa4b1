pub mod cardinal;
pub mod height;
pub mod parameter;
pub mod site;
