//! Test fixture: the reference User struct.

use vgen::Vgen;

#[derive(Debug, Clone, Default, Vgen)]
pub struct User {
    #[vgen("required,min=2,max=50")]
    pub name: String,
    #[vgen("required,email")]
    pub email: String,
    #[vgen("required,min=0,max=150")]
    pub age: u32,
    #[vgen("len=5")]
    pub city: String,
    #[vgen("in=active,pending,disabled")]
    pub status: String,
}
