//! Test fixture: rules that cannot be compiled.

use vgen::Vgen;

#[derive(Vgen)]
pub struct Account {
    #[vgen("len=5")]
    pub age: u32,
    #[vgen("required,uuid")]
    pub id: String,
}
