//! Test fixture: a tag segment without a rule name.

use vgen::Vgen;

#[derive(Vgen)]
pub struct Product {
    #[vgen("required,=5")]
    pub sku: String,
}
