use vgen::Vgen;

/// Counters at the edges of the integer range.
#[derive(Debug, Clone, Default, Vgen)]
pub struct Tally {
    #[vgen("min=0,max=150")]
    pub unsigned: u128,
    #[vgen("min=-5,max=5")]
    pub signed: i128,
    #[vgen("required,max=100")]
    pub small: u8,
}

/// A borrowed integer is not checked.
#[derive(Debug, Clone, Vgen)]
pub struct Borrowed<'a> {
    #[vgen("required,max=150")]
    pub limit: &'a u32,
}

include!(concat!(env!("OUT_DIR"), "/tally_vgen.rs"));
