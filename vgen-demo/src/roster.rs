use vgen::Vgen;

/// A fixed-size team with a signed rating.
#[derive(Debug, Clone, Vgen)]
pub struct Roster<T> {
    #[vgen("required,in=open,closed")]
    pub state: String,
    /// `required` is not enforced on sequences.
    #[vgen("required,len=3")]
    pub members: Vec<T>,
    #[vgen("min=-10,max=10")]
    pub rating: i32,
    /// Optional fields are not checked.
    #[vgen("required,min=1,max=1")]
    pub notes: Option<String>,
}

include!(concat!(env!("OUT_DIR"), "/roster_vgen.rs"));
