//! Legacy PPT (OLE/CFB) support.
//!
//! Confirms `.ppt` files by their compound-file signature and reports which
//! PowerPoint streams a compound file holds.

pub mod compound;

pub use compound::{
    has_compound_signature, inspect, matches_signature, CompoundInfo, OLE_SIGNATURE,
};
