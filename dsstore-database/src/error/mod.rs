/*!
 Errors that can happen when decoding `.DS_Store` data.
*/

pub mod field;
pub mod store;
