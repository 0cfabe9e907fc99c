/*!
 This module defines common utilities used while decoding and displaying records.
*/

pub mod bytes;
pub mod dates;
pub mod diagnostics;
pub mod plist;
